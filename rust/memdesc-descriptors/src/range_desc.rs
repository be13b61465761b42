//! `RangeDesc`: a single contiguous address range on one device.

use std::cmp::Ordering;
use std::fmt;

use byteorder::{LE, ReadBytesExt, WriteBytesExt};
use memdesc_common::{Error, Result};

/// One contiguous addressable range: host or device memory, a block-store
/// volume, or a file.
///
/// `addr` is a pointer, a block offset or a file offset depending on the
/// memory type of the list the descriptor belongs to; `dev_id` scopes the
/// address space (device, volume or file id).
///
/// Ordering is by `dev_id`, then `addr`, then `len`.
///
/// The `#[repr(C)]` layout has no padding on either 32- or 64-bit targets,
/// which allows raw, natively laid out descriptor arrays to be borrowed
/// without copying (see [`RangeDesc::slice_from_raw`]).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeDesc {
    /// Start of the buffer, block or offset in file.
    pub addr: usize,
    /// Length of the range in bytes.
    pub len: usize,
    /// Device, block or file id.
    pub dev_id: u64,
}

impl RangeDesc {
    /// Size of the encoded form produced by [`RangeDesc::to_bytes`].
    pub const ENCODED_LEN: usize = 24;

    #[inline]
    pub const fn new(addr: usize, len: usize, dev_id: u64) -> RangeDesc {
        RangeDesc { addr, len, dev_id }
    }

    /// Exclusive end of the range, or `None` when `addr + len` does not fit
    /// in `usize`.
    #[inline]
    pub fn end(&self) -> Option<usize> {
        self.addr.checked_add(self.len)
    }

    /// Half-open bounds widened so that `start + len` cannot wrap.
    #[inline]
    fn bounds(&self) -> (u128, u128) {
        let start = self.addr as u128;
        (start, start + self.len as u128)
    }

    /// Returns `true` if `query` lies on the same device and its range is
    /// entirely inside this one.
    ///
    /// A zero-length query is covered whenever its address falls within this
    /// range, both boundaries included.
    pub fn covers(&self, query: &RangeDesc) -> bool {
        if self.dev_id != query.dev_id {
            return false;
        }
        let (start, end) = self.bounds();
        let (q_start, q_end) = query.bounds();
        start <= q_start && q_end <= end
    }

    /// Returns `true` if both ranges lie on the same device and intersect.
    ///
    /// Ranges are half-open, so touching ranges do not overlap, and a
    /// zero-length range overlaps nothing, itself included.
    pub fn overlaps(&self, query: &RangeDesc) -> bool {
        if self.dev_id != query.dev_id || self.len == 0 || query.len == 0 {
            return false;
        }
        let (start, end) = self.bounds();
        let (q_start, q_end) = query.bounds();
        start < q_end && q_start < end
    }

    /// Encodes the descriptor as `addr || len || dev_id`, each a
    /// little-endian `u64`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LEN);
        self.write_header(&mut out);
        out
    }

    /// Decodes a blob produced by [`RangeDesc::to_bytes`].
    ///
    /// The blob must be exactly [`RangeDesc::ENCODED_LEN`] bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<RangeDesc> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(Error::invalid_format(
                "RangeDesc",
                format!(
                    "expected {} bytes, got {}",
                    Self::ENCODED_LEN,
                    bytes.len()
                ),
            ));
        }
        let mut input = bytes;
        Self::read_header(&mut input)
    }

    pub(crate) fn write_header(&self, out: &mut Vec<u8>) {
        // Writing into a Vec cannot fail.
        let _ = out.write_u64::<LE>(self.addr as u64);
        let _ = out.write_u64::<LE>(self.len as u64);
        let _ = out.write_u64::<LE>(self.dev_id);
    }

    pub(crate) fn read_header(input: &mut &[u8]) -> Result<RangeDesc> {
        let addr = read_usize(input, "addr")?;
        let len = read_usize(input, "len")?;
        let dev_id = input.read_u64::<LE>()?;
        Ok(RangeDesc { addr, len, dev_id })
    }

    /// Reinterprets a natively laid out array of descriptors in place.
    ///
    /// Fails when `raw` is misaligned for `RangeDesc` or its length is not a
    /// multiple of the descriptor size.
    pub fn slice_from_raw(raw: &[u8]) -> Result<&[RangeDesc]> {
        bytemuck::try_cast_slice(raw)
            .map_err(|e| Error::invalid_arg("raw", format!("cannot view as descriptors: {e}")))
    }

    /// Exposes a descriptor array as its native in-memory bytes.
    pub fn slice_as_raw(descs: &[RangeDesc]) -> &[u8] {
        bytemuck::cast_slice(descs)
    }
}

fn read_usize(input: &mut &[u8], element: &str) -> Result<usize> {
    let value = input.read_u64::<LE>()?;
    usize::try_from(value).map_err(|_| {
        Error::invalid_format(element, format!("{value:#x} does not fit the address width"))
    })
}

impl PartialOrd for RangeDesc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RangeDesc {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.dev_id, self.addr, self.len).cmp(&(other.dev_id, other.addr, other.len))
    }
}

impl fmt::Display for RangeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "addr: {:#x}, len: {}, devID: {}",
            self.addr, self.len, self.dev_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let d = RangeDesc::new(0x1000, 4096, 7);
        let bytes = d.to_bytes();
        assert_eq!(bytes.len(), RangeDesc::ENCODED_LEN);
        assert_eq!(&bytes[..8], &0x1000u64.to_le_bytes());
        assert_eq!(RangeDesc::from_bytes(&bytes).unwrap(), d);

        let max = RangeDesc::new(usize::MAX, usize::MAX, u64::MAX);
        assert_eq!(RangeDesc::from_bytes(&max.to_bytes()).unwrap(), max);
    }

    #[test]
    fn test_malformed_blob() {
        let bytes = RangeDesc::new(1, 2, 3).to_bytes();
        assert!(RangeDesc::from_bytes(&bytes[..23]).is_err());
        assert!(RangeDesc::from_bytes(&[]).is_err());
        let mut long = bytes.clone();
        long.push(0);
        assert!(RangeDesc::from_bytes(&long).is_err());
    }

    #[test]
    fn test_ordering() {
        let a = RangeDesc::new(100, 10, 1);
        let b = RangeDesc::new(0, 10, 2);
        let c = RangeDesc::new(100, 20, 1);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
        let mut v = vec![b, c, a];
        v.sort();
        assert_eq!(v, vec![a, c, b]);
    }

    #[test]
    fn test_covers() {
        let d = RangeDesc::new(100, 50, 5);
        assert!(d.covers(&RangeDesc::new(110, 10, 5)));
        assert!(d.covers(&d));
        assert!(!d.covers(&RangeDesc::new(110, 10, 9)));
        assert!(!d.covers(&RangeDesc::new(140, 20, 5)));
        assert!(!d.covers(&RangeDesc::new(90, 20, 5)));

        // Zero-length queries are covered up to and including the end.
        assert!(d.covers(&RangeDesc::new(100, 0, 5)));
        assert!(d.covers(&RangeDesc::new(150, 0, 5)));
        assert!(!d.covers(&RangeDesc::new(151, 0, 5)));
    }

    #[test]
    fn test_overlaps() {
        let a = RangeDesc::new(0, 10, 1);
        let b = RangeDesc::new(10, 5, 1);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let c = RangeDesc::new(9, 5, 1);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
        assert!(!a.overlaps(&RangeDesc::new(5, 5, 2)));

        let empty = RangeDesc::new(5, 0, 1);
        assert!(!empty.overlaps(&empty));
        assert!(!a.overlaps(&empty));
        assert!(a.covers(&empty));
    }

    #[test]
    fn test_no_wraparound() {
        let top = RangeDesc::new(usize::MAX - 10, 100, 1);
        let low = RangeDesc::new(0, 10, 1);
        assert_eq!(top.end(), None);
        assert!(!top.overlaps(&low));
        assert!(!low.overlaps(&top));
        assert!(!top.covers(&low));
        assert!(!low.covers(&RangeDesc::new(5, usize::MAX, 1)));
        assert!(top.covers(&RangeDesc::new(usize::MAX, 50, 1)));
    }

    #[test]
    fn test_raw_view() {
        let descs = vec![RangeDesc::new(1, 2, 3), RangeDesc::new(4, 5, 6)];
        let raw = RangeDesc::slice_as_raw(&descs);
        assert_eq!(raw.len(), 2 * std::mem::size_of::<RangeDesc>());
        assert_eq!(RangeDesc::slice_from_raw(raw).unwrap(), &descs[..]);
        assert!(RangeDesc::slice_from_raw(&raw[..raw.len() - 1]).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RangeDesc::new(0x1000, 4096, 7).to_string(),
            "addr: 0x1000, len: 4096, devID: 7"
        );
    }
}
