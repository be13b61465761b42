//! The closed set of descriptor kinds a [`DescList`](crate::DescList) can hold.

use std::fmt;

use byteorder::{LE, ReadBytesExt, WriteBytesExt};
use memdesc_common::{Error, Result};

use crate::RangeDesc;

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::RangeDesc {}
    impl Sealed for crate::BlobDesc {}
    impl Sealed for crate::RemoteDesc {}
}

/// Common surface of [`RangeDesc`], [`BlobDesc`](crate::BlobDesc) and
/// [`RemoteDesc`](crate::RemoteDesc).
///
/// The trait is sealed: the two extended kinds wrap a `RangeDesc` by value
/// and add one field each, and no other kinds exist.
pub trait Descriptor:
    sealed::Sealed + Clone + Default + PartialEq + fmt::Debug + fmt::Display
{
    /// Marker written into list encodings so that a list of one kind is
    /// never decoded as another.
    const KIND: &'static str;

    /// The address range this descriptor names.
    fn base(&self) -> &RangeDesc;

    /// Strips any extra field, keeping only the range triple.
    #[inline]
    fn to_basic(&self) -> RangeDesc {
        *self.base()
    }

    /// Appends the encoded descriptor to `out`.
    fn encode_into(&self, out: &mut Vec<u8>);

    /// Decodes one descriptor blob. Short, long or otherwise malformed input
    /// is an error.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }
}

impl Descriptor for RangeDesc {
    const KIND: &'static str = "range";

    #[inline]
    fn base(&self) -> &RangeDesc {
        self
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        self.write_header(out);
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        RangeDesc::from_bytes(bytes)
    }
}

/// Encodes `header || payload_len || payload`.
pub(crate) fn encode_extended(base: &RangeDesc, payload: &[u8], out: &mut Vec<u8>) {
    out.reserve(RangeDesc::ENCODED_LEN + 8 + payload.len());
    base.write_header(out);
    let _ = out.write_u64::<LE>(payload.len() as u64);
    out.extend_from_slice(payload);
}

/// Splits an extended blob into its range header and payload. The declared
/// payload length must match the remaining bytes exactly.
pub(crate) fn decode_extended<'a>(bytes: &'a [u8], element: &str) -> Result<(RangeDesc, &'a [u8])> {
    let mut input = bytes;
    let base = RangeDesc::read_header(&mut input)
        .map_err(|_| Error::invalid_format(element, "truncated range header"))?;
    let declared = input
        .read_u64::<LE>()
        .map_err(|_| Error::invalid_format(element, "missing payload length"))?;
    if declared != input.len() as u64 {
        log::debug!(
            "{} payload length mismatch: declared {}, available {}",
            element,
            declared,
            input.len()
        );
        return Err(Error::invalid_format(
            element,
            format!(
                "declared payload of {declared} bytes, found {}",
                input.len()
            ),
        ));
    }
    Ok((base, input))
}
