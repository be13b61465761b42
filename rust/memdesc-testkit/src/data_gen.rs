//! Data generation utilities for testing.
//!
//! Generated ranges are drawn from a small address window on a handful of
//! devices, so that random pairs frequently touch, nest and overlap.

use memdesc_common::MemType;
use memdesc_descriptors::{
    BlobDesc, RangeDesc, RegDescList, RemoteDesc, RemoteDescList, XferDescList,
};

/// Upper bound (exclusive) of generated device ids.
pub const DEVICE_COUNT: u64 = 3;

/// Upper bound (exclusive) of generated addresses.
pub const ADDR_SPAN: usize = 256;

/// Seeded generator of descriptors.
pub struct DescGen {
    rng: fastrand::Rng,
}

impl DescGen {
    pub fn new(seed: u64) -> DescGen {
        DescGen {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn range(&mut self) -> RangeDesc {
        let dev_id = self.rng.u64(..DEVICE_COUNT);
        self.range_on(dev_id)
    }

    /// A range on the given device. About one in eight ranges is empty.
    pub fn range_on(&mut self, dev_id: u64) -> RangeDesc {
        let addr = self.rng.usize(..ADDR_SPAN);
        let len = if self.rng.u8(..8) == 0 {
            0
        } else {
            self.rng.usize(1..=64)
        };
        RangeDesc::new(addr, len, dev_id)
    }

    pub fn blob(&mut self) -> BlobDesc {
        let meta_len = self.rng.usize(..32);
        let meta = (0..meta_len).map(|_| self.rng.u8(..)).collect::<Vec<_>>();
        BlobDesc::from_base(self.range(), meta)
    }

    pub fn remote(&mut self) -> RemoteDesc {
        let agent = format!("agent-{}", self.rng.u32(..16));
        RemoteDesc::from_base(self.range(), agent)
    }

    pub fn mem_type(&mut self) -> MemType {
        MemType::ALL[self.rng.usize(..MemType::ALL.len())]
    }

    pub fn ranges(&mut self, count: usize) -> Vec<RangeDesc> {
        (0..count).map(|_| self.range()).collect()
    }

    pub fn xfer_list(&mut self, count: usize) -> XferDescList<'static> {
        let mem_type = self.mem_type();
        XferDescList::from_descs(mem_type, self.ranges(count))
    }

    pub fn reg_list(&mut self, count: usize) -> RegDescList<'static> {
        let mem_type = self.mem_type();
        let descs = (0..count).map(|_| self.blob()).collect::<Vec<_>>();
        RegDescList::from_descs(mem_type, descs)
    }

    pub fn remote_list(&mut self, count: usize) -> RemoteDescList<'static> {
        let mem_type = self.mem_type();
        let descs = (0..count).map(|_| self.remote()).collect::<Vec<_>>();
        RemoteDescList::from_descs(mem_type, descs)
    }
}

/// Hand-picked ranges around the interesting boundaries: empty ranges,
/// touching ranges, and ranges whose end does not fit in `usize`.
pub fn edge_ranges() -> Vec<RangeDesc> {
    vec![
        RangeDesc::new(0, 0, 0),
        RangeDesc::new(0, 10, 1),
        RangeDesc::new(10, 5, 1),
        RangeDesc::new(10, 0, 1),
        RangeDesc::new(9, 1, 1),
        RangeDesc::new(0, usize::MAX, 1),
        RangeDesc::new(usize::MAX, 0, 1),
        RangeDesc::new(usize::MAX, 1, 1),
        RangeDesc::new(usize::MAX - 1, usize::MAX, 1),
        RangeDesc::new(usize::MAX, usize::MAX, u64::MAX),
    ]
}
