use std::fmt;

use memdesc_common::Result;

use crate::descriptor::{Descriptor, decode_extended, encode_extended};
use crate::RangeDesc;

/// A [`RangeDesc`] bundled with an opaque metadata blob, used when
/// registering memory. The blob is carried as-is and never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlobDesc {
    pub desc: RangeDesc,
    pub meta_info: Vec<u8>,
}

impl BlobDesc {
    pub fn new(addr: usize, len: usize, dev_id: u64, meta_info: impl Into<Vec<u8>>) -> BlobDesc {
        BlobDesc::from_base(RangeDesc::new(addr, len, dev_id), meta_info)
    }

    pub fn from_base(desc: RangeDesc, meta_info: impl Into<Vec<u8>>) -> BlobDesc {
        BlobDesc {
            desc,
            meta_info: meta_info.into(),
        }
    }

    #[inline]
    pub fn meta_info(&self) -> &[u8] {
        &self.meta_info
    }

    pub fn into_parts(self) -> (RangeDesc, Vec<u8>) {
        (self.desc, self.meta_info)
    }
}

impl From<RangeDesc> for BlobDesc {
    fn from(desc: RangeDesc) -> Self {
        BlobDesc {
            desc,
            meta_info: Vec::new(),
        }
    }
}

impl AsRef<RangeDesc> for BlobDesc {
    fn as_ref(&self) -> &RangeDesc {
        &self.desc
    }
}

impl Descriptor for BlobDesc {
    const KIND: &'static str = "blob";

    #[inline]
    fn base(&self) -> &RangeDesc {
        &self.desc
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        encode_extended(&self.desc, &self.meta_info, out);
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (desc, payload) = decode_extended(bytes, "BlobDesc")?;
        Ok(BlobDesc::from_base(desc, payload))
    }
}

impl fmt::Display for BlobDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, metaInfo: {} bytes", self.desc, self.meta_info.len())
    }
}
