use std::fmt;

use memdesc_common::{Error, Result};

use crate::descriptor::{Descriptor, decode_extended, encode_extended};
use crate::RangeDesc;

/// A [`RangeDesc`] tagged with the agent whose address space it belongs to.
///
/// Remote addresses are only meaningful within the owning agent, so the
/// agent name is part of the descriptor's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoteDesc {
    pub desc: RangeDesc,
    pub remote_agent: String,
}

impl RemoteDesc {
    pub fn new(addr: usize, len: usize, dev_id: u64, remote_agent: impl Into<String>) -> RemoteDesc {
        RemoteDesc::from_base(RangeDesc::new(addr, len, dev_id), remote_agent)
    }

    pub fn from_base(desc: RangeDesc, remote_agent: impl Into<String>) -> RemoteDesc {
        RemoteDesc {
            desc,
            remote_agent: remote_agent.into(),
        }
    }

    #[inline]
    pub fn remote_agent(&self) -> &str {
        &self.remote_agent
    }
}

impl From<RangeDesc> for RemoteDesc {
    fn from(desc: RangeDesc) -> Self {
        RemoteDesc {
            desc,
            remote_agent: String::new(),
        }
    }
}

impl AsRef<RangeDesc> for RemoteDesc {
    fn as_ref(&self) -> &RangeDesc {
        &self.desc
    }
}

impl Descriptor for RemoteDesc {
    const KIND: &'static str = "remote";

    #[inline]
    fn base(&self) -> &RangeDesc {
        &self.desc
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        encode_extended(&self.desc, self.remote_agent.as_bytes(), out);
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (desc, payload) = decode_extended(bytes, "RemoteDesc")?;
        let remote_agent = std::str::from_utf8(payload)
            .map_err(|e| Error::invalid_format("RemoteDesc", format!("agent name: {e}")))?;
        Ok(RemoteDesc::from_base(desc, remote_agent))
    }
}

impl fmt::Display for RemoteDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, agent: {}", self.desc, self.remote_agent)
    }
}
