//! Classification of the address space a descriptor lives in.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Memory/storage segment type shared by every descriptor of a list.
///
/// The numeric tag returned by [`MemType::tag`] is part of the list
/// encoding and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum MemType {
    /// Host memory.
    Dram = 0,
    /// Device (GPU) memory.
    Vram = 1,
    /// Block storage volume.
    Block = 2,
    /// Object store or network-registered memory.
    Object = 3,
    /// File, addressed by offset.
    File = 4,
}

impl MemType {
    pub const ALL: [MemType; 5] = [
        MemType::Dram,
        MemType::Vram,
        MemType::Block,
        MemType::Object,
        MemType::File,
    ];

    #[inline]
    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemType::Dram => "DRAM",
            MemType::Vram => "VRAM",
            MemType::Block => "BLOCK",
            MemType::Object => "OBJECT",
            MemType::File => "FILE",
        }
    }
}

impl TryFrom<u32> for MemType {
    type Error = Error;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        MemType::ALL
            .get(tag as usize)
            .copied()
            .ok_or_else(|| Error::invalid_format("mem_type", format!("unknown tag {tag}")))
    }
}

impl TryFrom<u64> for MemType {
    type Error = Error;

    fn try_from(tag: u64) -> Result<Self, Self::Error> {
        let tag = u32::try_from(tag)
            .map_err(|_| Error::invalid_format("mem_type", format!("unknown tag {tag}")))?;
        MemType::try_from(tag)
    }
}

impl FromStr for MemType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MemType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::invalid_arg("mem_type", format!("unknown memory type '{s}'")))
    }
}

impl fmt::Display for MemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
