use byteorder::{LE, WriteBytesExt};
use memdesc_common::{Error, Result, verify_arg};

use crate::{PrimitiveWrite, SerDesConfig};

/// In-memory [`PrimitiveWrite`] implementation.
///
/// Every write is all-or-nothing: when the configured buffer limit would be
/// exceeded, nothing is appended and the call fails.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    buf: Vec<u8>,
    config: SerDesConfig,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer::default()
    }

    pub fn with_config(config: SerDesConfig) -> Result<Serializer> {
        config.validate()?;
        Ok(Serializer {
            buf: Vec::new(),
            config,
        })
    }

    pub fn config(&self) -> &SerDesConfig {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Discards everything written so far.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    fn reserve_checked(&mut self, additional: usize) -> Result<()> {
        let requested = self
            .buf
            .len()
            .checked_add(additional)
            .ok_or_else(|| Error::capacity_exceeded(usize::MAX, self.config.max_buffer_len))?;
        if requested > self.config.max_buffer_len {
            log::debug!(
                "serializer limit reached: {} > {} bytes",
                requested,
                self.config.max_buffer_len
            );
            return Err(Error::capacity_exceeded(
                requested,
                self.config.max_buffer_len,
            ));
        }
        self.buf.reserve(additional);
        Ok(())
    }
}

impl PrimitiveWrite for Serializer {
    fn write_tag(&mut self, tag: &str) -> Result<()> {
        verify_arg!(tag, tag.len() <= u16::MAX as usize);
        self.reserve_checked(2 + tag.len())?;
        self.buf.write_u16::<LE>(tag.len() as u16)?;
        self.buf.extend_from_slice(tag.as_bytes());
        Ok(())
    }

    fn write_u64(&mut self, value: u64) -> Result<()> {
        self.reserve_checked(8)?;
        self.buf.write_u64::<LE>(value)?;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve_checked(8 + bytes.len())?;
        self.buf.write_u64::<LE>(bytes.len() as u64)?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}
