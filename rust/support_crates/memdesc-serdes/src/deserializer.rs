use byteorder::{LE, ReadBytesExt};
use memdesc_common::{Error, Result};

use crate::{PrimitiveRead, SerDesConfig};

/// [`PrimitiveRead`] implementation over a borrowed byte slice.
///
/// A failed read may leave the cursor partially advanced; callers treat
/// any error as fatal for the whole stream.
#[derive(Debug, Clone)]
pub struct Deserializer<'a> {
    data: &'a [u8],
    input: &'a [u8],
    config: SerDesConfig,
}

impl<'a> Deserializer<'a> {
    pub fn new(data: &'a [u8]) -> Deserializer<'a> {
        Deserializer {
            data,
            input: data,
            config: SerDesConfig::default(),
        }
    }

    pub fn with_config(data: &'a [u8], config: SerDesConfig) -> Result<Deserializer<'a>> {
        config.validate()?;
        Ok(Deserializer {
            data,
            input: data,
            config,
        })
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.data.len() - self.input.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.input.is_empty()
    }

    fn take(&mut self, len: usize, element: &str) -> Result<&'a [u8]> {
        if len > self.input.len() {
            log::debug!(
                "truncated {} at offset {}: need {} bytes, have {}",
                element,
                self.position(),
                len,
                self.input.len()
            );
            return Err(Error::invalid_format(
                element,
                format!(
                    "declared length {len} exceeds the remaining {} bytes",
                    self.input.len()
                ),
            ));
        }
        let (head, tail) = self.input.split_at(len);
        self.input = tail;
        Ok(head)
    }
}

impl PrimitiveRead for Deserializer<'_> {
    fn read_tag(&mut self, expected: &str) -> Result<()> {
        let len = self.input.read_u16::<LE>()? as usize;
        let tag = self.take(len, "tag")?;
        if tag != expected.as_bytes() {
            return Err(Error::invalid_format(
                "tag",
                format!(
                    "expected '{expected}', found '{}'",
                    String::from_utf8_lossy(tag)
                ),
            ));
        }
        Ok(())
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(self.input.read_u64::<LE>()?)
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.input.read_u64::<LE>()?;
        let len = usize::try_from(len)
            .ok()
            .filter(|&len| len <= self.config.max_field_len)
            .ok_or_else(|| {
                Error::invalid_format(
                    "bytes",
                    format!(
                        "declared length {len} exceeds the field limit of {}",
                        self.config.max_field_len
                    ),
                )
            })?;
        Ok(self.take(len, "bytes")?.to_vec())
    }
}
