//! Ordered-primitive serialization used to exchange descriptor lists.
//!
//! The stream is a flat sequence of primitives written and read back in the
//! same order. Three primitives exist, all little-endian:
//!
//! - tag: `u16` length followed by UTF-8 bytes, used as a checked marker,
//! - integer: `u64`,
//! - bytes: `u64` length followed by the payload.
//!
//! [`PrimitiveWrite`] and [`PrimitiveRead`] are the seams the descriptor
//! layer is written against; [`Serializer`] and [`Deserializer`] are the
//! in-memory implementations.

pub mod config;
pub mod deserializer;
pub mod serializer;

pub use config::SerDesConfig;
pub use deserializer::Deserializer;
pub use serializer::Serializer;

use memdesc_common::Result;

/// Write side of the ordered-primitive stream.
pub trait PrimitiveWrite {
    /// Appends a marker tag.
    fn write_tag(&mut self, tag: &str) -> Result<()>;

    /// Appends an unsigned integer.
    fn write_u64(&mut self, value: u64) -> Result<()>;

    /// Appends a length-prefixed byte span.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Read side of the ordered-primitive stream.
pub trait PrimitiveRead {
    /// Consumes a marker tag and fails unless it equals `expected`.
    fn read_tag(&mut self, expected: &str) -> Result<()>;

    /// Consumes an unsigned integer.
    fn read_u64(&mut self) -> Result<u64>;

    /// Consumes a length-prefixed byte span.
    fn read_bytes(&mut self) -> Result<Vec<u8>>;
}

impl<W: PrimitiveWrite + ?Sized> PrimitiveWrite for &mut W {
    fn write_tag(&mut self, tag: &str) -> Result<()> {
        (**self).write_tag(tag)
    }

    fn write_u64(&mut self, value: u64) -> Result<()> {
        (**self).write_u64(value)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(bytes)
    }
}

impl<R: PrimitiveRead + ?Sized> PrimitiveRead for &mut R {
    fn read_tag(&mut self, expected: &str) -> Result<()> {
        (**self).read_tag(expected)
    }

    fn read_u64(&mut self) -> Result<u64> {
        (**self).read_u64()
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>> {
        (**self).read_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_header(w: &mut impl PrimitiveWrite) -> Result<()> {
        w.write_tag("hdr")?;
        w.write_u64(3)?;
        w.write_bytes(b"abc")
    }

    fn read_header(r: &mut impl PrimitiveRead) -> Result<(u64, Vec<u8>)> {
        r.read_tag("hdr")?;
        Ok((r.read_u64()?, r.read_bytes()?))
    }

    #[test]
    fn test_generic_round_trip() {
        let mut ser = Serializer::new();
        write_header(&mut ser).unwrap();
        let mut de = Deserializer::new(ser.as_bytes());
        assert_eq!(read_header(&mut de).unwrap(), (3, b"abc".to_vec()));
        assert!(de.is_exhausted());
    }

    #[test]
    fn test_layout() {
        let mut ser = Serializer::new();
        ser.write_tag("t").unwrap();
        ser.write_u64(0x0102).unwrap();
        assert_eq!(
            ser.as_bytes(),
            &[1, 0, b't', 0x02, 0x01, 0, 0, 0, 0, 0, 0]
        );
    }
}
