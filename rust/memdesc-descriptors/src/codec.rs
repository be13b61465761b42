//! Encoding of whole descriptor lists through the ordered-primitive stream.
//!
//! Layout: `tag("DescList") u64(mem_type) tag(kind) u64(count)` followed by
//! one length-prefixed blob per descriptor, in list order.

use std::marker::PhantomData;

use memdesc_common::{Error, MemType, Result, Status, try_or_ret_some_err};
use memdesc_serdes::{PrimitiveRead, PrimitiveWrite};

use crate::{DescList, Descriptor};

const LIST_TAG: &str = "DescList";

impl<T: Descriptor> DescList<'_, T> {
    /// Writes the list to `writer`.
    ///
    /// Failures of the underlying stream are reported as a [`Status`]; the
    /// list itself is never modified. On failure the stream holds a partial
    /// encoding and should be discarded.
    pub fn serialize<W: PrimitiveWrite + ?Sized>(&self, writer: &mut W) -> Status {
        let result = self.write_to(writer);
        if let Err(e) = &result {
            log::debug!(
                "failed to serialize {} list of {} {} descriptors: {}",
                self.mem_type(),
                self.len(),
                T::KIND,
                e
            );
        }
        Status::from(&result)
    }

    fn write_to<W: PrimitiveWrite + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_tag(LIST_TAG)?;
        writer.write_u64(self.mem_type().tag() as u64)?;
        writer.write_tag(T::KIND)?;
        writer.write_u64(self.len() as u64)?;
        let mut scratch = Vec::new();
        for desc in self.iter() {
            scratch.clear();
            desc.encode_into(&mut scratch);
            writer.write_bytes(&scratch)?;
        }
        Ok(())
    }
}

impl<T: Descriptor> DescList<'static, T> {
    /// Reads a list written by [`DescList::serialize`] and returns it as a
    /// new owning list.
    ///
    /// Any malformed element, a mismatched descriptor kind or a truncated
    /// stream fails the whole construction.
    pub fn deserialize<R: PrimitiveRead + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.read_tag(LIST_TAG)?;
        let mem_type = MemType::try_from(reader.read_u64()?)?;
        reader.read_tag(T::KIND)?;
        let count = reader.read_u64()?;
        let count = usize::try_from(count)
            .map_err(|_| Error::invalid_format("DescList", format!("count {count} too large")))?;

        let descs = ElementDecoder::<R, T>::new(reader, count).collect::<Result<Vec<_>>>()?;
        log::trace!(
            "decoded {} list of {} {} descriptors",
            mem_type,
            descs.len(),
            T::KIND
        );
        Ok(DescList::from_owned_parts(mem_type, descs))
    }
}

/// Iterator pulling `count` encoded descriptors off a stream.
///
/// Iteration should stop at the first error; the stream position is
/// undefined afterwards.
pub struct ElementDecoder<'r, R: ?Sized, T> {
    reader: &'r mut R,
    remaining: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<'r, R: PrimitiveRead + ?Sized, T: Descriptor> ElementDecoder<'r, R, T> {
    pub fn new(reader: &'r mut R, count: usize) -> Self {
        ElementDecoder {
            reader,
            remaining: count,
            _marker: PhantomData,
        }
    }
}

impl<R: PrimitiveRead + ?Sized, T: Descriptor> Iterator for ElementDecoder<'_, R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let bytes = try_or_ret_some_err!(self.reader.read_bytes());
        Some(T::from_bytes(&bytes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The count comes from the stream; do not let collectors
        // preallocate on its word.
        (0, Some(self.remaining))
    }
}
