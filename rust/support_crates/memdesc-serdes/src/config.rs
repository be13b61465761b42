/// Largest single byte span accepted by default when reading a stream.
const DEFAULT_MAX_FIELD_LEN: usize = 64 * 1024 * 1024;

/// Limits applied by [`Serializer`](crate::Serializer) and
/// [`Deserializer`](crate::Deserializer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerDesConfig {
    /// Upper bound on the total size of a serialized stream. Writes that
    /// would grow the buffer past it fail.
    pub max_buffer_len: usize,

    /// Upper bound on the declared length of a single byte span. Guards the
    /// reader against allocating on a corrupted length prefix.
    pub max_field_len: usize,
}

impl Default for SerDesConfig {
    fn default() -> Self {
        SerDesConfig {
            max_buffer_len: usize::MAX,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

impl SerDesConfig {
    pub fn with_max_buffer_len(mut self, max_buffer_len: usize) -> Self {
        self.max_buffer_len = max_buffer_len;
        self
    }

    pub fn with_max_field_len(mut self, max_field_len: usize) -> Self {
        self.max_field_len = max_field_len;
        self
    }

    pub fn validate(&self) -> memdesc_common::Result<()> {
        memdesc_common::verify_arg!(max_buffer_len, self.max_buffer_len > 0);
        memdesc_common::verify_arg!(max_field_len, self.max_field_len > 0);
        Ok(())
    }
}
