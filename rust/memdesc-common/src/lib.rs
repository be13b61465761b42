//! Core definitions relied upon by all memdesc-* crates: the error type,
//! the status-code vocabulary and the memory-type enumeration.

pub mod error;
pub mod macros;
pub mod mem_type;
pub mod result;
pub mod status;

pub use error::{Error, ErrorKind};
pub use mem_type::MemType;
pub use result::Result;
pub use status::Status;
