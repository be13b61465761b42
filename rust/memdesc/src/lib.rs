//! # memdesc: descriptor data model for heterogeneous-memory transfers
//!
//! A transfer engine moving data between host memory, device memory, block
//! storage and files needs a common way to name the ranges involved, both
//! when registering memory and when requesting transfers. This workspace
//! provides that vocabulary:
//!
//! * [`descriptors`] - range, blob and remote descriptors and the
//!   owning/borrowed [`DescList`](descriptors::DescList) container
//! * [`serdes`] - the ordered-primitive stream lists are exchanged through
//! * [`common`] - errors, status codes and the memory-type enumeration
//!
//! Data movement, transport, agent registry and memory registration side
//! effects live in the layers above and are not part of this crate.
//!
//! ## Example
//!
//! ```
//! use memdesc::common::{MemType, Status};
//! use memdesc::descriptors::{RangeDesc, XferDescList};
//! use memdesc::serdes::{Deserializer, Serializer};
//!
//! let mut list = XferDescList::new(MemType::Vram);
//! list.add_desc(RangeDesc::new(0x1000, 4096, 0)).unwrap();
//! assert_eq!(list.get_index(&RangeDesc::new(0x1800, 16, 0)), Some(0));
//!
//! let mut ser = Serializer::new();
//! assert_eq!(list.serialize(&mut ser), Status::Success);
//! let decoded = XferDescList::deserialize(&mut Deserializer::new(ser.as_bytes())).unwrap();
//! assert_eq!(decoded, list);
//!
//! // A view borrows the list and refuses to change it.
//! let mut view = list.as_view();
//! assert!(view.clear().is_err());
//! ```

pub use memdesc_common as common;
pub use memdesc_descriptors as descriptors;
pub use memdesc_serdes as serdes;
