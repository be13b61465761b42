//! Descriptor data model for heterogeneous-memory transfers.
//!
//! A descriptor names one contiguous addressable range (host memory, device
//! memory, block storage or file) by address or offset, length and a
//! device/block/file id. Descriptors travel in typed, ordered lists: the
//! currency of registration and transfer requests.
//!
//! # Key Types
//!
//! - [`RangeDesc`] - the `(addr, len, dev_id)` triple with ordering,
//!   containment and overlap tests
//! - [`BlobDesc`] - a range plus an opaque metadata blob, used at
//!   registration
//! - [`RemoteDesc`] - a range plus the name of the agent that owns it
//! - [`DescList`] - a list of one descriptor kind tagged with a
//!   [`MemType`](memdesc_common::MemType), either owning or borrowed
//!
//! The three kinds implement the sealed [`Descriptor`] trait, which is what
//! `DescList` is generic over.

pub mod blob_desc;
pub mod codec;
pub mod desc_list;
pub mod descriptor;
pub mod range_desc;
pub mod remote_desc;

pub use blob_desc::BlobDesc;
pub use codec::ElementDecoder;
pub use desc_list::DescList;
pub use descriptor::Descriptor;
pub use range_desc::RangeDesc;
pub use remote_desc::RemoteDesc;

/// List of plain ranges, used to describe transfers.
pub type XferDescList<'a> = DescList<'a, RangeDesc>;

/// List of ranges with registration metadata.
pub type RegDescList<'a> = DescList<'a, BlobDesc>;

/// List of ranges living in other agents' address spaces.
pub type RemoteDescList<'a> = DescList<'a, RemoteDesc>;
