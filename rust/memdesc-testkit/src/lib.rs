//! Test utilities for the memdesc crates.
//!
//! - [`data_gen`]: seeded generators of descriptors and descriptor lists,
//!   plus a fixed set of boundary cases.

pub mod data_gen;

pub use data_gen::DescGen;
