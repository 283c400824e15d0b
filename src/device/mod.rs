//! Device interaction module
//!
//! Holds the driver abstraction the rest of the tool is written against.
//! Hardware bindings live outside this crate; the built-in mock driver in
//! [`crate::testdb`] is the in-tree implementation of the contract.

pub mod traits;

pub use traits::CameraDriver;
