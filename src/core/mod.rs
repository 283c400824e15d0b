//! Core functionality module
//!
//! Contains the hardware-independent building blocks of the tool: error
//! types, the notification hub, the option-list models used for discrete
//! device settings, and the filename templating engine.
//!
//! # Submodules
//!
//! - `error` - Error types and result aliases
//! - `notify` - Generic publish/subscribe hub
//! - `options` - Cursor models over enumerated setting values
//! - `formatter` - Filename templating engine

pub mod error;
pub mod formatter;
pub mod notify;
pub mod options;
