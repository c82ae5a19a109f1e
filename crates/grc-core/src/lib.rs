#![deny(missing_docs)]
#![doc = "Shared error types and canonical serde helpers for the GRC dashboard workspace."]

pub mod errors;
pub mod serde;

pub use errors::{ErrorInfo, GrcError};
pub use crate::serde::{from_json_slice, from_yaml_slice, to_canonical_json_bytes};
