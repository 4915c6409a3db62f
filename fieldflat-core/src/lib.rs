#![warn(missing_docs)]
//! fieldflat Core - Structural Flattening Engine
//!
//! This crate provides the record model and the traversals built on it:
//! - `Node` / `Record` capability traits (implemented by `#[derive(Record)]`)
//! - `Value` leaves and runtime `RecordValue`s
//! - Path flattening (`flatten_paths`) for column headers
//! - Mapping conversion (`to_mapping`) for summaries
//! - Value flattening (`flatten_values`) for table rows
//! - Sequence flattening (`flatten_sequence`) for nested lists

mod convert;
mod error;
mod leaf;
mod mapping;
mod paths;
mod predicate;
mod record;
mod sequence;
mod value;

pub use convert::to_mapping;
pub use error::FlattenError;
pub use mapping::{Entry, Mapping};
pub use paths::{PATH_SEPARATOR, flatten_paths, flatten_paths_with_separator, flatten_values};
pub use record::{Field, Node, Record, RecordValue};
pub use sequence::flatten_sequence;
pub use value::Value;

/// Ordered map used for dictionary leaves.
pub use indexmap::IndexMap;
