//! `schema-filter` selects loosely-typed nested records that match a filter written against a
//! typed schema, then decodes the matches into that schema type.
//!
//! Records are dynamic maps ([`types::Record`], i.e. JSON objects nested to any depth). Filters
//! are nested maps keyed by the target type's *internal* field names; the target type
//! describes itself through [`types::SchemaType`], including the *external* (serialized) name
//! of every field. Filtering:
//!
//! 1. flattens the filter into leaf paths with [`walk::walk_leaves`],
//! 2. translates each internal path into an external path with [`path`] resolution,
//! 3. keeps the records whose leaves satisfy every predicate (exact equality, or membership
//!    when the expected value is a list),
//! 4. decodes the survivors into the target type via a JSON round trip.
//!
//! Filter leaves that do not resolve against the schema are ignored rather than reported as
//! errors. Only a non-record target type ([`FilterError::Schema`]) and a matching record that
//! does not decode ([`FilterError::Decode`]) fail a call.
//!
//! ## Quick example
//!
//! ```rust
//! use schema_filter::processing::filter_records;
//! use schema_filter::types::{DataType, Field, Schema, SchemaType};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct Server {
//!     region: String,
//!     #[serde(default)]
//!     cores: u32,
//! }
//!
//! impl SchemaType for Server {
//!     fn data_type() -> DataType {
//!         DataType::Record(Schema::new(vec![
//!             Field::new("Region", String::data_type()).with_tag("region"),
//!             Field::new("Cores", u32::data_type()).with_tag("cores,omitempty"),
//!         ]))
//!     }
//! }
//!
//! let records = json!({
//!     "a": {"region": "eu", "cores": 8},
//!     "b": {"region": "us", "cores": 8},
//!     "c": "not a record"
//! });
//! let spec = json!({"Region": "eu", "Cores": [4, 8]});
//!
//! let servers = filter_records::<Server>(records.as_object().unwrap(), spec.as_object().unwrap())
//!     .unwrap();
//! assert_eq!(servers.len(), 1);
//! assert_eq!(servers["a"].cores, 8);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: dynamic records and schema descriptors
//! - [`path`]: internal → external path resolution
//! - [`walk`]: deterministic leaf traversal of nested records
//! - [`processing`]: filtering, decoding and observability
//! - [`error`]: error types

pub mod error;
pub mod path;
pub mod processing;
pub mod types;
pub mod walk;

pub use error::{FilterError, FilterResult};
