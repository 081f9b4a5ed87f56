//! Record filtering and decoding.
//!
//! The processing layer selects dynamic [`crate::types::Record`]s that match a nested filter
//! specification and decodes them into a typed target.
//!
//! Currently implemented:
//!
//! - [`parse_filters()`]: flatten a filter specification into [`Predicates`]
//! - [`filter_records()`]: select matching records and decode them
//! - [`convert()`]: structural decode of any serializable value
//!
//! ## Example: filter → decode
//!
//! ```rust
//! use schema_filter::processing::filter_records;
//! use schema_filter::types::{DataType, Field, Schema, SchemaType};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct Address {
//!     city: String,
//! }
//!
//! impl SchemaType for Address {
//!     fn data_type() -> DataType {
//!         DataType::Record(Schema::new(vec![
//!             Field::new("City", String::data_type()).with_tag("city"),
//!         ]))
//!     }
//! }
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct User {
//!     name: String,
//!     address: Address,
//! }
//!
//! impl SchemaType for User {
//!     fn data_type() -> DataType {
//!         DataType::Record(Schema::new(vec![
//!             Field::new("Name", String::data_type()).with_tag("name"),
//!             Field::new("Address", Address::data_type()).with_tag("address"),
//!         ]))
//!     }
//! }
//!
//! let records = json!({
//!     "u1": {"name": "Ann", "address": {"city": "Rome"}},
//!     "u2": {"name": "Bo", "address": {"city": "Oslo"}}
//! });
//!
//! // Filters use the internal field names.
//! let spec = json!({"Address": {"City": "Rome"}});
//!
//! let users = filter_records::<User>(records.as_object().unwrap(), spec.as_object().unwrap())
//!     .unwrap();
//! assert_eq!(users.len(), 1);
//! assert_eq!(users["u1"].name, "Ann");
//! ```

pub mod convert;
pub mod filter;
pub mod observability;

pub use convert::convert;
pub use filter::{
    filter_records, filter_records_with_options, parse_filters, values_equal, FilterOptions, Predicates,
};
pub use observability::{
    CompositeObserver, FilterContext, FilterObserver, FilterSeverity, FilterStats, StdErrObserver,
};
