//! Translation of internal field paths into external (serialized) paths.
//!
//! A path is a `.`-joined list of segments. Internal paths use the schema's own field names;
//! external paths use the names from each field's serialization tag. Resolution walks the
//! schema left to right and never fails for an individual path: it stops at the first segment
//! with no matching field and returns whatever prefix it has built so far.

use crate::error::{FilterError, FilterResult};
use crate::types::{DataType, Schema, SchemaType};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

impl Schema {
    /// Resolve one internal path against this schema.
    ///
    /// - A segment with no matching field stops resolution.
    /// - A field without an external name contributes nothing to the result, but resolution
    ///   still descends through it when it is a nested record.
    /// - Resolution stops once the current field is not a record.
    ///
    /// The result is empty when no segment resolved to an external name.
    pub fn resolve(&self, path: &str) -> String {
        let mut schema = self;
        let mut external: Vec<&str> = Vec::new();
        let mut segments = path.split(PATH_SEPARATOR).peekable();

        while let Some(segment) = segments.next() {
            let Some(field) = schema.field(segment) else {
                break;
            };
            if let Some(name) = field.external_name() {
                external.push(name);
            }
            if segments.peek().is_none() {
                break;
            }
            match field.data_type.as_record() {
                Some(nested) => schema = nested,
                None => break,
            }
        }

        external.join(".")
    }
}

/// Resolve internal paths against the schema of `T`.
///
/// Returns one external path per input, in input order. Fails only when `T` is not a record
/// type.
///
/// ```rust
/// use schema_filter::path::resolve_paths;
/// use schema_filter::types::{DataType, Field, Schema, SchemaType};
///
/// struct User;
///
/// impl SchemaType for User {
///     fn data_type() -> DataType {
///         DataType::Record(Schema::new(vec![
///             Field::new("Name", DataType::Utf8).with_tag("name"),
///             Field::new(
///                 "Address",
///                 DataType::Record(Schema::new(vec![
///                     Field::new("City", DataType::Utf8).with_tag("city,omitempty"),
///                 ])),
///             )
///             .with_tag("address"),
///         ]))
///     }
/// }
///
/// let resolved = resolve_paths::<User, _>(&["Address.City", "Name", "Missing"]).unwrap();
/// assert_eq!(resolved, vec!["address.city", "name", ""]);
/// ```
pub fn resolve_paths<T, S>(paths: &[S]) -> FilterResult<Vec<String>>
where
    T: SchemaType,
    S: AsRef<str>,
{
    let data_type = T::data_type();
    resolve_paths_in(&data_type, std::any::type_name::<T>(), paths)
}

/// Resolve internal paths against an explicit [`DataType`].
///
/// `type_name` is only used for the error message.
pub fn resolve_paths_in<S: AsRef<str>>(
    data_type: &DataType,
    type_name: &str,
    paths: &[S],
) -> FilterResult<Vec<String>> {
    let schema = record_schema(data_type, type_name)?;
    Ok(paths.iter().map(|p| schema.resolve(p.as_ref())).collect())
}

/// Returns the schema of a record type, or a schema error for any other shape.
pub(crate) fn record_schema<'a>(data_type: &'a DataType, type_name: &str) -> FilterResult<&'a Schema> {
    data_type.as_record().ok_or_else(|| FilterError::Schema {
        type_name: type_name.to_string(),
        message: format!("must be a record type, found {}", shape_name(data_type)),
    })
}

fn shape_name(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Int64 => "integer",
        DataType::Float64 => "float",
        DataType::Bool => "bool",
        DataType::Utf8 => "string",
        DataType::List(_) => "list",
        DataType::Any => "untyped value",
        DataType::Record(_) => "record",
    }
}
