//! Core data model types.
//!
//! Candidates and filter specifications are dynamic [`Record`]s (nested JSON objects). Target
//! types describe their shape through [`SchemaType`], which yields a [`DataType`]; record
//! types carry a [`Schema`] (a list of [`Field`]s with their serialization tags).

use std::collections::{BTreeMap, HashMap};

/// A dynamic, arbitrarily nested key/value map.
///
/// A value is a nested record iff it is a JSON object; every other value is a leaf.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Logical shape of a schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// Signed or unsigned integer.
    Int64,
    /// Floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Sequence of values. Filter paths never descend into lists.
    List(Box<DataType>),
    /// Untyped value (dynamic maps, `serde_json::Value`, ...).
    Any,
    /// Record with named fields.
    Record(Schema),
}

impl DataType {
    /// Returns the record schema if this is a record type.
    pub fn as_record(&self) -> Option<&Schema> {
        match self {
            Self::Record(schema) => Some(schema),
            _ => None,
        }
    }
}

/// A single field of a record [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Internal (Rust-side) field name.
    pub name: String,
    /// Serialization tag, e.g. `"name"` or `"name,omitempty"`. `None`, `""` and `"-"` mean the
    /// field has no external name.
    pub tag: Option<String>,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field without an external name.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            tag: None,
            data_type,
        }
    }

    /// Set the serialization tag of this field.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// External name of the field: the part of the tag before the first `,`.
    ///
    /// Returns `None` when the field is not serialized (no tag, empty tag, or `"-"`).
    pub fn external_name(&self) -> Option<&str> {
        let tag = self.tag.as_deref()?;
        let name = tag.split(',').next().unwrap_or(tag);
        if name.is_empty() || name == "-" {
            None
        } else {
            Some(name)
        }
    }
}

/// Ordered list of fields describing a record type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate internal field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by internal name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the field with the given internal name, if present.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Types that can describe their own shape.
///
/// Record types implement this by listing their fields; the serialization tags must agree
/// with the type's `serde` representation for filtered records to decode.
///
/// ```rust
/// use schema_filter::types::{DataType, Field, Schema, SchemaType};
///
/// struct City {
///     name: String,
/// }
///
/// impl SchemaType for City {
///     fn data_type() -> DataType {
///         DataType::Record(Schema::new(vec![
///             Field::new("Name", String::data_type()).with_tag("name"),
///         ]))
///     }
/// }
///
/// assert!(City::data_type().as_record().is_some());
/// ```
///
/// Self-referential types must describe the recursive field as [`DataType::Any`], since the
/// descriptor is built eagerly.
pub trait SchemaType {
    /// Describe the shape of this type.
    fn data_type() -> DataType;
}

macro_rules! impl_schema_type {
    ($data_type:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl SchemaType for $ty {
                fn data_type() -> DataType {
                    $data_type
                }
            }
        )+
    };
}

impl_schema_type!(DataType::Int64 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_schema_type!(DataType::Float64 => f32, f64);
impl_schema_type!(DataType::Bool => bool);
impl_schema_type!(DataType::Utf8 => String, char);
impl_schema_type!(DataType::Any => serde_json::Value, Record);

impl<T: SchemaType> SchemaType for Option<T> {
    fn data_type() -> DataType {
        T::data_type()
    }
}

impl<T: SchemaType> SchemaType for Box<T> {
    fn data_type() -> DataType {
        T::data_type()
    }
}

impl<T: SchemaType> SchemaType for Vec<T> {
    fn data_type() -> DataType {
        DataType::List(Box::new(T::data_type()))
    }
}

impl<K, V> SchemaType for HashMap<K, V> {
    fn data_type() -> DataType {
        DataType::Any
    }
}

impl<K, V> SchemaType for BTreeMap<K, V> {
    fn data_type() -> DataType {
        DataType::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_name_strips_tag_options() {
        let f = Field::new("Name", DataType::Utf8).with_tag("name,omitempty");
        assert_eq!(f.external_name(), Some("name"));
    }

    #[test]
    fn external_name_is_absent_for_untagged_and_suppressed_fields() {
        assert_eq!(Field::new("A", DataType::Utf8).external_name(), None);
        assert_eq!(Field::new("A", DataType::Utf8).with_tag("").external_name(), None);
        assert_eq!(Field::new("A", DataType::Utf8).with_tag("-").external_name(), None);
        assert_eq!(Field::new("A", DataType::Utf8).with_tag(",omitempty").external_name(), None);
    }

    #[test]
    fn schema_lookup_by_internal_name() {
        let schema = Schema::new(vec![
            Field::new("Id", DataType::Int64).with_tag("id"),
            Field::new("Name", DataType::Utf8).with_tag("name"),
        ]);
        assert_eq!(schema.index_of("Name"), Some(1));
        assert_eq!(schema.index_of("name"), None);
        assert_eq!(schema.field("Id").and_then(Field::external_name), Some("id"));
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["Id", "Name"]);
    }

    #[test]
    fn wrappers_are_transparent_and_lists_are_not_records() {
        assert_eq!(<Option<Box<i32>>>::data_type(), DataType::Int64);
        assert_eq!(
            <Vec<String>>::data_type(),
            DataType::List(Box::new(DataType::Utf8))
        );
        assert!(<Vec<String>>::data_type().as_record().is_none());
        assert_eq!(<HashMap<String, f64>>::data_type(), DataType::Any);
    }
}
