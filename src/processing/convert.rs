//! Structural decoding of dynamic values into typed targets.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::FilterResult;

/// Convert any serializable value into `T` by encoding it to JSON and decoding the result.
///
/// Fails with [`crate::FilterError::Conversion`] when the structure does not fit `T` (missing
/// required fields, type mismatches, ...).
///
/// ```rust
/// use schema_filter::processing::convert;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let p: Point = convert(&json!({"x": 1, "y": 2})).unwrap();
/// assert_eq!(p, Point { x: 1, y: 2 });
/// assert!(convert::<_, Point>(&json!({"x": 1})).is_err());
/// ```
pub fn convert<V, T>(value: &V) -> FilterResult<T>
where
    V: Serialize + ?Sized,
    T: DeserializeOwned,
{
    Ok(round_trip(value)?)
}

pub(crate) fn round_trip<V, T>(value: &V) -> Result<T, serde_json::Error>
where
    V: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let bytes = serde_json::to_vec(value)?;
    serde_json::from_slice(&bytes)
}
