//! Record filtering by schema field paths.
//!
//! A filter specification is a nested [`Record`] written with the target type's *internal*
//! field names, e.g. `{"Address": {"City": "Rome"}}`. Each leaf becomes a predicate on the
//! corresponding *external* path (`address.city`). Candidates must satisfy every predicate,
//! and survivors are decoded into the target type.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

use crate::error::{FilterError, FilterResult};
use crate::path::{PATH_SEPARATOR, record_schema};
use crate::types::{Record, Schema, SchemaType};
use crate::walk::{join_path, walk_leaves};

use super::convert::round_trip;
use super::observability::{FilterContext, FilterObserver, FilterSeverity, FilterStats};

/// Options controlling [`filter_records_with_options`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct FilterOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn FilterObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: FilterSeverity,
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: FilterSeverity::Critical,
        }
    }
}

/// Flattened filter: external path -> expected value.
///
/// An expected value that is a JSON array matches any leaf equal to one of its elements;
/// any other expected value matches an equal leaf.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicates {
    entries: BTreeMap<String, Value>,
    dropped: Vec<String>,
}

impl Predicates {
    /// Flatten `spec` and resolve each leaf's internal path against `schema`.
    ///
    /// Leaves visit in sorted key order, so when two internal paths resolve to the same
    /// external path the later one wins. Leaves that resolve to an empty path are dropped.
    pub fn from_spec(schema: &Schema, spec: &Record) -> Self {
        let mut predicates = Self::default();
        walk_leaves(spec, |parent, key, value| {
            let internal = join_path(parent, key);
            let external = schema.resolve(&internal);
            if external.is_empty() {
                predicates.dropped.push(internal);
            } else {
                predicates.entries.insert(external, value.clone());
            }
            false
        });
        predicates
    }

    /// Number of predicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no predicates (every candidate matches).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expected value for an external path, if any.
    pub fn get(&self, external_path: &str) -> Option<&Value> {
        self.entries.get(external_path)
    }

    /// Iterate `(external path, expected value)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Internal paths of filter leaves that did not resolve, in visit order.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Returns `true` if `candidate` satisfies every predicate.
    pub fn matches(&self, candidate: &Record) -> bool {
        self.entries.iter().all(|(path, expected)| {
            walk_leaves(candidate, |parent, key, value| {
                path_is(parent, key, path) && expected_matches(expected, value)
            })
        })
    }
}

/// Returns `true` if `parent` joined with `key` equals `path`, without allocating.
fn path_is(parent: &str, key: &str, path: &str) -> bool {
    if parent.is_empty() {
        return key == path;
    }
    path.strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix(PATH_SEPARATOR))
        .is_some_and(|rest| rest == key)
}

fn expected_matches(expected: &Value, leaf: &Value) -> bool {
    match expected {
        Value::Array(options) => options.iter().any(|option| values_equal(option, leaf)),
        other => values_equal(other, leaf),
    }
}

/// Structural equality over JSON values where numbers compare by numeric value.
///
/// `1`, `1.0` and `1u64` are all equal; everything else follows `serde_json::Value` equality.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Flatten a filter specification into predicates on `T`'s external paths.
///
/// Fails only when `T` is not a record type.
pub fn parse_filters<T: SchemaType>(spec: &Record) -> FilterResult<Predicates> {
    let data_type = T::data_type();
    let schema = record_schema(&data_type, std::any::type_name::<T>())?;
    Ok(Predicates::from_spec(schema, spec))
}

/// Select the records matching `spec` and decode them into `T`.
///
/// - Entries of `records` whose value is not a map never match.
/// - Filter leaves that do not resolve against `T` are ignored.
/// - An empty `spec` matches every map-valued record.
///
/// Any decode failure fails the whole call; no partial result is returned.
///
/// ```rust
/// use schema_filter::processing::filter_records;
/// use schema_filter::types::{DataType, Field, Schema, SchemaType};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize)]
/// struct Job {
///     state: String,
/// }
///
/// impl SchemaType for Job {
///     fn data_type() -> DataType {
///         DataType::Record(Schema::new(vec![
///             Field::new("State", String::data_type()).with_tag("state"),
///         ]))
///     }
/// }
///
/// let records = json!({
///     "a": {"state": "running"},
///     "b": {"state": "failed"},
///     "c": {"state": "queued"}
/// });
/// let spec = json!({"State": ["running", "queued"]});
///
/// let jobs = filter_records::<Job>(
///     records.as_object().unwrap(),
///     spec.as_object().unwrap(),
/// )
/// .unwrap();
/// assert_eq!(jobs.len(), 2);
/// assert!(!jobs.contains_key("b"));
/// ```
pub fn filter_records<T>(records: &Record, spec: &Record) -> FilterResult<HashMap<String, T>>
where
    T: SchemaType + DeserializeOwned,
{
    filter_records_with_options(records, spec, &FilterOptions::default())
}

/// Like [`filter_records`], reporting to `options.observer` when one is set.
///
/// When an observer is configured, this function reports:
///
/// - `on_predicate_dropped` for each filter leaf that did not resolve
/// - `on_success` on success, with [`FilterStats`]
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn filter_records_with_options<T>(
    records: &Record,
    spec: &Record,
    options: &FilterOptions,
) -> FilterResult<HashMap<String, T>>
where
    T: SchemaType + DeserializeOwned,
{
    let ctx = FilterContext {
        target: std::any::type_name::<T>(),
    };

    let result = run_filter::<T>(records, spec, &ctx, options);

    match result {
        Ok((out, stats)) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_success(&ctx, stats);
            }
            Ok(out)
        }
        Err(e) => {
            if let Some(obs) = options.observer.as_ref() {
                let sev = FilterSeverity::for_error(&e);
                obs.on_failure(&ctx, sev, &e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, &e);
                }
            }
            Err(e)
        }
    }
}

fn run_filter<T>(
    records: &Record,
    spec: &Record,
    ctx: &FilterContext,
    options: &FilterOptions,
) -> FilterResult<(HashMap<String, T>, FilterStats)>
where
    T: SchemaType + DeserializeOwned,
{
    let predicates = parse_filters::<T>(spec)?;
    if let Some(obs) = options.observer.as_ref() {
        for path in predicates.dropped() {
            obs.on_predicate_dropped(ctx, path);
        }
    }

    let mut stats = FilterStats {
        predicates: predicates.len(),
        dropped: predicates.dropped().len(),
        ..FilterStats::default()
    };

    let mut selected: Vec<(&String, &Value)> = Vec::new();
    for (key, value) in records {
        let Value::Object(candidate) = value else {
            stats.skipped += 1;
            continue;
        };
        stats.candidates += 1;
        if predicates.matches(candidate) {
            selected.push((key, value));
        }
    }

    let mut out: HashMap<String, T> = HashMap::with_capacity(selected.len());
    for (key, value) in selected {
        let decoded = round_trip(value).map_err(|source| FilterError::Decode {
            key: key.clone(),
            source,
        })?;
        out.insert(key.clone(), decoded);
    }
    stats.matched = out.len();

    Ok((out, stats))
}
