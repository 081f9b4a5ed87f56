//! Deterministic leaf traversal of nested [`Record`]s.

use serde_json::Value;

use crate::path::PATH_SEPARATOR;
use crate::types::Record;

/// Join a parent path and a key. An empty parent yields just the key.
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        let mut path = String::with_capacity(parent.len() + 1 + key.len());
        path.push_str(parent);
        path.push(PATH_SEPARATOR);
        path.push_str(key);
        path
    }
}

struct Pending<'a> {
    parent: usize,
    key: &'a str,
    value: &'a Value,
}

/// Visit every leaf (non-object value) of `root` exactly once.
///
/// Children of each map are visited in ascending key order, depth first, using an explicit
/// work list so nesting depth is not limited by the call stack. `on_leaf` receives the
/// leaf's parent path (empty at the top level), its key and its value. The walk stops as
/// soon as `on_leaf` returns `true`, and the function then returns `true`; it returns `false`
/// once every leaf has been visited.
///
/// ```rust
/// use schema_filter::walk::walk_leaves;
/// use serde_json::json;
///
/// let record = json!({"b": 1, "a": {"y": 2, "x": 3}});
/// let mut seen = Vec::new();
/// let stopped = walk_leaves(record.as_object().unwrap(), |parent, key, _| {
///     seen.push(format!("{parent}/{key}"));
///     false
/// });
/// assert!(!stopped);
/// assert_eq!(seen, vec!["a/x", "a/y", "/b"]);
/// ```
pub fn walk_leaves<F>(root: &Record, mut on_leaf: F) -> bool
where
    F: FnMut(&str, &str, &Value) -> bool,
{
    // parents[0] is the root prefix; each nested map appends its own.
    let mut parents: Vec<String> = vec![String::new()];
    let mut stack: Vec<Pending<'_>> = Vec::new();
    push_children(&mut stack, 0, root);

    while let Some(Pending { parent, key, value }) = stack.pop() {
        match value {
            Value::Object(nested) => {
                let path = join_path(&parents[parent], key);
                parents.push(path);
                push_children(&mut stack, parents.len() - 1, nested);
            }
            leaf => {
                if on_leaf(&parents[parent], key, leaf) {
                    return true;
                }
            }
        }
    }

    false
}

fn push_children<'a>(stack: &mut Vec<Pending<'a>>, parent: usize, map: &'a Record) {
    let mut entries: Vec<(&'a String, &'a Value)> = map.iter().collect();
    // Descending, so entries pop off the stack in ascending key order.
    entries.sort_unstable_by(|a, b| b.0.cmp(a.0));
    stack.extend(entries.into_iter().map(|(key, value)| Pending {
        parent,
        key: key.as_str(),
        value,
    }));
}
