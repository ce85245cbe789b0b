//! Path-addressed state values.
//!
//! Subsystems outside the engine (weather, morale, quest flags) publish loose
//! values that abilities may read in their requirements or write through the
//! `set_state` and `adjust_state` effects. Paths are dot-separated keys into a
//! JSON document, e.g. `shelter.morale` or `flags.generator_online`.

use serde_json::{Map, Value};

use crate::error::{ErrorSeverity, GameError};

/// Errors raised when a path cannot be read or written.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("state path is empty")]
    EmptyPath,

    #[error("state path `{path}` crosses non-object value at `{segment}`")]
    NotAnObject { path: String, segment: String },

    #[error("state value at `{path}` is not numeric")]
    NotNumeric { path: String },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPath => "STATE_EMPTY_PATH",
            Self::NotAnObject { .. } => "STATE_NOT_OBJECT",
            Self::NotNumeric { .. } => "STATE_NOT_NUMERIC",
        }
    }
}

/// JSON document addressed by dot-separated paths.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StateStore {
    root: Value,
}

impl Default for StateStore {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the value at `path`, if every segment exists.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }
        path.split('.')
            .try_fold(&self.root, |node, segment| node.get(segment))
    }

    /// Reads the value at `path`, or `default` when absent.
    pub fn value_or(&self, path: &str, default: Value) -> Value {
        self.get(path).cloned().unwrap_or(default)
    }

    /// Reads a numeric value at `path`; absent and non-numeric values read as `None`.
    pub fn number(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }

    /// Writes `value` at `path`, creating intermediate objects as needed.
    pub fn set(&mut self, path: &str, value: Value) -> Result<Option<Value>, StateError> {
        if path.is_empty() {
            return Err(StateError::EmptyPath);
        }

        let mut segments = path.split('.').peekable();
        let mut node = &mut self.root;
        while let Some(segment) = segments.next() {
            let Some(object) = node.as_object_mut() else {
                return Err(StateError::NotAnObject {
                    path: path.to_owned(),
                    segment: segment.to_owned(),
                });
            };

            if segments.peek().is_none() {
                return Ok(object.insert(segment.to_owned(), value));
            }

            node = object
                .entry(segment.to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        Err(StateError::EmptyPath)
    }

    /// Adds `delta` to the number at `path` (absent counts as zero) and
    /// returns the new value.
    pub fn adjust(&mut self, path: &str, delta: f64) -> Result<f64, StateError> {
        let current = match self.get(path) {
            None | Some(Value::Null) => 0.0,
            Some(value) => value.as_f64().ok_or_else(|| StateError::NotNumeric {
                path: path.to_owned(),
            })?,
        };

        let next = current + delta;
        let encoded = serde_json::Number::from_f64(next)
            .map(Value::Number)
            .ok_or_else(|| StateError::NotNumeric {
                path: path.to_owned(),
            })?;
        self.set(path, encoded)?;
        Ok(next)
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn set_creates_intermediate_objects() {
        let mut store = StateStore::new();
        store.set("shelter.power.online", json!(true)).unwrap();

        assert_eq!(store.get("shelter.power.online"), Some(&json!(true)));
        assert_eq!(store.value_or("shelter.power.level", json!(0)), json!(0));
    }

    #[test]
    fn set_through_scalar_is_rejected() {
        let mut store = StateStore::new();
        store.set("morale", json!(5)).unwrap();

        let err = store.set("morale.bonus", json!(1)).unwrap_err();
        assert!(matches!(err, StateError::NotAnObject { .. }));
        assert_eq!(store.set("", json!(1)), Err(StateError::EmptyPath));
    }

    #[test]
    fn adjust_treats_missing_as_zero_and_rejects_text() {
        let mut store = StateStore::new();
        assert_eq!(store.adjust("morale", 2.5).unwrap(), 2.5);
        assert_eq!(store.adjust("morale", -1.0).unwrap(), 1.5);

        store.set("label", json!("north wing")).unwrap();
        assert!(matches!(
            store.adjust("label", 1.0),
            Err(StateError::NotNumeric { .. })
        ));
    }
}
