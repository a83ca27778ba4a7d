//! The Value type - the tree-shaped state representation.
//!
//! Module state, getter results, and commit/dispatch payloads are all
//! `Value` trees. The shape maps directly to JSON.

use std::collections::BTreeMap;

use crate::error::Error;

/// A tree-shaped value held in the store's state tree.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering (comparison, snapshots)
/// - Uses `i64` for integers
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value. Distinct from "key doesn't exist".
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Integer content, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Float content, accepting integers as well.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// String content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Bool content, if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get a direct member: a map key, or an array index given in decimal.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            Value::Array(arr) => {
                let index: usize = key.parse().ok()?;
                arr.get(index)
            }
            _ => None,
        }
    }

    /// Mutable direct member access.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Map(map) => map.get_mut(key),
            Value::Array(arr) => {
                let index: usize = key.parse().ok()?;
                arr.get_mut(index)
            }
            _ => None,
        }
    }

    /// Get a reference to a nested value by path segments.
    ///
    /// Returns `None` if the path doesn't exist or can't be navigated
    /// (e.g., indexing into a string).
    pub fn get_in(&self, segments: &[&str]) -> Option<&Value> {
        let mut current = self;
        for segment in segments {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Mutable nested access by path segments.
    pub fn get_in_mut(&mut self, segments: &[&str]) -> Option<&mut Value> {
        let mut current = self;
        for segment in segments {
            current = current.get_mut(segment)?;
        }
        Some(current)
    }

    /// Set a value at a segment path, creating intermediate maps as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path traverses through a non-container value
    /// (e.g., trying to set `foo/bar` when `foo` is a string).
    pub fn set_in(&mut self, segments: &[&str], value: Value) -> Result<(), Error> {
        if segments.is_empty() {
            *self = value;
            return Ok(());
        }

        let mut current = self;
        for (i, segment) in segments.iter().enumerate() {
            let is_last = i == segments.len() - 1;

            if is_last {
                match current {
                    Value::Map(map) => {
                        map.insert(segment.to_string(), value);
                        return Ok(());
                    }
                    Value::Array(arr) => {
                        let index: usize = segment.parse().map_err(|_| {
                            Error::state_path(segments, format!("invalid array index '{}'", segment))
                        })?;
                        if index < arr.len() {
                            arr[index] = value;
                        } else if index == arr.len() {
                            arr.push(value);
                        } else {
                            return Err(Error::state_path(
                                segments,
                                format!("array index {} out of bounds", index),
                            ));
                        }
                        return Ok(());
                    }
                    _ => {
                        return Err(Error::state_path(
                            segments,
                            format!("cannot set child '{}' on non-container value", segment),
                        ));
                    }
                }
            } else {
                match current {
                    Value::Map(map) => {
                        current = map.entry(segment.to_string()).or_insert_with(Value::map);
                    }
                    Value::Array(arr) => {
                        let index: usize = segment.parse().map_err(|_| {
                            Error::state_path(segments, format!("invalid array index '{}'", segment))
                        })?;
                        current = arr.get_mut(index).ok_or_else(|| {
                            Error::state_path(
                                segments,
                                format!("array index {} out of bounds", index),
                            )
                        })?;
                    }
                    _ => {
                        return Err(Error::state_path(
                            segments,
                            format!("cannot navigate through non-container at '{}'", segment),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Remove a value at a segment path, returning it if it existed.
    pub fn remove_in(&mut self, segments: &[&str]) -> Option<Value> {
        let (last, parents) = segments.split_last()?;
        let parent = self.get_in_mut(parents)?;
        match parent {
            Value::Map(map) => map.remove(*last),
            Value::Array(arr) => {
                let index: usize = last.parse().ok()?;
                if index < arr.len() {
                    Some(arr.remove(index))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}
