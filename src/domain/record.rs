//! Record domain model
//!
//! A record is a name plus an ordered list of values. The name is the
//! record's key within a drawer and cannot be changed after construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value::Value;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Value index {index} out of range for record with {len} value(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A named, ordered list of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    name: String,
    values: Vec<Value>,
}

impl Record {
    /// Creates a record from a name and its values
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a record with no values
    ///
    /// This is also what a lookup returns for a name that is not stored.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `index`
    pub fn get(&self, index: usize) -> Result<&Value, RecordError> {
        self.values.get(index).ok_or(RecordError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// Appends a value
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Builder form of [`Record::push`]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_by_index() {
        let record = Record::empty("user").with("alice").with(30).with(true);

        assert_eq!(record.name(), "user");
        assert_eq!(record.len(), 3);
        assert_eq!(record.get(0).unwrap(), &Value::from("alice"));
        assert_eq!(record.get(1).unwrap(), &Value::from(30));
        assert_eq!(record.get(2).unwrap(), &Value::from(true));
    }

    #[test]
    fn get_out_of_range() {
        let record = Record::new("score", vec![Value::from(99.5)]);

        assert_eq!(
            record.get(1),
            Err(RecordError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(Record::empty("x").get(0).is_err());
    }

    #[test]
    fn empty_record() {
        let record = Record::empty("missing");
        assert!(record.is_empty());
        assert_eq!(record.values(), &[] as &[Value]);
    }

    #[test]
    fn error_message() {
        let err = Record::empty("x").get(2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value index 2 out of range for record with 0 value(s)"
        );
    }
}
