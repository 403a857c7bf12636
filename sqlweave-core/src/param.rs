//! Statement parameters and the per-build registration list.

use serde::{Deserialize, Serialize};

use crate::Value;

/// A named placeholder bound to a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

impl Parameter {
    /// Create the parameter registered at the given zero-based position.
    pub fn new(index: usize, value: Value) -> Self {
        Self {
            name: Self::name_for(index),
            value,
        }
    }

    /// Name given to the parameter registered at `index`: `p0`, `p1`, ...
    pub fn name_for(index: usize) -> String {
        format!("p{}", index)
    }
}

/// Parameters in the order they were discovered while rendering.
///
/// A fresh list is created for every build, so numbering always restarts at
/// zero and nothing carries over between builds.
#[derive(Debug, Clone, Default)]
pub struct ParameterList {
    params: Vec<Parameter>,
}

impl ParameterList {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Register a value and return the zero-based index it was given.
    pub fn push(&mut self, value: Value) -> usize {
        let index = self.params.len();
        self.params.push(Parameter::new(index, value));
        index
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Values in registration order.
    pub fn into_values(self) -> Vec<Value> {
        self.params.into_iter().map(|p| p.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_registration_order() {
        let mut params = ParameterList::new();
        assert_eq!(params.push("a".into()), 0);
        assert_eq!(params.push(2.into()), 1);

        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p0", "p1"]);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_into_values_keeps_order() {
        let mut params = ParameterList::new();
        params.push("x".into());
        params.push(Value::Null);
        params.push(3i64.into());
        assert_eq!(
            params.into_values(),
            vec![Value::from("x"), Value::Null, Value::I64(3)]
        );
    }

    #[test]
    fn test_name_for() {
        assert_eq!(Parameter::name_for(0), "p0");
        assert_eq!(Parameter::name_for(12), "p12");
        assert_eq!(Parameter::new(3, true.into()).name, "p3");
    }
}
