//! Structured query language understood by every `StateStore`.
//!
//! A query is a JSON object with a `selector` of equality predicates:
//!
//! ```text
//! {"selector": {"docType": "Activity", "projectId": "P1"}}
//! {"selector": {"projectLoc": {"latitude": "12.97"}}}
//! {"selector": {"fundGoal": {"$eq": 10000}}}
//! {"selector": {"$and": [{"docType": "Project"}, {"country": "IN"}]}}
//! ```
//!
//! Nested objects and dotted field names address nested fields. Numbers
//! compare by value, so `400` matches a stored `400.0`. Any other operator
//! is rejected.

use serde_json::{Map, Value};

use super::StorageError;

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    path: Vec<String>,
    expected: Value,
}

/// Parsed conjunction of equality predicates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selector {
    conditions: Vec<Condition>,
}

impl Selector {
    /// A selector matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: require `field` (dotted path allowed) to equal `value`.
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition {
            path: split_path(field),
            expected: value.into(),
        });
        self
    }

    /// Parses a query string.
    ///
    /// # Errors
    ///
    /// `StorageError::InvalidQuery` if the string is not JSON, has no
    /// `selector` object, or uses an unsupported operator.
    pub fn parse(query: &str) -> Result<Self, StorageError> {
        let root: Value = serde_json::from_str(query)
            .map_err(|e| StorageError::InvalidQuery(format!("query is not JSON: {}", e)))?;
        let selector = root
            .get("selector")
            .and_then(Value::as_object)
            .ok_or_else(|| StorageError::InvalidQuery("missing 'selector' object".to_string()))?;

        let mut parsed = Self::new();
        parsed.collect(&[], selector)?;
        Ok(parsed)
    }

    fn collect(&mut self, prefix: &[String], object: &Map<String, Value>) -> Result<(), StorageError> {
        for (field, value) in object {
            if field == "$and" {
                let clauses = value.as_array().ok_or_else(|| {
                    StorageError::InvalidQuery("'$and' expects an array".to_string())
                })?;
                for clause in clauses {
                    let clause = clause.as_object().ok_or_else(|| {
                        StorageError::InvalidQuery("'$and' clauses must be objects".to_string())
                    })?;
                    self.collect(prefix, clause)?;
                }
                continue;
            }
            if field == "$eq" {
                self.conditions.push(Condition {
                    path: prefix.to_vec(),
                    expected: value.clone(),
                });
                continue;
            }
            if field.starts_with('$') {
                return Err(StorageError::InvalidQuery(format!(
                    "unsupported operator '{}'",
                    field
                )));
            }

            let mut path = prefix.to_vec();
            path.extend(split_path(field));
            match value {
                Value::Object(nested) => self.collect(&path, nested)?,
                Value::Array(_) => {
                    return Err(StorageError::InvalidQuery(format!(
                        "array values are not supported for '{}'",
                        field
                    )))
                }
                literal => self.conditions.push(Condition {
                    path,
                    expected: literal.clone(),
                }),
            }
        }
        Ok(())
    }

    /// Whether `document` satisfies every predicate.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|condition| {
            lookup(document, &condition.path)
                .map(|actual| values_equal(actual, &condition.expected))
                .unwrap_or(false)
        })
    }

    /// Renders the selector as a query string accepted by `parse`.
    pub fn to_query_string(&self) -> String {
        let clauses: Vec<Value> = self
            .conditions
            .iter()
            .map(|condition| {
                let mut clause = Map::new();
                let mut eq = Map::new();
                eq.insert("$eq".to_string(), condition.expected.clone());
                clause.insert(condition.path.join("."), Value::Object(eq));
                Value::Object(clause)
            })
            .collect();
        let mut selector = Map::new();
        selector.insert("$and".to_string(), Value::Array(clauses));
        let mut root = Map::new();
        root.insert("selector".to_string(), Value::Object(selector));
        Value::Object(root).to_string()
    }
}

fn split_path(field: &str) -> Vec<String> {
    field.split('.').map(str::to_string).collect()
}

fn lookup<'a>(document: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter()
        .try_fold(document, |current, segment| current.get(segment.as_str()))
}

fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}
