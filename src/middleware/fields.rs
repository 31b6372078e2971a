use serde_json::Value;

use crate::error::ApiError;

/// Collects required body fields and remembers which ones were absent or
/// unusable, so a single 400 can name all of them.
///
/// A value is missing when the key is absent, `null`, or an empty string.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
    invalid: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text field. Numbers and booleans are taken in their JSON spelling.
    pub fn text(&mut self, name: &'static str, value: Option<&Value>) -> Option<String> {
        match value {
            None | Some(Value::Null) => self.miss(name),
            Some(Value::String(s)) if s.is_empty() => self.miss(name),
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(_) => self.reject(name),
        }
    }

    /// Integer field. HTML forms post numbers as strings, so a string of
    /// digits (optionally signed) is accepted too.
    pub fn integer(&mut self, name: &'static str, value: Option<&Value>) -> Option<i64> {
        match value {
            None | Some(Value::Null) => self.miss(name),
            Some(Value::String(s)) if s.trim().is_empty() => self.miss(name),
            Some(Value::String(s)) => match s.trim().parse::<i64>() {
                Ok(n) => Some(n),
                Err(_) => self.reject(name),
            },
            Some(Value::Number(n)) => match n.as_i64() {
                Some(n) => Some(n),
                None => self.reject(name),
            },
            Some(_) => self.reject(name),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// The 400 describing what was wrong. Missing fields take precedence.
    pub fn into_error(self) -> ApiError {
        if !self.missing.is_empty() {
            ApiError::missing_fields(&self.missing)
        } else if !self.invalid.is_empty() {
            ApiError::bad_request(format!("Fields must be integers: {}", self.invalid.join(", ")))
        } else {
            ApiError::bad_request("Invalid request body")
        }
    }

    fn miss<T>(&mut self, name: &'static str) -> Option<T> {
        self.missing.push(name);
        None
    }

    fn reject<T>(&mut self, name: &'static str) -> Option<T> {
        self.invalid.push(name);
        None
    }
}
