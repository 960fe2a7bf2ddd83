use std::fmt;

use serde::{Deserialize, Serialize};

/// A product serial, kept in the shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerialNumber {
    Integer(i64),
    Digits(String),
}

impl SerialNumber {
    /// Accepts integers and non-empty all-digit strings; anything else is `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Integer),
            serde_json::Value::String(s) if is_all_digits(s) => Some(Self::Digits(s.clone())),
            _ => None,
        }
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialNumber::Integer(n) => write!(f, "{}", n),
            SerialNumber::Digits(s) => f.write_str(s),
        }
    }
}
