use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_KEY_PREFIX: &str = "q_";

/// Raw questionnaire responses keyed by question id (`q_1`, `q_2`, ...).
///
/// Values stay loosely typed; [`parse_rating`] is the only place that
/// interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, Value>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn question_key(prefix: &str, ordinal: u32) -> String {
        format!("{prefix}{ordinal}")
    }

    /// Collects answers from a JSON document.
    ///
    /// Top-level keys starting with `prefix` are taken first, then entries
    /// of a nested `answers` object, which win on conflicts. Anything that
    /// is not an object yields an empty set.
    pub fn from_document(document: &Value, prefix: &str) -> Self {
        let mut answers = Self::new();
        let Some(object) = document.as_object() else {
            return answers;
        };
        for (key, value) in object {
            if key.starts_with(prefix) {
                answers.insert(key.clone(), value.clone());
            }
        }
        if let Some(nested) = object.get("answers").and_then(Value::as_object) {
            for (key, value) in nested {
                answers.insert(key.clone(), value.clone());
            }
        }
        answers
    }

    pub fn merge(&mut self, other: AnswerSet) {
        self.values.extend(other.values);
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Best-effort integer coercion of a raw response.
///
/// Integers pass through, floats truncate toward zero, and strings parse
/// their leading signed digits after trimming (`"4 - agree"` is 4).
/// Out-of-range magnitudes saturate at the `i64` bounds. Everything else
/// is treated as unanswered.
pub fn parse_rating(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc() as i64)
        }),
        Value::String(text) => parse_leading_integer(text.trim()),
        _ => None,
    }
}

fn parse_leading_integer(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
