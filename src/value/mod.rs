//! Value model for the demonstration steps.
//!
//! Owns the two pinned text conventions the engine under test must match:
//! - console rendering (`[ 1, 2, 3 ]`, strings raw at top level)
//! - compact JSON for records, with method fields dropped

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/* ------------------------------- Value ------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Str(String),
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Console rendering, as the engine's `console.log` prints a single argument.
    pub fn render(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.inspect(),
        }
    }

    /// Nested rendering: strings are single-quoted inside containers.
    fn inspect(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Str(s) => format!("'{s}'"),
            Value::Array(items) if items.is_empty() => "[]".to_string(),
            Value::Array(items) => {
                let inner = items
                    .iter()
                    .map(Value::inspect)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[ {inner} ]")
            }
            Value::Record(rec) => rec.to_json(),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Record> for Value {
    fn from(rec: Record) -> Self {
        Value::Record(rec)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Number-to-text the way the engine prints doubles.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // -0 prints as 0
        return "0".to_string();
    }

    // `{:e}` gives the shortest round-trip digits: "1.5511210043330986e25".
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exp.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(-point as usize))
    } else {
        let e = point - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", e.abs())
        }
    };

    if n < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            // Same text as the console form; `arbitrary_precision` keeps it verbatim.
            Value::Number(n) => match serde_json::Number::from_str(&format_number(*n)) {
                Ok(num) => num.serialize(serializer),
                Err(_) => serializer.serialize_unit(),
            },
            Value::Str(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(rec) => rec.serialize(serializer),
        }
    }
}

/* ------------------------------- Record ------------------------------ */

/// Operation bound to a record; receives read-only access to its owner.
pub type Method = Rc<dyn Fn(&Record) -> Value>;

/// A record field, classified once at declaration time.
#[derive(Clone)]
pub enum Field {
    Data(Value),
    Method(Method),
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Data(v) => f.debug_tuple("Data").field(v).finish(),
            Field::Method(_) => f.write_str("Method(<fn>)"),
        }
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Field::Data(a), Field::Data(b)) => a == b,
            (Field::Method(a), Field::Method(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Structure with plain fields and bound operations, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Field)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, Field::Data(value.into()));
        self
    }

    pub fn method(mut self, name: &str, op: impl Fn(&Record) -> Value + 'static) -> Self {
        self.insert(name, Field::Method(Rc::new(op)));
        self
    }

    /// Redeclaring a field keeps its original position.
    fn insert(&mut self, name: &str, field: Field) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = field,
            None => self.fields.push((name.to_string(), field)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find_map(|(n, f)| match f {
            Field::Data(v) if n == name => Some(v),
            _ => None,
        })
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.insert(name, Field::Data(value.into()));
    }

    /// Calls the named method with `self` as its owner. `None` if there is no such method.
    pub fn invoke(&self, name: &str) -> Option<Value> {
        self.fields.iter().find_map(|(n, f)| match f {
            Field::Method(op) if n == name => Some(op(self)),
            _ => None,
        })
    }

    /// The data partition, in declaration order.
    pub fn data_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().filter_map(|(n, f)| match f {
            Field::Data(v) => Some((n.as_str(), v)),
            Field::Method(_) => None,
        })
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|(n, f)| match f {
            Field::Method(_) => Some(n.as_str()),
            Field::Data(_) => None,
        })
    }

    /// Compact JSON of the data partition.
    pub fn to_json(&self) -> String {
        // Keys are strings and numbers never fail to serialize.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.data_fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests;
