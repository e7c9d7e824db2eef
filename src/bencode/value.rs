use crate::error::BencodeError;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::borrow::Cow;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Represents a bencoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Integer: i<number>e
    Integer(i64),
    /// Byte string: <length>:<contents>
    Bytes(Vec<u8>),
    /// List: l<values>e
    List(Vec<Value>),
    /// Dictionary: d<key-value pairs>e
    Dict(Dictionary),
}

impl Value {
    pub fn integer(n: i64) -> Self {
        Value::Integer(n)
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(b.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items)
    }

    /// Build a dictionary value, rejecting duplicate keys
    pub fn dict<I, K>(entries: I) -> Result<Self, BencodeError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<Vec<u8>>,
    {
        Dictionary::new(entries).map(Value::Dict)
    }

    /// Name of this value's shape, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "byte string",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }

    /// Try to get this value as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a byte string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get this value as a UTF-8 string
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Try to get this value as a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Try to get this value as a dictionary
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Get a value from a dictionary by key
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dict(dict)
    }
}

/// Byte-string keyed mapping that remembers the order keys were inserted in.
///
/// Lookups and canonical iteration go through a sorted index; `iter` yields
/// entries as they were decoded. Equality ignores insertion order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<(Vec<u8>, Value)>,
    index: BTreeMap<Vec<u8>, usize>,
}

impl Dictionary {
    pub fn new<I, K>(entries: I) -> Result<Self, BencodeError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<Vec<u8>>,
    {
        let mut dict = Dictionary::default();
        for (key, value) in entries {
            dict.insert(key.into(), value)?;
        }
        Ok(dict)
    }

    pub(crate) fn insert(&mut self, key: Vec<u8>, value: Value) -> Result<(), BencodeError> {
        match self.index.entry(key) {
            Entry::Occupied(slot) => Err(BencodeError::DuplicateKey(
                String::from_utf8_lossy(slot.key()).into_owned(),
            )),
            Entry::Vacant(slot) => {
                self.entries.push((slot.key().clone(), value));
                slot.insert(self.entries.len() - 1);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }

    /// Entries in ascending raw-byte key order
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&[u8], &Value)> {
        self.index
            .iter()
            .map(|(k, &i)| (k.as_slice(), &self.entries[i].1))
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Dictionary {}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => serializer.serialize_str(s),
                Err(_) => serializer.serialize_bytes(b),
            },
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Dict(dict) => {
                let mut map = serializer.serialize_map(Some(dict.len()))?;
                for (key, value) in dict.iter() {
                    let key: Cow<'_, str> = String::from_utf8_lossy(key);
                    map.serialize_entry(&key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_rejects_duplicate_keys() {
        let result = Dictionary::new(vec![
            ("spam", Value::integer(1)),
            ("spam", Value::integer(2)),
        ]);
        assert_eq!(result, Err(BencodeError::DuplicateKey("spam".to_string())));
    }

    #[test]
    fn test_dictionary_preserves_insertion_order() {
        let dict = Dictionary::new(vec![
            ("zebra", Value::integer(1)),
            ("apple", Value::integer(2)),
        ])
        .unwrap();

        let inserted: Vec<&[u8]> = dict.iter().map(|(k, _)| k).collect();
        assert_eq!(inserted, vec![b"zebra".as_ref(), b"apple".as_ref()]);

        let sorted: Vec<&[u8]> = dict.iter_sorted().map(|(k, _)| k).collect();
        assert_eq!(sorted, vec![b"apple".as_ref(), b"zebra".as_ref()]);
    }

    #[test]
    fn test_dictionary_equality_ignores_order() {
        let a = Value::dict(vec![("a", Value::integer(1)), ("b", Value::from("x"))]).unwrap();
        let b = Value::dict(vec![("b", Value::from("x")), ("a", Value::integer(1))]).unwrap();
        let c = Value::dict(vec![("a", Value::integer(1)), ("b", Value::from("y"))]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_list_equality_is_order_sensitive() {
        let a = Value::list(vec![Value::integer(1), Value::integer(2)]);
        let b = Value::list(vec![Value::integer(2), Value::integer(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_accessors() {
        let value = Value::dict(vec![
            ("name", Value::from("demo")),
            ("size", Value::integer(7)),
        ])
        .unwrap();

        assert_eq!(value.get(b"name").and_then(Value::as_str), Some("demo"));
        assert_eq!(value.get(b"size").and_then(Value::as_integer), Some(7));
        assert!(value.get(b"missing").is_none());
        assert_eq!(value.kind(), "dictionary");
        assert!(Value::integer(1).get(b"name").is_none());
    }

    #[test]
    fn test_json_rendering() {
        let value = Value::dict(vec![
            ("spam", Value::list(vec![Value::from("a"), Value::integer(-3)])),
            ("bin", Value::bytes(vec![0xff, 0x00])),
        ])
        .unwrap();

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"spam":["a",-3],"bin":[255,0]}"#);
    }
}
