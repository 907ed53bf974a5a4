//! Structural schema inference for JSON responses.
//!
//! Arrays are described by their first element only. Mixed-type arrays are
//! therefore under-described; documentation consumers rely on the
//! single-sample shape, so element shapes are not unioned.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const NULL: &str = "null";
const STRING: &str = "string";
const NUMBER: &str = "number";
const BOOLEAN: &str = "boolean";
const EMPTY_ARRAY: &str = "empty array";

/// Recursive shape descriptor of a JSON value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaShape {
    Null,
    String,
    Number,
    Boolean,
    EmptyArray,
    /// Shape of the first element of a non-empty array
    Array(Box<SchemaShape>),
    Object(BTreeMap<String, SchemaShape>),
}

/// Infer the structural shape of `value`
pub fn infer_schema(value: &Value) -> SchemaShape {
    match value {
        Value::Null => SchemaShape::Null,
        Value::Bool(_) => SchemaShape::Boolean,
        Value::Number(_) => SchemaShape::Number,
        Value::String(_) => SchemaShape::String,
        Value::Array(items) => match items.first() {
            None => SchemaShape::EmptyArray,
            Some(first) => SchemaShape::Array(Box::new(infer_schema(first))),
        },
        Value::Object(fields) => SchemaShape::Object(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), infer_schema(value)))
                .collect(),
        ),
    }
}

impl SchemaShape {
    /// JSON form: type names as strings, `[shape]` for arrays, maps for objects
    pub fn to_value(&self) -> Value {
        match self {
            SchemaShape::Null => Value::from(NULL),
            SchemaShape::String => Value::from(STRING),
            SchemaShape::Number => Value::from(NUMBER),
            SchemaShape::Boolean => Value::from(BOOLEAN),
            SchemaShape::EmptyArray => Value::from(EMPTY_ARRAY),
            SchemaShape::Array(element) => Value::Array(vec![element.to_value()]),
            SchemaShape::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, shape)| (key.clone(), shape.to_value()))
                    .collect(),
            ),
        }
    }

    /// Parse the JSON form produced by [`SchemaShape::to_value`]
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(name) => match name.as_str() {
                NULL => Ok(SchemaShape::Null),
                STRING => Ok(SchemaShape::String),
                NUMBER => Ok(SchemaShape::Number),
                BOOLEAN => Ok(SchemaShape::Boolean),
                EMPTY_ARRAY => Ok(SchemaShape::EmptyArray),
                other => Err(format!("unknown schema type '{}'", other)),
            },
            Value::Array(items) => match items.as_slice() {
                [element] => Ok(SchemaShape::Array(Box::new(Self::from_value(element)?))),
                _ => Err(format!(
                    "array schema must hold exactly one element, found {}",
                    items.len()
                )),
            },
            Value::Object(fields) => {
                let mut shapes = BTreeMap::new();
                for (key, shape) in fields {
                    shapes.insert(key.clone(), Self::from_value(shape)?);
                }
                Ok(SchemaShape::Object(shapes))
            }
            other => Err(format!("invalid schema node: {}", other)),
        }
    }
}

impl Serialize for SchemaShape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaShape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        SchemaShape::from_value(&value).map_err(D::Error::custom)
    }
}
