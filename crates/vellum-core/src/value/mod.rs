
use crate::{
    record::Record,
    types::{DateTime, Float64},
};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt::{self, Display};

///
/// Value
///
/// Canonical boxed representation of every field value.
///
/// Null   → the field's value is logical null.
/// Record → a nested record (composable fields).
///
/// Map entries are kept sorted by key so equality and hashing are
/// insertion-order independent.
///

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(Float64),
    Text(String),
    DateTime(DateTime),
    Enum(EnumValue),
    List(Vec<Self>),
    Map(Vec<(String, Self)>),
    Record(Box<Record>),
    Null,
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::Float`, rejecting non-finite input.
    #[must_use]
    pub fn float(v: f64) -> Option<Self> {
        Float64::try_new(v).map(Self::Float)
    }

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a canonical `Value::Map` from owned entries.
    ///
    /// Entries are sorted by key; a stable sort keeps the first occurrence
    /// ahead on (pathological) duplicate keys.
    pub fn from_map<K, T>(entries: Vec<(K, T)>) -> Self
    where
        K: Into<String>,
        T: Into<Self>,
    {
        let mut entries: Vec<(String, Self)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        Self::Map(entries)
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Int(_) => "an integer",
            Self::Float(_) => "a float",
            Self::Text(_) => "a string",
            Self::DateTime(_) => "a date-time",
            Self::Enum(_) => "an enum value",
            Self::List(_) => "a list",
            Self::Map(_) => "a map",
            Self::Record(_) => "a record",
            Self::Null => "null",
        }
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&[(String, Self)]> {
        if let Self::Map(entries) = self {
            Some(entries.as_slice())
        } else {
            None
        }
    }

    /// Convert a parsed JSON tree into a boxed value.
    ///
    /// Integral JSON numbers become `Int`; everything else numeric becomes
    /// `Float`. Object key order is irrelevant by contract, so entries land
    /// in the canonical sorted form.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n.as_i64().map_or_else(
                || {
                    n.as_f64()
                        .and_then(Self::float)
                        .unwrap_or(Self::Null)
                },
                Self::Int,
            ),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(entries) => Self::from_map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::DateTime(dt) => write!(f, "\"{dt}\""),
            // repr renders enum members as their raw underlying value
            Self::Enum(ev) => write!(f, "{}", ev.value),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Record(record) => write!(f, "{record}"),
            Self::Null => f.write_str("null"),
        }
    }
}

// Dumped trees contain only JSON primitives, but serialization is total:
// date-times emit RFC 3339 text, enums emit their underlying scalar, and
// records emit their own ordered dump.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(x.get()),
            Self::Text(s) => serializer.serialize_str(s),
            Self::DateTime(dt) => dt.serialize(serializer),
            Self::Enum(ev) => ev.value.serialize(serializer),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Record(record) => record.dump().serialize(serializer),
            Self::Null => serializer.serialize_none(),
        }
    }
}

#[macro_export]
macro_rules! impl_value_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool       => Bool,
    i8         => Int,
    i16        => Int,
    i32        => Int,
    i64        => Int,
    u8         => Int,
    u16        => Int,
    u32        => Int,
    &str       => Text,
    String     => Text,
    DateTime   => DateTime,
    Float64    => Float,
    EnumValue  => Enum,
    Record     => Record,
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

///
/// EnumValue
///
/// Boxed form of an enum member: the owning model's path, the matched
/// variant, and the variant's underlying scalar. Identity is path+variant;
/// the scalar is carried so dumps need no model lookup.
///

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EnumValue {
    pub path: &'static str,
    pub variant: &'static str,
    pub value: Box<Value>,
}

impl EnumValue {
    #[must_use]
    pub fn new(path: &'static str, variant: &'static str, value: Value) -> Self {
        Self {
            path,
            variant,
            value: Box::new(value),
        }
    }
}

impl Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.path, self.variant)
    }
}
