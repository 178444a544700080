use crate::{
    error::ValidationError,
    record::{Args, Record},
    schema::{EnumModel, FieldKind, SchemaRef},
    types::DateTime,
    value::Value,
};
use std::{
    fmt::{self, Debug},
    sync::Arc,
};

///
/// FieldDefault
///
/// A default is either a fixed value or a zero-argument producer. Fixed
/// defaults are boxed and validated once at schema build; producers are
/// evaluated, boxed, and validated on every unassigned read and are never
/// persisted.
///

#[derive(Clone)]
pub enum FieldDefault {
    Value(Value),
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Producer(_) => f.write_str("<producer>"),
        }
    }
}

///
/// FieldSpec
///
/// Descriptor for one declared attribute: value domain, default, and the
/// required / nullable / in-dump policy, plus an optional custom check
/// over the boxed value.
///

#[derive(Clone)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    default: Option<FieldDefault>,
    required: bool,
    nullable: bool,
    in_dump: bool,
    check: Option<Arc<dyn Fn(&Value) -> bool + Send + Sync>>,
}

impl FieldSpec {
    ///
    /// CONSTRUCTION
    ///

    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            default: None,
            required: true,
            nullable: false,
            in_dump: true,
            check: None,
        }
    }

    #[must_use]
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    #[must_use]
    pub const fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    #[must_use]
    pub const fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    #[must_use]
    pub const fn datetime(name: &'static str) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    #[must_use]
    pub const fn enumeration(name: &'static str, model: &'static EnumModel) -> Self {
        Self::new(name, FieldKind::Enum(model))
    }

    #[must_use]
    pub fn list(name: &'static str, element: FieldKind) -> Self {
        Self::new(name, FieldKind::List(Box::new(element)))
    }

    #[must_use]
    pub const fn map(name: &'static str) -> Self {
        Self::new(name, FieldKind::Map)
    }

    #[must_use]
    pub const fn record(name: &'static str, schema: SchemaRef) -> Self {
        Self::new(name, FieldKind::Record(schema))
    }

    ///
    /// POLICY
    ///

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    #[must_use]
    pub fn default_with(mut self, producer: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(FieldDefault::Producer(Arc::new(producer)));
        self
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Permanently exclude this field from `dump()`.
    #[must_use]
    pub const fn skip_dump(mut self) -> Self {
        self.in_dump = false;
        self
    }

    #[must_use]
    pub fn with_check(mut self, check: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn in_dump(&self) -> bool {
        self.in_dump
    }

    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    ///
    /// OPERATIONS
    ///

    /// Coerce externally supplied input into the canonical boxed form.
    ///
    /// Null passes through untouched; nullability is judged by `validate`.
    pub fn box_raw(&self, raw: Value) -> Result<Value, ValidationError> {
        box_value(&self.kind, self.name, raw)
    }

    /// Check a boxed value against the field's domain and custom check.
    pub fn validate(&self, boxed: &Value) -> Result<(), ValidationError> {
        if boxed.is_null() {
            if self.nullable {
                return Ok(());
            }

            return Err(ValidationError::NullNotAllowed {
                field: self.name.to_string(),
            });
        }

        check_domain(&self.kind, self.name, boxed)?;

        if let Some(check) = &self.check {
            if !check(boxed) {
                return Err(ValidationError::CheckFailed {
                    field: self.name.to_string(),
                    value: boxed.clone(),
                });
            }
        }

        Ok(())
    }

    /// Full write path: box, then validate; returns the storable value.
    pub fn assign(&self, raw: Value) -> Result<Value, ValidationError> {
        let boxed = self.box_raw(raw)?;
        self.validate(&boxed)?;

        Ok(boxed)
    }

    /// Serialization direction: boxed form to JSON-primitive form.
    #[must_use]
    pub fn dump_value(&self, boxed: &Value) -> Value {
        dump_value(&self.kind, boxed)
    }

    /// Resolve the default for an unassigned read, if any.
    ///
    /// Producer results go through the full write path so a misbehaving
    /// producer surfaces as a validation failure, not a corrupt slot.
    pub(crate) fn resolve_default(&self) -> Result<Option<Value>, ValidationError> {
        match &self.default {
            None => Ok(None),
            Some(FieldDefault::Value(v)) => Ok(Some(v.clone())),
            Some(FieldDefault::Producer(producer)) => {
                tracing::trace!(field = self.name, "evaluating producer default");
                self.assign(producer()).map(Some)
            }
        }
    }

    /// Box and validate a fixed default in place. Called once at schema
    /// build so authoring errors fail fast.
    pub(crate) fn bind_default(&mut self) -> Result<(), ValidationError> {
        if let Some(FieldDefault::Value(raw)) = self.default.take() {
            let boxed = self.assign(raw)?;
            self.default = Some(FieldDefault::Value(boxed));
        }

        Ok(())
    }
}

impl Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FieldSpec");
        s.field("name", &self.name).field("kind", &self.kind);
        if let Some(default) = &self.default {
            s.field("default", default);
        }
        s.field("required", &self.required)
            .field("nullable", &self.nullable)
            .field("in_dump", &self.in_dump)
            .finish_non_exhaustive()
    }
}

///
/// BOX / VALIDATE / DUMP
///
/// Kind-directed conversion routines, shared by fields and list elements.
///

fn box_value(kind: &FieldKind, field: &str, raw: Value) -> Result<Value, ValidationError> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    match kind {
        FieldKind::DateTime => match raw {
            Value::Text(input) => match DateTime::parse(&input) {
                Ok(dt) => Ok(Value::DateTime(dt)),
                Err(source) => Err(ValidationError::DateParse {
                    field: field.to_string(),
                    input,
                    source,
                }),
            },
            other => Ok(other),
        },

        FieldKind::Enum(model) => model.coerce(field, &raw).map(Value::Enum),

        FieldKind::List(element) => match raw {
            // a string is iterable but not a sequence of elements
            Value::Text(_) => Err(ValidationError::TextWhereSequence {
                field: field.to_string(),
            }),
            Value::List(items) => {
                let mut boxed = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let item = box_value(element, field, item)
                        .and_then(|v| check_domain(element, field, &v).map(|()| v))
                        .map_err(|err| err.into_element(field, index))?;
                    boxed.push(item);
                }

                Ok(Value::List(boxed))
            }
            other => Err(ValidationError::NotASequence {
                field: field.to_string(),
                value: other,
            }),
        },

        // entries are normalized to canonical key order
        FieldKind::Map => match raw {
            Value::Map(mut entries) => {
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                Ok(Value::Map(entries))
            }
            other => Ok(other),
        },

        FieldKind::Record(schema) => match raw {
            Value::Record(record) => Ok(Value::Record(record)),
            Value::Map(entries) => {
                let record = Record::try_create(schema(), Args::from_entries(entries))?;
                Ok(Value::Record(Box::new(record)))
            }
            other => Err(ValidationError::WrongType {
                field: field.to_string(),
                expected: kind.expected_label(),
                value: other,
            }),
        },

        // type check only; wrong types are caught by check_domain
        FieldKind::Bool | FieldKind::Int | FieldKind::Number | FieldKind::Text => Ok(raw),
    }
}

fn check_domain(kind: &FieldKind, field: &str, value: &Value) -> Result<(), ValidationError> {
    match (kind, value) {
        (FieldKind::Bool, Value::Bool(_))
        | (FieldKind::Int, Value::Int(_))
        | (FieldKind::Number, Value::Int(_) | Value::Float(_))
        | (FieldKind::Text, Value::Text(_))
        | (FieldKind::DateTime, Value::DateTime(_))
        | (FieldKind::Map, Value::Map(_)) => Ok(()),

        (FieldKind::Enum(model), Value::Enum(ev)) => {
            if ev.path == model.path {
                Ok(())
            } else {
                Err(ValidationError::EnumCoercion {
                    field: field.to_string(),
                    path: model.path,
                    value: value.clone(),
                })
            }
        }

        (FieldKind::List(element), Value::List(items)) => {
            for (index, item) in items.iter().enumerate() {
                check_domain(element, field, item)
                    .map_err(|err| err.into_element(field, index))?;
            }

            Ok(())
        }
        (FieldKind::List(_), Value::Text(_)) => Err(ValidationError::TextWhereSequence {
            field: field.to_string(),
        }),

        (FieldKind::Record(schema), Value::Record(record)) => {
            let expected = schema();
            if std::ptr::eq(expected, record.schema()) {
                Ok(())
            } else {
                Err(ValidationError::RecordType {
                    field: field.to_string(),
                    expected: expected.path(),
                    found: record.schema().path(),
                })
            }
        }

        _ => Err(ValidationError::WrongType {
            field: field.to_string(),
            expected: kind.expected_label(),
            value: value.clone(),
        }),
    }
}

fn dump_value(kind: &FieldKind, boxed: &Value) -> Value {
    match (kind, boxed) {
        (_, Value::Null) => Value::Null,
        (FieldKind::DateTime, Value::DateTime(dt)) => Value::Text(dt.to_string()),
        (FieldKind::Enum(_), Value::Enum(ev)) => (*ev.value).clone(),
        (FieldKind::List(element), Value::List(items)) => {
            Value::List(items.iter().map(|item| dump_value(element, item)).collect())
        }
        (FieldKind::Record(_), Value::Record(record)) => record.dump().to_value(),
        _ => boxed.clone(),
    }
}

///
/// TESTS
///
