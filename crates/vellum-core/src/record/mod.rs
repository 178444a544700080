mod args;
mod dump;
mod source;


pub use args::Args;
pub use dump::Dump;
pub use source::ValueSource;

use crate::{
    error::{AccessError, Error, ValidationError},
    schema::Schema,
    value::Value,
};
use serde::de::Error as _;
use std::{
    fmt::{self, Debug, Display},
    hash::{DefaultHasher, Hash, Hasher},
};

///
/// Slot
///
/// Per-instance storage state of one field. Only explicitly assigned
/// values are stored; defaults stay in the schema and are resolved at
/// read time. `Deleted` is the tombstone that keeps a deleted field from
/// resurrecting its default.
///

#[derive(Clone, Debug, Eq, PartialEq)]
enum Slot {
    Unset,
    Deleted,
    Set(Value),
}

/// Internal read-path failure: no value present vs. invalid data.
enum ReadError {
    NotSet,
    Invalid(ValidationError),
}

///
/// Record
///
/// A schema-backed instance: one slot per declared field, in registry
/// order. Constructed via [`create`](Self::create), [`load`](Self::load),
/// [`from_json`](Self::from_json), or
/// [`from_sources`](Self::from_sources); mutated only through validating
/// assignment. A failed construction yields no record at all; a failed
/// assignment leaves prior state untouched.
///

#[derive(Clone)]
pub struct Record {
    schema: &'static Schema,
    slots: Vec<Slot>,
}

impl Record {
    ///
    /// CONSTRUCTION
    ///

    pub(crate) fn empty(schema: &'static Schema) -> Self {
        Self {
            schema,
            slots: vec![Slot::Unset; schema.fields().len()],
        }
    }

    /// Construct from keyword-style arguments.
    ///
    /// Walks the registry in order: assigns the argument when present,
    /// falls back to the type's fixed values, and otherwise leaves the
    /// slot unset so the field's own default policy applies at read time.
    /// A null argument that fails validation on a non-required field is
    /// treated as "leave unset". Unknown argument keys are ignored.
    /// Finishes with a required-fields pass, aggregating everything still
    /// unresolved into one validation error.
    pub fn create(schema: &'static Schema, args: impl Into<Args>) -> Result<Self, Error> {
        Self::try_create(schema, args.into()).map_err(Error::from)
    }

    pub(crate) fn try_create(
        schema: &'static Schema,
        mut args: Args,
    ) -> Result<Self, ValidationError> {
        let mut record = Self::empty(schema);

        for (index, field) in schema.fields().iter().enumerate() {
            if let Some(raw) = args.take(field.name()) {
                let was_null = raw.is_null();
                match field.assign(raw) {
                    Ok(boxed) => record.slots[index] = Slot::Set(boxed),
                    Err(_) if was_null && !field.is_required() => {}
                    Err(err) => return Err(err),
                }
            } else if let Some(fixed) = schema.fixed(field.name()) {
                // boxed and validated at schema build
                record.slots[index] = Slot::Set(fixed.clone());
            }
        }

        record.try_validate()?;

        Ok(record)
    }

    /// Construct from a parsed mapping; a syntactic convenience over
    /// [`create`](Self::create), not a separate code path.
    pub fn load(schema: &'static Schema, mapping: impl Into<Args>) -> Result<Self, Error> {
        Self::create(schema, mapping)
    }

    /// Parse a JSON document and construct from it.
    pub fn from_json(schema: &'static Schema, text: &str) -> Result<Self, Error> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        let Value::Map(entries) = Value::from_json(&json) else {
            return Err(Error::Json(serde_json::Error::custom(
                "expected a JSON object",
            )));
        };

        tracing::trace!(schema = schema.path(), "loading record from json");
        Self::create(schema, Args::from_entries(entries))
    }

    ///
    /// ACCESS
    ///

    #[must_use]
    pub const fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Read one field.
    ///
    /// Stored values are returned as-is (by clone). Unset fields resolve
    /// their default — producers are evaluated fresh on every read — and
    /// optional nullable fields with no default read as null. Deleted
    /// fields always read as not-set, whatever their nullability.
    pub fn get(&self, name: &str) -> Result<Value, Error> {
        let index = self.index_of(name)?;

        self.read(index).map_err(|err| match err {
            ReadError::NotSet => Error::Access(AccessError::NotSet {
                field: name.to_string(),
            }),
            ReadError::Invalid(err) => Error::Validation(err),
        })
    }

    /// Assign one field: box, validate, store. Failure leaves the prior
    /// value untouched.
    pub fn set(&mut self, name: &str, raw: impl Into<Value>) -> Result<(), Error> {
        let index = self.index_of(name)?;
        let boxed = self.schema.fields()[index].assign(raw.into())?;
        self.slots[index] = Slot::Set(boxed);

        Ok(())
    }

    /// Delete one field.
    ///
    /// Required fields cannot be deleted. A non-nullable field keeps a
    /// tombstone so later reads raise not-set instead of restoring the
    /// default; a nullable field's slot is cleared entirely and the next
    /// read falls through to default/null logic.
    pub fn unset(&mut self, name: &str) -> Result<(), Error> {
        let index = self.index_of(name)?;
        let field = &self.schema.fields()[index];

        if field.is_required() {
            return Err(AccessError::DeleteRequired {
                field: name.to_string(),
            }
            .into());
        }

        self.slots[index] = if field.is_nullable() {
            Slot::Unset
        } else {
            Slot::Deleted
        };

        Ok(())
    }

    /// Whether the field holds an explicitly assigned value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.schema
            .index_of(name)
            .is_some_and(|index| matches!(self.slots[index], Slot::Set(_)))
    }

    /// Force the read path of every required field, aggregating the ones
    /// with no resolvable value into a single validation error.
    pub fn validate(&self) -> Result<(), Error> {
        self.try_validate().map_err(Error::from)
    }

    fn try_validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();

        for (index, field) in self.schema.fields().iter().enumerate() {
            if !field.is_required() {
                continue;
            }

            match self.read(index) {
                Ok(_) => {}
                Err(ReadError::NotSet) => missing.push(field.name()),
                Err(ReadError::Invalid(err)) => return Err(err),
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingRequired {
                record: self.schema.name(),
                fields: missing,
            })
        }
    }

    ///
    /// DUMP
    ///

    /// Ordered dump of all dump-eligible fields.
    ///
    /// Fields with no resolvable value are omitted; null appears exactly
    /// when a nullable field currently reads null.
    #[must_use]
    pub fn dump(&self) -> Dump {
        let mut dump = Dump::new();

        for &index in self.schema.dump_order() {
            let field = &self.schema.fields()[index];
            match self.read(index) {
                Ok(value) => dump.push(field.name(), field.dump_value(&value)),
                Err(ReadError::NotSet) => {}
                Err(ReadError::Invalid(err)) => {
                    tracing::warn!(
                        field = field.name(),
                        error = %err,
                        "default producer failed during dump; field omitted"
                    );
                }
            }
        }

        dump
    }

    /// Encode the dump as a JSON document.
    pub fn to_json(&self) -> Result<String, Error> {
        self.dump().to_json().map_err(Error::from)
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        self.dump().to_json_pretty().map_err(Error::from)
    }

    ///
    /// INTERNAL
    ///

    fn index_of(&self, name: &str) -> Result<usize, Error> {
        self.schema.index_of(name).ok_or_else(|| {
            Error::Access(AccessError::UnknownField {
                record: self.schema.name(),
                field: name.to_string(),
            })
        })
    }

    fn read(&self, index: usize) -> Result<Value, ReadError> {
        let field = &self.schema.fields()[index];

        match &self.slots[index] {
            Slot::Set(value) => Ok(value.clone()),
            // deletion wins over nullability
            Slot::Deleted => Err(ReadError::NotSet),
            Slot::Unset => match field.resolve_default() {
                Ok(Some(value)) => Ok(value),
                Ok(None) if field.is_nullable() && !field.is_required() => Ok(Value::Null),
                Ok(None) => Err(ReadError::NotSet),
                Err(err) => Err(ReadError::Invalid(err)),
            },
        }
    }

    /// Read result with not-set collapsed to `None`; the sentinel
    /// convention shared by equality, hashing, repr, and sources.
    pub(crate) fn probe(&self, index: usize) -> Option<Value> {
        self.read(index).ok()
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.schema.name())?;

        let mut first = true;
        for (index, field) in self.schema.fields().iter().enumerate() {
            let Some(value) = self.probe(index) else {
                continue;
            };

            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}={value}", field.name())?;
        }

        f.write_str(")")
    }
}

impl Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({self})")
    }
}

// Two records are equal iff they share a record type and every declared
// field reads equal, with unset-vs-unset counting as equal.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.schema, other.schema) {
            return false;
        }

        (0..self.schema.fields().len()).all(|index| self.probe(index) == other.probe(index))
    }
}

impl Eq for Record {}

// Order-independent sum of per-field hashes, with a fixed sentinel for
// absent fields. Records participating in hash-keyed containers must not
// be mutated afterwards.
impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        const ABSENT: u64 = 0x517c_c1b7_2722_0a95;

        self.schema.path().hash(state);

        let mut sum: u64 = 0;
        for index in 0..self.schema.fields().len() {
            let field_hash = self.probe(index).map_or(ABSENT, |value| {
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                hasher.finish()
            });
            sum = sum.wrapping_add(field_hash);
        }

        state.write_u64(sum);
    }
}
