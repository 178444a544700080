mod enums;
mod field;
mod kind;

pub use enums::{EnumModel, Literal, VariantModel};
pub use field::{FieldDefault, FieldSpec};
pub use kind::{FieldKind, SchemaRef};

use crate::{error::SchemaError, value::Value};

///
/// Schema
///
/// Frozen, ordered field registry for one record type, plus the override
/// side table and the precomputed dump set. Built once per type through
/// [`SchemaBuilder`] and shared as `&'static Schema`; record-type identity
/// is schema reference identity.
///

#[derive(Debug)]
pub struct Schema {
    path: &'static str,
    name: &'static str,
    fields: Vec<FieldSpec>,
    overrides: Vec<(&'static str, Value)>,
    dump_order: Vec<usize>,
}

impl Schema {
    #[must_use]
    pub fn builder(path: &'static str) -> SchemaBuilder {
        SchemaBuilder::new(path)
    }

    /// Fully-qualified type path (for diagnostics).
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Short record name (for repr).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Ordered field registry.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Fixed value from the override side table, already boxed.
    #[must_use]
    pub fn fixed(&self, name: &str) -> Option<&Value> {
        self.overrides
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Registry indices of dump-eligible fields, in declaration order.
    pub(crate) fn dump_order(&self) -> &[usize] {
        &self.dump_order
    }
}

///
/// SchemaBuilder
///
/// Declaration-time registration: fields accumulate in declaration order,
/// merged with an inherited base registry. A field re-declared with an
/// inherited name replaces the ancestor's spec but keeps its position;
/// `fix` routes a name into the override side table instead, so ancestors
/// still resolve a FieldSpec for it while instances get the fixed value.
/// First declaration wins for position, most-derived wins for behavior.
///

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    path: &'static str,
    fields: Vec<FieldSpec>,
    own: Vec<&'static str>,
    overrides: Vec<(&'static str, Value)>,
    errors: Vec<SchemaError>,
}

impl SchemaBuilder {
    fn new(path: &'static str) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Inherit a base schema's registry and override table.
    #[must_use]
    pub fn extend(mut self, base: &Schema) -> Self {
        self.fields.extend(base.fields.iter().cloned());
        self.overrides.extend(base.overrides.iter().cloned());
        self
    }

    /// Declare a field.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        let name = spec.name();

        if self.own.contains(&name) {
            self.errors.push(SchemaError::DuplicateField {
                schema: self.path,
                field: name,
            });
            return self;
        }
        self.own.push(name);

        // re-declaring an inherited field keeps its position
        match self.fields.iter().position(|f| f.name() == name) {
            Some(index) => self.fields[index] = spec,
            None => self.fields.push(spec),
        }

        // most-derived declaration also supersedes an inherited fixed value
        self.overrides.retain(|(n, _)| *n != name);

        self
    }

    /// Fix an inherited field to a constant value for this type.
    #[must_use]
    pub fn fix(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.overrides.retain(|(n, _)| *n != name);
        self.overrides.push((name, value.into()));
        self
    }

    /// Validate the declaration and freeze the schema.
    pub fn build(mut self) -> Result<Schema, SchemaError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }

        for spec in &mut self.fields {
            spec.bind_default()
                .map_err(|source| SchemaError::InvalidDefault {
                    schema: self.path,
                    field: spec.name(),
                    source,
                })?;
        }

        let mut overrides = Vec::with_capacity(self.overrides.len());
        for (name, raw) in self.overrides {
            let Some(spec) = self.fields.iter().find(|f| f.name() == name) else {
                return Err(SchemaError::UnknownOverride {
                    schema: self.path,
                    field: name,
                });
            };

            let boxed = spec
                .assign(raw)
                .map_err(|source| SchemaError::InvalidOverride {
                    schema: self.path,
                    field: name,
                    source,
                })?;
            overrides.push((name, boxed));
        }

        let dump_order = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.in_dump())
            .map(|(i, _)| i)
            .collect();

        let name = self.path.rsplit("::").next().unwrap_or(self.path);
        tracing::debug!(path = self.path, fields = self.fields.len(), "schema built");

        Ok(Schema {
            path: self.path,
            name,
            fields: self.fields,
            overrides,
            dump_order,
        })
    }
}

///
/// TESTS
///
