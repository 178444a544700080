use crate::{
    error::Error,
    record::{Args, Dump, Record},
    schema::Schema,
    value::Value,
};

///
/// ValueSource
///
/// Field lookup over a candidate source object. `None` means the source
/// has no value for the name; an explicit null is returned as
/// `Some(Value::Null)` so callers can distinguish the two.
///

pub trait ValueSource {
    fn lookup(&self, field: &str) -> Option<Value>;
}

impl ValueSource for Record {
    fn lookup(&self, field: &str) -> Option<Value> {
        let index = self.schema().index_of(field)?;
        self.probe(index)
    }
}

impl ValueSource for Args {
    fn lookup(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl ValueSource for Dump {
    fn lookup(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl Record {
    /// Construct by collecting each declared field from the first
    /// candidate that has it non-null.
    ///
    /// The override map is consulted before the sources, which are
    /// searched in order. Absent and null both fall through to later
    /// candidates; validation failures never do — they surface from the
    /// construction itself.
    pub fn from_sources(
        schema: &'static Schema,
        sources: &[&dyn ValueSource],
        overrides: Args,
    ) -> Result<Self, Error> {
        let mut args = Args::new();

        for field in schema.fields() {
            let found = std::iter::once(&overrides as &dyn ValueSource)
                .chain(sources.iter().copied())
                .find_map(|source| source.lookup(field.name()).filter(|v| !v.is_null()));

            if let Some(value) = found {
                args.insert(field.name(), value);
            }
        }

        Self::create(schema, args)
    }
}
