//! Core runtime for Vellum: values, field descriptors, schema registries,
//! records, and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

pub mod error;
pub mod record;
pub mod schema;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, builders, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        record::{Args, Dump, Record, ValueSource},
        schema::{EnumModel, FieldKind, FieldSpec, Literal, Schema, VariantModel},
        value::{EnumValue, Value},
    };
}
