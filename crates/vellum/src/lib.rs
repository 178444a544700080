//! Vellum — schema-first declarative records for Rust.
//!
//! This is the public meta-crate. Downstream users depend on **vellum** only.
//!
//! A schema is declared once per record type through [`Schema::builder`];
//! instances are constructed from keyword-style arguments or parsed JSON,
//! mutated through validating assignment, and dumped back to ordered
//! primitive mappings.
//!
//! ```ignore
//! use std::sync::LazyLock;
//! use vellum::prelude::*;
//! use vellum::args;
//!
//! static TRUCK: LazyLock<Schema> = LazyLock::new(|| {
//!     Schema::builder("app::Truck")
//!         .field(FieldSpec::text("color"))
//!         .field(FieldSpec::number("weight"))
//!         .field(FieldSpec::int("wheels").with_default(4).skip_dump())
//!         .build()
//!         .expect("valid schema")
//! });
//!
//! let truck = Record::create(&TRUCK, args! {
//!     "color" => "blue",
//!     "weight" => Value::float(44.4).unwrap(),
//!     "wheels" => 18,
//! })?;
//!
//! assert!(!truck.dump().contains("wheels"));
//! ```

pub use vellum_core as core;

pub use vellum_core::{
    Error, args,
    error::{AccessError, SchemaError, ValidationError},
    record::{Args, Dump, Record, ValueSource},
    schema::{
        EnumModel, FieldDefault, FieldKind, FieldSpec, Literal, Schema, SchemaBuilder, SchemaRef,
        VariantModel,
    },
    types::{DateTime, Float64},
    value::{EnumValue, Value},
};

//
// Prelude
//

pub mod prelude {
    pub use vellum_core::prelude::*;
}
