//! Fixture schemas shared by the unit tests.

use crate::{
    schema::{EnumModel, FieldKind, FieldSpec, Literal, Schema, VariantModel},
    types::DateTime,
    value::Value,
};
use std::sync::LazyLock;

pub(crate) const COLOR: EnumModel = EnumModel {
    path: "fixtures::Color",
    variants: &[
        VariantModel {
            name: "Red",
            value: Literal::Text("red"),
        },
        VariantModel {
            name: "Green",
            value: Literal::Text("green"),
        },
        VariantModel {
            name: "Blue",
            value: Literal::Text("blue"),
        },
        VariantModel {
            name: "Black",
            value: Literal::Text("black"),
        },
    ],
};

pub(crate) const NUMBER: EnumModel = EnumModel {
    path: "fixtures::Number",
    variants: &[
        VariantModel {
            name: "Zero",
            value: Literal::Int(0),
        },
        VariantModel {
            name: "One",
            value: Literal::Int(1),
        },
        VariantModel {
            name: "Two",
            value: Literal::Int(2),
        },
        VariantModel {
            name: "Three",
            value: Literal::Int(3),
        },
        VariantModel {
            name: "Four",
            value: Literal::Int(4),
        },
    ],
};

pub(crate) const CHOOSE_ONE: EnumModel = EnumModel {
    path: "fixtures::ChooseOne",
    variants: &[
        VariantModel {
            name: "A",
            value: Literal::Text("a"),
        },
        VariantModel {
            name: "B",
            value: Literal::Text("b"),
        },
        VariantModel {
            name: "C",
            value: Literal::Text("c"),
        },
    ],
};

static SAMPLE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("fixtures::SampleRecord")
        .field(FieldSpec::text("string_field"))
        .field(FieldSpec::text("string_field_w_default").with_default("default"))
        .field(FieldSpec::int("integer_field"))
        .field(FieldSpec::int("integer_field_w_default").with_default(42))
        .field(FieldSpec::enumeration("enum_field", &CHOOSE_ONE))
        .field(
            FieldSpec::enumeration("enum_field_w_default", &CHOOSE_ONE)
                .with_default(CHOOSE_ONE.member("B").unwrap()),
        )
        .field(
            FieldSpec::list("list_field", FieldKind::Text)
                .with_default(Value::from_list(vec!["alpha", "beta", "gamma"])),
        )
        .build()
        .expect("valid fixture schema")
});

pub(crate) fn sample() -> &'static Schema {
    &SAMPLE
}

static DERIVED_SAMPLE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("fixtures::DerivedSampleRecord")
        .extend(sample())
        .field(FieldSpec::text("string_field_w_default").with_default("new_default"))
        .field(FieldSpec::enumeration("choice", &CHOOSE_ONE).optional())
        .field(FieldSpec::int("new_field"))
        .fix("enum_field", CHOOSE_ONE.member("A").unwrap())
        .build()
        .expect("valid fixture schema")
});

pub(crate) fn derived_sample() -> &'static Schema {
    &DERIVED_SAMPLE
}

static ENUM_RECORD: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("fixtures::EnumRecord")
        .field(FieldSpec::enumeration("enum_field", &COLOR))
        .field(
            FieldSpec::enumeration("enum_field_w_default", &NUMBER)
                .with_default(NUMBER.member("Three").unwrap()),
        )
        .field(
            FieldSpec::enumeration("enum_field_w_default_wo_required", &COLOR)
                .with_default(COLOR.member("Green").unwrap())
                .optional(),
        )
        .field(
            FieldSpec::enumeration("enum_field_w_xtra_validation", &NUMBER)
                .with_default(2)
                .with_check(|v| {
                    matches!(v, Value::Enum(ev) if ev.variant == "Two" || ev.variant == "Three")
                }),
        )
        .field(
            FieldSpec::enumeration("enum_field_wo_dump", &COLOR)
                .with_default(COLOR.member("Black").unwrap())
                .skip_dump(),
        )
        .build()
        .expect("valid fixture schema")
});

pub(crate) fn enum_record() -> &'static Schema {
    &ENUM_RECORD
}

fn string_fields(path: &'static str, nullable: bool) -> Schema {
    let spec = |f: FieldSpec| if nullable { f.nullable() } else { f };

    Schema::builder(path)
        .field(spec(FieldSpec::text("field")))
        .field(spec(FieldSpec::text("field_w_default").with_default("spruce")))
        .field(spec(
            FieldSpec::text("field_w_default_wo_required")
                .with_default("elm")
                .optional(),
        ))
        .field(spec(FieldSpec::text("field_w_validation").with_check(
            |v| v.as_text().is_some_and(|s| s.chars().count() <= 6),
        )))
        .field(spec(
            FieldSpec::text("field_w_default_w_validation")
                .with_default("redwood")
                .with_check(|v| v.as_text().is_some_and(|s| s.chars().count() > 6)),
        ))
        .field(spec(
            FieldSpec::text("field_wo_dump")
                .with_default("juniper")
                .skip_dump(),
        ))
        .field(spec(FieldSpec::text("field_wo_default_wo_required").optional()))
        .build()
        .expect("valid fixture schema")
}

static STRING_RECORD: LazyLock<Schema> =
    LazyLock::new(|| string_fields("fixtures::StringRecord", false));

pub(crate) fn string_record() -> &'static Schema {
    &STRING_RECORD
}

static STRING_NULLABLE: LazyLock<Schema> =
    LazyLock::new(|| string_fields("fixtures::StringRecordNullable", true));

pub(crate) fn string_nullable_record() -> &'static Schema {
    &STRING_NULLABLE
}

pub(crate) const FIXED_NOW: &str = "2015-06-09T03:34:49Z";

static DATE_RECORD: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("fixtures::DateRecord")
        .field(FieldSpec::datetime("field"))
        .field(FieldSpec::datetime("field_w_default").with_default(FIXED_NOW))
        .field(
            FieldSpec::datetime("field_w_default_callable")
                .default_with(|| Value::DateTime(DateTime::now())),
        )
        .field(
            FieldSpec::datetime("field_w_default_w_validation")
                .with_default(FIXED_NOW)
                .with_check(|v| {
                    matches!(v, Value::DateTime(dt) if *dt >= DateTime::parse(FIXED_NOW).unwrap())
                }),
        )
        .field(
            FieldSpec::datetime("field_wo_required_w_nullable")
                .optional()
                .nullable(),
        )
        .build()
        .expect("valid fixture schema")
});

pub(crate) fn date_record() -> &'static Schema {
    &DATE_RECORD
}

static LIST_RECORD: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("fixtures::ListRecord")
        .field(FieldSpec::list("field", FieldKind::Text))
        .field(
            FieldSpec::list("field_w_default", FieldKind::Int)
                .with_default(Value::from_list(vec![42i64, 43])),
        )
        .field(FieldSpec::list("field_wo_required", FieldKind::Number).optional())
        .field(
            FieldSpec::list("field_nullable", FieldKind::Int)
                .with_default(Value::from_list(vec![1i64]))
                .nullable(),
        )
        .build()
        .expect("valid fixture schema")
});

pub(crate) fn list_record() -> &'static Schema {
    &LIST_RECORD
}

static BOOLEAN_RECORD: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("fixtures::BooleanRecord")
        .field(FieldSpec::boolean("field1"))
        .field(FieldSpec::boolean("field2").with_default(false).nullable())
        .build()
        .expect("valid fixture schema")
});

pub(crate) fn boolean_record() -> &'static Schema {
    &BOOLEAN_RECORD
}

static TRUCK: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("fixtures::Truck")
        .field(FieldSpec::text("color"))
        .field(FieldSpec::number("weight"))
        .field(FieldSpec::int("wheels").with_default(4).skip_dump())
        .build()
        .expect("valid fixture schema")
});

pub(crate) fn truck() -> &'static Schema {
    &TRUCK
}
