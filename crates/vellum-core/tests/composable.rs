//! Record-of-records composition over parsed JSON payloads.

use std::sync::LazyLock;
use vellum_core::{
    args,
    error::{Error, ValidationError},
    record::Record,
    schema::{EnumModel, FieldKind, FieldSpec, Literal, Schema, VariantModel},
    value::Value,
};

const COMMIT_TYPE: EnumModel = EnumModel {
    path: "composable::CommitType",
    variants: &[VariantModel {
        name: "Commit",
        value: Literal::Text("commit"),
    }],
};

const REF_TYPE: EnumModel = EnumModel {
    path: "composable::RefType",
    variants: &[VariantModel {
        name: "Branch",
        value: Literal::Text("branch"),
    }],
};

static COMMIT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("composable::Commit")
        .field(FieldSpec::text("hash"))
        .field(FieldSpec::enumeration("type", &COMMIT_TYPE))
        .field(FieldSpec::text("message").optional())
        .field(FieldSpec::datetime("date").optional())
        .field(FieldSpec::list("parents", FieldKind::Record(commit)).optional())
        .build()
        .expect("valid schema")
});

fn commit() -> &'static Schema {
    &COMMIT
}

static BRANCH: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("composable::Branch")
        .field(FieldSpec::enumeration("type", &REF_TYPE))
        .field(FieldSpec::text("name"))
        .field(FieldSpec::record("target", commit))
        .build()
        .expect("valid schema")
});

fn branch() -> &'static Schema {
    &BRANCH
}

static CHANGE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("composable::Change")
        .field(FieldSpec::record("new", branch))
        .field(FieldSpec::record("old", branch))
        .field(FieldSpec::boolean("created"))
        .field(FieldSpec::boolean("forced"))
        .field(FieldSpec::boolean("closed"))
        .build()
        .expect("valid schema")
});

fn change() -> &'static Schema {
    &CHANGE
}

static PUSH: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("composable::Push")
        .field(FieldSpec::list("changes", FieldKind::Record(change)))
        .build()
        .expect("valid schema")
});

fn push() -> &'static Schema {
    &PUSH
}

static EVENT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("composable::Event")
        .field(FieldSpec::text("actor"))
        .field(FieldSpec::text("repository"))
        .field(FieldSpec::record("push", push))
        .build()
        .expect("valid schema")
});

fn event() -> &'static Schema {
    &EVENT
}

static SIMPLE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("composable::Simple")
        .field(FieldSpec::text("actor"))
        .field(FieldSpec::text("repository"))
        .field(FieldSpec::record("parent", commit))
        .build()
        .expect("valid schema")
});

fn simple() -> &'static Schema {
    &SIMPLE
}

const JSON_SIMPLE: &str = r#"
{
  "actor": "User",
  "repository": "Repository",
  "parent": {
    "hash": "e0d0c2041e09746be5ce4b55067d5a8e3098c843",
    "type": "commit"
  }
}
"#;

const JSON_EVENT: &str = r#"
{
  "actor": "User",
  "repository": "Repository",
  "push": {
    "changes": [
      {
        "new": {
          "type": "branch",
          "name": "name-of-branch",
          "target": {
            "type": "commit",
            "hash": "709d658dc5b6d6afcd46049c2f332ee3f515a67d",
            "author": "User",
            "message": "new commit message",
            "date": "2015-06-09T03:34:49+00:00",
            "parents": [
              {
                "hash": "1e65c05c1d5171631d92438a13901ca7dae9618c",
                "type": "commit"
              }
            ]
          }
        },
        "old": {
          "type": "branch",
          "name": "name-of-branch",
          "target": {
            "type": "commit",
            "hash": "1e65c05c1d5171631d92438a13901ca7dae9618c",
            "author": "User",
            "message": "old commit message",
            "date": "2015-06-08T21:34:56+00:00",
            "parents": [
              {
                "hash": "e0d0c2041e09746be5ce4b55067d5a8e3098c843",
                "type": "commit"
              }
            ]
          }
        },
        "created": false,
        "forced": false,
        "closed": false
      }
    ]
  }
}
"#;

/// Walk a dotted path of composable fields.
fn nested(record: &Record, path: &[&str]) -> Value {
    let mut current = record.clone();
    let (last, steps) = path.split_last().unwrap();

    for step in steps {
        match current.get(step).unwrap() {
            Value::Record(inner) => current = *inner,
            other => panic!("expected record at '{step}', got {other}"),
        }
    }

    current.get(last).unwrap()
}

#[test]
fn simplest_composition() {
    let s = Record::from_json(simple(), JSON_SIMPLE).unwrap();

    assert_eq!(s.get("actor").unwrap(), Value::Text("User".into()));
    assert_eq!(
        nested(&s, &["parent", "hash"]),
        Value::Text("e0d0c2041e09746be5ce4b55067d5a8e3098c843".into())
    );

    match nested(&s, &["parent", "type"]) {
        Value::Enum(ev) => assert_eq!(*ev.value, Value::Text("commit".into())),
        other => panic!("expected enum, got {other}"),
    }
}

#[test]
fn deep_composition_with_record_lists() {
    let e = Record::from_json(event(), JSON_EVENT).unwrap();

    let changes = nested(&e, &["push", "changes"]);
    let Value::List(changes) = changes else {
        panic!("expected a list of changes");
    };
    assert_eq!(changes.len(), 1);

    let Value::Record(change) = &changes[0] else {
        panic!("expected a change record");
    };
    assert_eq!(change.get("created").unwrap(), Value::Bool(false));

    assert_eq!(
        nested(change, &["new", "target", "message"]),
        Value::Text("new commit message".into())
    );
    assert!(matches!(
        nested(change, &["new", "target", "date"]),
        Value::DateTime(_)
    ));

    // unknown keys in the payload ("author") are ignored
    let Value::Record(target) = nested(change, &["old", "target"]) else {
        panic!("expected a target record");
    };
    assert!(target.get("author").is_err());
}

#[test]
fn nested_dump_round_trips() {
    let e = Record::from_json(event(), JSON_EVENT).unwrap();

    let reloaded = Record::load(event(), e.dump()).unwrap();
    assert_eq!(e, reloaded);

    let json = e.to_json().unwrap();
    let reparsed = Record::from_json(event(), &json).unwrap();
    assert_eq!(e, reparsed);
}

#[test]
fn existing_instance_is_accepted_as_composable_value() {
    let parent = Record::create(
        commit(),
        args! { "hash" => "abc123", "type" => "commit" },
    )
    .unwrap();

    let s = Record::create(
        simple(),
        args! {
            "actor" => "User",
            "repository" => "Repository",
            "parent" => parent.clone(),
        },
    )
    .unwrap();

    assert_eq!(nested(&s, &["parent", "hash"]), Value::Text("abc123".into()));
}

#[test]
fn composable_rejects_records_of_the_wrong_type() {
    let b = Record::create(
        branch(),
        args! {
            "type" => "branch",
            "name" => "main",
            "target" => commit_entries(),
        },
    )
    .unwrap();

    let err = Record::create(
        simple(),
        args! {
            "actor" => "User",
            "repository" => "Repository",
            "parent" => b,
        },
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::RecordType { .. })
    ));
}

fn commit_entries() -> Value {
    Value::from_map(vec![
        ("hash", Value::Text("abc123".into())),
        ("type", Value::Text("commit".into())),
    ])
}

#[test]
fn nested_validation_failures_propagate() {
    let err = Record::create(
        simple(),
        args! {
            "actor" => "User",
            "repository" => "Repository",
            "parent" => commit_entries_with_bad_type(),
        },
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::EnumCoercion { .. })
    ));
}

fn commit_entries_with_bad_type() -> Value {
    Value::from_map(vec![
        ("hash", Value::Text("abc123".into())),
        ("type", Value::Text("tag".into())),
    ])
}
