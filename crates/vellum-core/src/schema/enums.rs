use crate::{
    error::ValidationError,
    value::{EnumValue, Value},
};

///
/// EnumModel
///
/// Static declaration of an enumerated value domain: a diagnostic path and
/// the ordered variant list. The model backing an enum field is fixed at
/// declaration and never overridable per instance.
///

#[derive(Clone, Copy, Debug)]
pub struct EnumModel {
    pub path: &'static str,
    pub variants: &'static [VariantModel],
}

impl EnumModel {
    /// Look up a variant by name and produce its boxed member value.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<EnumValue> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.to_enum_value(self.path))
    }

    /// Coerce raw input into a member of this model.
    ///
    /// Accepts an existing member, then matches the underlying value, then
    /// falls back to the variant name. By-value is authoritative; when the
    /// two lookups disagree the input is rejected as ambiguous.
    pub fn coerce(&self, field: &str, raw: &Value) -> Result<EnumValue, ValidationError> {
        if let Value::Enum(ev) = raw {
            if ev.path == self.path && self.member(ev.variant).is_some() {
                return Ok(ev.clone());
            }

            return Err(self.coercion_error(field, raw));
        }

        let by_value = self.variants.iter().find(|v| v.value.matches(raw));
        let by_name = raw
            .as_text()
            .and_then(|name| self.variants.iter().find(|v| v.name == name));

        match (by_value, by_name) {
            (Some(v), Some(n)) if v.name != n.name => Err(ValidationError::EnumAmbiguous {
                field: field.to_string(),
                path: self.path,
                value: raw.clone(),
                by_value: v.name,
                by_name: n.name,
            }),
            (Some(v), _) => Ok(v.to_enum_value(self.path)),
            (None, Some(n)) => Ok(n.to_enum_value(self.path)),
            (None, None) => Err(self.coercion_error(field, raw)),
        }
    }

    fn coercion_error(&self, field: &str, raw: &Value) -> ValidationError {
        ValidationError::EnumCoercion {
            field: field.to_string(),
            path: self.path,
            value: raw.clone(),
        }
    }
}

///
/// VariantModel
///

#[derive(Clone, Copy, Debug)]
pub struct VariantModel {
    pub name: &'static str,
    pub value: Literal,
}

impl VariantModel {
    fn to_enum_value(&self, path: &'static str) -> EnumValue {
        EnumValue::new(path, self.name, self.value.to_value())
    }
}

///
/// Literal
///
/// Const-constructible underlying scalar of a variant.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Literal {
    Int(i64),
    Text(&'static str),
}

impl Literal {
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Int(i) => Value::Int(i),
            Self::Text(s) => Value::Text(s.to_string()),
        }
    }

    #[must_use]
    pub fn matches(self, raw: &Value) -> bool {
        match (self, raw) {
            (Self::Int(i), Value::Int(j)) => i == *j,
            (Self::Text(s), Value::Text(t)) => s == t,
            _ => false,
        }
    }
}

///
/// TESTS
///
