//! Property descriptors: per-field metadata and accessor table entries.

use rust_decimal::Decimal;
use std::any::Any;

use crate::bean::Bean;
use crate::error::{MetaError, MetaResult};
use crate::types::Date;
use crate::validate::Rule;
use crate::value::{Value, ValueKind};

/// A reflection-free field accessor: downcasts the erased instance and
/// reads one field into the value model.
pub type Getter = fn(&dyn Any) -> Option<Value>;

/// A type-specific text parser, producing a value of the declared kind.
pub type TextParser = fn(&str) -> Result<Value, String>;

/// Describes one named, typed field of a participating value type.
///
/// A descriptor is created once, when its owning meta-model is built, and
/// is immutable afterwards. It carries the field's name, declared kind,
/// nullability, settability, optional per-field validation rule, the
/// accessor used for generic reads, and an optional parser for text
/// staging.
///
/// Nullability and settability are independent facets: a required property
/// must hold a value at build time, while a derived property is read-only
/// and cannot be staged on a builder at all (its value is computed by the
/// getter from the built instance).
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: &'static str,
    kind: ValueKind,
    required: bool,
    buildable: bool,
    rule: Option<Rule>,
    getter: Getter,
    parser: Option<TextParser>,
}

impl PropertyDescriptor {
    /// Creates a descriptor for a required (not-null) property.
    #[must_use]
    pub fn required(name: &'static str, kind: ValueKind, getter: Getter) -> Self {
        Self {
            name,
            kind,
            required: true,
            buildable: true,
            rule: None,
            getter,
            parser: None,
        }
    }

    /// Creates a descriptor for an optional property.
    #[must_use]
    pub fn optional(name: &'static str, kind: ValueKind, getter: Getter) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, getter)
        }
    }

    /// Creates a descriptor for a derived, read-only property.
    ///
    /// The value is computed by the getter rather than staged; builders
    /// reject attempts to set it.
    #[must_use]
    pub fn derived(name: &'static str, kind: ValueKind, getter: Getter) -> Self {
        Self {
            required: false,
            buildable: false,
            ..Self::required(name, kind, getter)
        }
    }

    /// Attaches a per-field validation rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Attaches a text parser; required for enum-kinded properties that
    /// should support text staging.
    #[must_use]
    pub fn with_parser(mut self, parser: TextParser) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Returns the property name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared kind.
    #[must_use]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Returns whether the property must hold a value at build time.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns whether the property is settable via a builder.
    ///
    /// Derived properties are read-only: false here.
    #[must_use]
    pub fn is_buildable(&self) -> bool {
        self.buildable
    }

    /// Returns the per-field validation rule, if any.
    #[must_use]
    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    /// Reads this property from a compatible instance.
    ///
    /// Returns `None` if the instance is not of the owning type.
    #[must_use]
    pub fn get_from(&self, bean: &dyn Bean) -> Option<Value> {
        (self.getter)(bean.as_any())
    }

    /// Parses text into a value of this property's declared kind.
    ///
    /// Scalar kinds (bool, int, decimal, date, text) have built-in
    /// parsers; enum kinds use the attached parser. List and bean kinds
    /// are not parseable from text.
    pub fn parse_text(&self, text: &str) -> MetaResult<Value> {
        if let Some(parser) = self.parser {
            return parser(text).map_err(|reason| MetaError::parse_error(self.name, text, reason));
        }
        let parsed = match &self.kind {
            ValueKind::Bool => text
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|e| e.to_string()),
            ValueKind::Int => text
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| e.to_string()),
            ValueKind::Decimal => text
                .parse::<Decimal>()
                .map(Value::Decimal)
                .map_err(|e| e.to_string()),
            ValueKind::Date => Date::parse(text)
                .map(Value::Date)
                .map_err(|e| e.to_string()),
            ValueKind::Text => Ok(Value::Text(text.to_string())),
            other => Err(format!("no text parser for {other} values")),
        };
        parsed.map_err(|reason| MetaError::parse_error(self.name, text, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_getter(_: &dyn Any) -> Option<Value> {
        None
    }

    #[test]
    fn test_settability_facets() {
        let staged = PropertyDescriptor::required("notional", ValueKind::Decimal, noop_getter);
        assert!(staged.is_required());
        assert!(staged.is_buildable());

        let derived = PropertyDescriptor::derived("maturityYear", ValueKind::Int, noop_getter);
        assert!(!derived.is_required());
        assert!(!derived.is_buildable());
    }

    #[test]
    fn test_parse_scalar_kinds() {
        let date = PropertyDescriptor::required("startDate", ValueKind::Date, noop_getter);
        assert_eq!(
            date.parse_text("2025-06-01").unwrap(),
            Value::Date(Date::from_ymd(2025, 6, 1).unwrap())
        );

        let amount = PropertyDescriptor::required("notional", ValueKind::Decimal, noop_getter);
        assert_eq!(
            amount.parse_text("1000000.50").unwrap(),
            Value::Decimal("1000000.50".parse().unwrap())
        );

        let flag = PropertyDescriptor::required("active", ValueKind::Bool, noop_getter);
        assert_eq!(flag.parse_text("true").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_parse_malformed_text() {
        let date = PropertyDescriptor::required("startDate", ValueKind::Date, noop_getter);
        let err = date.parse_text("June 1st").unwrap_err();
        assert!(matches!(err, MetaError::ParseError { .. }));
    }

    #[test]
    fn test_parse_unparseable_kind() {
        let list = PropertyDescriptor::required(
            "trades",
            ValueKind::List(Box::new(ValueKind::Int)),
            noop_getter,
        );
        assert!(list.parse_text("[1, 2]").is_err());
    }
}
