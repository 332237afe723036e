//! Validation rules run at build time.
//!
//! Per-field [`Rule`]s are attached to individual property descriptors and
//! checked against the staged value in declaration order. [`CrossRule`]s
//! belong to the meta-model and span more than one property; they run once
//! after every per-field check has passed. Because a built instance exposes
//! no mutation, a rule that holds at build time holds for the lifetime of
//! the instance.

use rust_decimal::Decimal;

use crate::builder::Staged;
use crate::error::{MetaError, MetaResult};
use crate::value::Value;

/// A per-field validation predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Numeric value must be zero or greater.
    NonNegative,
    /// Numeric value must be strictly greater than zero.
    Positive,
    /// Text or list value must not be empty.
    NotEmpty,
    /// Text value's length must be one of the given lengths.
    LengthOneOf(&'static [usize]),
}

impl Rule {
    /// Checks a staged value against this rule.
    ///
    /// Values the rule does not apply to pass trivially; kind conformance
    /// is enforced separately when the value is staged.
    pub fn check(&self, property: &str, value: &Value) -> MetaResult<()> {
        let violation = match (self, value) {
            (Rule::NonNegative, Value::Int(v)) if *v < 0 => Some("must not be negative"),
            (Rule::NonNegative, Value::Decimal(v)) if *v < Decimal::ZERO => {
                Some("must not be negative")
            }
            (Rule::Positive, Value::Int(v)) if *v <= 0 => Some("must be positive"),
            (Rule::Positive, Value::Decimal(v)) if *v <= Decimal::ZERO => Some("must be positive"),
            (Rule::NotEmpty, Value::Text(v)) if v.is_empty() => Some("must not be empty"),
            (Rule::NotEmpty, Value::List(v)) if v.is_empty() => Some("must not be empty"),
            (Rule::LengthOneOf(lengths), Value::Text(v))
                if !lengths.contains(&v.chars().count()) =>
            {
                return Err(MetaError::validation_failed(
                    property,
                    format!("length must be one of {lengths:?}"),
                ));
            }
            _ => None,
        };
        match violation {
            Some(reason) => Err(MetaError::validation_failed(property, reason)),
            None => Ok(()),
        }
    }
}

/// A cross-field check function: returns the violated property pair and
/// reason on failure.
pub type CrossCheck = fn(&Staged) -> Result<(), (String, String)>;

/// A whole-object validation rule spanning more than one property.
#[derive(Debug, Clone)]
pub enum CrossRule {
    /// Two properties must be ordered; applies to date, int, and decimal
    /// values.
    InOrder {
        /// The earlier/smaller property.
        first: &'static str,
        /// The later/larger property.
        second: &'static str,
        /// When true, equal values are rejected.
        strict: bool,
    },
    /// An arbitrary named check over the staged values.
    Custom {
        /// Name of the rule, for diagnostics.
        name: &'static str,
        /// The check function.
        check: CrossCheck,
    },
}

impl CrossRule {
    /// Creates a rule requiring `first` to be strictly before `second`.
    #[must_use]
    pub fn in_order_strict(first: &'static str, second: &'static str) -> Self {
        Self::InOrder {
            first,
            second,
            strict: true,
        }
    }

    /// Creates a rule requiring `first` to be before or equal to `second`.
    #[must_use]
    pub fn in_order(first: &'static str, second: &'static str) -> Self {
        Self::InOrder {
            first,
            second,
            strict: false,
        }
    }

    /// Checks the staged values against this rule.
    ///
    /// Missing values pass trivially: the required-property check runs
    /// before cross rules and reports absences first.
    pub fn check(&self, staged: &Staged) -> MetaResult<()> {
        match self {
            CrossRule::InOrder {
                first,
                second,
                strict,
            } => {
                let (Some(a), Some(b)) = (staged.value(first), staged.value(second)) else {
                    return Ok(());
                };
                let ordered = match (a, b) {
                    (Value::Date(x), Value::Date(y)) => {
                        if *strict {
                            x < y
                        } else {
                            x <= y
                        }
                    }
                    (Value::Int(x), Value::Int(y)) => {
                        if *strict {
                            x < y
                        } else {
                            x <= y
                        }
                    }
                    (Value::Decimal(x), Value::Decimal(y)) => {
                        if *strict {
                            x < y
                        } else {
                            x <= y
                        }
                    }
                    _ => true,
                };
                if ordered {
                    Ok(())
                } else {
                    Err(MetaError::validation_failed(
                        format!("{first}/{second}"),
                        if *strict {
                            "must be strictly ordered"
                        } else {
                            "must be in order"
                        },
                    ))
                }
            }
            CrossRule::Custom { check, .. } => check(staged)
                .map_err(|(property, reason)| MetaError::validation_failed(property, reason)),
        }
    }
}
