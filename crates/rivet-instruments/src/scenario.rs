//! Market-data perturbations for scenario analysis.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rivet_core::prelude::*;

/// How a shift amount combines with the value it perturbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    /// The amount is added to the value.
    Absolute,
    /// The value is scaled by one plus the amount.
    Relative,
}

impl ShiftType {
    /// Applies this shift to a single value.
    #[must_use]
    pub fn apply(self, value: Decimal, amount: Decimal) -> Decimal {
        match self {
            ShiftType::Absolute => value + amount,
            ShiftType::Relative => value * (Decimal::ONE + amount),
        }
    }
}

impl EnumLike for ShiftType {
    const TYPE_NAME: &'static str = "ShiftType";

    fn variant_name(&self) -> &'static str {
        match self {
            ShiftType::Absolute => "Absolute",
            ShiftType::Relative => "Relative",
        }
    }

    fn from_variant(variant: &str) -> Option<Self> {
        match variant {
            "Absolute" => Some(ShiftType::Absolute),
            "Relative" => Some(ShiftType::Relative),
            _ => None,
        }
    }
}

/// A named zero-rate curve: the market data a shift perturbs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroCurve {
    /// The curve name, e.g. `"USD-Disc"`.
    pub name: String,
    /// The zero rates at the curve's node points.
    pub rates: Vec<Decimal>,
}

impl ZeroCurve {
    /// Creates a curve from a name and node rates.
    #[must_use]
    pub fn new(name: impl Into<String>, rates: Vec<Decimal>) -> Self {
        Self {
            name: name.into(),
            rates,
        }
    }
}

/// A uniform shift applied to every node of a curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveParallelShift {
    shift_type: ShiftType,
    shift_amount: Decimal,
}

impl CurveParallelShift {
    /// Obtains a shift that adds `amount` to every node.
    pub fn absolute(amount: Decimal) -> MetaResult<Self> {
        Self::of(ShiftType::Absolute, amount)
    }

    /// Obtains a shift that scales every node by `1 + amount`.
    pub fn relative(amount: Decimal) -> MetaResult<Self> {
        Self::of(ShiftType::Relative, amount)
    }

    fn of(shift_type: ShiftType, amount: Decimal) -> MetaResult<Self> {
        let mut builder = Self::builder();
        builder.set("shiftType", shift_type.value())?;
        builder.set("shiftAmount", Value::Decimal(amount))?;
        builder.build()
    }

    /// Returns the shift type.
    pub fn shift_type(&self) -> ShiftType {
        self.shift_type
    }

    /// Returns the shift amount.
    pub fn shift_amount(&self) -> Decimal {
        self.shift_amount
    }

    /// Applies the shift to every node of the curve, returning a new curve.
    #[must_use]
    pub fn apply(&self, curve: &ZeroCurve) -> ZeroCurve {
        ZeroCurve {
            name: curve.name.clone(),
            rates: curve
                .rates
                .iter()
                .map(|rate| self.shift_type.apply(*rate, self.shift_amount))
                .collect(),
        }
    }
}

impl Bean for CurveParallelShift {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for CurveParallelShift {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<CurveParallelShift>("CurveParallelShift")
                .property(
                    PropertyDescriptor::required(
                        "shiftType",
                        ValueKind::Enum("ShiftType"),
                        |any| {
                            any.downcast_ref::<CurveParallelShift>()
                                .map(|s| s.shift_type.value())
                        },
                    )
                    .with_parser(ShiftType::parse_value),
                )
                .property(PropertyDescriptor::required(
                    "shiftAmount",
                    ValueKind::Decimal,
                    |any| {
                        any.downcast_ref::<CurveParallelShift>()
                            .map(|s| Value::Decimal(s.shift_amount))
                    },
                ))
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            shift_type: staged.enum_value("shiftType")?,
            shift_amount: staged.decimal("shiftAmount")?,
        })
    }
}

impl PartialEq for CurveParallelShift {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

impl Eq for CurveParallelShift {}

impl Hash for CurveParallelShift {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bean(self, state);
    }
}

impl fmt::Display for CurveParallelShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
