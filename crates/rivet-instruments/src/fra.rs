//! Forward rate agreements, with dates calculated ready for pricing.
//!
//! A FRA is the one-off exchange of a fixed rate of interest for a
//! floating rate at a future date. An [`ExpandedFra`] holds adjusted
//! dates based on holiday calendars; if a calendar changes, the adjusted
//! dates may no longer be correct, so care is needed when caching or
//! persisting the expanded form.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rivet_core::prelude::*;

/// Whether a FRA is buy or sell.
///
/// `Buy` implies the floating rate is received from the counterparty with
/// the fixed rate paid; `Sell` implies the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuySell {
    /// Receive floating, pay fixed.
    Buy,
    /// Pay floating, receive fixed.
    Sell,
}

impl EnumLike for BuySell {
    const TYPE_NAME: &'static str = "BuySell";

    fn variant_name(&self) -> &'static str {
        match self {
            BuySell::Buy => "Buy",
            BuySell::Sell => "Sell",
        }
    }

    fn from_variant(variant: &str) -> Option<Self> {
        match variant {
            "Buy" => Some(BuySell::Buy),
            "Sell" => Some(BuySell::Sell),
            _ => None,
        }
    }
}

/// The approach to discounting used when pricing a FRA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FraDiscountingMethod {
    /// No discounting applies.
    None,
    /// The ISDA discounting convention.
    Isda,
    /// The AFMA discounting convention.
    Afma,
}

impl EnumLike for FraDiscountingMethod {
    const TYPE_NAME: &'static str = "FraDiscountingMethod";

    fn variant_name(&self) -> &'static str {
        match self {
            FraDiscountingMethod::None => "None",
            FraDiscountingMethod::Isda => "Isda",
            FraDiscountingMethod::Afma => "Afma",
        }
    }

    fn from_variant(variant: &str) -> Option<Self> {
        match variant {
            "None" => Some(FraDiscountingMethod::None),
            "Isda" => Some(FraDiscountingMethod::Isda),
            "Afma" => Some(FraDiscountingMethod::Afma),
            _ => None,
        }
    }
}

/// An observation of a floating market rate.
///
/// The index will be a well known market index such as `GBP-LIBOR-3M`,
/// observed on the fixing date. This is a nested participating type: a
/// FRA carries one as a property value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateObservation {
    index: String,
    fixing_date: Date,
}

impl RateObservation {
    /// Obtains an observation from an index name and fixing date.
    pub fn new(index: impl Into<String>, fixing_date: Date) -> MetaResult<Self> {
        let mut builder = Self::builder();
        builder.set("index", Value::Text(index.into()))?;
        builder.set("fixingDate", Value::Date(fixing_date))?;
        builder.build()
    }

    /// Returns the index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the fixing date.
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }
}

impl Bean for RateObservation {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for RateObservation {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<RateObservation>("RateObservation")
                .property(
                    PropertyDescriptor::required("index", ValueKind::Text, |any| {
                        any.downcast_ref::<RateObservation>()
                            .map(|b| Value::Text(b.index.clone()))
                    })
                    .with_rule(Rule::NotEmpty),
                )
                .property(PropertyDescriptor::required(
                    "fixingDate",
                    ValueKind::Date,
                    |any| {
                        any.downcast_ref::<RateObservation>()
                            .map(|b| Value::Date(b.fixing_date))
                    },
                ))
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            index: staged.text("index")?,
            fixing_date: staged.date("fixingDate")?,
        })
    }
}

impl PartialEq for RateObservation {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

impl Eq for RateObservation {}

impl Hash for RateObservation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bean(self, state);
    }
}

impl fmt::Display for RateObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// An expanded forward rate agreement, with dates adjusted for pricing.
///
/// All date properties hold adjusted dates, which should be valid
/// business days. The end date must be strictly after the start date, and
/// the year fraction and notional must not be negative (zero is valid).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandedFra {
    buy_sell: BuySell,
    payment_date: Date,
    start_date: Date,
    end_date: Date,
    year_fraction: Decimal,
    fixed_rate: Decimal,
    floating_rate: RateObservation,
    currency: Currency,
    notional: Decimal,
    discounting: FraDiscountingMethod,
}

impl ExpandedFra {
    /// Returns whether the FRA is buy or sell.
    pub fn buy_sell(&self) -> BuySell {
        self.buy_sell
    }

    /// Returns the date that payment occurs.
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Returns the start date, the first date that interest accrues.
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the end date, the last date that interest accrues.
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Returns the year fraction between the start and end date.
    ///
    /// Usually calculated with a day count convention; close to 1 for one
    /// year and 0.5 for six months. May exceed 1 but is never negative.
    pub fn year_fraction(&self) -> Decimal {
        self.year_fraction
    }

    /// Returns the fixed rate of interest; 5% is expressed as 0.05.
    pub fn fixed_rate(&self) -> Decimal {
        self.fixed_rate
    }

    /// Returns the floating rate observation.
    pub fn floating_rate(&self) -> &RateObservation {
        &self.floating_rate
    }

    /// Returns the primary currency, in which payment is made.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the notional amount, in the primary currency.
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Returns the method to use for discounting.
    pub fn discounting(&self) -> FraDiscountingMethod {
        self.discounting
    }
}

impl Bean for ExpandedFra {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for ExpandedFra {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<ExpandedFra>("ExpandedFra")
                .property(
                    PropertyDescriptor::required("buySell", ValueKind::Enum("BuySell"), |any| {
                        any.downcast_ref::<ExpandedFra>().map(|b| b.buy_sell.value())
                    })
                    .with_parser(BuySell::parse_value),
                )
                .property(PropertyDescriptor::required(
                    "paymentDate",
                    ValueKind::Date,
                    |any| {
                        any.downcast_ref::<ExpandedFra>()
                            .map(|b| Value::Date(b.payment_date))
                    },
                ))
                .property(PropertyDescriptor::required(
                    "startDate",
                    ValueKind::Date,
                    |any| {
                        any.downcast_ref::<ExpandedFra>()
                            .map(|b| Value::Date(b.start_date))
                    },
                ))
                .property(PropertyDescriptor::required(
                    "endDate",
                    ValueKind::Date,
                    |any| {
                        any.downcast_ref::<ExpandedFra>()
                            .map(|b| Value::Date(b.end_date))
                    },
                ))
                .property(
                    PropertyDescriptor::required("yearFraction", ValueKind::Decimal, |any| {
                        any.downcast_ref::<ExpandedFra>()
                            .map(|b| Value::Decimal(b.year_fraction))
                    })
                    .with_rule(Rule::NonNegative),
                )
                .property(PropertyDescriptor::required(
                    "fixedRate",
                    ValueKind::Decimal,
                    |any| {
                        any.downcast_ref::<ExpandedFra>()
                            .map(|b| Value::Decimal(b.fixed_rate))
                    },
                ))
                .property(PropertyDescriptor::required(
                    "floatingRate",
                    ValueKind::Bean("RateObservation"),
                    |any| {
                        any.downcast_ref::<ExpandedFra>()
                            .map(|b| Value::Bean(Arc::new(b.floating_rate.clone())))
                    },
                ))
                .property(
                    PropertyDescriptor::required("currency", ValueKind::Enum("Currency"), |any| {
                        any.downcast_ref::<ExpandedFra>().map(|b| b.currency.value())
                    })
                    .with_parser(Currency::parse_value),
                )
                .property(
                    PropertyDescriptor::required("notional", ValueKind::Decimal, |any| {
                        any.downcast_ref::<ExpandedFra>()
                            .map(|b| Value::Decimal(b.notional))
                    })
                    .with_rule(Rule::NonNegative),
                )
                .property(
                    PropertyDescriptor::required(
                        "discounting",
                        ValueKind::Enum("FraDiscountingMethod"),
                        |any| {
                            any.downcast_ref::<ExpandedFra>()
                                .map(|b| b.discounting.value())
                        },
                    )
                    .with_parser(FraDiscountingMethod::parse_value),
                )
                .cross_rule(CrossRule::in_order_strict("startDate", "endDate"))
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            buy_sell: staged.enum_value("buySell")?,
            payment_date: staged.date("paymentDate")?,
            start_date: staged.date("startDate")?,
            end_date: staged.date("endDate")?,
            year_fraction: staged.decimal("yearFraction")?,
            fixed_rate: staged.decimal("fixedRate")?,
            floating_rate: staged.bean("floatingRate")?,
            currency: staged.enum_value("currency")?,
            notional: staged.decimal("notional")?,
            discounting: staged.enum_value("discounting")?,
        })
    }
}

impl PartialEq for ExpandedFra {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

impl Eq for ExpandedFra {}

impl Hash for ExpandedFra {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bean(self, state);
    }
}

impl fmt::Display for ExpandedFra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// Typed setters for [`Builder<ExpandedFra>`].
///
/// Each setter stages a value whose name and kind are correct by
/// construction; validation still runs at build time.
pub trait ExpandedFraBuilder {
    /// Sets whether the FRA is buy or sell.
    fn buy_sell(self, buy_sell: BuySell) -> Self;
    /// Sets the payment date.
    fn payment_date(self, payment_date: Date) -> Self;
    /// Sets the start date.
    fn start_date(self, start_date: Date) -> Self;
    /// Sets the end date.
    fn end_date(self, end_date: Date) -> Self;
    /// Sets the year fraction.
    fn year_fraction(self, year_fraction: Decimal) -> Self;
    /// Sets the fixed rate.
    fn fixed_rate(self, fixed_rate: Decimal) -> Self;
    /// Sets the floating rate observation.
    fn floating_rate(self, floating_rate: RateObservation) -> Self;
    /// Sets the primary currency.
    fn currency(self, currency: Currency) -> Self;
    /// Sets the notional amount.
    fn notional(self, notional: Decimal) -> Self;
    /// Sets the discounting method.
    fn discounting(self, discounting: FraDiscountingMethod) -> Self;
}

impl ExpandedFraBuilder for Builder<ExpandedFra> {
    fn buy_sell(mut self, buy_sell: BuySell) -> Self {
        self.stage("buySell", buy_sell.value());
        self
    }

    fn payment_date(mut self, payment_date: Date) -> Self {
        self.stage("paymentDate", Value::Date(payment_date));
        self
    }

    fn start_date(mut self, start_date: Date) -> Self {
        self.stage("startDate", Value::Date(start_date));
        self
    }

    fn end_date(mut self, end_date: Date) -> Self {
        self.stage("endDate", Value::Date(end_date));
        self
    }

    fn year_fraction(mut self, year_fraction: Decimal) -> Self {
        self.stage("yearFraction", Value::Decimal(year_fraction));
        self
    }

    fn fixed_rate(mut self, fixed_rate: Decimal) -> Self {
        self.stage("fixedRate", Value::Decimal(fixed_rate));
        self
    }

    fn floating_rate(mut self, floating_rate: RateObservation) -> Self {
        self.stage("floatingRate", Value::Bean(Arc::new(floating_rate)));
        self
    }

    fn currency(mut self, currency: Currency) -> Self {
        self.stage("currency", currency.value());
        self
    }

    fn notional(mut self, notional: Decimal) -> Self {
        self.stage("notional", Value::Decimal(notional));
        self
    }

    fn discounting(mut self, discounting: FraDiscountingMethod) -> Self {
        self.stage("discounting", discounting.value());
        self
    }
}
