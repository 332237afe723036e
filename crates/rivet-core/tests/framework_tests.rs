//! End-to-end tests of the property protocol: staging, validation,
//! building, generic reads, equality, hashing, and rendering.

use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use proptest::prelude::*;
use rivet_core::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// An accrual period fixture: two ordered dates and a non-negative amount.
#[derive(Debug, Clone)]
struct SchedulePeriod {
    start_date: Date,
    end_date: Date,
    notional: Decimal,
}

impl Bean for SchedulePeriod {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for SchedulePeriod {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<SchedulePeriod>("SchedulePeriod")
                .property(PropertyDescriptor::required(
                    "startDate",
                    ValueKind::Date,
                    |any| {
                        any.downcast_ref::<SchedulePeriod>()
                            .map(|b| Value::Date(b.start_date))
                    },
                ))
                .property(PropertyDescriptor::required(
                    "endDate",
                    ValueKind::Date,
                    |any| {
                        any.downcast_ref::<SchedulePeriod>()
                            .map(|b| Value::Date(b.end_date))
                    },
                ))
                .property(
                    PropertyDescriptor::required("notional", ValueKind::Decimal, |any| {
                        any.downcast_ref::<SchedulePeriod>()
                            .map(|b| Value::Decimal(b.notional))
                    })
                    .with_rule(Rule::NonNegative),
                )
                .cross_rule(CrossRule::in_order_strict("startDate", "endDate"))
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            start_date: staged.date("startDate")?,
            end_date: staged.date("endDate")?,
            notional: staged.decimal("notional")?,
        })
    }
}

impl PartialEq for SchedulePeriod {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

impl Eq for SchedulePeriod {}

impl Hash for SchedulePeriod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bean(self, state);
    }
}

impl fmt::Display for SchedulePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// A second type with an identical field set, for the never-equal check.
#[derive(Debug, Clone)]
struct AccrualPeriod {
    start_date: Date,
    end_date: Date,
    notional: Decimal,
}

impl Bean for AccrualPeriod {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for AccrualPeriod {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<AccrualPeriod>("AccrualPeriod")
                .property(PropertyDescriptor::required(
                    "startDate",
                    ValueKind::Date,
                    |any| {
                        any.downcast_ref::<AccrualPeriod>()
                            .map(|b| Value::Date(b.start_date))
                    },
                ))
                .property(PropertyDescriptor::required(
                    "endDate",
                    ValueKind::Date,
                    |any| {
                        any.downcast_ref::<AccrualPeriod>()
                            .map(|b| Value::Date(b.end_date))
                    },
                ))
                .property(PropertyDescriptor::required(
                    "notional",
                    ValueKind::Decimal,
                    |any| {
                        any.downcast_ref::<AccrualPeriod>()
                            .map(|b| Value::Decimal(b.notional))
                    },
                ))
                .cross_rule(CrossRule::in_order_strict("startDate", "endDate"))
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            start_date: staged.date("startDate")?,
            end_date: staged.date("endDate")?,
            notional: staged.decimal("notional")?,
        })
    }
}

impl PartialEq for AccrualPeriod {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

/// A fixture with a derived property: the maturity year is computed from
/// the date, never staged.
#[derive(Debug, Clone)]
struct RatePoint {
    date: Date,
    rate: Decimal,
}

impl Bean for RatePoint {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for RatePoint {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<RatePoint>("RatePoint")
                .property(PropertyDescriptor::required("date", ValueKind::Date, |any| {
                    any.downcast_ref::<RatePoint>().map(|b| Value::Date(b.date))
                }))
                .property(PropertyDescriptor::required(
                    "rate",
                    ValueKind::Decimal,
                    |any| any.downcast_ref::<RatePoint>().map(|b| Value::Decimal(b.rate)),
                ))
                .property(PropertyDescriptor::derived(
                    "maturityYear",
                    ValueKind::Int,
                    |any| {
                        any.downcast_ref::<RatePoint>()
                            .map(|b| Value::Int(i64::from(b.date.year())))
                    },
                ))
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            date: staged.date("date")?,
            rate: staged.decimal("rate")?,
        })
    }
}

impl PartialEq for RatePoint {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Date {
    Date::from_ymd(year, month, day).unwrap()
}

fn sample_builder() -> Builder<SchedulePeriod> {
    let mut builder = SchedulePeriod::builder();
    builder
        .set("startDate", Value::Date(ymd(2020, 1, 1)))
        .unwrap()
        .set("endDate", Value::Date(ymd(2020, 6, 1)))
        .unwrap()
        .set("notional", Value::Decimal(dec!(1_000_000)))
        .unwrap();
    builder
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn build_then_get_round_trips_every_property() {
    let period = sample_builder().build().unwrap();
    assert_eq!(get(&period, "startDate").unwrap(), Value::Date(ymd(2020, 1, 1)));
    assert_eq!(get(&period, "endDate").unwrap(), Value::Date(ymd(2020, 6, 1)));
    assert_eq!(
        get(&period, "notional").unwrap(),
        Value::Decimal(dec!(1_000_000))
    );
}

#[test]
fn unknown_property_on_set_and_get() {
    let mut builder = SchedulePeriod::builder();
    let err = builder.set("startDat", Value::Date(ymd(2020, 1, 1))).unwrap_err();
    assert_eq!(
        err,
        MetaError::unknown_property("SchedulePeriod", "startDat")
    );

    let period = sample_builder().build().unwrap();
    assert!(matches!(
        get(&period, "nottional").unwrap_err(),
        MetaError::UnknownProperty { property, .. } if property == "nottional"
    ));
}

#[test]
fn find_is_the_opt_in_tolerant_variant() {
    let period = sample_builder().build().unwrap();
    assert_eq!(find(&period, "nottional"), None);
    assert_eq!(
        find(&period, "notional"),
        Some(Value::Decimal(dec!(1_000_000)))
    );
}

#[test]
fn type_mismatch_is_non_destructive() {
    let mut builder = sample_builder();
    let err = builder.set("startDate", Value::Int(42)).unwrap_err();
    assert_eq!(
        err,
        MetaError::type_mismatch("startDate", "date", "int")
    );
    // previous staged value untouched, build still succeeds
    assert_eq!(
        builder.get("startDate").unwrap(),
        Some(&Value::Date(ymd(2020, 1, 1)))
    );
    assert!(builder.build().is_ok());
}

#[test]
fn set_text_parses_into_declared_kind() {
    let mut builder = SchedulePeriod::builder();
    builder.set_text("startDate", "2020-01-01").unwrap();
    builder.set_text("endDate", "2020-06-01").unwrap();
    builder.set_text("notional", "2500000.75").unwrap();
    let period = builder.build().unwrap();
    assert_eq!(
        get(&period, "notional").unwrap(),
        Value::Decimal(dec!(2_500_000.75))
    );
}

#[test]
fn set_text_malformed_is_a_parse_error() {
    let mut builder = SchedulePeriod::builder();
    let err = builder.set_text("startDate", "Jan 1st 2020").unwrap_err();
    assert!(matches!(err, MetaError::ParseError { property, .. } if property == "startDate"));
}

#[test]
fn required_unset_fails_then_patched_builder_succeeds() {
    let mut builder = SchedulePeriod::builder();
    builder.set("startDate", Value::Date(ymd(2020, 1, 1))).unwrap();
    builder.set("notional", Value::Decimal(dec!(500))).unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err, MetaError::validation_failed("endDate", "must not be null"));

    // supplying the missing field on the same builder permits a retry
    builder.set("endDate", Value::Date(ymd(2020, 6, 1))).unwrap();
    assert!(builder.build().is_ok());
}

#[test]
fn staged_null_counts_as_unset_for_required() {
    let mut builder = sample_builder();
    builder.set("notional", Value::Null).unwrap();
    let err = builder.build().unwrap_err();
    assert_eq!(err, MetaError::validation_failed("notional", "must not be null"));
}

#[test]
fn cross_rule_rejects_equal_dates_then_accepts_ordered() {
    let mut builder = SchedulePeriod::builder();
    builder.set("startDate", Value::Date(ymd(2020, 1, 1))).unwrap();
    builder.set("endDate", Value::Date(ymd(2020, 1, 1))).unwrap();
    builder.set("notional", Value::Decimal(dec!(100))).unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        MetaError::validation_failed("startDate/endDate", "must be strictly ordered")
    );

    builder.set("endDate", Value::Date(ymd(2020, 6, 1))).unwrap();
    let period = builder.build().unwrap();
    assert_eq!(get(&period, "endDate").unwrap(), Value::Date(ymd(2020, 6, 1)));
}

#[test]
fn per_field_rule_rejects_negative_but_permits_zero() {
    let mut builder = sample_builder();
    builder.set("notional", Value::Decimal(dec!(-1))).unwrap();
    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        MetaError::validation_failed("notional", "must not be negative")
    );

    builder.set("notional", Value::Decimal(Decimal::ZERO)).unwrap();
    assert!(builder.build().is_ok());
}

#[test]
fn to_builder_build_is_copy_idempotent() {
    let period = sample_builder().build().unwrap();
    let copy = period.to_builder().build().unwrap();
    assert_eq!(period, copy);
    assert_eq!(hash_of(&period), hash_of(&copy));
}

#[test]
fn to_builder_supports_copy_with_modification() {
    let period = sample_builder().build().unwrap();
    let mut builder = period.to_builder();
    builder.set("notional", Value::Decimal(dec!(42))).unwrap();
    let modified = builder.build().unwrap();
    assert_ne!(period, modified);
    assert_eq!(get(&modified, "notional").unwrap(), Value::Decimal(dec!(42)));
    assert_eq!(
        get(&modified, "startDate").unwrap(),
        get(&period, "startDate").unwrap()
    );
}

#[test]
fn changing_any_single_field_breaks_equality() {
    let base = sample_builder().build().unwrap();
    for (name, other) in [
        ("startDate", Value::Date(ymd(2020, 2, 1))),
        ("endDate", Value::Date(ymd(2021, 6, 1))),
        ("notional", Value::Decimal(dec!(999))),
    ] {
        let mut builder = base.to_builder();
        builder.set(name, other).unwrap();
        let changed = builder.build().unwrap();
        assert_ne!(base, changed, "change to {name} should break equality");
    }
}

#[test]
fn different_concrete_types_are_never_equal() {
    let schedule = sample_builder().build().unwrap();
    let mut builder = AccrualPeriod::builder();
    builder.set("startDate", Value::Date(ymd(2020, 1, 1))).unwrap();
    builder.set("endDate", Value::Date(ymd(2020, 6, 1))).unwrap();
    builder.set("notional", Value::Decimal(dec!(1_000_000))).unwrap();
    let accrual = builder.build().unwrap();

    assert!(!beans_equal(&schedule, &accrual));
}

#[test]
fn value_equal_instances_are_interchangeable_as_keys() {
    let a = sample_builder().build().unwrap();
    let b = sample_builder().build().unwrap();
    assert_eq!(a, b);

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
    set.insert(b);
    assert_eq!(set.len(), 1);
}

#[test]
fn derived_property_cannot_be_staged() {
    let mut builder = RatePoint::builder();
    let err = builder.set("maturityYear", Value::Int(2030)).unwrap_err();
    assert_eq!(
        err,
        MetaError::read_only_property("RatePoint", "maturityYear")
    );
    let err = builder.set_text("maturityYear", "2030").unwrap_err();
    assert_eq!(
        err,
        MetaError::read_only_property("RatePoint", "maturityYear")
    );
}

#[test]
fn derived_property_is_computed_not_required() {
    let meta = RatePoint::meta();
    assert!(!meta.property("maturityYear").unwrap().is_buildable());
    assert!(meta.property("rate").unwrap().is_buildable());

    let mut builder = RatePoint::builder();
    builder.set("date", Value::Date(ymd(2030, 6, 15))).unwrap();
    builder.set("rate", Value::Decimal(dec!(0.042))).unwrap();
    let point = builder.build().unwrap();

    assert_eq!(get(&point, "maturityYear").unwrap(), Value::Int(2030));
    assert_eq!(
        render(&point),
        "RatePoint{date=2030-06-15, rate=0.042, maturityYear=2030}"
    );

    // to_builder skips the derived value; the rebuilt copy recomputes it
    let copy = point.to_builder().build().unwrap();
    assert_eq!(point, copy);
}

#[test]
fn builder_is_reusable_after_a_successful_build() {
    let builder = sample_builder();
    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(first, second);
}

#[test]
fn rendering_lists_properties_in_declaration_order() {
    let period = sample_builder().build().unwrap();
    assert_eq!(
        period.to_string(),
        "SchedulePeriod{startDate=2020-01-01, endDate=2020-06-01, notional=1000000}"
    );
    assert_eq!(
        SchedulePeriod::meta().property_names(),
        vec!["startDate", "endDate", "notional"]
    );
}

proptest! {
    #[test]
    fn staged_values_round_trip_through_build(
        start_offset in 0i64..20_000,
        length in 1i64..5_000,
        notional_cents in 0u64..1_000_000_000,
    ) {
        let start = ymd(1990, 1, 1).add_days(start_offset);
        let end = start.add_days(length);
        let notional = Decimal::new(notional_cents as i64, 2);

        let mut builder = SchedulePeriod::builder();
        builder.set("startDate", Value::Date(start)).unwrap();
        builder.set("endDate", Value::Date(end)).unwrap();
        builder.set("notional", Value::Decimal(notional)).unwrap();
        let period = builder.build().unwrap();

        prop_assert_eq!(get(&period, "startDate").unwrap(), Value::Date(start));
        prop_assert_eq!(get(&period, "endDate").unwrap(), Value::Date(end));
        prop_assert_eq!(get(&period, "notional").unwrap(), Value::Decimal(notional));

        let copy = period.to_builder().build().unwrap();
        prop_assert_eq!(&period, &copy);
        prop_assert_eq!(hash_of(&period), hash_of(&copy));
    }
}
