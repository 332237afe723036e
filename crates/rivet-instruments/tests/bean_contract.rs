//! Protocol contract tests across the instrument types: every type must
//! honor the same builder, equality, hashing, rendering, and registry
//! behavior.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal_macros::dec;

use rivet_core::bean::{beans_equal, get};
use rivet_core::prelude::*;
use rivet_instruments::prelude::*;

fn ymd(year: i32, month: u32, day: u32) -> Date {
    Date::from_ymd(year, month, day).unwrap()
}

fn sample_fra() -> ExpandedFra {
    ExpandedFra::builder()
        .buy_sell(BuySell::Buy)
        .payment_date(ymd(2025, 6, 17))
        .start_date(ymd(2025, 6, 15))
        .end_date(ymd(2025, 12, 15))
        .year_fraction(dec!(0.5))
        .fixed_rate(dec!(0.025))
        .floating_rate(RateObservation::new("GBP-LIBOR-3M", ymd(2025, 6, 13)).unwrap())
        .currency(Currency::GBP)
        .notional(dec!(10_000_000))
        .discounting(FraDiscountingMethod::Isda)
        .build()
        .unwrap()
}

fn sample_key() -> SingleNameKey {
    let entity = RedCode::new("03AFCJ").unwrap().standard_id().unwrap();
    SingleNameKey::new(
        entity,
        SeniorityLevel::SeniorUnsecuredForeign,
        Currency::USD,
        RestructuringClause::NoRestructuring2014,
    )
    .unwrap()
}

fn sample_trade(value: &str) -> Trade {
    let id = StandardId::of("OG-Trade", value).unwrap();
    Trade::new(id, ymd(2021, 3, 15), "BankA").unwrap()
}

#[test]
fn every_instrument_resolves_by_name_after_registration() {
    let registry = MetaRegistry::new();
    register_instruments(&registry);
    for name in [
        "RateObservation",
        "ExpandedFra",
        "SingleNameKey",
        "Trade",
        "TradeList",
        "CurveParallelShift",
    ] {
        let meta = registry.lookup_name(name).unwrap();
        assert_eq!(meta.type_name(), name);
        assert!(!meta.is_empty());
    }
}

#[test]
fn registration_is_idempotent_across_instruments() {
    let registry = MetaRegistry::new();
    register_instruments(&registry);
    let first = registry.lookup::<ExpandedFra>().unwrap();
    register_instruments(&registry);
    let second = registry.lookup::<ExpandedFra>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 6);
}

#[test]
fn generic_walk_reads_every_property_of_every_type() {
    let beans: Vec<Arc<dyn Bean>> = vec![
        Arc::new(sample_fra()),
        Arc::new(sample_key()),
        Arc::new(sample_trade("1001")),
        Arc::new(TradeList::of(vec![sample_trade("1001")]).unwrap()),
        Arc::new(CurveParallelShift::absolute(dec!(0.0001)).unwrap()),
    ];
    for bean in &beans {
        let meta = bean.meta_model();
        for property in meta.properties() {
            let value = get(bean.as_ref(), property.name()).unwrap();
            assert!(
                value.matches(property.kind()),
                "{}.{} returned a value of the wrong kind",
                meta.type_name(),
                property.name()
            );
        }
    }
}

#[test]
fn copies_are_equal_and_hash_equal() {
    let fra = sample_fra();
    let copy = fra.to_builder().build().unwrap();
    assert_eq!(fra, copy);

    let mut set = HashSet::new();
    set.insert(fra);
    assert!(set.contains(&copy));
}

#[test]
fn single_field_change_breaks_equality() {
    let fra = sample_fra();
    let changed = fra.to_builder().notional(dec!(5_000_000)).build().unwrap();
    assert_ne!(fra, changed);
    assert_eq!(changed.notional(), dec!(5_000_000));
    // the source is untouched
    assert_eq!(fra.notional(), dec!(10_000_000));
}

#[test]
fn different_types_are_never_equal() {
    let trade = sample_trade("1001");
    let key = sample_key();
    assert!(!beans_equal(&trade, &key));
}

#[test]
fn failed_set_leaves_previous_staging_intact() {
    let mut builder = sample_fra().to_builder();
    let err = builder
        .set("notional", Value::Text("lots".to_string()))
        .unwrap_err();
    assert!(matches!(err, MetaError::TypeMismatch { .. }));
    // the previously staged notional survives and the build succeeds
    let fra = builder.build().unwrap();
    assert_eq!(fra.notional(), dec!(10_000_000));
}

#[test]
fn display_uses_the_property_order() {
    let key = sample_key();
    assert_eq!(
        key.to_string(),
        "SingleNameKey{entityId=MarkitRedCode~03AFCJ, \
         seniorityLevel=SeniorUnsecuredForeign, currency=USD, \
         restructuringClause=NoRestructuring2014}"
    );
}

#[test]
fn shifted_curve_feeds_back_into_instrument_amounts() {
    let shift = CurveParallelShift::relative(dec!(0.01)).unwrap();
    let curve = ZeroCurve::new("GBP-Disc", vec![dec!(0.02)]);
    let shifted = shift.apply(&curve);
    assert_eq!(shifted.rates[0], dec!(0.0202));
}

#[test]
fn serde_round_trips_the_concrete_types() {
    let fra = sample_fra();
    let json = serde_json::to_string(&fra).unwrap();
    let back: ExpandedFra = serde_json::from_str(&json).unwrap();
    assert_eq!(fra, back);

    let list = TradeList::of(vec![sample_trade("1"), sample_trade("2")]).unwrap();
    let json = serde_json::to_string(&list).unwrap();
    let back: TradeList = serde_json::from_str(&json).unwrap();
    assert_eq!(list, back);
}
