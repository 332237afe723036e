//! Credit-default-swap reference data keys.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use rivet_core::prelude::*;

/// The identifier scheme for Markit RED codes.
pub const MARKIT_REDCODE_SCHEME: &str = "MarkitRedCode";

/// A 6 or 9 character Markit RED code identifying a CDS reference entity.
///
/// See <http://www.markit.com/product/reference-data-cds>.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedCode(String);

impl RedCode {
    /// Creates a RED code.
    ///
    /// # Errors
    ///
    /// Returns `MetaError::ValidationFailed` unless the code is exactly
    /// 6 or 9 alphanumeric characters.
    pub fn new(code: impl Into<String>) -> MetaResult<Self> {
        let code = code.into();
        if code.len() != 6 && code.len() != 9 {
            return Err(MetaError::validation_failed(
                "redCode",
                "must be exactly 6 or 9 characters",
            ));
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MetaError::validation_failed(
                "redCode",
                "must be alphanumeric",
            ));
        }
        Ok(Self(code))
    }

    /// Returns the code text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts this code to a standard identifier in the Markit scheme.
    pub fn standard_id(&self) -> MetaResult<StandardId> {
        StandardId::of(MARKIT_REDCODE_SCHEME, &self.0)
    }
}

impl fmt::Display for RedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The seniority of the reference debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeniorityLevel {
    /// Senior domestic secured debt.
    SeniorSecuredDomestic,
    /// Senior foreign unsecured debt.
    SeniorUnsecuredForeign,
    /// Subordinate lower tier 2 debt.
    SubordinateLowerTier2,
    /// Subordinate tier 1 debt.
    SubordinateTier1,
}

impl EnumLike for SeniorityLevel {
    const TYPE_NAME: &'static str = "SeniorityLevel";

    fn variant_name(&self) -> &'static str {
        match self {
            SeniorityLevel::SeniorSecuredDomestic => "SeniorSecuredDomestic",
            SeniorityLevel::SeniorUnsecuredForeign => "SeniorUnsecuredForeign",
            SeniorityLevel::SubordinateLowerTier2 => "SubordinateLowerTier2",
            SeniorityLevel::SubordinateTier1 => "SubordinateTier1",
        }
    }

    fn from_variant(variant: &str) -> Option<Self> {
        match variant {
            "SeniorSecuredDomestic" => Some(SeniorityLevel::SeniorSecuredDomestic),
            "SeniorUnsecuredForeign" => Some(SeniorityLevel::SeniorUnsecuredForeign),
            "SubordinateLowerTier2" => Some(SeniorityLevel::SubordinateLowerTier2),
            "SubordinateTier1" => Some(SeniorityLevel::SubordinateTier1),
            _ => None,
        }
    }
}

/// The restructuring clause applying to the CDS contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestructuringClause {
    /// Modified-modified restructuring (2014 definitions).
    ModModRestructuring2014,
    /// Modified restructuring (2014 definitions).
    ModRestructuring2014,
    /// Old/cum restructuring (2014 definitions).
    CumRestructuring2014,
    /// No restructuring (2014 definitions).
    NoRestructuring2014,
}

impl EnumLike for RestructuringClause {
    const TYPE_NAME: &'static str = "RestructuringClause";

    fn variant_name(&self) -> &'static str {
        match self {
            RestructuringClause::ModModRestructuring2014 => "ModModRestructuring2014",
            RestructuringClause::ModRestructuring2014 => "ModRestructuring2014",
            RestructuringClause::CumRestructuring2014 => "CumRestructuring2014",
            RestructuringClause::NoRestructuring2014 => "NoRestructuring2014",
        }
    }

    fn from_variant(variant: &str) -> Option<Self> {
        match variant {
            "ModModRestructuring2014" => Some(RestructuringClause::ModModRestructuring2014),
            "ModRestructuring2014" => Some(RestructuringClause::ModRestructuring2014),
            "CumRestructuring2014" => Some(RestructuringClause::CumRestructuring2014),
            "NoRestructuring2014" => Some(RestructuringClause::NoRestructuring2014),
            _ => None,
        }
    }
}

/// The key identifying a single-name CDS data set: reference entity,
/// seniority, currency, and restructuring clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleNameKey {
    entity_id: StandardId,
    seniority_level: SeniorityLevel,
    currency: Currency,
    restructuring_clause: RestructuringClause,
}

impl SingleNameKey {
    /// Obtains a key from its four parts.
    pub fn new(
        entity_id: StandardId,
        seniority_level: SeniorityLevel,
        currency: Currency,
        restructuring_clause: RestructuringClause,
    ) -> MetaResult<Self> {
        let mut builder = Self::builder();
        builder.set("entityId", Value::Text(entity_id.to_string()))?;
        builder.set("seniorityLevel", seniority_level.value())?;
        builder.set("currency", currency.value())?;
        builder.set("restructuringClause", restructuring_clause.value())?;
        builder.build()
    }

    /// Returns the CDS entity identifier (e.g. a Markit RED code id).
    pub fn entity_id(&self) -> &StandardId {
        &self.entity_id
    }

    /// Returns the seniority level.
    pub fn seniority_level(&self) -> SeniorityLevel {
        self.seniority_level
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the restructuring clause.
    pub fn restructuring_clause(&self) -> RestructuringClause {
        self.restructuring_clause
    }
}

impl Bean for SingleNameKey {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for SingleNameKey {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<SingleNameKey>("SingleNameKey")
                .property(
                    PropertyDescriptor::required("entityId", ValueKind::Text, |any| {
                        any.downcast_ref::<SingleNameKey>()
                            .map(|b| Value::Text(b.entity_id.to_string()))
                    })
                    .with_rule(Rule::NotEmpty),
                )
                .property(
                    PropertyDescriptor::required(
                        "seniorityLevel",
                        ValueKind::Enum("SeniorityLevel"),
                        |any| {
                            any.downcast_ref::<SingleNameKey>()
                                .map(|b| b.seniority_level.value())
                        },
                    )
                    .with_parser(SeniorityLevel::parse_value),
                )
                .property(
                    PropertyDescriptor::required("currency", ValueKind::Enum("Currency"), |any| {
                        any.downcast_ref::<SingleNameKey>().map(|b| b.currency.value())
                    })
                    .with_parser(Currency::parse_value),
                )
                .property(
                    PropertyDescriptor::required(
                        "restructuringClause",
                        ValueKind::Enum("RestructuringClause"),
                        |any| {
                            any.downcast_ref::<SingleNameKey>()
                                .map(|b| b.restructuring_clause.value())
                        },
                    )
                    .with_parser(RestructuringClause::parse_value),
                )
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            entity_id: StandardId::parse(&staged.text("entityId")?)?,
            seniority_level: staged.enum_value("seniorityLevel")?,
            currency: staged.enum_value("currency")?,
            restructuring_clause: staged.enum_value("restructuringClause")?,
        })
    }
}

impl PartialEq for SingleNameKey {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

impl Eq for SingleNameKey {}

impl Hash for SingleNameKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bean(self, state);
    }
}

impl fmt::Display for SingleNameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivet_core::bean::get;

    #[test]
    fn test_red_code_lengths() {
        assert!(RedCode::new("3H98A7").is_ok());
        assert!(RedCode::new("3H98A7BCD").is_ok());
        assert!(RedCode::new("3H98").is_err());
        assert!(RedCode::new("3H98A7BC").is_err());
    }

    #[test]
    fn test_red_code_rejects_non_alphanumeric() {
        assert!(RedCode::new("3H98~7").is_err());
        assert!(RedCode::new("3H 8A7").is_err());
    }

    #[test]
    fn test_red_code_standard_id() {
        let id = RedCode::new("3H98A7").unwrap().standard_id().unwrap();
        assert_eq!(id.scheme(), MARKIT_REDCODE_SCHEME);
        assert_eq!(id.value(), "3H98A7");
        assert_eq!(id.to_string(), "MarkitRedCode~3H98A7");
    }

    #[test]
    fn test_single_name_key_round_trip() {
        let entity = RedCode::new("03AFCJ").unwrap().standard_id().unwrap();
        let key = SingleNameKey::new(
            entity.clone(),
            SeniorityLevel::SeniorUnsecuredForeign,
            Currency::USD,
            RestructuringClause::NoRestructuring2014,
        )
        .unwrap();

        assert_eq!(key.entity_id(), &entity);
        assert_eq!(
            get(&key, "entityId").unwrap(),
            Value::Text("MarkitRedCode~03AFCJ".to_string())
        );

        let copy = key.to_builder().build().unwrap();
        assert_eq!(key, copy);
    }

    #[test]
    fn test_missing_part_fails_naming_the_field() {
        let mut builder = SingleNameKey::builder();
        builder
            .set("entityId", Value::Text("MarkitRedCode~03AFCJ".to_string()))
            .unwrap();
        builder
            .set("seniorityLevel", SeniorityLevel::SeniorUnsecuredForeign.value())
            .unwrap();
        builder.set("currency", Currency::USD.value()).unwrap();
        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            MetaError::validation_failed("restructuringClause", "must not be null")
        );
    }
}
