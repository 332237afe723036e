//! Trade records and serializable trade lists.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use rivet_core::prelude::*;

/// A single trade: identifier, trade date, and counterparty name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    id: StandardId,
    trade_date: Date,
    counterparty: String,
}

impl Trade {
    /// Obtains a trade, validating through the builder.
    pub fn new(
        id: StandardId,
        trade_date: Date,
        counterparty: impl Into<String>,
    ) -> MetaResult<Self> {
        let mut builder = Self::builder();
        builder.set("id", Value::Text(id.to_string()))?;
        builder.set("tradeDate", Value::Date(trade_date))?;
        builder.set("counterparty", Value::Text(counterparty.into()))?;
        builder.build()
    }

    /// Returns the trade identifier.
    pub fn id(&self) -> &StandardId {
        &self.id
    }

    /// Returns the trade date.
    pub fn trade_date(&self) -> Date {
        self.trade_date
    }

    /// Returns the counterparty name.
    pub fn counterparty(&self) -> &str {
        &self.counterparty
    }
}

impl Bean for Trade {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for Trade {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<Trade>("Trade")
                .property(
                    PropertyDescriptor::required("id", ValueKind::Text, |any| {
                        any.downcast_ref::<Trade>()
                            .map(|t| Value::Text(t.id.to_string()))
                    })
                    .with_rule(Rule::NotEmpty),
                )
                .property(PropertyDescriptor::required(
                    "tradeDate",
                    ValueKind::Date,
                    |any| any.downcast_ref::<Trade>().map(|t| Value::Date(t.trade_date)),
                ))
                .property(
                    PropertyDescriptor::required("counterparty", ValueKind::Text, |any| {
                        any.downcast_ref::<Trade>()
                            .map(|t| Value::Text(t.counterparty.clone()))
                    })
                    .with_rule(Rule::NotEmpty),
                )
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            id: StandardId::parse(&staged.text("id")?)?,
            trade_date: staged.date("tradeDate")?,
            counterparty: staged.text("counterparty")?,
        })
    }
}

impl PartialEq for Trade {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

impl Eq for Trade {}

impl Hash for Trade {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bean(self, state);
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// An immutable, ordered list of trades.
///
/// The list is itself a value instance: its single `trades` property is a
/// list of nested [`Trade`] values, so generic consumers can walk a whole
/// portfolio through the property protocol without knowing this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeList {
    trades: Vec<Trade>,
}

impl TradeList {
    /// Obtains a trade list from the given trades.
    pub fn of(trades: Vec<Trade>) -> MetaResult<Self> {
        let mut builder = Self::builder();
        let items = trades
            .into_iter()
            .map(|t| Value::Bean(Arc::new(t)))
            .collect();
        builder.set("trades", Value::List(items))?;
        builder.build()
    }

    /// Returns the trades in order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Returns the number of trades.
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Returns true if the list holds no trades.
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl Bean for TradeList {
    fn meta_model(&self) -> Arc<MetaModel> {
        <Self as BeanType>::meta()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BeanType for TradeList {
    fn meta() -> Arc<MetaModel> {
        static META: OnceLock<Arc<MetaModel>> = OnceLock::new();
        META.get_or_init(|| {
            MetaModel::of::<TradeList>("TradeList")
                .property(PropertyDescriptor::required(
                    "trades",
                    ValueKind::List(Box::new(ValueKind::Bean("Trade"))),
                    |any| {
                        any.downcast_ref::<TradeList>().map(|list| {
                            Value::List(
                                list.trades
                                    .iter()
                                    .map(|t| Value::Bean(Arc::new(t.clone()) as Arc<dyn Bean>))
                                    .collect(),
                            )
                        })
                    },
                ))
                .finish()
        })
        .clone()
    }

    fn from_staged(staged: &Staged) -> MetaResult<Self> {
        Ok(Self {
            trades: staged.bean_list("trades")?,
        })
    }
}

impl PartialEq for TradeList {
    fn eq(&self, other: &Self) -> bool {
        beans_equal(self, other)
    }
}

impl Eq for TradeList {}

impl Hash for TradeList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bean(self, state);
    }
}

impl fmt::Display for TradeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
