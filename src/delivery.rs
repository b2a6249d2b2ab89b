//! Delivery fees
//!
//! A flat delivery fee per destination wilaya, with a single documented
//! fallback for wilayas missing from the table. The fallback value mirrors
//! the storefront's observed default and is overridable per table pending
//! confirmation as a business rule.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Fee charged for wilayas absent from the table, in DZD.
pub const FALLBACK_FEE_DZD: u32 = 1000;

/// Errors raised while loading a fee table from configuration.
#[derive(Debug, Error)]
pub enum FeeTableError {
    /// The YAML payload could not be parsed.
    #[error("failed to parse fee table YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A wilaya was configured with a negative fee.
    #[error("wilaya {0:?} has a negative fee {1}")]
    NegativeFee(String, Decimal),

    /// The fallback fee was configured negative.
    #[error("fallback fee {0} is negative")]
    NegativeFallback(Decimal),
}

/// Flat delivery fee per wilaya.
#[derive(Debug, Clone)]
pub struct DeliveryFees {
    fees: BTreeMap<String, Decimal>,
    fallback: Decimal,
}

/// On-disk shape of a fee table.
#[derive(Debug, Deserialize)]
struct FeeTableFile {
    #[serde(default = "default_fallback")]
    fallback: Decimal,
    wilayas: BTreeMap<String, Decimal>,
}

fn default_fallback() -> Decimal {
    Decimal::from(FALLBACK_FEE_DZD)
}

impl DeliveryFees {
    /// Create an empty table with the given fallback fee.
    #[must_use]
    pub fn new(fallback: Decimal) -> Self {
        Self {
            fees: BTreeMap::new(),
            fallback,
        }
    }

    /// Add or replace the fee for a wilaya.
    #[must_use]
    pub fn with_fee(mut self, wilaya: impl Into<String>, fee: Decimal) -> Self {
        self.fees.insert(wilaya.into(), fee);
        self
    }

    /// Load a fee table from YAML.
    ///
    /// The payload holds a `wilayas` name-to-fee mapping and an optional
    /// `fallback` fee, defaulting to [`FALLBACK_FEE_DZD`].
    ///
    /// # Errors
    ///
    /// - [`FeeTableError::Yaml`] when the payload is not valid YAML for the
    ///   expected shape.
    /// - [`FeeTableError::NegativeFee`] when any configured fee is negative.
    pub fn from_yaml(contents: &str) -> Result<Self, FeeTableError> {
        let file: FeeTableFile = serde_norway::from_str(contents)?;

        if file.fallback < Decimal::ZERO {
            return Err(FeeTableError::NegativeFallback(file.fallback));
        }

        if let Some((wilaya, fee)) = file.fees_below_zero() {
            return Err(FeeTableError::NegativeFee(wilaya.clone(), *fee));
        }

        Ok(Self {
            fees: file.wilayas,
            fallback: file.fallback,
        })
    }

    /// The built-in Algerian table used by the storefront.
    #[must_use]
    pub fn algeria() -> Self {
        const TABLE: &[(&str, u32)] = &[
            ("أدرار", 1400),
            ("الشلف", 750),
            ("الأغواط", 950),
            ("أم البواقي", 800),
            ("باتنة", 800),
            ("بجاية", 750),
            ("بسكرة", 900),
            ("البليدة", 600),
            ("البويرة", 700),
            ("تمنراست", 1600),
            ("تبسة", 900),
            ("تلمسان", 850),
            ("تيارت", 800),
            ("تيزي وزو", 700),
            ("الجزائر", 500),
            ("الجلفة", 950),
            ("جيجل", 800),
            ("سطيف", 750),
            ("سعيدة", 900),
            ("سكيكدة", 800),
            ("عنابة", 850),
            ("قالمة", 850),
            ("قسنطينة", 800),
            ("المدية", 650),
            ("مستغانم", 800),
            ("المسيلة", 850),
            ("معسكر", 850),
            ("ورقلة", 1100),
            ("وهران", 800),
            ("البيض", 1000),
            ("غرداية", 1050),
            ("غليزان", 800),
            ("بومرداس", 600),
            ("تيبازة", 600),
        ];

        TABLE
            .iter()
            .fold(Self::new(default_fallback()), |table, (wilaya, fee)| {
                table.with_fee(*wilaya, Decimal::from(*fee))
            })
    }

    /// Fee for a destination wilaya, or the fallback when unlisted.
    #[must_use]
    pub fn fee_for(&self, wilaya: &str) -> Decimal {
        self.fees.get(wilaya).copied().unwrap_or(self.fallback)
    }

    /// The fee charged for wilayas absent from the table.
    #[must_use]
    pub fn fallback(&self) -> Decimal {
        self.fallback
    }

    /// Number of wilayas listed in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fees.len()
    }

    /// Whether the table lists no wilayas at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }
}

impl FeeTableFile {
    /// First configured wilaya with a negative fee, if any.
    fn fees_below_zero(&self) -> Option<(&String, &Decimal)> {
        self.wilayas.iter().find(|(_, fee)| **fee < Decimal::ZERO)
    }
}
