//! Corporate tax regime and the statutory PIS/COFINS import rates it selects

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Corporate tax regime of the importer.
///
/// The regime fixes the statutory PIS/COFINS-Importação rates; explicit
/// per-shipment overrides take precedence (see `ShipmentParameters`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    /// Lucro Real (non-cumulative)
    #[default]
    Real,
    /// Lucro Presumido (cumulative)
    Presumido,
}

impl TaxRegime {
    /// Statutory PIS rate on imports (%)
    pub fn pis_rate(&self) -> Decimal {
        match self {
            TaxRegime::Real => dec!(2.10),
            TaxRegime::Presumido => dec!(0.65),
        }
    }

    /// Statutory COFINS rate on imports (%)
    pub fn cofins_rate(&self) -> Decimal {
        match self {
            TaxRegime::Real => dec!(9.65),
            TaxRegime::Presumido => dec!(3.00),
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxRegime::Real => write!(f, "real"),
            TaxRegime::Presumido => write!(f, "presumido"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_regime_rates() {
        assert_eq!(TaxRegime::Real.pis_rate(), dec!(2.10));
        assert_eq!(TaxRegime::Real.cofins_rate(), dec!(9.65));
    }

    #[test]
    fn presumido_regime_rates() {
        assert_eq!(TaxRegime::Presumido.pis_rate(), dec!(0.65));
        assert_eq!(TaxRegime::Presumido.cofins_rate(), dec!(3.00));
    }

    #[test]
    fn regime_parses_from_lowercase_json() {
        let regime: TaxRegime = serde_json::from_str("\"presumido\"").unwrap();
        assert_eq!(regime, TaxRegime::Presumido);
    }
}
