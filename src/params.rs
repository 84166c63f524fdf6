//! Global shipment parameters, supplied once per run

use crate::tax::TaxRegime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Everything that is the same for every item of one import declaration.
///
/// Constructed fresh per invocation (from a JSON file, CLI flags, or both)
/// and passed by value into the engine; nothing here persists between runs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ShipmentParameters {
    /// Foreign currency to BRL rate; must be positive before conversion runs
    pub exchange_rate: Decimal,

    /// Total freight for the shipment (BRL)
    pub freight_total: Decimal,
    /// Total insurance for the shipment (BRL)
    pub insurance_total: Decimal,
    /// Siscomex and port handling fees (BRL)
    pub handling_fee_total: Decimal,
    /// AFRMM maritime surcharge (BRL)
    pub surcharge_total: Decimal,

    /// Corporate regime selecting the statutory PIS/COFINS rates
    pub regime: TaxRegime,
    /// Explicit PIS rate (%) overriding the regime rate
    pub pis_rate: Option<Decimal>,
    /// Explicit COFINS rate (%) overriding the regime rate
    pub cofins_rate: Option<Decimal>,

    /// Nominal internal ICMS rate (%)
    pub icms_rate: Decimal,
    /// Additional FECP surcharge (%) stacked on the ICMS rate
    pub fecp_rate: Decimal,

    /// Whether part of the ICMS is legally deferred (diferimento)
    pub deferral_active: bool,
    /// Fraction of the gross ICMS deferred, 0-100
    pub deferral_pct: Decimal,
}

impl Default for ShipmentParameters {
    fn default() -> Self {
        ShipmentParameters {
            exchange_rate: Decimal::ONE,
            freight_total: Decimal::ZERO,
            insurance_total: Decimal::ZERO,
            handling_fee_total: Decimal::ZERO,
            surcharge_total: Decimal::ZERO,
            regime: TaxRegime::default(),
            pis_rate: None,
            cofins_rate: None,
            icms_rate: dec!(18),
            fecp_rate: Decimal::ZERO,
            deferral_active: false,
            deferral_pct: Decimal::ZERO,
        }
    }
}

impl ShipmentParameters {
    /// Effective PIS rate (%): explicit override or the regime's statutory rate
    pub fn effective_pis_rate(&self) -> Decimal {
        self.pis_rate.unwrap_or_else(|| self.regime.pis_rate())
    }

    /// Effective COFINS rate (%): explicit override or the regime's statutory rate
    pub fn effective_cofins_rate(&self) -> Decimal {
        self.cofins_rate.unwrap_or_else(|| self.regime.cofins_rate())
    }

    /// Combined ICMS rate (%) used in the gross-up: nominal rate plus FECP
    pub fn combined_icms_rate(&self) -> Decimal {
        self.icms_rate + self.fecp_rate
    }

    /// Reject values the engine cannot meaningfully compute with
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("freight_total", self.freight_total),
            ("insurance_total", self.insurance_total),
            ("handling_fee_total", self.handling_fee_total),
            ("surcharge_total", self.surcharge_total),
            ("icms_rate", self.icms_rate),
            ("fecp_rate", self.fecp_rate),
        ] {
            if value < Decimal::ZERO {
                anyhow::bail!("{} must not be negative (got {})", name, value);
            }
        }
        if let Some(rate) = self.pis_rate {
            if rate < Decimal::ZERO {
                anyhow::bail!("pis_rate must not be negative (got {})", rate);
            }
        }
        if let Some(rate) = self.cofins_rate {
            if rate < Decimal::ZERO {
                anyhow::bail!("cofins_rate must not be negative (got {})", rate);
            }
        }
        if self.deferral_pct < Decimal::ZERO || self.deferral_pct > dec!(100) {
            anyhow::bail!(
                "deferral_pct must be between 0 and 100 (got {})",
                self.deferral_pct
            );
        }
        Ok(())
    }
}

/// Read shipment parameters from JSON
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<ShipmentParameters> {
    let params: ShipmentParameters = serde_json::from_reader(reader)?;
    Ok(params)
}
