//! Summary command - shipment-level totals for the fiscal mirror header

use crate::cmd::{self, format_brl, format_pct, ParamArgs};
use crate::params::ShipmentParameters;
use crate::tax::{apportion, Apportionment, EngineConfig};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    /// CSV file with the line items. Reads from stdin with "-"
    #[arg(short, long)]
    items: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary data for JSON output
#[derive(Debug, Serialize)]
struct SummaryData {
    item_count: usize,
    regime: String,
    grand_total: String,
    allocated_costs: AllocatedCosts,
    customs_value: String,
    federal_taxes: FederalTaxes,
    icms: IcmsSummary,
}

#[derive(Debug, Serialize)]
struct AllocatedCosts {
    freight: String,
    insurance: String,
    handling_fees: String,
    afrmm: String,
}

#[derive(Debug, Serialize)]
struct FederalTaxes {
    ii: String,
    ipi: String,
    pis: String,
    pis_rate_pct: String,
    cofins: String,
    cofins_rate_pct: String,
}

#[derive(Debug, Serialize)]
struct IcmsSummary {
    rate_pct: String,
    base: String,
    gross: String,
    deferred: String,
    payable: String,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let table = cmd::read_items(&self.items)?;
        let params = self.params.load()?;

        let Some(result) = apportion(&table, &params, &EngineConfig::default())? else {
            log::warn!("exchange rate is not positive; nothing to compute");
            return Ok(());
        };

        if self.json {
            self.print_json(&result, &params)
        } else {
            self.print_summary(&result, &params);
            Ok(())
        }
    }

    fn print_summary(&self, result: &Apportionment, params: &ShipmentParameters) {
        println!();
        println!(
            "IMPORT SUMMARY ({} items, regime {})",
            result.items.len(),
            params.regime
        );
        println!();

        println!("VALUES");
        println!("  Items total: {}", format_brl(result.grand_total()));
        println!(
            "  Freight: {} | Insurance: {} | Fees: {} | AFRMM: {}",
            format_brl(result.total_freight()),
            format_brl(result.total_insurance()),
            format_brl(result.total_handling_fee()),
            format_brl(result.total_surcharge())
        );
        println!(
            "  Customs value (valor aduaneiro): {}",
            format_brl(result.total_customs_value())
        );
        println!();

        println!("FEDERAL TAXES");
        println!("  II: {}", format_brl(result.total_ii()));
        println!("  IPI: {}", format_brl(result.total_ipi()));
        println!(
            "  PIS @ {}: {} | COFINS @ {}: {}",
            format_pct(params.effective_pis_rate()),
            format_brl(result.total_pis()),
            format_pct(params.effective_cofins_rate()),
            format_brl(result.total_cofins())
        );
        println!();

        println!("ICMS @ {}", format_pct(params.combined_icms_rate()));
        println!("  Base (por dentro): {}", format_brl(result.total_icms_base()));
        println!("  Gross: {}", format_brl(result.total_icms_gross()));
        if params.deferral_active {
            println!(
                "  Deferred ({}): {} | Payable: {}",
                format_pct(params.deferral_pct),
                format_brl(result.total_icms_deferred()),
                format_brl(result.total_icms_payable())
            );
        } else {
            println!("  Payable: {}", format_brl(result.total_icms_payable()));
        }
        println!();
    }

    fn print_json(&self, result: &Apportionment, params: &ShipmentParameters) -> anyhow::Result<()> {
        let data = SummaryData {
            item_count: result.items.len(),
            regime: params.regime.to_string(),
            grand_total: format!("{:.2}", result.grand_total()),
            allocated_costs: AllocatedCosts {
                freight: format!("{:.2}", result.total_freight()),
                insurance: format!("{:.2}", result.total_insurance()),
                handling_fees: format!("{:.2}", result.total_handling_fee()),
                afrmm: format!("{:.2}", result.total_surcharge()),
            },
            customs_value: format!("{:.2}", result.total_customs_value()),
            federal_taxes: FederalTaxes {
                ii: format!("{:.2}", result.total_ii()),
                ipi: format!("{:.2}", result.total_ipi()),
                pis: format!("{:.2}", result.total_pis()),
                pis_rate_pct: format!("{:.2}", params.effective_pis_rate()),
                cofins: format!("{:.2}", result.total_cofins()),
                cofins_rate_pct: format!("{:.2}", params.effective_cofins_rate()),
            },
            icms: IcmsSummary {
                rate_pct: format!("{:.2}", params.combined_icms_rate()),
                base: format!("{:.2}", result.total_icms_base()),
                gross: format!("{:.2}", result.total_icms_gross()),
                deferred: format!("{:.2}", result.total_icms_deferred()),
                payable: format!("{:.2}", result.total_icms_payable()),
            },
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}
