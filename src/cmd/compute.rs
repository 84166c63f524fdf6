//! Compute command - the augmented item table with all derived columns

use crate::cmd::{self, format_brl, ParamArgs};
use crate::items::ItemTable;
use crate::tax::{apportion, Apportionment, EngineConfig};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Derived columns appended after the pass-through columns, in export order
const DERIVED_COLUMNS: &[&str] = &[
    "VLR_UNIT_BRL",
    "VLR_TOTAL",
    "FRETE_RATEADO",
    "SEGURO_RATEADO",
    "TAXAS_RATEADAS",
    "AFRMM_RATEADO",
    "VALOR_ADUANEIRO",
    "VALOR_II",
    "VALOR_IPI",
    "VALOR_PIS",
    "VALOR_COFINS",
    "BASE_ICMS",
    "VALOR_ICMS",
    "ICMS_DIFERIDO",
    "ICMS_A_RECOLHER",
];

#[derive(Args, Debug)]
pub struct ComputeCommand {
    /// CSV file with the line items. Reads from stdin with "-"
    #[arg(short, long)]
    items: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    /// Output the augmented table as CSV instead of a formatted table
    #[arg(long)]
    csv: bool,
}

impl ComputeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let table = cmd::read_items(&self.items)?;
        let params = self.params.load()?;

        let Some(result) = apportion(&table, &params, &EngineConfig::default())? else {
            log::warn!("exchange rate is not positive; nothing to compute");
            return Ok(());
        };

        if self.csv {
            write_augmented_csv(&table, &result)
        } else {
            self.print_table(&result);
            Ok(())
        }
    }

    fn print_table(&self, result: &Apportionment) {
        let rows: Vec<ItemRow> = result
            .items
            .iter()
            .map(|item| ItemRow {
                row: format!("#{}", item.row + 1),
                quantity: item.quantity.normalize().to_string(),
                total: format_brl(item.item_total),
                share: format!("{:.4}%", item.fraction * dec!(100)),
                customs_value: format_brl(item.customs_value),
                ii: format_brl(item.ii),
                ipi: format_brl(item.ipi),
                pis: format_brl(item.pis),
                cofins: format_brl(item.cofins),
                icms_base: format_brl(item.icms_base),
                icms_payable: format_brl(item.icms_payable),
            })
            .collect();

        if rows.is_empty() {
            println!("No items found in the input table");
            return;
        }

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
}

/// Row for the compute table output
#[derive(Debug, Clone, Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    row: String,

    #[tabled(rename = "Qtd")]
    quantity: String,

    #[tabled(rename = "Total")]
    total: String,

    #[tabled(rename = "Rateio")]
    share: String,

    #[tabled(rename = "Vlr. Aduaneiro")]
    customs_value: String,

    #[tabled(rename = "II")]
    ii: String,

    #[tabled(rename = "IPI")]
    ipi: String,

    #[tabled(rename = "PIS")]
    pis: String,

    #[tabled(rename = "COFINS")]
    cofins: String,

    #[tabled(rename = "Base ICMS")]
    icms_base: String,

    #[tabled(rename = "ICMS a Recolher")]
    icms_payable: String,
}

/// Write the pass-through columns followed by the derived columns.
/// Money cells are rounded to 2 decimal places at this edge only.
fn write_augmented_csv(table: &ItemTable, result: &Apportionment) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());

    let mut header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    header.extend_from_slice(DERIVED_COLUMNS);
    wtr.write_record(&header)?;

    for item in &result.items {
        let mut record: Vec<String> = (0..table.headers.len())
            .map(|col| table.cell(item.row, col).to_string())
            .collect();

        let money = |v: Decimal| format!("{:.2}", v);
        record.extend([
            money(item.unit_local),
            money(item.item_total),
            money(item.freight),
            money(item.insurance),
            money(item.handling_fee),
            money(item.surcharge),
            money(item.customs_value),
            money(item.ii),
            money(item.ipi),
            money(item.pis),
            money(item.cofins),
            money(item.icms_base),
            money(item.icms_gross),
            money(item.icms_deferred),
            money(item.icms_payable),
        ]);
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
