//! Schema command - print expected input formats

use crate::params::ShipmentParameters;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the parameters file
    JsonSchema,
    /// Accepted item table column aliases
    ItemColumns,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::ItemColumns => self.print_item_columns(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ShipmentParameters);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_item_columns(&self) -> anyhow::Result<()> {
        println!("Item Table Columns");
        println!("==================");
        println!();
        for (field, required, aliases) in ITEM_COLUMN_DESCRIPTIONS {
            let req = if *required { "required" } else { "optional" };
            println!("{:12} ({:8})  accepted headers: {}", field, req, aliases);
        }
        println!();
        println!("Header matching is case-insensitive; the first listed alias wins.");
        println!("All other columns pass through to the output unchanged.");
        Ok(())
    }
}

const ITEM_COLUMN_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    (
        "unit value",
        true,
        "VLR_UNITARIO_MOEDA, VLR_UNITARIO, VALOR, VALOR_UNITARIO",
    ),
    ("quantity", true, "QTD, QUANTIDADE"),
    ("II rate", false, "ALIQ_II (defaults to 0)"),
    ("IPI rate", false, "ALIQ_IPI (defaults to 0)"),
];
