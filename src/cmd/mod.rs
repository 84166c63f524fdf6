pub mod compute;
pub mod schema;
pub mod summary;

use crate::items::{self, ItemTable};
use crate::params::{self, ShipmentParameters};
use crate::tax::TaxRegime;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Read the item table (CSV) from a file, or stdin with "-"
pub fn read_items(path: &Path) -> anyhow::Result<ItemTable> {
    if path.as_os_str() == "-" {
        read_items_from_stdin()
    } else {
        let file = File::open(path)?;
        items::read_csv(BufReader::new(file))
    }
}

fn read_items_from_stdin() -> anyhow::Result<ItemTable> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    items::read_csv(io::Cursor::new(buffer))
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegimeArg {
    /// Lucro real: PIS 2.10%, COFINS 9.65%
    Real,
    /// Lucro presumido: PIS 0.65%, COFINS 3.00%
    Presumido,
}

impl From<RegimeArg> for TaxRegime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::Real => TaxRegime::Real,
            RegimeArg::Presumido => TaxRegime::Presumido,
        }
    }
}

/// Shipment parameters from a JSON file and/or individual flags.
/// Flags override values from the file.
#[derive(Args, Debug)]
pub struct ParamArgs {
    /// JSON file with shipment parameters (see `rateio schema`)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Foreign currency to BRL exchange rate
    #[arg(long)]
    exchange_rate: Option<Decimal>,

    /// Total freight for the shipment (BRL)
    #[arg(long)]
    freight: Option<Decimal>,

    /// Total insurance for the shipment (BRL)
    #[arg(long)]
    insurance: Option<Decimal>,

    /// Siscomex and port handling fees (BRL)
    #[arg(long)]
    handling: Option<Decimal>,

    /// AFRMM maritime surcharge (BRL)
    #[arg(long)]
    afrmm: Option<Decimal>,

    /// Corporate regime selecting statutory PIS/COFINS rates
    #[arg(long, value_enum)]
    regime: Option<RegimeArg>,

    /// Explicit PIS rate (%), overriding the regime rate
    #[arg(long)]
    pis_rate: Option<Decimal>,

    /// Explicit COFINS rate (%), overriding the regime rate
    #[arg(long)]
    cofins_rate: Option<Decimal>,

    /// Nominal internal ICMS rate (%)
    #[arg(long)]
    icms_rate: Option<Decimal>,

    /// Additional FECP surcharge rate (%) on top of the ICMS rate
    #[arg(long)]
    fecp_rate: Option<Decimal>,

    /// Deferred fraction of the gross ICMS (%); activates diferimento
    #[arg(long)]
    deferral_pct: Option<Decimal>,
}

impl ParamArgs {
    pub fn load(&self) -> anyhow::Result<ShipmentParameters> {
        let mut params = match &self.params {
            Some(path) => {
                let file = File::open(path)?;
                params::read_json(BufReader::new(file))?
            }
            None => ShipmentParameters::default(),
        };

        if let Some(rate) = self.exchange_rate {
            params.exchange_rate = rate;
        }
        if let Some(value) = self.freight {
            params.freight_total = value;
        }
        if let Some(value) = self.insurance {
            params.insurance_total = value;
        }
        if let Some(value) = self.handling {
            params.handling_fee_total = value;
        }
        if let Some(value) = self.afrmm {
            params.surcharge_total = value;
        }
        if let Some(regime) = self.regime {
            params.regime = regime.into();
        }
        if let Some(rate) = self.pis_rate {
            params.pis_rate = Some(rate);
        }
        if let Some(rate) = self.cofins_rate {
            params.cofins_rate = Some(rate);
        }
        if let Some(rate) = self.icms_rate {
            params.icms_rate = rate;
        }
        if let Some(rate) = self.fecp_rate {
            params.fecp_rate = rate;
        }
        if let Some(pct) = self.deferral_pct {
            params.deferral_active = true;
            params.deferral_pct = pct;
        }

        params.validate()?;
        Ok(params)
    }
}

pub fn format_brl(amount: Decimal) -> String {
    format!("R${:.2}", amount)
}

pub fn format_pct(rate: Decimal) -> String {
    format!("{:.2}%", rate)
}
