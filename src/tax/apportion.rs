//! Rateio and gross-up pipeline: proportional allocation of shared costs,
//! federal import taxes and the tax-inclusive (por dentro) ICMS base.
//!
//! The computation is a two-pass batch over the whole item table: first the
//! grand total of item values, then every proportional share and downstream
//! tax. No row is finalized independently of the others.

use crate::items::{parse_decimal_cell, ItemTable};
use crate::params::ShipmentParameters;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("required column '{field}' not found; accepted headers: {tried}")]
    MissingColumn { field: &'static str, tried: String },
    #[error("item values sum to {total}; rateio is undefined without a positive base")]
    ZeroBase { total: Decimal },
    #[error("combined ICMS rate {rate}% makes the gross-up undefined (must be below 100)")]
    InvalidRate { rate: Decimal },
    #[error("row {row}: could not parse '{value}' in column '{column}' as a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// A shared logistics cost that is apportioned across items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostComponent {
    Freight,
    Insurance,
    HandlingFee,
    Surcharge,
}

impl CostComponent {
    /// The shipment-level total for this component
    pub fn total(&self, params: &ShipmentParameters) -> Decimal {
        match self {
            CostComponent::Freight => params.freight_total,
            CostComponent::Insurance => params.insurance_total,
            CostComponent::HandlingFee => params.handling_fee_total,
            CostComponent::Surcharge => params.surcharge_total,
        }
    }
}

/// Whether PIS/COFINS are computed per item or once on the aggregate base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PisCofinsScope {
    #[default]
    PerItem,
    /// Compute on the summed customs value, allocate by each item's fraction.
    /// Differs from per-item only in rounding.
    Aggregate,
}

/// Ordered, case-insensitive header aliases per semantic column.
/// First match wins.
#[derive(Debug, Clone)]
pub struct ColumnAliases {
    pub unit_value: Vec<String>,
    pub quantity: Vec<String>,
    pub ii_rate: Vec<String>,
    pub ipi_rate: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        ColumnAliases {
            unit_value: names(&["VLR_UNITARIO_MOEDA", "VLR_UNITARIO", "VALOR", "VALOR_UNITARIO"]),
            quantity: names(&["QTD", "QUANTIDADE"]),
            ii_rate: names(&["ALIQ_II"]),
            ipi_rate: names(&["ALIQ_IPI"]),
        }
    }
}

/// Which legacy formula variant the engine reproduces.
///
/// The divergence points across spreadsheet versions are enumerated here
/// instead of being scattered through the pipeline: which costs feed the
/// customs value, which feed only the gross-up base, and where PIS/COFINS
/// are computed. The default is the reference variant.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Costs inside the customs value (II base)
    pub customs_components: Vec<CostComponent>,
    /// Costs outside the customs value but inside the ICMS gross-up base
    pub icms_extra_components: Vec<CostComponent>,
    pub pis_cofins_scope: PisCofinsScope,
    pub aliases: ColumnAliases,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            customs_components: vec![CostComponent::Freight, CostComponent::Insurance],
            icms_extra_components: vec![CostComponent::HandlingFee, CostComponent::Surcharge],
            pis_cofins_scope: PisCofinsScope::default(),
            aliases: ColumnAliases::default(),
        }
    }
}

/// One item with every derived column populated.
/// Values are exact; rounding happens at the output edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedItem {
    /// Index of the originating table row
    pub row: usize,
    pub quantity: Decimal,
    /// Unit value as uploaded (foreign currency when one is involved)
    pub unit_value: Decimal,
    /// Unit value converted to BRL
    pub unit_local: Decimal,
    pub item_total: Decimal,
    /// This item's share of the grand total; fractions sum to 1
    pub fraction: Decimal,
    pub freight: Decimal,
    pub insurance: Decimal,
    pub handling_fee: Decimal,
    pub surcharge: Decimal,
    pub customs_value: Decimal,
    pub ii_rate: Decimal,
    pub ipi_rate: Decimal,
    pub ii: Decimal,
    pub ipi: Decimal,
    pub pis: Decimal,
    pub cofins: Decimal,
    pub icms_base: Decimal,
    pub icms_gross: Decimal,
    pub icms_deferred: Decimal,
    pub icms_payable: Decimal,
}

/// The augmented table: one computed item per input row, in row order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apportionment {
    pub items: Vec<ComputedItem>,
}

impl Apportionment {
    pub fn grand_total(&self) -> Decimal {
        self.items.iter().map(|i| i.item_total).sum()
    }

    pub fn total_customs_value(&self) -> Decimal {
        self.items.iter().map(|i| i.customs_value).sum()
    }

    pub fn total_freight(&self) -> Decimal {
        self.items.iter().map(|i| i.freight).sum()
    }

    pub fn total_insurance(&self) -> Decimal {
        self.items.iter().map(|i| i.insurance).sum()
    }

    pub fn total_handling_fee(&self) -> Decimal {
        self.items.iter().map(|i| i.handling_fee).sum()
    }

    pub fn total_surcharge(&self) -> Decimal {
        self.items.iter().map(|i| i.surcharge).sum()
    }

    pub fn total_ii(&self) -> Decimal {
        self.items.iter().map(|i| i.ii).sum()
    }

    pub fn total_ipi(&self) -> Decimal {
        self.items.iter().map(|i| i.ipi).sum()
    }

    pub fn total_pis(&self) -> Decimal {
        self.items.iter().map(|i| i.pis).sum()
    }

    pub fn total_cofins(&self) -> Decimal {
        self.items.iter().map(|i| i.cofins).sum()
    }

    pub fn total_icms_base(&self) -> Decimal {
        self.items.iter().map(|i| i.icms_base).sum()
    }

    pub fn total_icms_gross(&self) -> Decimal {
        self.items.iter().map(|i| i.icms_gross).sum()
    }

    pub fn total_icms_deferred(&self) -> Decimal {
        self.items.iter().map(|i| i.icms_deferred).sum()
    }

    pub fn total_icms_payable(&self) -> Decimal {
        self.items.iter().map(|i| i.icms_payable).sum()
    }
}

/// Resolved positions of the semantic input columns
struct ResolvedColumns {
    quantity: usize,
    unit_value: usize,
    ii_rate: Option<usize>,
    ipi_rate: Option<usize>,
}

fn resolve_columns(table: &ItemTable, aliases: &ColumnAliases) -> Result<ResolvedColumns, EngineError> {
    let required = |field: &'static str, list: &[String]| {
        table.resolve_column(list).ok_or_else(|| EngineError::MissingColumn {
            field,
            tried: list.join(", "),
        })
    };

    Ok(ResolvedColumns {
        quantity: required("quantity", &aliases.quantity)?,
        unit_value: required("unit value", &aliases.unit_value)?,
        // Missing rate columns are not an error; rates default to 0
        ii_rate: table.resolve_column(&aliases.ii_rate),
        ipi_rate: table.resolve_column(&aliases.ipi_rate),
    })
}

/// Parse a numeric cell; empty cells fall back to zero
fn numeric_cell(table: &ItemTable, row: usize, col: usize) -> Result<Decimal, EngineError> {
    let raw = table.cell(row, col);
    match parse_decimal_cell(raw) {
        None => Ok(Decimal::ZERO),
        Some(Ok(value)) => Ok(value),
        Some(Err(())) => Err(EngineError::InvalidNumber {
            row: row + 1,
            column: table.headers[col].clone(),
            value: raw.to_string(),
        }),
    }
}

/// Run the full apportionment pipeline over an item table.
///
/// Returns `Ok(None)` when the exchange rate is not yet positive: the inputs
/// are not ready and there is nothing to compute, which is not an error.
/// All error conditions are detected before any row is produced; the result
/// is never a partially computed table.
pub fn apportion(
    table: &ItemTable,
    params: &ShipmentParameters,
    config: &EngineConfig,
) -> Result<Option<Apportionment>, EngineError> {
    if params.exchange_rate <= Decimal::ZERO {
        log::debug!(
            "exchange rate {} is not positive; inputs not ready",
            params.exchange_rate
        );
        return Ok(None);
    }

    let icms_rate = params.combined_icms_rate();
    if icms_rate >= dec!(100) {
        return Err(EngineError::InvalidRate { rate: icms_rate });
    }

    let columns = resolve_columns(table, &config.aliases)?;

    // Pass 1: per-item base values and the grand total they sum to
    let mut bases = Vec::with_capacity(table.rows.len());
    let mut grand_total = Decimal::ZERO;
    for row in 0..table.rows.len() {
        let quantity = numeric_cell(table, row, columns.quantity)?;
        let unit_value = numeric_cell(table, row, columns.unit_value)?;
        let unit_local = unit_value * params.exchange_rate;
        let item_total = quantity * unit_local;
        grand_total += item_total;
        bases.push((quantity, unit_value, unit_local, item_total));
    }

    if grand_total <= Decimal::ZERO {
        return Err(EngineError::ZeroBase { total: grand_total });
    }

    let pis_rate = params.effective_pis_rate();
    let cofins_rate = params.effective_cofins_rate();
    let icms_factor = Decimal::ONE - icms_rate / dec!(100);

    // Pass 2: shares, allocations, II/IPI and the customs value
    let mut items = Vec::with_capacity(bases.len());
    for (row, (quantity, unit_value, unit_local, item_total)) in bases.into_iter().enumerate() {
        let fraction = item_total / grand_total;

        let allocate = |component: CostComponent| fraction * component.total(params);
        let freight = allocate(CostComponent::Freight);
        let insurance = allocate(CostComponent::Insurance);
        let handling_fee = allocate(CostComponent::HandlingFee);
        let surcharge = allocate(CostComponent::Surcharge);

        let allocated = |component: &CostComponent| match component {
            CostComponent::Freight => freight,
            CostComponent::Insurance => insurance,
            CostComponent::HandlingFee => handling_fee,
            CostComponent::Surcharge => surcharge,
        };

        let customs_value = item_total
            + config
                .customs_components
                .iter()
                .map(allocated)
                .sum::<Decimal>();

        let ii_rate = match columns.ii_rate {
            Some(col) => numeric_cell(table, row, col)?,
            None => Decimal::ZERO,
        };
        let ipi_rate = match columns.ipi_rate {
            Some(col) => numeric_cell(table, row, col)?,
            None => Decimal::ZERO,
        };

        let ii = customs_value * ii_rate / dec!(100);
        // IPI cascades: its base is the customs value plus II
        let ipi = (customs_value + ii) * ipi_rate / dec!(100);

        log::debug!(
            "row {}: total={}, fraction={}, customs={}, II={}, IPI={}",
            row + 1,
            item_total,
            fraction,
            customs_value,
            ii,
            ipi
        );

        items.push(ComputedItem {
            row,
            quantity,
            unit_value,
            unit_local,
            item_total,
            fraction,
            freight,
            insurance,
            handling_fee,
            surcharge,
            customs_value,
            ii_rate,
            ipi_rate,
            ii,
            ipi,
            pis: Decimal::ZERO,
            cofins: Decimal::ZERO,
            icms_base: Decimal::ZERO,
            icms_gross: Decimal::ZERO,
            icms_deferred: Decimal::ZERO,
            icms_payable: Decimal::ZERO,
        });
    }

    // Pass 3: PIS/COFINS (whose base depends on scope) and the ICMS gross-up
    let total_customs: Decimal = items.iter().map(|i| i.customs_value).sum();
    let aggregate_pis = total_customs * pis_rate / dec!(100);
    let aggregate_cofins = total_customs * cofins_rate / dec!(100);

    for item in &mut items {
        match config.pis_cofins_scope {
            PisCofinsScope::PerItem => {
                item.pis = item.customs_value * pis_rate / dec!(100);
                item.cofins = item.customs_value * cofins_rate / dec!(100);
            }
            PisCofinsScope::Aggregate => {
                item.pis = item.fraction * aggregate_pis;
                item.cofins = item.fraction * aggregate_cofins;
            }
        }

        let icms_extra = config
            .icms_extra_components
            .iter()
            .map(|component| match component {
                CostComponent::Freight => item.freight,
                CostComponent::Insurance => item.insurance,
                CostComponent::HandlingFee => item.handling_fee,
                CostComponent::Surcharge => item.surcharge,
            })
            .sum::<Decimal>();

        // Cálculo por dentro: the rate applies to a base that already
        // contains the tax, so the tax-exclusive sum is divided by (1 - rate)
        let pre_icms =
            item.customs_value + item.ii + item.ipi + item.pis + item.cofins + icms_extra;
        item.icms_base = pre_icms / icms_factor;
        item.icms_gross = item.icms_base * icms_rate / dec!(100);

        if params.deferral_active {
            item.icms_deferred = item.icms_gross * params.deferral_pct / dec!(100);
        }
        item.icms_payable = item.icms_gross - item.icms_deferred;

        log::debug!(
            "row {}: ICMS base={}, gross={}, deferred={}, payable={}",
            item.row + 1,
            item.icms_base,
            item.icms_gross,
            item.icms_deferred,
            item.icms_payable
        );
    }

    Ok(Some(Apportionment { items }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::read_csv;
    use crate::tax::TaxRegime;

    const TOLERANCE: Decimal = dec!(0.000000001);

    fn table_from(csv_data: &str) -> ItemTable {
        read_csv(csv_data.as_bytes()).unwrap()
    }

    fn reference_params() -> ShipmentParameters {
        // Rates of the worked reference shipment: PIS 2.1 / COFINS 9.65
        // (lucro real), ICMS 18, no deferral
        ShipmentParameters {
            exchange_rate: Decimal::ONE,
            freight_total: dec!(200),
            insurance_total: dec!(50),
            regime: TaxRegime::Real,
            icms_rate: dec!(18),
            ..Default::default()
        }
    }

    fn run(table: &ItemTable, params: &ShipmentParameters) -> Apportionment {
        apportion(table, params, &EngineConfig::default())
            .unwrap()
            .expect("inputs ready")
    }

    fn assert_close(actual: Decimal, expected: Decimal) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {} ~= {}",
            actual,
            expected
        );
    }

    #[test]
    fn reference_single_item_shipment() {
        let table = table_from("PRODUTO,NCM,QTD,VLR_UNITARIO,ALIQ_II,ALIQ_IPI\nBomba,8413.70.10,10,100,14,5");
        let result = run(&table, &reference_params());

        assert_eq!(result.items.len(), 1);
        let item = &result.items[0];

        assert_eq!(item.item_total, dec!(1000));
        assert_eq!(item.fraction, Decimal::ONE);
        assert_eq!(item.freight, dec!(200));
        assert_eq!(item.insurance, dec!(50));
        assert_eq!(item.customs_value, dec!(1250));
        assert_eq!(item.ii, dec!(175.00));
        assert_eq!(item.ipi, dec!(71.25));
        assert_eq!(item.pis, dec!(26.25));
        assert_eq!(item.cofins, dec!(120.625));

        // 1643.125 / 0.82
        assert_eq!(item.icms_base.round_dp(4), dec!(2003.8110));
        assert_eq!(item.icms_gross.round_dp(2), dec!(360.69));
        assert_eq!(item.icms_deferred, Decimal::ZERO);
        assert_eq!(item.icms_payable, item.icms_gross);
    }

    #[test]
    fn fractions_sum_to_one() {
        let table = table_from("QTD,VALOR\n3,19.99\n7,0.07\n1,1234.5\n13,3.33");
        let result = run(&table, &reference_params());

        let sum: Decimal = result.items.iter().map(|i| i.fraction).sum();
        assert_close(sum, Decimal::ONE);
    }

    #[test]
    fn allocations_conserve_the_shared_totals() {
        let table = table_from("QTD,VALOR\n3,19.99\n7,0.07\n1,1234.5\n13,3.33");
        let params = ShipmentParameters {
            freight_total: dec!(812.44),
            insurance_total: dec!(97.10),
            handling_fee_total: dec!(154.23),
            surcharge_total: dec!(320.00),
            ..reference_params()
        };
        let result = run(&table, &params);

        assert_close(result.total_freight(), params.freight_total);
        assert_close(result.total_insurance(), params.insurance_total);
        assert_close(result.total_handling_fee(), params.handling_fee_total);
        assert_close(result.total_surcharge(), params.surcharge_total);
    }

    #[test]
    fn header_total_reproduces_per_item_customs_values() {
        let table = table_from("QTD,VALOR\n2,75.5\n9,12.25\n4,310");
        let params = reference_params();
        let result = run(&table, &params);

        // grand total + the fully-allocated customs components
        let expected = result.grand_total() + params.freight_total + params.insurance_total;
        assert_close(result.total_customs_value(), expected);
    }

    #[test]
    fn ipi_cascades_on_customs_plus_ii() {
        let table = table_from("QTD,VALOR,ALIQ_II,ALIQ_IPI\n5,40,16,10\n2,300,2,6.5");
        let result = run(&table, &reference_params());

        for item in &result.items {
            let expected = (item.customs_value + item.ii) * item.ipi_rate / dec!(100);
            assert_eq!(item.ipi, expected);
        }
    }

    #[test]
    fn gross_up_inverts_to_the_tax_exclusive_sum() {
        let table = table_from("QTD,VALOR,ALIQ_II,ALIQ_IPI\n5,40,16,10\n2,300,2,6.5");
        let params = ShipmentParameters {
            handling_fee_total: dec!(120),
            surcharge_total: dec!(85.5),
            ..reference_params()
        };
        let result = run(&table, &params);

        for item in &result.items {
            let pre_icms = item.customs_value
                + item.ii
                + item.ipi
                + item.pis
                + item.cofins
                + item.handling_fee
                + item.surcharge;
            let inverted = item.icms_base * (Decimal::ONE - dec!(18) / dec!(100));
            assert_close(inverted, pre_icms);
        }
    }

    #[test]
    fn deferral_splits_the_gross_amount() {
        let table = table_from("QTD,VALOR\n10,100");
        for pct in [dec!(0), dec!(33.33), dec!(50), dec!(100)] {
            let params = ShipmentParameters {
                deferral_active: true,
                deferral_pct: pct,
                ..reference_params()
            };
            let result = run(&table, &params);
            let item = &result.items[0];
            assert_eq!(item.icms_deferred + item.icms_payable, item.icms_gross);
            assert_eq!(item.icms_deferred, item.icms_gross * pct / dec!(100));
        }
    }

    #[test]
    fn deferral_pct_ignored_when_inactive() {
        let table = table_from("QTD,VALOR\n10,100");
        let params = ShipmentParameters {
            deferral_active: false,
            deferral_pct: dec!(60),
            ..reference_params()
        };
        let result = run(&table, &params);
        let item = &result.items[0];
        assert_eq!(item.icms_deferred, Decimal::ZERO);
        assert_eq!(item.icms_payable, item.icms_gross);
    }

    #[test]
    fn zero_base_is_rejected() {
        let table = table_from("QTD,VALOR\n10,0\n5,0");
        let err = apportion(&table, &reference_params(), &EngineConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::ZeroBase {
                total: Decimal::ZERO
            }
        );
    }

    #[test]
    fn missing_quantity_column_is_rejected() {
        let table = table_from("PRODUTO,VALOR\nParafuso,10");
        let err = apportion(&table, &reference_params(), &EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingColumn { field: "quantity", .. }
        ));
    }

    #[test]
    fn missing_value_column_is_rejected() {
        let table = table_from("PRODUTO,QTD\nParafuso,10");
        let err = apportion(&table, &reference_params(), &EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingColumn {
                field: "unit value",
                ..
            }
        ));
    }

    #[test]
    fn icms_rate_at_or_above_100_is_rejected() {
        let table = table_from("QTD,VALOR\n10,100");
        let params = ShipmentParameters {
            icms_rate: dec!(100),
            ..reference_params()
        };
        let err = apportion(&table, &params, &EngineConfig::default()).unwrap_err();
        assert_eq!(err, EngineError::InvalidRate { rate: dec!(100) });

        // FECP counts toward the combined rate
        let params = ShipmentParameters {
            icms_rate: dec!(98),
            fecp_rate: dec!(2),
            ..reference_params()
        };
        let err = apportion(&table, &params, &EngineConfig::default()).unwrap_err();
        assert_eq!(err, EngineError::InvalidRate { rate: dec!(100) });
    }

    #[test]
    fn non_positive_exchange_rate_short_circuits() {
        let table = table_from("QTD,VALOR\n10,100");
        let params = ShipmentParameters {
            exchange_rate: Decimal::ZERO,
            ..reference_params()
        };
        assert_eq!(apportion(&table, &params, &EngineConfig::default()), Ok(None));
    }

    #[test]
    fn exchange_rate_converts_unit_values() {
        let table = table_from("QTD,VLR_UNITARIO_MOEDA\n10,100");
        let params = ShipmentParameters {
            exchange_rate: dec!(5.25),
            ..reference_params()
        };
        let result = run(&table, &params);
        let item = &result.items[0];
        assert_eq!(item.unit_value, dec!(100));
        assert_eq!(item.unit_local, dec!(525));
        assert_eq!(item.item_total, dec!(5250));
    }

    #[test]
    fn missing_rate_columns_default_to_zero() {
        let table = table_from("QTD,VALOR\n10,100");
        let result = run(&table, &reference_params());
        let item = &result.items[0];
        assert_eq!(item.ii, Decimal::ZERO);
        assert_eq!(item.ipi, Decimal::ZERO);
        // PIS/COFINS still apply: they are regime rates, not columns
        assert!(item.pis > Decimal::ZERO);
    }

    #[test]
    fn unparseable_cell_is_rejected_with_location() {
        let table = table_from("QTD,VALOR\n10,abc");
        let err = apportion(&table, &reference_params(), &EngineConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidNumber {
                row: 1,
                column: "VALOR".to_string(),
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn alias_lists_accept_alternate_headers() {
        let table = table_from("DESCRICAO,QUANTIDADE,VALOR_UNITARIO\nMotor,4,250");
        let result = run(&table, &reference_params());
        assert_eq!(result.items[0].item_total, dec!(1000));
    }

    #[test]
    fn idempotent_across_runs() {
        let table = table_from("QTD,VALOR,ALIQ_II\n3,19.99,14\n7,0.07,2");
        let params = reference_params();
        let first = run(&table, &params);
        let second = run(&table, &params);
        assert_eq!(first, second);
    }

    #[test]
    fn aggregate_pis_cofins_matches_per_item_up_to_rounding() {
        let table = table_from("QTD,VALOR\n3,19.99\n7,0.07\n1,1234.5");
        let params = reference_params();

        let per_item = run(&table, &params);
        let aggregate = apportion(
            &table,
            &params,
            &EngineConfig {
                pis_cofins_scope: PisCofinsScope::Aggregate,
                ..EngineConfig::default()
            },
        )
        .unwrap()
        .unwrap();

        for (a, b) in per_item.items.iter().zip(&aggregate.items) {
            assert_close(a.pis, b.pis);
            assert_close(a.cofins, b.cofins);
        }
    }

    #[test]
    fn config_can_move_surcharge_out_of_the_gross_up() {
        let table = table_from("QTD,VALOR\n10,100");
        let params = ShipmentParameters {
            surcharge_total: dec!(500),
            ..reference_params()
        };

        let with_surcharge = run(&table, &params);
        let without = apportion(
            &table,
            &params,
            &EngineConfig {
                icms_extra_components: vec![CostComponent::HandlingFee],
                ..EngineConfig::default()
            },
        )
        .unwrap()
        .unwrap();

        // The surcharge is still allocated, it just feeds no tax base
        assert_eq!(without.items[0].surcharge, dec!(500));
        assert!(without.items[0].icms_base < with_surcharge.items[0].icms_base);
    }

    #[test]
    fn presumido_regime_lowers_pis_cofins() {
        let table = table_from("QTD,VALOR\n10,100");
        let params = ShipmentParameters {
            regime: TaxRegime::Presumido,
            ..reference_params()
        };
        let result = run(&table, &params);
        let item = &result.items[0];
        assert_eq!(item.pis, item.customs_value * dec!(0.65) / dec!(100));
        assert_eq!(item.cofins, item.customs_value * dec!(3.00) / dec!(100));
    }
}
