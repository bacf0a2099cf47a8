//! ROI command implementation.

use super::OutputFormat;
use crate::error::CliResult;
use clap::Args;
use gsn_core::{RoiInput, RoiResults};
use serde::Serialize;

/// Calculator inputs; anything omitted keeps the form default.
#[derive(Debug, Clone, Default, Args)]
pub struct RoiArgs {
    /// Company name
    #[arg(long)]
    pub company_name: Option<String>,
    /// Part type
    #[arg(long)]
    pub part_type: Option<String>,
    /// Current cycle time (min)
    #[arg(long)]
    pub current_cycle_time: Option<String>,
    /// Current production (pcs/month)
    #[arg(long)]
    pub current_production: Option<String>,
    /// Current cost per piece (€)
    #[arg(long)]
    pub current_part_cost: Option<String>,
    /// Monthly fixed costs (€)
    #[arg(long)]
    pub fixed_costs: Option<String>,
    /// Estimated investment (€)
    #[arg(long)]
    pub investment: Option<String>,
    /// New cycle time (min)
    #[arg(long)]
    pub new_cycle_time: Option<String>,
    /// New capacity (pcs/month)
    #[arg(long)]
    pub new_capacity: Option<String>,
    /// New cost per piece (€)
    #[arg(long)]
    pub new_part_cost: Option<String>,
}

impl RoiArgs {
    fn to_input(&self) -> CliResult<RoiInput> {
        let mut input = RoiInput::default();
        let fields = [
            ("companyName", &self.company_name),
            ("partType", &self.part_type),
            ("currentCycleTime", &self.current_cycle_time),
            ("currentProduction", &self.current_production),
            ("currentPartCost", &self.current_part_cost),
            ("fixedCosts", &self.fixed_costs),
            ("investment", &self.investment),
            ("newCycleTime", &self.new_cycle_time),
            ("newCapacity", &self.new_capacity),
            ("newPartCost", &self.new_part_cost),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                input.set(name, value)?;
            }
        }
        Ok(input)
    }
}

#[derive(Serialize)]
struct RoiReport<'a> {
    input: &'a RoiInput,
    results: RoiResults,
}

/// Runs the ROI calculator.
pub fn run(args: &RoiArgs, format: OutputFormat) -> CliResult<String> {
    let input = args.to_input()?;
    let results = input.evaluate();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&RoiReport {
            input: &input,
            results,
        })?),
        OutputFormat::Text => {
            let percent = |ratio: f64| format!("{:.1}%", ratio * 100.0);
            Ok([
                format!("Payback Period: {}", results.payback_label()),
                format!("12-Month ROI: {}", results.roi_label()),
                format!(
                    "Monthly Operational Gain: €{}",
                    format_de(results.monthly_operational_gain)
                ),
                format!(
                    "3-Year Accumulated Gain: €{}",
                    format_de(results.accumulated_gain_3_years)
                ),
                format!("Cycle Time Reduction: {}", percent(results.cycle_time_reduction)),
                format!("Capacity Gain: {}", percent(results.capacity_gain)),
                format!("Unit Cost Reduction: {}", percent(results.cost_reduction)),
            ]
            .join("\n"))
        }
    }
}

/// Two decimals, `.` thousands separator and `,` decimal mark.
fn format_de(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, digit) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped},{frac}")
}
