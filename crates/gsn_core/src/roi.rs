//! Return-on-investment calculator for a machine upgrade.

use crate::error::{CoreError, CoreResult};
use crate::record::parse_amount;
use serde::{Deserialize, Serialize};

/// Project data entered for an ROI estimate.
///
/// Times are minutes per piece, production is pieces per month and costs
/// are euros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoiInput {
    /// Customer company.
    pub company_name: String,
    /// Part or process being evaluated.
    pub part_type: String,
    /// Current cycle time.
    pub current_cycle_time: f64,
    /// Pieces produced per month today.
    pub current_production: f64,
    /// Current cost per piece.
    pub current_part_cost: f64,
    /// Fixed monthly costs. Informational; not used by the formulas.
    pub fixed_costs: f64,
    /// Estimated investment.
    pub investment: f64,
    /// Cycle time with the new machine.
    pub new_cycle_time: f64,
    /// Monthly capacity with the new machine.
    pub new_capacity: f64,
    /// Cost per piece with the new machine.
    pub new_part_cost: f64,
}

impl Default for RoiInput {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            part_type: String::new(),
            current_cycle_time: 120.0,
            current_production: 8000.0,
            current_part_cost: 5.50,
            fixed_costs: 15000.0,
            investment: 250000.0,
            new_cycle_time: 90.0,
            new_capacity: 10667.0,
            new_part_cost: 4.80,
        }
    }
}

impl RoiInput {
    /// Sets one field by its wire name from user input.
    ///
    /// Numeric fields accept a comma as decimal separator; anything else
    /// unreadable becomes zero.
    pub fn set(&mut self, name: &str, value: &str) -> CoreResult<()> {
        let number = || parse_amount(value);
        match name {
            "companyName" => self.company_name = value.to_string(),
            "partType" => self.part_type = value.to_string(),
            "currentCycleTime" => self.current_cycle_time = number(),
            "currentProduction" => self.current_production = number(),
            "currentPartCost" => self.current_part_cost = number(),
            "fixedCosts" => self.fixed_costs = number(),
            "investment" => self.investment = number(),
            "newCycleTime" => self.new_cycle_time = number(),
            "newCapacity" => self.new_capacity = number(),
            "newPartCost" => self.new_part_cost = number(),
            _ => {
                return Err(CoreError::InvalidValue {
                    field: "roi input",
                    value: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Computes the indicators.
    pub fn evaluate(&self) -> RoiResults {
        let ratio = |base: f64, delta: f64| if base > 0.0 { delta / base } else { 0.0 };

        let monthly_operational_gain = (self.current_part_cost - self.new_part_cost) * self.new_capacity;
        RoiResults {
            cycle_time_reduction: ratio(
                self.current_cycle_time,
                self.current_cycle_time - self.new_cycle_time,
            ),
            capacity_gain: ratio(
                self.current_production,
                self.new_capacity - self.current_production,
            ),
            cost_reduction: ratio(
                self.current_part_cost,
                self.current_part_cost - self.new_part_cost,
            ),
            monthly_operational_gain,
            payback_months: if monthly_operational_gain > 0.0 {
                self.investment / monthly_operational_gain
            } else {
                f64::INFINITY
            },
            roi_12_months: if self.investment > 0.0 {
                (monthly_operational_gain * 12.0 - self.investment) / self.investment
            } else {
                f64::INFINITY
            },
            accumulated_gain_3_years: monthly_operational_gain * 36.0 - self.investment,
        }
    }
}

/// Indicators derived from an [`RoiInput`].
///
/// Ratios are fractions (0.25 is 25 %). Payback and ROI are infinite when
/// the gain or the investment is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResults {
    /// Relative cycle time reduction.
    pub cycle_time_reduction: f64,
    /// Relative capacity gain.
    pub capacity_gain: f64,
    /// Relative unit cost reduction.
    pub cost_reduction: f64,
    /// Monthly saving at the new capacity.
    pub monthly_operational_gain: f64,
    /// Months until the investment is recovered.
    pub payback_months: f64,
    /// Return over the first year.
    #[serde(rename = "roi12Months")]
    pub roi_12_months: f64,
    /// Net gain after three years.
    #[serde(rename = "accumulatedGain3Years")]
    pub accumulated_gain_3_years: f64,
}

impl RoiResults {
    /// Payback rendered as `N.N months`, or `N/A months`.
    pub fn payback_label(&self) -> String {
        if self.payback_months.is_finite() {
            format!("{:.1} months", self.payback_months)
        } else {
            "N/A months".to_string()
        }
    }

    /// First-year ROI rendered as a percentage, or `N/A%`.
    pub fn roi_label(&self) -> String {
        if self.roi_12_months.is_finite() {
            format!("{:.1}%", self.roi_12_months * 100.0)
        } else {
            "N/A%".to_string()
        }
    }
}
