//! ROI output structures

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// One month of the ROI projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiRow {
    // Timing
    /// 1-indexed payment period
    pub period: u32,
    /// Whole years elapsed, starting at 0
    pub year: u32,
    /// Month within the year (1-12)
    pub month: u32,

    // Loan payment split
    pub principal: Money,
    pub interest: Money,

    // House costs and value
    pub appreciated_price: Money,
    pub monthly_property_tax: Money,
    pub monthly_insurance: Money,
    pub monthly_writeoff_gain: Money,

    // Net worth
    pub net_worth_gain: Money,
    pub appreciated_net_worth_gain: Money,
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiResult {
    /// Monthly ROI rows
    pub rows: Vec<RoiRow>,
    pub summary: RoiSummary,
}

/// Totals accumulated over a projection run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiSummary {
    pub total_months: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_insurance: Money,
    pub total_mortgage_paid: Money,
    pub total_writeoff_gain: Money,
    pub principal_remaining: Money,
    pub final_net_worth_gain: Money,
    pub final_appreciated_net_worth_gain: Money,
    /// Final net worth gain spread over the months projected
    pub average_monthly_net_worth_gain: Money,
}

impl RoiResult {
    pub fn final_row(&self) -> Option<&RoiRow> {
        self.rows.last()
    }
}
