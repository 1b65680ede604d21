//! ROI projection over a mortgage's amortization schedule

use std::fs::File;
use std::path::Path;

use log::{info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::cashflows::{RoiResult, RoiRow, RoiSummary};
use super::state::RoiState;
use crate::error::{MortgageError, Result};
use crate::money::{decimal_from_f64, Money};
use crate::mortgage::{
    AmortizationRow, AmortizationSchedule, Mortgage, PrepaymentStrategy, MONTHS_IN_YEAR,
};

/// Share of the sale price kept after selling costs
pub const SALE_PROCEEDS_FACTOR: Decimal = dec!(0.93);

/// Configuration for an ROI projection
///
/// Unset prices fall back to values taken from the mortgage: the sell price
/// defaults to the house price and the baseline return to the downpayment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    pub target_sell_price: Option<Money>,

    /// Annual multiplicative house price growth (1.0 = flat)
    pub appreciation: f64,

    /// Net worth the purchase must at least return
    pub baseline_return: Option<Money>,

    /// Additional capital on top of the baseline return
    pub investments: Money,

    /// Annual property tax as a fraction of the house price
    pub property_tax: f64,

    /// Annual insurance premium
    pub property_insurance: Money,

    /// Marginal rate at which interest and property tax are deducted
    pub tax_rate: f64,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            target_sell_price: None,
            appreciation: 1.0,
            baseline_return: None,
            investments: Decimal::ZERO,
            property_tax: 0.0,
            property_insurance: Decimal::ZERO,
            tax_rate: 0.4,
        }
    }
}

impl RoiConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Projects monthly ROI figures for one mortgage
#[derive(Debug, Clone)]
pub struct RoiProjector<'a, P> {
    mortgage: &'a Mortgage<P>,
    appreciation: f64,
    target_sell_price: Money,
    /// Baseline return plus investments
    target_net_worth: Money,
    tax_rate: Decimal,
    monthly_property_tax: Money,
    monthly_insurance: Money,
}

impl<'a, P: PrepaymentStrategy> RoiProjector<'a, P> {
    /// Resolve the configuration against the mortgage
    pub fn new(mortgage: &'a Mortgage<P>, config: &RoiConfig) -> Result<Self> {
        if !config.appreciation.is_finite() || config.appreciation == 0.0 {
            return Err(MortgageError::invalid(
                "appreciation",
                format!("must be finite and non-zero, got {}", config.appreciation),
            ));
        }
        if config.appreciation < 1.0 {
            warn!("appreciation factor {} projects a falling house price", config.appreciation);
        }

        let months = Decimal::from(MONTHS_IN_YEAR);
        let house_price = mortgage.house_price();
        let baseline_return = config.baseline_return.unwrap_or_else(|| mortgage.downpayment());
        let property_tax = decimal_from_f64(config.property_tax, "property tax")?;

        Ok(Self {
            mortgage,
            appreciation: config.appreciation,
            target_sell_price: config.target_sell_price.unwrap_or(house_price),
            target_net_worth: baseline_return + config.investments,
            tax_rate: decimal_from_f64(config.tax_rate, "tax rate")?,
            monthly_property_tax: house_price * property_tax / months,
            monthly_insurance: config.property_insurance / months,
        })
    }

    pub fn mortgage(&self) -> &Mortgage<P> {
        self.mortgage
    }

    pub fn target_sell_price(&self) -> Money {
        self.target_sell_price
    }

    pub fn target_net_worth(&self) -> Money {
        self.target_net_worth
    }

    pub fn monthly_property_tax(&self) -> Money {
        self.monthly_property_tax
    }

    pub fn monthly_insurance(&self) -> Money {
        self.monthly_insurance
    }

    /// Lazy, single-pass ROI rows, one per amortization row
    pub fn project_monthly(&self) -> RoiProjection<'_, 'a, P> {
        RoiProjection {
            projector: self,
            schedule: self.mortgage.amortization_schedule(),
            state: RoiState::new(self.mortgage.principal()),
        }
    }

    /// Run the whole projection, collecting rows and totals
    pub fn project(&self) -> Result<RoiResult> {
        info!(
            "projecting ROI for principal {} over {} months",
            self.mortgage.principal(),
            self.mortgage.loan_months()
        );
        let mut projection = self.project_monthly();
        let rows = projection.by_ref().collect::<Result<Vec<_>>>()?;
        let summary = projection.summary()?;
        info!(
            "projection finished after {} months, net worth gain {}",
            summary.total_months, summary.final_net_worth_gain
        );
        Ok(RoiResult { rows, summary })
    }

    /// House value after `year` whole years plus `month` months of linear growth
    ///
    /// The intra-year term scales by `appreciation^(year - 1)`, so during the
    /// first year it uses an exponent of -1.
    pub fn appreciated_price(&self, year: u32, month: u32) -> Result<Money> {
        let year = year as i32;
        let growth = self.appreciation.powi(year);
        let delta = f64::from(month) * self.appreciation.powi(year - 1) * (self.appreciation - 1.0)
            / f64::from(MONTHS_IN_YEAR);

        let house_price = self.mortgage.house_price();
        let grown = house_price.checked_mul(decimal_from_f64(growth, "appreciation growth")?);
        let partial = house_price.checked_mul(decimal_from_f64(delta, "appreciation delta")?);
        grown
            .zip(partial)
            .and_then(|(grown, partial)| grown.checked_add(partial))
            .ok_or_else(|| out_of_range("appreciated price"))
    }

    /// Sale proceeds after selling costs, less the remaining loan and the
    /// target net worth, plus accumulated tax benefit
    fn net_worth_gain(&self, sell_price: Money, state: &RoiState) -> Result<Money> {
        sell_price
            .checked_mul(SALE_PROCEEDS_FACTOR)
            .and_then(|proceeds| proceeds.checked_sub(state.principal_remaining))
            .and_then(|gain| gain.checked_sub(self.target_net_worth))
            .and_then(|gain| gain.checked_add(state.writeoff_gain))
            .ok_or_else(|| out_of_range("net worth gain"))
    }
}

fn out_of_range(context: &str) -> MortgageError {
    MortgageError::OutOfRange {
        context: context.to_string(),
    }
}

/// Iterator produced by [`RoiProjector::project_monthly`]
#[derive(Debug)]
pub struct RoiProjection<'p, 'a, P> {
    projector: &'p RoiProjector<'a, P>,
    schedule: AmortizationSchedule<'a, P>,
    state: RoiState,
}

impl<P: PrepaymentStrategy> RoiProjection<'_, '_, P> {
    /// Accumulators after the rows produced so far
    pub fn state(&self) -> &RoiState {
        &self.state
    }

    /// Totals after the rows produced so far
    pub fn summary(&self) -> Result<RoiSummary> {
        let state = &self.state;
        let projector = self.projector;
        let total_months = state.periods;
        let final_net_worth_gain = projector.net_worth_gain(projector.target_sell_price, state)?;
        let final_appreciated_net_worth_gain = if total_months == 0 {
            final_net_worth_gain
        } else {
            let price = projector.appreciated_price(state.year, state.month)?;
            projector.net_worth_gain(price, state)?
        };
        let average_monthly_net_worth_gain = if total_months == 0 {
            Decimal::ZERO
        } else {
            final_net_worth_gain / Decimal::from(total_months)
        };

        Ok(RoiSummary {
            total_months,
            total_principal: state.principal_paid,
            total_interest: state.interest_paid,
            total_insurance: state.insurance_paid,
            total_mortgage_paid: state.mortgage_paid,
            total_writeoff_gain: state.writeoff_gain,
            principal_remaining: state.principal_remaining,
            final_net_worth_gain,
            final_appreciated_net_worth_gain,
            average_monthly_net_worth_gain,
        })
    }

    fn project_row(&mut self, payment: Result<AmortizationRow>) -> Result<RoiRow> {
        let payment = payment?;
        let projector = self.projector;

        let writeoff = (payment.interest + projector.monthly_property_tax) * projector.tax_rate;
        self.state.advance(&payment, projector.monthly_insurance, writeoff);

        let state = &self.state;
        let appreciated_price = projector.appreciated_price(state.year, state.month)?;

        Ok(RoiRow {
            period: payment.period,
            year: state.year,
            month: state.month,
            principal: payment.principal,
            interest: payment.interest,
            appreciated_price,
            monthly_property_tax: projector.monthly_property_tax,
            monthly_insurance: projector.monthly_insurance,
            monthly_writeoff_gain: writeoff,
            net_worth_gain: projector.net_worth_gain(projector.target_sell_price, state)?,
            appreciated_net_worth_gain: projector.net_worth_gain(appreciated_price, state)?,
        })
    }
}

impl<P: PrepaymentStrategy> Iterator for RoiProjection<'_, '_, P> {
    type Item = Result<RoiRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let payment = self.schedule.next()?;
        Some(self.project_row(payment))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.schedule.size_hint()
    }
}
