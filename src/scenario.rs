//! Scenario runner for batch ROI projections
//!
//! Pairs a mortgage factory with one ROI configuration, then projects many
//! financing choices (typically a downpayment sweep for one house) in parallel.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::money::Money;
use crate::mortgage::{Financing, MortgageFactory, NoPrepayment, PrepaymentStrategy};
use crate::projection::{RoiConfig, RoiProjector, RoiSummary};

/// Headline figures for one financing scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub house_price: Money,
    pub downpayment: Money,
    pub principal: Money,
    pub monthly_payment: Money,
    pub total_payout: Money,
    pub summary: RoiSummary,
}

/// Batch projector sharing one factory and ROI configuration
#[derive(Debug, Clone)]
pub struct ScenarioRunner<P = NoPrepayment> {
    factory: MortgageFactory<P>,
    config: RoiConfig,
}

impl<P> ScenarioRunner<P>
where
    P: PrepaymentStrategy + Clone + Send + Sync,
{
    pub fn new(factory: MortgageFactory<P>, config: RoiConfig) -> Self {
        Self { factory, config }
    }

    pub fn factory(&self) -> &MortgageFactory<P> {
        &self.factory
    }

    pub fn config(&self) -> &RoiConfig {
        &self.config
    }

    /// Build and project a single financing scenario
    pub fn run(&self, financing: &Financing) -> Result<ScenarioOutcome> {
        let mortgage = self.factory.mortgage(financing)?;
        let projector = RoiProjector::new(&mortgage, &self.config)?;
        let result = projector.project()?;

        Ok(ScenarioOutcome {
            house_price: mortgage.house_price(),
            downpayment: mortgage.downpayment(),
            principal: mortgage.principal(),
            monthly_payment: mortgage.monthly_payment(),
            total_payout: mortgage.total_payout(),
            summary: result.summary,
        })
    }

    /// Project every financing in parallel, keeping input order
    pub fn run_batch(&self, financings: &[Financing]) -> Vec<Result<ScenarioOutcome>> {
        info!("running {} financing scenarios", financings.len());
        financings.par_iter().map(|f| self.run(f)).collect()
    }

    /// Project one house price across several downpayments; fails on the first error
    pub fn downpayment_sweep(
        &self,
        house_price: Money,
        downpayments: &[Money],
    ) -> Result<Vec<ScenarioOutcome>> {
        let financings: Vec<Financing> = downpayments
            .iter()
            .map(|&dp| Financing::with_downpayment(house_price, dp))
            .collect();
        self.run_batch(&financings).into_iter().collect()
    }
}
