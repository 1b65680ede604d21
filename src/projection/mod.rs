//! Monthly return-on-investment projection over an amortization schedule

mod cashflows;
mod engine;
mod state;

pub use cashflows::{RoiResult, RoiRow, RoiSummary};
pub use engine::{RoiConfig, RoiProjection, RoiProjector, SALE_PROCEEDS_FACTOR};
pub use state::RoiState;
