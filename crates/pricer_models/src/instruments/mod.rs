//! Financial instrument definitions.
//!
//! - [`OptionContract`]: European call or put with strike, maturity, rate,
//!   dividend yield, volatility and the side it is held on

mod contract;

pub use contract::OptionContract;
