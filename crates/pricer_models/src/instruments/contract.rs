//! Vanilla option contract.

use pricer_core::types::{OptionType, PricingError, Side};

use crate::analytical::BlackScholes;

/// European option contract held on one side.
///
/// Immutable once constructed; every field is validated by
/// [`OptionContract::new`].
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionType, Side};
/// use pricer_models::instruments::OptionContract;
///
/// let call = OptionContract::new(OptionType::Call, Side::Long, 50.0, 2.0, 0.05, 0.125).unwrap();
/// assert_eq!(call.strike(), 50.0);
/// assert_eq!(call.dividend_yield(), 0.0);
///
/// assert!(OptionContract::new(OptionType::Put, Side::Short, -1.0, 2.0, 0.05, 0.125).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    option_type: OptionType,
    side: Side,
    strike: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
}

impl OptionContract {
    /// Creates a contract with zero dividend yield.
    ///
    /// # Arguments
    /// * `strike` - Strike K (must be positive)
    /// * `maturity` - Maturity T in years (must be positive)
    /// * `rate` - Risk-free rate r
    /// * `volatility` - Volatility σ (must be positive)
    ///
    /// # Errors
    /// `PricingError::Domain` if a constraint above fails or any value is
    /// not finite.
    pub fn new(
        option_type: OptionType,
        side: Side,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        let contract = Self {
            option_type,
            side,
            strike,
            maturity,
            rate,
            dividend_yield: 0.0,
            volatility,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Parses string tags, then validates like [`OptionContract::new`].
    ///
    /// # Errors
    /// `PricingError::InvalidOptionType` / `PricingError::InvalidSide` for
    /// unknown tags, `PricingError::Domain` for invalid numbers.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    /// use pricer_models::instruments::OptionContract;
    ///
    /// assert!(OptionContract::from_tags("CALL", "LONG", 50.0, 1.0, 0.05, 0.2).is_ok());
    /// assert!(matches!(
    ///     OptionContract::from_tags("CALL", "SIDEWAYS", 50.0, 1.0, 0.05, 0.2),
    ///     Err(PricingError::InvalidSide(_))
    /// ));
    /// ```
    pub fn from_tags(
        option_type: &str,
        side: &str,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        Self::new(
            option_type.parse()?,
            side.parse()?,
            strike,
            maturity,
            rate,
            volatility,
        )
    }

    /// Returns a copy with continuous dividend yield `q`.
    ///
    /// # Errors
    /// `PricingError::Domain` if `q` is not finite.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Result<Self, PricingError> {
        self.dividend_yield = dividend_yield;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy held on `side`.
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    fn validate(&self) -> Result<(), PricingError> {
        let fields = [
            ("strike", self.strike),
            ("maturity", self.maturity),
            ("rate", self.rate),
            ("dividend_yield", self.dividend_yield),
            ("volatility", self.volatility),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PricingError::domain(format!("{} must be finite, got {}", name, value)));
        }
        for (name, value) in [
            ("strike", self.strike),
            ("maturity", self.maturity),
            ("volatility", self.volatility),
        ] {
            if value <= 0.0 {
                return Err(PricingError::domain(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Long or short.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Maturity T in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Dividend yield q.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Payoff at expiry for one unit, unsigned.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }

    /// Black-Scholes engine for this contract at `spot` with `time_to_expiry` left.
    ///
    /// # Errors
    /// `PricingError::Domain` if `spot` is not positive and finite, or
    /// `time_to_expiry` is not finite.
    pub fn engine(&self, spot: f64, time_to_expiry: f64) -> Result<BlackScholes, PricingError> {
        BlackScholes::new(
            spot,
            self.strike,
            time_to_expiry,
            self.rate,
            self.dividend_yield,
            self.volatility,
        )
    }
}
