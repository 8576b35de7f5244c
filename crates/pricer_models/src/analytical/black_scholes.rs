//! Black-Scholes-Merton pricing for European options.
//!
//! Closed-form prices and Greeks under lognormal dynamics with a continuous
//! dividend (cost-of-carry) yield `q`.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Time conventions
//!
//! `theta`, `charm` and `veta` are derivatives with respect to calendar
//! time t (T shrinks as t grows), so long options have negative theta.
//!
//! ## Expiry
//!
//! At T ≤ 0 every quantity takes its exact boundary value: the price is
//! intrinsic, delta is the step function with 0.5 at the money, and every
//! other Greek is zero. For 0 < T < [`MIN_EXPIRY`] the formulas run with T
//! floored to [`MIN_EXPIRY`].

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::types::{OptionType, PricingError};

/// Smallest strictly positive time to expiry fed into the closed form.
pub const MIN_EXPIRY: f64 = 1e-12;

/// Full set of sensitivities for one option.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(50.0, 50.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let g = bs.greeks(OptionType::Call);
/// assert!((g.delta - bs.delta(OptionType::Call)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
    /// ∂²V/∂S∂σ
    pub vanna: f64,
    /// ∂²V/∂σ²
    pub volga: f64,
    /// ∂Δ/∂t
    pub charm: f64,
    /// ∂vega/∂t
    pub veta: f64,
}

/// Black-Scholes-Merton engine for one (S, K, T, r, q, σ) point.
///
/// Construction validates the inputs; every pricing method afterwards is
/// pure and infallible.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).unwrap();
/// let call_price = bs.price(OptionType::Call);
/// let put_price = bs.price(OptionType::Put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
}

/// Intermediate terms shared by the closed-form expressions.
#[derive(Debug, Clone, Copy)]
struct Terms {
    expiry: f64,
    sqrt_t: f64,
    d1: f64,
    d2: f64,
    pdf_d1: f64,
    /// e^(-qT)
    carry: f64,
    /// e^(-rT)
    discount: f64,
}

impl BlackScholes {
    /// Creates a new engine.
    ///
    /// # Arguments
    /// * `spot` - Underlying price S (must be positive)
    /// * `strike` - Strike K (must be positive)
    /// * `expiry` - Time to expiry T in years (may be zero or negative)
    /// * `rate` - Continuously compounded risk-free rate r
    /// * `dividend_yield` - Continuous dividend yield q
    /// * `volatility` - Volatility σ (must be positive)
    ///
    /// # Errors
    /// `PricingError::Domain` when S, K or σ is not positive, or any input
    /// is not finite.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0, 100.0, 1.0, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        let inputs = [
            ("spot", spot),
            ("strike", strike),
            ("expiry", expiry),
            ("rate", rate),
            ("dividend_yield", dividend_yield),
            ("volatility", volatility),
        ];
        if let Some((name, value)) = inputs.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PricingError::domain(format!("{} must be finite, got {}", name, value)));
        }
        if spot <= 0.0 {
            return Err(PricingError::domain(format!("spot must be positive, got {}", spot)));
        }
        if strike <= 0.0 {
            return Err(PricingError::domain(format!("strike must be positive, got {}", strike)));
        }
        if volatility <= 0.0 {
            return Err(PricingError::domain(format!(
                "volatility must be positive, got {}",
                volatility
            )));
        }

        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Parses `option_type` and prices in one call.
    ///
    /// # Errors
    /// - `PricingError::InvalidOptionType` for an unknown tag
    /// - `PricingError::Domain` for invalid numeric inputs
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let price = BlackScholes::price_tagged("CALL", 50.0, 50.0, 1.0, 0.05, 0.0, 0.2).unwrap();
    /// assert!((price - 6.04).abs() < 0.01);
    ///
    /// let err = BlackScholes::price_tagged("BINARY", 50.0, 50.0, 1.0, 0.05, 0.0, 0.2);
    /// assert!(matches!(err, Err(PricingError::InvalidOptionType(_))));
    /// ```
    pub fn price_tagged(
        option_type: &str,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<f64, PricingError> {
        let option_type: OptionType = option_type.parse()?;
        let bs = Self::new(spot, strike, expiry, rate, dividend_yield, volatility)?;
        Ok(bs.price(option_type))
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry as given.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// True when T ≤ 0 and boundary values apply.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.expiry <= 0.0
    }

    /// Copy of this engine with a different spot.
    ///
    /// # Errors
    /// `PricingError::Domain` if `spot` is not positive and finite.
    pub fn with_spot(&self, spot: f64) -> Result<Self, PricingError> {
        Self::new(
            spot,
            self.strike,
            self.expiry,
            self.rate,
            self.dividend_yield,
            self.volatility,
        )
    }

    /// Copy of this engine with a different volatility.
    ///
    /// # Errors
    /// `PricingError::Domain` if `volatility` is not positive and finite.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, PricingError> {
        Self::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.dividend_yield,
            volatility,
        )
    }

    /// d₁, or `None` at exact expiry where it is undefined.
    pub fn d1(&self) -> Option<f64> {
        self.terms().map(|t| t.d1)
    }

    /// d₂ = d₁ - σ√T, or `None` at exact expiry.
    pub fn d2(&self) -> Option<f64> {
        self.terms().map(|t| t.d2)
    }

    fn terms(&self) -> Option<Terms> {
        if self.is_expired() {
            return None;
        }
        let expiry = self.expiry.max(MIN_EXPIRY);
        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = self.volatility * sqrt_t;
        let drift = (self.rate - self.dividend_yield + 0.5 * self.volatility * self.volatility) * expiry;
        let d1 = ((self.spot / self.strike).ln() + drift) / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        Some(Terms {
            expiry,
            sqrt_t,
            d1,
            d2,
            pdf_d1: norm_pdf(d1),
            carry: (-self.dividend_yield * expiry).exp(),
            discount: (-self.rate * expiry).exp(),
        })
    }

    /// Option price.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionType;
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let expired = BlackScholes::new(60.0, 50.0, 0.0, 0.05, 0.0, 0.2).unwrap();
    /// assert_eq!(expired.price(OptionType::Call), 10.0);
    /// assert_eq!(expired.price(OptionType::Put), 0.0);
    /// ```
    pub fn price(&self, option_type: OptionType) -> f64 {
        let Some(t) = self.terms() else {
            return option_type.intrinsic(self.spot, self.strike);
        };
        match option_type {
            OptionType::Call => {
                self.spot * t.carry * norm_cdf(t.d1) - self.strike * t.discount * norm_cdf(t.d2)
            }
            OptionType::Put => {
                self.strike * t.discount * norm_cdf(-t.d2) - self.spot * t.carry * norm_cdf(-t.d1)
            }
        }
    }

    /// Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = -e^(-qT)·N(-d₁)
    ///
    /// At expiry: call 1 / 0.5 / 0 for S > K / S = K / S < K, put
    /// -1 / -0.5 / 0 for S < K / S = K / S > K.
    pub fn delta(&self, option_type: OptionType) -> f64 {
        let Some(t) = self.terms() else {
            return self.expiry_delta(option_type);
        };
        match option_type {
            OptionType::Call => t.carry * norm_cdf(t.d1),
            OptionType::Put => -t.carry * norm_cdf(-t.d1),
        }
    }

    fn expiry_delta(&self, option_type: OptionType) -> f64 {
        let (s, k) = (self.spot, self.strike);
        match option_type {
            OptionType::Call if s > k => 1.0,
            OptionType::Call if s < k => 0.0,
            OptionType::Call => 0.5,
            OptionType::Put if s < k => -1.0,
            OptionType::Put if s > k => 0.0,
            OptionType::Put => -0.5,
        }
    }

    /// Gamma (∂²V/∂S²) = e^(-qT)·φ(d₁) / (S·σ·√T), identical for calls and puts.
    pub fn gamma(&self, _option_type: OptionType) -> f64 {
        self.terms().map_or(0.0, |t| {
            t.carry * t.pdf_d1 / (self.spot * self.volatility * t.sqrt_t)
        })
    }

    /// Vega (∂V/∂σ) = S·e^(-qT)·φ(d₁)·√T, identical for calls and puts.
    pub fn vega(&self, _option_type: OptionType) -> f64 {
        self.terms()
            .map_or(0.0, |t| self.spot * t.carry * t.pdf_d1 * t.sqrt_t)
    }

    /// Theta (∂V/∂t), per year of calendar time.
    ///
    /// - Call: -S·e^(-qT)·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put: -S·e^(-qT)·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    pub fn theta(&self, option_type: OptionType) -> f64 {
        let Some(t) = self.terms() else {
            return 0.0;
        };
        let decay = -self.spot * t.carry * t.pdf_d1 * self.volatility / (2.0 * t.sqrt_t);
        match option_type {
            OptionType::Call => {
                decay - self.rate * self.strike * t.discount * norm_cdf(t.d2)
                    + self.dividend_yield * self.spot * t.carry * norm_cdf(t.d1)
            }
            OptionType::Put => {
                decay + self.rate * self.strike * t.discount * norm_cdf(-t.d2)
                    - self.dividend_yield * self.spot * t.carry * norm_cdf(-t.d1)
            }
        }
    }

    /// Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    pub fn rho(&self, option_type: OptionType) -> f64 {
        let Some(t) = self.terms() else {
            return 0.0;
        };
        match option_type {
            OptionType::Call => self.strike * t.expiry * t.discount * norm_cdf(t.d2),
            OptionType::Put => -self.strike * t.expiry * t.discount * norm_cdf(-t.d2),
        }
    }

    /// Vanna (∂²V/∂S∂σ) = -e^(-qT)·φ(d₁)·d₂/σ.
    pub fn vanna(&self, _option_type: OptionType) -> f64 {
        self.terms()
            .map_or(0.0, |t| -t.carry * t.pdf_d1 * t.d2 / self.volatility)
    }

    /// Volga (∂²V/∂σ²) = vega·d₁·d₂/σ.
    pub fn volga(&self, option_type: OptionType) -> f64 {
        self.terms().map_or(0.0, |t| {
            self.vega(option_type) * t.d1 * t.d2 / self.volatility
        })
    }

    /// Charm (∂Δ/∂t).
    ///
    /// With c = e^(-qT)·φ(d₁)·(2(r-q)T - d₂σ√T) / (2Tσ√T):
    /// - Call: q·e^(-qT)·N(d₁) - c
    /// - Put: -q·e^(-qT)·N(-d₁) - c
    pub fn charm(&self, option_type: OptionType) -> f64 {
        let Some(t) = self.terms() else {
            return 0.0;
        };
        let vol_sqrt_t = self.volatility * t.sqrt_t;
        let common = t.carry * t.pdf_d1
            * (2.0 * (self.rate - self.dividend_yield) * t.expiry - t.d2 * vol_sqrt_t)
            / (2.0 * t.expiry * vol_sqrt_t);
        match option_type {
            OptionType::Call => self.dividend_yield * t.carry * norm_cdf(t.d1) - common,
            OptionType::Put => -self.dividend_yield * t.carry * norm_cdf(-t.d1) - common,
        }
    }

    /// Veta (∂vega/∂t) = S·e^(-qT)·φ(d₁)·√T·(q + (r-q)d₁/(σ√T) - (1 + d₁d₂)/(2T)).
    pub fn veta(&self, _option_type: OptionType) -> f64 {
        let Some(t) = self.terms() else {
            return 0.0;
        };
        let vol_sqrt_t = self.volatility * t.sqrt_t;
        self.spot
            * t.carry
            * t.pdf_d1
            * t.sqrt_t
            * (self.dividend_yield + (self.rate - self.dividend_yield) * t.d1 / vol_sqrt_t
                - (1.0 + t.d1 * t.d2) / (2.0 * t.expiry))
    }

    /// Every Greek in one pass.
    pub fn greeks(&self, option_type: OptionType) -> Greeks {
        Greeks {
            delta: self.delta(option_type),
            gamma: self.gamma(option_type),
            vega: self.vega(option_type),
            theta: self.theta(option_type),
            rho: self.rho(option_type),
            vanna: self.vanna(option_type),
            volga: self.volga(option_type),
            charm: self.charm(option_type),
            veta: self.veta(option_type),
        }
    }
}
