//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

use proptest::prelude::*;

/// Test that distribution functions are accessible via absolute path.
#[test]
fn test_distributions_module_exports() {
    use pricer_core::math::distributions::norm_cdf;
    use pricer_core::math::distributions::norm_pdf;

    let _ = norm_cdf(0.3);
    let _ = norm_pdf(0.3);
}

/// Test that solver types are accessible via absolute path.
#[test]
fn test_solvers_module_exports() {
    use pricer_core::math::solvers::NewtonRaphsonSolver;
    use pricer_core::math::solvers::SolverConfig;

    let config: SolverConfig<f64> = SolverConfig::default();
    let solver = NewtonRaphsonSolver::new(config);
    assert_eq!(solver.config().max_iterations, 100);
}

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::PricingError;
    use pricer_core::types::error::SolverError;
    use pricer_core::types::option::OptionType;
    use pricer_core::types::option::Side;

    let err: PricingError = SolverError::MaxIterationsExceeded {
        iterations: 3,
        last: 0.1,
    }
    .into();
    assert!(matches!(err, PricingError::NonConvergence { .. }));
    assert_eq!(OptionType::Put.to_string(), "PUT");
    assert_eq!(Side::Long.to_string(), "LONG");
}

/// Test the re-exports at the `types` level.
#[test]
fn test_types_reexports() {
    use pricer_core::types::{OptionType, PricingError, Side, SolverError};

    let _ = OptionType::Call;
    let _ = Side::Short;
    let _ = PricingError::domain("x");
    let _ = SolverError::NonFinite { x: 0.0 };
}

proptest! {
    #[test]
    fn prop_norm_cdf_in_unit_interval(x in -40.0_f64..40.0) {
        let p = pricer_core::math::distributions::norm_cdf(x);
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn prop_norm_cdf_complement(x in -8.0_f64..8.0) {
        use pricer_core::math::distributions::norm_cdf;
        prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-14);
    }

    #[test]
    fn prop_norm_pdf_even_and_positive(x in -30.0_f64..30.0) {
        use pricer_core::math::distributions::norm_pdf;
        prop_assert!(norm_pdf(x) >= 0.0);
        prop_assert_eq!(norm_pdf(x), norm_pdf(-x));
    }

    #[test]
    fn prop_unknown_option_tag_rejected(tag in "[A-Z]{2,6}") {
        use pricer_core::types::{OptionType, PricingError};
        prop_assume!(tag != "CALL" && tag != "PUT");
        prop_assert_eq!(
            tag.parse::<OptionType>(),
            Err(PricingError::InvalidOptionType(tag.clone()))
        );
    }
}
