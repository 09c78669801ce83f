//! Pure per-property blend mixing formulas.
//!
//! Each rule is a deterministic function of the two components' property
//! values and the additive volume fraction. Octane response to an additive is
//! non-linear (power-law interpolation with a per-rating exponent), cetane
//! response likewise; energy content and oxygen content blend by mass
//! fraction; trace/bulk properties blend by volume fraction.

/// Power-law exponent for RON interpolation.
pub const RON_EXPONENT: f64 = 0.85;
/// Power-law exponent for MON interpolation.
pub const MON_EXPONENT: f64 = 0.95;
/// Power-law exponent for cetane-number interpolation.
pub const CN_EXPONENT: f64 = 1.2;

/// Octane interpolation: `base + (additive - base) * vf^exponent`.
///
/// The sub-unity exponent captures the disproportionately strong octane
/// response to small additive fractions.
pub fn octane_response(base: f64, additive: f64, vf_additive: f64, exponent: f64) -> f64 {
    base + (additive - base) * vf_additive.powf(exponent)
}

/// Cetane interpolation: `base - (base - additive) * vf^1.2`.
pub fn cetane_response(base: f64, additive: f64, vf_additive: f64) -> f64 {
    base - (base - additive) * vf_additive.powf(CN_EXPONENT)
}

/// Mass-fraction-weighted average, with each volume fraction converted to a
/// mass contribution via its component's density.
pub fn mass_weighted(
    base: f64,
    additive: f64,
    vf_additive: f64,
    base_density: f64,
    additive_density: f64,
) -> f64 {
    let mass_base = (1.0 - vf_additive) * base_density;
    let mass_additive = vf_additive * additive_density;
    (mass_base * base + mass_additive * additive) / (mass_base + mass_additive)
}

/// Simple volume-fraction-weighted linear average.
pub fn volume_weighted(base: f64, additive: f64, vf_additive: f64) -> f64 {
    base * (1.0 - vf_additive) + additive * vf_additive
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn octane_response_reproduces_the_heptane_ethanol_reference_point() {
        // n-Heptane (RON 0) + 20 vol% Ethanol (RON 108.6).
        let ron = octane_response(0.0, 108.6, 0.20, RON_EXPONENT);
        assert!((ron - 108.6 * 0.20f64.powf(0.85)).abs() < TOLERANCE);
        assert!((ron - 27.65).abs() < 0.01);
    }

    #[test]
    fn octane_response_is_identity_at_the_endpoints() {
        assert!(f64_approx_equal(
            octane_response(90.0, 110.0, 0.0, RON_EXPONENT),
            90.0
        ));
        assert!(f64_approx_equal(
            octane_response(90.0, 110.0, 1.0, RON_EXPONENT),
            110.0
        ));
    }

    #[test]
    fn octane_response_exceeds_linear_blending_at_small_fractions() {
        let nonlinear = octane_response(90.0, 110.0, 0.1, RON_EXPONENT);
        let linear = volume_weighted(90.0, 110.0, 0.1);
        assert!(nonlinear > linear);
    }

    #[test]
    fn cetane_response_moves_monotonically_toward_the_additive() {
        let base = 60.0;
        let additive = 10.0;
        let mut previous = base;
        for step in 1..=10 {
            let vf = f64::from(step) / 10.0;
            let cn = cetane_response(base, additive, vf);
            assert!(cn < previous, "CN must fall as vf_additive grows");
            assert!(cn >= additive - TOLERANCE);
            previous = cn;
        }
        assert!(f64_approx_equal(cetane_response(base, additive, 1.0), additive));
    }

    #[test]
    fn mass_weighting_skews_toward_the_denser_component() {
        // Equal volumes, but the additive is denser and so contributes more mass.
        let blended = mass_weighted(40.0, 20.0, 0.5, 0.6, 1.0);
        let linear = volume_weighted(40.0, 20.0, 0.5);
        assert!(blended < linear);
        assert!(f64_approx_equal(
            blended,
            (0.3 * 40.0 + 0.5 * 20.0) / 0.8
        ));
    }

    #[test]
    fn volume_weighting_is_the_plain_linear_average() {
        assert!(f64_approx_equal(volume_weighted(100.0, 0.0, 0.25), 75.0));
        assert!(f64_approx_equal(volume_weighted(5.0, 5.0, 0.7), 5.0));
    }

    #[test]
    fn identical_inputs_always_yield_identical_outputs() {
        let a = octane_response(62.0, 108.6, 0.33, MON_EXPONENT);
        let b = octane_response(62.0, 108.6, 0.33, MON_EXPONENT);
        assert_eq!(a, b);
    }
}
