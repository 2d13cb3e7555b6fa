//! Darcy–Weisbach friction loss with the Haaland friction factor.
//!
//! Free functions over plain quantities so each step can be checked on its
//! own; `FrictionEdge` wires them to endpoint states.

use crate::common::{check_finite, check_positive};
use crate::error::ComponentResult;
use pf_core::units::{Density, DynVisc, Length, Pressure, Ratio, Velocity, VolumeRate, unitless};

/// `8/π²`: the coefficient of `ΔP = f·(L/D)·ρv²/2` once `v = Q / (π/4·D²)`
/// is substituted, giving `ΔP = K·f·L·Q²·ρ / D⁵`.
pub const DARCY_FLOW_COEFFICIENT: f64 = 8.0 / (std::f64::consts::PI * std::f64::consts::PI);

/// Reynolds number `v·D·ρ/μ`.
///
/// Not validated here; `haaland` rejects values outside its domain.
pub fn reynolds(speed: Velocity, diameter: Length, density: Density, viscosity: DynVisc) -> Ratio {
    speed * diameter * density / viscosity
}

/// Haaland approximation of the Darcy friction factor.
///
/// `f = (−1.8·log10(A + B))⁻²` with `A = (ε/D / 3.7)^1.11` and `B = 6.9/Re`.
/// Requires `Re > 0` and `A + B > 0`; anything else is
/// `InvalidPhysicalInput` instead of a NaN.
pub fn haaland(reynolds: Ratio, relative_roughness: Ratio) -> ComponentResult<Ratio> {
    let re = check_positive(reynolds.value, "Reynolds number")?;
    let a = (relative_roughness.value / 3.7).powf(1.11);
    let b = 6.9 / re;
    let arg = check_positive(a + b, "Haaland log argument")?;

    let f = (-1.8 * arg.log10()).powi(-2);
    check_finite(f, "friction factor")?;
    Ok(unitless(f))
}

/// Frictional pressure loss for a volumetric flow through a round pipe.
pub fn darcy_weisbach(
    friction_factor: Ratio,
    length: Length,
    flow: VolumeRate,
    density: Density,
    diameter: Length,
) -> Pressure {
    let d5 = diameter * diameter * diameter * diameter * diameter;
    friction_factor * length * flow * flow * density / d5 * DARCY_FLOW_COEFFICIENT
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn haaland_decreases_with_reynolds(
            re in 4.0e3_f64..1.0e7,
            rr in 0.0_f64..0.05,
            factor in 1.1_f64..10.0,
        ) {
            let low = haaland(unitless(re), unitless(rr)).unwrap();
            let high = haaland(unitless(re * factor), unitless(rr)).unwrap();
            prop_assert!(high.value <= low.value);
        }

        #[test]
        fn haaland_increases_with_roughness(
            re in 4.0e3_f64..1.0e7,
            rr in 1.0e-6_f64..0.05,
            factor in 1.1_f64..10.0,
        ) {
            let smooth = haaland(unitless(re), unitless(rr)).unwrap();
            let rough = haaland(unitless(re), unitless(rr * factor)).unwrap();
            prop_assert!(rough.value >= smooth.value);
        }
    }
}
