//! Current and conductor-area formulas shared by the calculators.

use std::f64::consts::PI;

/// Continuous-duty safety margin applied to rated current.
pub const SAFETY_FACTOR: f64 = 1.25;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Line current of a balanced three-phase load: `P / (V * √3)`.
///
/// Returns 0.0 for a non-positive or non-finite voltage so degenerate
/// inputs never leak `NaN` or infinity into the results.
pub fn three_phase_current(power_kw: f64, voltage_v: f64) -> f64 {
    if !voltage_v.is_finite() || voltage_v <= 0.0 || !power_kw.is_finite() {
        return 0.0;
    }
    let amps = (power_kw * 1000.0) / (voltage_v * SQRT_3);
    if amps.is_finite() { amps.max(0.0) } else { 0.0 }
}

/// Rated current scaled by [`SAFETY_FACTOR`].
pub fn design_current(rated_a: f64) -> f64 {
    rated_a * SAFETY_FACTOR
}

/// Cross-sectional area of `wire_count` round conductors of the given
/// outer diameter (mm²).
pub fn bundle_area_mm2(wire_count: u32, outer_diameter_mm: f64) -> f64 {
    f64::from(wire_count) * (outer_diameter_mm / 2.0).powi(2) * PI
}

/// `part / whole` as a percentage, 0 when `whole` is not positive.
pub fn ratio_pct(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_kw_at_380_v() {
        let amps = three_phase_current(30.0, 380.0);
        assert!((amps - 45.58).abs() < 0.01, "got {amps}");
        assert!((design_current(amps) - 56.98).abs() < 0.01);
    }

    #[test]
    fn zero_voltage_yields_zero_current() {
        assert_eq!(three_phase_current(30.0, 0.0), 0.0);
        assert_eq!(three_phase_current(30.0, -380.0), 0.0);
        assert_eq!(three_phase_current(30.0, f64::NAN), 0.0);
    }

    #[test]
    fn dc_bundle_area() {
        let area = bundle_area_mm2(48, 7.54);
        assert!((area - 2143.2).abs() < 0.1, "got {area}");
        assert_eq!(bundle_area_mm2(0, 7.54), 0.0);
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio_pct(10.0, 0.0), 0.0);
        assert_eq!(ratio_pct(5.0, 20.0), 25.0);
    }
}
