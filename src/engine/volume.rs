// ==========================================
// Breather Advisor - Volume Calculator
// ==========================================
// Derives sump/oil/air volumes for a component from either a declared
// oil-capacity value or physical dimensions.
// Priority: declared capacity first, dimensions as fallback (both
// system types). When both sources exist, the dimension-derived oil
// volume is cross-checked against the declared one and a non-fatal
// warning attached when they diverge by more than 25%.
// ==========================================

use crate::domain::types::VolumeMethod;
use crate::domain::AssetDescriptor;
use serde::{Deserialize, Serialize};

/// Liters to US gallons.
pub const LITERS_TO_GALLONS: f64 = 0.264172;
/// Cubic inches to US gallons.
pub const CUBIC_INCHES_TO_GALLONS: f64 = 0.004329;
/// Default oil-fill fraction of the sump for splash/bath systems.
pub const DEFAULT_OIL_FILL_FRACTION: f64 = 0.30;
/// Discrepancy threshold for the capacity-vs-dimensions sanity check.
pub const VOLUME_DISCREPANCY_WARN: f64 = 0.25;
/// Dimension values above this are assumed to be millimeters.
const MM_THRESHOLD: f64 = 50.0;
const MM_PER_INCH: f64 = 25.4;

// ==========================================
// Volume Estimate
// ==========================================
/// Volumetric capacity of a component, US gallons. All volumes >= 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub v_sump_gal: f64,
    pub v_oil_gal: f64,
    pub v_air_gal: f64,
    pub method: VolumeMethod,
    /// Non-fatal sanity-check warning, empty when none applies.
    pub warning: Option<String>,
}

impl VolumeEstimate {
    fn insufficient() -> Self {
        Self {
            v_sump_gal: 0.0,
            v_oil_gal: 0.0,
            v_air_gal: 0.0,
            method: VolumeMethod::InsufficientData,
            warning: Some(
                "Insufficient data for volume calculation - no dimensions or oil capacity"
                    .to_string(),
            ),
        }
    }
}

// ==========================================
// Volume Calculator
// ==========================================
// Pure, stateless. No I/O.
pub struct VolumeCalculator;

impl VolumeCalculator {
    /// Compute sump/oil/air volumes for an asset.
    pub fn calculate(asset: &AssetDescriptor) -> VolumeEstimate {
        // Step 1: declared oil capacity (primary source)
        if let Some(oil_cap_l) = positive(asset.oil_capacity_l) {
            let v_oil = oil_cap_l * LITERS_TO_GALLONS;
            let v_sump = v_oil / DEFAULT_OIL_FILL_FRACTION;
            let v_air = v_sump - v_oil;

            let warning = Self::sanity_check(asset, v_oil);
            tracing::debug!(
                asset_id = %asset.asset_id,
                v_sump, v_oil, v_air,
                "volumes from declared oil capacity"
            );

            return VolumeEstimate {
                v_sump_gal: v_sump,
                v_oil_gal: v_oil,
                v_air_gal: v_air,
                method: VolumeMethod::OilCapacity,
                warning,
            };
        }

        // Step 2: full dimensional data (fallback source)
        if let Some((h, w, l, oil_h)) = Self::full_dimensions(asset) {
            let v_sump = h * w * l * CUBIC_INCHES_TO_GALLONS;
            let v_oil = oil_h * w * l * CUBIC_INCHES_TO_GALLONS;
            let v_air = (v_sump - v_oil).max(0.0);

            tracing::debug!(
                asset_id = %asset.asset_id,
                v_sump, v_oil, v_air,
                "volumes from physical dimensions"
            );

            return VolumeEstimate {
                v_sump_gal: v_sump,
                v_oil_gal: v_oil,
                v_air_gal: v_air,
                method: VolumeMethod::Dimensions,
                warning: None,
            };
        }

        // Step 3: no usable source
        tracing::warn!(asset_id = %asset.asset_id, "no volume calculation method available");
        VolumeEstimate::insufficient()
    }

    /// All four dimensions present and positive, normalized to inches.
    fn full_dimensions(asset: &AssetDescriptor) -> Option<(f64, f64, f64, f64)> {
        let h = positive(asset.height_in)?;
        let w = positive(asset.width_in)?;
        let l = positive(asset.length_in)?;
        let oil_h = positive(asset.oil_level_distance_in)?;
        Some((
            to_inches(h),
            to_inches(w),
            to_inches(l),
            to_inches(oil_h),
        ))
    }

    /// Cross-check the dimension-derived oil volume against the
    /// declared capacity. The declared-capacity volumes are what gets
    /// returned; the dimension value is only the warning baseline.
    fn sanity_check(asset: &AssetDescriptor, v_oil_declared: f64) -> Option<String> {
        let (_, w, l, oil_h) = Self::full_dimensions(asset)?;
        let v_oil_dims = oil_h * w * l * CUBIC_INCHES_TO_GALLONS;

        if v_oil_dims <= 0.01 || v_oil_declared <= 0.01 {
            return None;
        }

        let diff = (v_oil_dims - v_oil_declared) / v_oil_declared;
        if diff.abs() > VOLUME_DISCREPANCY_WARN {
            let msg = format!(
                "Warning: dimension-derived oil volume ({:.2} gal) differs by {:+.0}% \
                 from declared capacity ({:.2} gal). Using declared capacity.",
                v_oil_dims,
                diff * 100.0,
                v_oil_declared
            );
            tracing::warn!(asset_id = %asset.asset_id, "{msg}");
            return Some(msg);
        }
        None
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Normalize a dimension to inches, assuming mm input when > 50.
fn to_inches(value: f64) -> f64 {
    if value > MM_THRESHOLD {
        value / MM_PER_INCH
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SystemType;

    fn asset() -> AssetDescriptor {
        AssetDescriptor::new("A1", SystemType::Splash)
    }

    #[test]
    fn test_oil_capacity_path() {
        let mut a = asset();
        a.oil_capacity_l = Some(100.0);

        let v = VolumeCalculator::calculate(&a);
        assert_eq!(v.method, VolumeMethod::OilCapacity);

        let v_oil = 100.0 * LITERS_TO_GALLONS;
        assert!((v.v_oil_gal - v_oil).abs() < 1e-9);
        assert!((v.v_sump_gal - v_oil / 0.30).abs() < 1e-9);
        assert!((v.v_air_gal - (v.v_sump_gal - v.v_oil_gal)).abs() < 1e-9);
        assert!(v.warning.is_none());
    }

    #[test]
    fn test_dimensions_path() {
        let mut a = asset();
        a.height_in = Some(20.0);
        a.width_in = Some(10.0);
        a.length_in = Some(30.0);
        a.oil_level_distance_in = Some(6.0);

        let v = VolumeCalculator::calculate(&a);
        assert_eq!(v.method, VolumeMethod::Dimensions);
        assert!((v.v_sump_gal - 20.0 * 10.0 * 30.0 * CUBIC_INCHES_TO_GALLONS).abs() < 1e-9);
        assert!((v.v_oil_gal - 6.0 * 10.0 * 30.0 * CUBIC_INCHES_TO_GALLONS).abs() < 1e-9);
        assert!(v.v_air_gal >= 0.0);
    }

    #[test]
    fn test_capacity_preferred_over_dimensions() {
        let mut a = asset();
        a.oil_capacity_l = Some(30.0);
        a.height_in = Some(20.0);
        a.width_in = Some(10.0);
        a.length_in = Some(30.0);
        a.oil_level_distance_in = Some(6.0);

        let v = VolumeCalculator::calculate(&a);
        assert_eq!(v.method, VolumeMethod::OilCapacity);
    }

    #[test]
    fn test_discrepancy_warning_attached() {
        // Declared 10 L (~2.64 gal) vs dimensions giving ~7.8 gal oil:
        // far beyond the 25% band.
        let mut a = asset();
        a.oil_capacity_l = Some(10.0);
        a.height_in = Some(20.0);
        a.width_in = Some(10.0);
        a.length_in = Some(30.0);
        a.oil_level_distance_in = Some(6.0);

        let v = VolumeCalculator::calculate(&a);
        assert_eq!(v.method, VolumeMethod::OilCapacity);
        let warning = v.warning.expect("expected discrepancy warning");
        assert!(warning.contains("differs"));
        // Returned volumes still come from the declared capacity
        assert!((v.v_oil_gal - 10.0 * LITERS_TO_GALLONS).abs() < 1e-9);
    }

    #[test]
    fn test_mm_dimensions_normalized() {
        let mut a = asset();
        // 508 mm == 20 in, 254 mm == 10 in, 762 mm == 30 in
        a.height_in = Some(508.0);
        a.width_in = Some(254.0);
        a.length_in = Some(762.0);
        a.oil_level_distance_in = Some(6.0);

        let v = VolumeCalculator::calculate(&a);
        assert_eq!(v.method, VolumeMethod::Dimensions);
        assert!((v.v_sump_gal - 20.0 * 10.0 * 30.0 * CUBIC_INCHES_TO_GALLONS).abs() < 1e-6);
    }

    #[test]
    fn test_insufficient_data() {
        let mut a = asset();
        a.height_in = Some(20.0); // partial dimensions only
        a.width_in = Some(10.0);

        let v = VolumeCalculator::calculate(&a);
        assert_eq!(v.method, VolumeMethod::InsufficientData);
        assert_eq!(v.v_sump_gal, 0.0);
        assert!(v.warning.is_some());
    }

    #[test]
    fn test_zero_capacity_ignored() {
        let mut a = asset();
        a.oil_capacity_l = Some(0.0);
        let v = VolumeCalculator::calculate(&a);
        assert_eq!(v.method, VolumeMethod::InsufficientData);
    }
}
