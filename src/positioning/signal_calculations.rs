//! Radio signal calculations.
//!
//! Contains helpers for:
//! - Inverting the log-distance path loss model to turn a received signal
//!   strength into a distance estimate
//! - The forward model (signal at a given distance), used to sanity check the inversion
//!
//! Units:
//! - Power: dBm
//! - Distance: meters in the physical model; the plot reuses the same numbers as world units

use serde::Deserialize;

/// Parameters defining the radio channel propagation model.
///
/// The log-distance model has no shadowing term here: every reading is turned
/// into a single deterministic distance.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathLossParameters {
    /// Assumed tower transmit power (P_tx) in dBm.
    pub tx_power: f64,

    /// Path loss at the reference distance d₀ (1 meter) in dB.
    ///
    /// 32.4 dB is the free space loss figure used for LTE bands.
    pub path_loss_at_reference_distance: f64,

    /// Path loss exponent (n).
    ///
    /// Determines how quickly the signal power decays with distance.
    /// - n = 2.0: Free space (vacuum)
    /// - n = 3.0 to 4.0: Urban macro cells
    pub path_loss_exponent: f64,
}

impl Default for PathLossParameters {
    fn default() -> Self {
        Self {
            tx_power: 43.0,
            path_loss_at_reference_distance: 32.4,
            path_loss_exponent: 3.5,
        }
    }
}

/// Estimate the distance (in meters) to a tower from a received signal strength.
///
/// # Formula
///
/// ```text
/// PL = P_tx - RSRP
/// d  = 10^((PL - PL(d₀)) / (10 × n))
/// ```
///
/// The result is rounded to two decimals, which is the precision shown in the
/// console summary.
pub(crate) fn distance_from_signal(signal_dbm: f64, params: &PathLossParameters) -> f64 {
    let path_loss = params.tx_power - signal_dbm;
    let exponent = (path_loss - params.path_loss_at_reference_distance) / (10.0 * params.path_loss_exponent);
    round_to_centimeters(10f64.powf(exponent))
}

/// Parse a signal strength field and estimate the distance for it.
///
/// Returns `None` when the text is not a finite number or the distance
/// overflows, so callers can drop the reading without treating it as an error.
pub(crate) fn estimate_distance(signal: &str, params: &PathLossParameters) -> Option<f64> {
    let signal_dbm: f64 = signal.trim().parse().ok()?;
    if !signal_dbm.is_finite() {
        return None;
    }
    Some(distance_from_signal(signal_dbm, params)).filter(|d| d.is_finite())
}

/// Received signal strength (dBm) expected at `distance` meters.
///
/// Forward form of the model: `RSRP = P_tx - PL(d₀) - 10 × n × log₁₀(d)`.
/// Distances below the 1 m reference return the reference level.
#[allow(dead_code)]
pub(crate) fn signal_at_distance(distance: f64, params: &PathLossParameters) -> f64 {
    let reference = params.tx_power - params.path_loss_at_reference_distance;
    if distance < 1.0 {
        return reference;
    }
    reference - 10.0 * params.path_loss_exponent * distance.log10()
}

fn round_to_centimeters(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_signal_gives_documented_distance() {
        let params = PathLossParameters::default();
        assert_eq!(distance_from_signal(-85.0, &params), 538.8);
        assert_eq!(estimate_distance("-85", &params), Some(538.8));
    }

    #[test]
    fn distance_is_non_negative_for_numeric_input() {
        let params = PathLossParameters::default();
        for signal in [-140.0, -120.0, -100.0, -85.0, -44.0, 0.0, 20.0, 43.0] {
            let d = distance_from_signal(signal, &params);
            assert!(d >= 0.0, "{signal} dBm gave {d}");
        }
    }

    #[test]
    fn weaker_signal_means_further_tower() {
        let params = PathLossParameters::default();
        let near = distance_from_signal(-70.0, &params);
        let mid = distance_from_signal(-85.0, &params);
        let far = distance_from_signal(-100.0, &params);
        assert!(near < mid && mid < far);
        assert_eq!(near, 200.84);
        assert_eq!(far, 1445.44);
    }

    #[test]
    fn non_numeric_signal_is_absent() {
        let params = PathLossParameters::default();
        assert_eq!(estimate_distance("", &params), None);
        assert_eq!(estimate_distance("-", &params), None);
        assert_eq!(estimate_distance("n/a", &params), None);
        assert_eq!(estimate_distance("NaN", &params), None);
        assert_eq!(estimate_distance("inf", &params), None);
    }

    #[test]
    fn out_of_range_signal_is_absent() {
        let params = PathLossParameters::default();
        assert!(distance_from_signal(-20000.0, &params).is_infinite());
        assert_eq!(estimate_distance("-20000", &params), None);
        assert_eq!(estimate_distance("-1e300", &params), None);
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let params = PathLossParameters::default();
        assert_eq!(estimate_distance(" -85 ", &params), Some(538.8));
    }

    #[test]
    fn forward_model_inverts_distance_estimate() {
        let params = PathLossParameters::default();
        for d in [10.0, 250.0, 538.8, 2_000.0] {
            let signal = signal_at_distance(d, &params);
            let back = distance_from_signal(signal, &params);
            assert!((back - d).abs() < 0.01, "{d} m came back as {back} m");
        }
        assert_eq!(signal_at_distance(0.5, &params), 43.0 - 32.4);
    }
}
