//! Defaulter classification
//!
//! Applies the fixed 75% threshold to an overall attendance percentage. The
//! threshold is a domain constant, not configurable per student or subject.

use crate::types::DefaulterStatus;

/// Overall percentage below which a student is a defaulter
pub const DEFAULTER_THRESHOLD_PCT: f64 = 75.0;

/// Classify an overall attendance percentage
///
/// Strictly below the threshold is `Defaulter`; the boundary value 75.0
/// itself passes. Total over all finite inputs.
pub fn classify(overall_percentage: f64) -> DefaulterStatus {
    if overall_percentage < DEFAULTER_THRESHOLD_PCT {
        DefaulterStatus::Defaulter
    } else {
        DefaulterStatus::NotDefaulter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_not_defaulter() {
        assert_eq!(classify(75.0), DefaulterStatus::NotDefaulter);
    }

    #[test]
    fn test_just_below_boundary_is_defaulter() {
        assert_eq!(classify(74.999), DefaulterStatus::Defaulter);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(0.0), DefaulterStatus::Defaulter);
        assert_eq!(classify(100.0), DefaulterStatus::NotDefaulter);
    }
}
