//! Stopping criteria for simplification.

use crate::error::{SimplifyError, SimplifyResult};

/// Parameters controlling when a simplification run stops.
///
/// The run always stops when the candidate queue drains; these only make it
/// stop earlier.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifyParams {
    /// Target number of triangles. If None, uses `target_ratio` instead.
    pub target_triangles: Option<usize>,

    /// Target ratio of triangles to keep (0.0 to 1.0). Default: 0.0, which
    /// contracts every safe edge.
    pub target_ratio: f64,

    /// Maximum quadric cost a contraction may have. If None, no limit.
    ///
    /// The queue is ordered by cost, so the first candidate above this
    /// threshold ends the run.
    pub max_cost: Option<f64>,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            target_triangles: None,
            target_ratio: 0.0,
            max_cost: None,
        }
    }
}

impl SimplifyParams {
    /// Create params targeting a specific triangle count.
    #[must_use]
    pub fn with_target_triangles(count: usize) -> Self {
        Self {
            target_triangles: Some(count),
            ..Default::default()
        }
    }

    /// Create params targeting a ratio of original triangles.
    #[must_use]
    pub fn with_target_ratio(ratio: f64) -> Self {
        Self {
            target_ratio: ratio.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Create aggressive params: keep a quarter of the triangles.
    #[must_use]
    pub fn aggressive() -> Self {
        Self::with_target_ratio(0.25)
    }

    /// Create conservative params: keep three quarters of the triangles and
    /// only accept contractions that barely move the surface.
    #[must_use]
    pub fn conservative() -> Self {
        Self::with_target_ratio(0.75).with_max_cost(1e-4)
    }

    /// Set maximum cost threshold.
    #[must_use]
    pub const fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    /// Check the parameters for values no run could honor.
    ///
    /// # Errors
    ///
    /// [`SimplifyError::InvalidRatio`] if `target_ratio` is outside `[0, 1]`
    /// or NaN, [`SimplifyError::InvalidMaxCost`] if `max_cost` is negative or
    /// NaN.
    pub fn validate(&self) -> SimplifyResult<()> {
        if !(0.0..=1.0).contains(&self.target_ratio) {
            return Err(SimplifyError::InvalidRatio(self.target_ratio));
        }
        if let Some(max_cost) = self.max_cost {
            if max_cost.is_nan() || max_cost < 0.0 {
                return Err(SimplifyError::InvalidMaxCost(max_cost));
            }
        }
        Ok(())
    }

    /// Triangle count at which a run on `original` triangles stops.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn target_for(&self, original: usize) -> usize {
        self.target_triangles
            .unwrap_or_else(|| ((original as f64) * self.target_ratio).ceil() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SimplifyParams::default();
        assert!(params.target_ratio.abs() < 0.001);
        assert_eq!(params.target_triangles, None);
        assert_eq!(params.max_cost, None);
        assert_eq!(params.target_for(100), 0);
    }

    #[test]
    fn test_target_triangles() {
        let params = SimplifyParams::with_target_triangles(1000);
        assert_eq!(params.target_triangles, Some(1000));
        assert_eq!(params.target_for(5000), 1000);
    }

    #[test]
    fn test_target_ratio() {
        let params = SimplifyParams::with_target_ratio(0.3);
        assert!((params.target_ratio - 0.3).abs() < 0.001);
        assert_eq!(params.target_for(80), 24);
        // Rounds up
        assert_eq!(params.target_for(81), 25);
    }

    #[test]
    fn test_ratio_clamping() {
        let params = SimplifyParams::with_target_ratio(1.5);
        assert!((params.target_ratio - 1.0).abs() < 0.001);

        let params = SimplifyParams::with_target_ratio(-0.5);
        assert!((params.target_ratio).abs() < 0.001);
    }

    #[test]
    fn test_presets() {
        let params = SimplifyParams::aggressive();
        assert!((params.target_ratio - 0.25).abs() < 0.001);
        assert_eq!(params.max_cost, None);

        let params = SimplifyParams::conservative();
        assert!((params.target_ratio - 0.75).abs() < 0.001);
        assert!(params.max_cost.is_some());
    }

    #[test]
    fn test_validate() {
        assert!(SimplifyParams::default().validate().is_ok());
        assert!(SimplifyParams::default().with_max_cost(0.0).validate().is_ok());

        let params = SimplifyParams {
            target_ratio: 2.0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(SimplifyError::InvalidRatio(2.0)));

        let params = SimplifyParams::default().with_max_cost(-1.0);
        assert_eq!(params.validate(), Err(SimplifyError::InvalidMaxCost(-1.0)));

        let params = SimplifyParams::default().with_max_cost(f64::NAN);
        assert!(params.validate().is_err());
    }
}
