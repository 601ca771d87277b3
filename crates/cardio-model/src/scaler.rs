//! Per-feature standardization.

use cardio_core::{FeatureScaler, FeatureVector, PredictionError};

/// Fitted `(x - mean) / scale` transform.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: FeatureVector,
    scale: FeatureVector,
    with_mean: bool,
    with_std: bool,
}

impl StandardScaler {
    /// Creates a scaler with centring and scaling enabled.
    ///
    /// A zero scale (constant training column) is stored as 1.
    pub fn new(mean: FeatureVector, scale: FeatureVector) -> Self {
        Self {
            mean,
            scale: scale.map(|s| if s == 0.0 { 1.0 } else { s }),
            with_mean: true,
            with_std: true,
        }
    }

    pub fn with_mean(mut self, enabled: bool) -> Self {
        self.with_mean = enabled;
        self
    }

    pub fn with_std(mut self, enabled: bool) -> Self {
        self.with_std = enabled;
        self
    }

    pub fn mean(&self) -> &FeatureVector {
        &self.mean
    }

    pub fn scale(&self) -> &FeatureVector {
        &self.scale
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, PredictionError> {
        let mut out = *features;
        for (i, x) in out.iter_mut().enumerate() {
            if self.with_mean {
                *x -= self.mean[i];
            }
            if self.with_std {
                *x /= self.scale[i];
            }
        }
        Ok(out)
    }
}
