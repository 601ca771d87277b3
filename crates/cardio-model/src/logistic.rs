//! Binary logistic regression over standardized features.

use cardio_core::{BinaryClassifier, Classification, FeatureVector, PredictionError};

/// Fitted linear decision function with a logistic link.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    coefficients: FeatureVector,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: FeatureVector, intercept: f64) -> Self {
        Self { coefficients, intercept }
    }

    /// Signed distance to the decision boundary.
    pub fn decision_function(&self, x: &FeatureVector) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }

    /// `[P(0), P(1)]` for one row.
    pub fn predict_proba(&self, x: &FeatureVector) -> [f64; 2] {
        let p = sigmoid(self.decision_function(x));
        [1.0 - p, p]
    }
}

impl BinaryClassifier for LogisticRegression {
    fn classify(&self, scaled: &FeatureVector) -> Result<Classification, PredictionError> {
        let z = self.decision_function(scaled);
        if !z.is_finite() {
            return Err(PredictionError::classification(format!(
                "non-finite decision value {z}"
            )));
        }
        let p = sigmoid(z);
        Ok(Classification {
            label: u8::from(z > 0.0),
            probabilities: [1.0 - p, p],
        })
    }
}

// Split on sign so exp() never overflows.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
