//! Core domain types for the cardio prediction service.
//!
//! - [`PatientRecord`] — the 13-field request and its fixed feature order
//! - [`FeatureScaler`] and [`BinaryClassifier`] — capabilities a fitted model provides
//! - [`PredictionService`] — immutable snapshot of the loaded model
//! - [`clinical_insights`] — rule table over the raw record
//! - [`feature_catalog`] — static field metadata
//!
//! # Example
//!
//! ```rust
//! use cardio_core::{clinical_insights, PatientRecord, PredictionService, PredictionError};
//!
//! let record = PatientRecord::example();
//! assert!(clinical_insights(&record).len() >= 2);
//!
//! let service = PredictionService::unloaded();
//! assert_eq!(service.predict(&record).unwrap_err(), PredictionError::ModelNotLoaded);
//! ```

mod catalog;
mod error;
mod insight;
mod model;
mod prediction;
mod record;

pub use catalog::{feature_catalog, FeatureCatalog, FeatureInfo};
pub use error::PredictionError;
pub use insight::{clinical_insights, InsightRule, INSIGHT_RULES};
pub use model::{BinaryClassifier, Classification, FeatureScaler};
pub use prediction::{
    ConfidencePercentages, Diagnosis, InputFeatures, PredictionResult, PredictionService,
    ThalliumEcho, PROBABILITY_TOLERANCE,
};
pub use record::{FeatureVector, PatientRecord, FEATURE_COUNT, FEATURE_ORDER, TRAINING_COLUMNS};
