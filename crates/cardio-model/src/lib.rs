//! Fitted model artifact for cardio.
//!
//! The artifact is a JSON export of a standardization transform and a logistic
//! regression classifier fit on the 13 request features. [`load_artifact`]
//! validates it and yields concrete [`StandardScaler`] and
//! [`LogisticRegression`] values that plug into
//! [`cardio_core::PredictionService`].

mod artifact;
mod logistic;
mod scaler;

pub use artifact::{
    load_artifact, ArtifactError, ArtifactMetadata, ClassifierParams, LoadedArtifact,
    ModelArtifact, ScalerParams, FORMAT_VERSION,
};
pub use logistic::LogisticRegression;
pub use scaler::StandardScaler;
