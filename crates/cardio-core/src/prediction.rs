//! The prediction service and its response types.

use serde::Serialize;

use crate::error::PredictionError;
use crate::insight::clinical_insights;
use crate::model::{BinaryClassifier, Classification, FeatureScaler};
use crate::record::{PatientRecord, FEATURE_ORDER};

/// Allowed drift of `P(0) + P(1)` away from 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

struct LoadedModel {
    scaler: Box<dyn FeatureScaler>,
    classifier: Box<dyn BinaryClassifier>,
}

/// Immutable snapshot of the loaded model, built once at startup.
///
/// An unloaded service is a valid state: it answers every prediction with
/// [`PredictionError::ModelNotLoaded`].
pub struct PredictionService {
    model: Option<LoadedModel>,
}

impl PredictionService {
    /// Creates a ready service from a fitted transform and classifier.
    pub fn new(
        scaler: impl FeatureScaler + 'static,
        classifier: impl BinaryClassifier + 'static,
    ) -> Self {
        Self {
            model: Some(LoadedModel {
                scaler: Box::new(scaler),
                classifier: Box::new(classifier),
            }),
        }
    }

    /// Creates a service with no model behind it.
    pub fn unloaded() -> Self {
        Self { model: None }
    }

    /// Whether both the transform and the classifier are available.
    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// Scores one record and derives its clinical insights.
    pub fn predict(&self, record: &PatientRecord) -> Result<PredictionResult, PredictionError> {
        let model = self.model.as_ref().ok_or(PredictionError::ModelNotLoaded)?;

        let features = record.features();
        let scaled = model.scaler.transform(&features)?;
        if let Some(idx) = scaled.iter().position(|v| !v.is_finite()) {
            return Err(PredictionError::Scaling(format!(
                "non-finite scaled value for {}",
                FEATURE_ORDER[idx]
            )));
        }

        let classification = model.classifier.classify(&scaled)?;
        check_classification(&classification)?;

        Ok(PredictionResult {
            prediction: classification.label,
            result: Diagnosis::from_label(classification.label),
            confidence_percentages: ConfidencePercentages::from_probabilities(
                classification.probabilities,
            ),
            clinical_insights: clinical_insights(record),
            input_features: InputFeatures::from(record),
            probabilities: classification.probabilities,
        })
    }
}

fn check_classification(c: &Classification) -> Result<(), PredictionError> {
    if c.label > 1 {
        return Err(PredictionError::Classification(format!(
            "unexpected class label {}",
            c.label
        )));
    }
    let [absence, presence] = c.probabilities;
    let in_range = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
    if !in_range(absence) || !in_range(presence) {
        return Err(PredictionError::Classification(format!(
            "probabilities out of range: [{absence}, {presence}]"
        )));
    }
    if ((absence + presence) - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(PredictionError::Classification(format!(
            "probabilities do not sum to 1: [{absence}, {presence}]"
        )));
    }
    Ok(())
}

/// Human label of the predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Diagnosis {
    #[serde(rename = "Heart Disease ABSENCE")]
    Absence,
    #[serde(rename = "Heart Disease PRESENCE")]
    Presence,
}

impl Diagnosis {
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Diagnosis::Presence
        } else {
            Diagnosis::Absence
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Absence => "Heart Disease ABSENCE",
            Diagnosis::Presence => "Heart Disease PRESENCE",
        }
    }
}

/// Class probabilities rendered as `"87.66%"` strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidencePercentages {
    #[serde(rename = "no heart disease")]
    pub absence: String,
    #[serde(rename = "heart disease")]
    pub presence: String,
}

impl ConfidencePercentages {
    pub fn from_probabilities([absence, presence]: [f64; 2]) -> Self {
        Self {
            absence: format_percent(absence),
            presence: format_percent(presence),
        }
    }
}

fn format_percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Thallium echo: a known label, or the raw value when unrecognised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ThalliumEcho {
    Label(&'static str),
    Raw(i64),
}

impl From<i64> for ThalliumEcho {
    fn from(value: i64) -> Self {
        match value {
            3 => ThalliumEcho::Label("Normal"),
            6 => ThalliumEcho::Label("Fixed defect"),
            7 => ThalliumEcho::Label("Reversible defect"),
            other => ThalliumEcho::Raw(other),
        }
    }
}

/// Readable echo of the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputFeatures {
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Sex")]
    pub sex: &'static str,
    #[serde(rename = "ChestPainType")]
    pub chest_pain_type: i64,
    #[serde(rename = "BP")]
    pub bp: String,
    #[serde(rename = "Cholesterol")]
    pub cholesterol: String,
    #[serde(rename = "FBS")]
    pub fbs: &'static str,
    #[serde(rename = "EKG")]
    pub ekg: i64,
    #[serde(rename = "MaxHR")]
    pub max_hr: i64,
    #[serde(rename = "ExerciseAngina")]
    pub exercise_angina: &'static str,
    #[serde(rename = "STDepression")]
    pub st_depression: f64,
    #[serde(rename = "SlopeST")]
    pub slope_st: i64,
    #[serde(rename = "NumVessels")]
    pub num_vessels: i64,
    #[serde(rename = "Thallium")]
    pub thallium: ThalliumEcho,
}

impl From<&PatientRecord> for InputFeatures {
    fn from(r: &PatientRecord) -> Self {
        Self {
            age: r.age,
            sex: if r.sex == 1 { "Male" } else { "Female" },
            chest_pain_type: r.chest_pain_type,
            bp: format!("{} mm Hg", r.bp),
            cholesterol: format!("{} mg/dL", r.cholesterol),
            fbs: if r.fbs == 1 { ">120 mg/dL" } else { "Normal" },
            ekg: r.ekg,
            max_hr: r.max_hr,
            exercise_angina: if r.exercise_angina == 1 { "Yes" } else { "No" },
            st_depression: r.st_depression,
            slope_st: r.slope_st,
            num_vessels: r.num_vessels,
            thallium: ThalliumEcho::from(r.thallium),
        }
    }
}

/// Response of a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Predicted class, 0 or 1.
    pub prediction: u8,
    pub result: Diagnosis,
    pub confidence_percentages: ConfidencePercentages,
    pub clinical_insights: Vec<String>,
    pub input_features: InputFeatures,
    /// Unformatted `[P(0), P(1)]`, kept for logging.
    #[serde(skip)]
    pub probabilities: [f64; 2],
}
