//! Patient input record and its fixed feature ordering.

use serde::{Deserialize, Serialize};

/// Number of features the artifact was fit on.
pub const FEATURE_COUNT: usize = 13;

/// A single row of model input, in [`FEATURE_ORDER`].
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Request field names in the order the transform and classifier were fit on.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "Age",
    "Sex",
    "ChestPainType",
    "BP",
    "Cholesterol",
    "FBS",
    "EKG",
    "MaxHR",
    "ExerciseAngina",
    "STDepression",
    "SlopeST",
    "NumVessels",
    "Thallium",
];

/// Column names of the training data, positionally matching [`FEATURE_ORDER`].
pub const TRAINING_COLUMNS: [&str; FEATURE_COUNT] = [
    "Age",
    "Sex",
    "Chest pain type",
    "BP",
    "Cholesterol",
    "FBS over 120",
    "EKG results",
    "Max HR",
    "Exercise angina",
    "ST depression",
    "Slope of ST",
    "Number of vessels fluro",
    "Thallium",
];

/// Clinical measurements for one patient.
///
/// Only types are enforced; values outside the documented ranges are passed
/// through to the model unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years.
    #[serde(rename = "Age")]
    pub age: i64,
    /// 0 = female, 1 = male.
    #[serde(rename = "Sex")]
    pub sex: i64,
    /// Chest pain type, 1-4.
    #[serde(rename = "ChestPainType")]
    pub chest_pain_type: i64,
    /// Resting blood pressure in mm Hg.
    #[serde(rename = "BP")]
    pub bp: i64,
    /// Serum cholesterol in mg/dL.
    #[serde(rename = "Cholesterol")]
    pub cholesterol: i64,
    /// Fasting blood sugar above 120 mg/dL, 0/1.
    #[serde(rename = "FBS")]
    pub fbs: i64,
    /// Resting electrocardiographic result, 0-2.
    #[serde(rename = "EKG")]
    pub ekg: i64,
    /// Maximum heart rate achieved.
    #[serde(rename = "MaxHR")]
    pub max_hr: i64,
    /// Exercise induced angina, 0/1.
    #[serde(rename = "ExerciseAngina")]
    pub exercise_angina: i64,
    /// ST depression induced by exercise relative to rest.
    #[serde(rename = "STDepression")]
    pub st_depression: f64,
    /// Slope of the peak exercise ST segment, 1-3.
    #[serde(rename = "SlopeST")]
    pub slope_st: i64,
    /// Major vessels coloured by fluoroscopy, 0-3.
    #[serde(rename = "NumVessels")]
    pub num_vessels: i64,
    /// Thallium stress test: 3 normal, 6 fixed defect, 7 reversible defect.
    #[serde(rename = "Thallium")]
    pub thallium: i64,
}

impl PatientRecord {
    /// Builds the single-row feature vector in [`FEATURE_ORDER`].
    pub fn features(&self) -> FeatureVector {
        [
            self.age as f64,
            self.sex as f64,
            self.chest_pain_type as f64,
            self.bp as f64,
            self.cholesterol as f64,
            self.fbs as f64,
            self.ekg as f64,
            self.max_hr as f64,
            self.exercise_angina as f64,
            self.st_depression,
            self.slope_st as f64,
            self.num_vessels as f64,
            self.thallium as f64,
        ]
    }

    /// The documented request example.
    pub fn example() -> Self {
        Self {
            age: 57,
            sex: 1,
            chest_pain_type: 2,
            bp: 124,
            cholesterol: 261,
            fbs: 0,
            ekg: 0,
            max_hr: 141,
            exercise_angina: 0,
            st_depression: 0.3,
            slope_st: 1,
            num_vessels: 0,
            thallium: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_follow_fixed_order() {
        let record = PatientRecord::example();
        let features = record.features();
        assert_eq!(
            features,
            [57.0, 1.0, 2.0, 124.0, 261.0, 0.0, 0.0, 141.0, 0.0, 0.3, 1.0, 0.0, 7.0]
        );
    }

    #[test]
    fn test_deserialize_uses_request_keys() {
        let body = serde_json::json!({
            "Age": 45, "Sex": 0, "ChestPainType": 4, "BP": 150, "Cholesterol": 199,
            "FBS": 1, "EKG": 2, "MaxHR": 98, "ExerciseAngina": 1, "STDepression": 2,
            "SlopeST": 2, "NumVessels": 3, "Thallium": 6, "Unrelated": true
        });
        let record: PatientRecord = serde_json::from_value(body).unwrap();
        assert_eq!(record.age, 45);
        assert_eq!(record.max_hr, 98);
        assert_eq!(record.st_depression, 2.0);
        assert_eq!(record.thallium, 6);
    }

    #[test]
    fn test_deserialize_rejects_missing_and_mistyped_fields() {
        let mut body = serde_json::to_value(PatientRecord::example()).unwrap();
        body.as_object_mut().unwrap().remove("Thallium");
        assert!(serde_json::from_value::<PatientRecord>(body).is_err());

        let mut body = serde_json::to_value(PatientRecord::example()).unwrap();
        body["Age"] = serde_json::json!(57.5);
        assert!(serde_json::from_value::<PatientRecord>(body).is_err());

        let mut body = serde_json::to_value(PatientRecord::example()).unwrap();
        body["BP"] = serde_json::json!("124");
        assert!(serde_json::from_value::<PatientRecord>(body).is_err());
    }

    #[test]
    fn test_order_tables_align() {
        assert_eq!(FEATURE_ORDER.len(), TRAINING_COLUMNS.len());
        assert_eq!(FEATURE_ORDER[9], "STDepression");
        assert_eq!(TRAINING_COLUMNS[9], "ST depression");
    }
}
