//! Static description of the request fields.

use serde::Serialize;

use crate::record::{PatientRecord, FEATURE_COUNT};

/// Name, type and meaning of one request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
}

/// Field descriptions plus a sample record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCatalog {
    pub features: [FeatureInfo; FEATURE_COUNT],
    pub example: PatientRecord,
}

const fn int(name: &'static str, description: &'static str) -> FeatureInfo {
    FeatureInfo { name, kind: "int", description }
}

const FEATURES: [FeatureInfo; FEATURE_COUNT] = [
    int("Age", "Age of the patient in years"),
    int("Sex", "0 = Female, 1 = Male"),
    int("ChestPainType", "Type of chest pain (1-4)"),
    int("BP", "Blood pressure in mm Hg"),
    int("Cholesterol", "Cholesterol level in mg/dL"),
    int("FBS", "Fasting blood sugar > 120 mg/dL: 1 = Yes, 0 = No"),
    int("EKG", "Resting electrocardiographic results (0-2)"),
    int("MaxHR", "Maximum heart rate achieved"),
    int("ExerciseAngina", "Exercise induced angina: 0 = No, 1 = Yes"),
    FeatureInfo {
        name: "STDepression",
        kind: "float",
        description: "ST depression induced by exercise relative to rest",
    },
    int("SlopeST", "Slope of the peak exercise ST segment: 1-3"),
    int("NumVessels", "Number of major vessels colored by flourosopy: 0-3"),
    int(
        "Thallium",
        "Thallium stress test result: 3 = normal, 6 = fixed defect, 7 = reversible defect",
    ),
];

/// Returns the field catalog. Independent of any loaded model.
pub fn feature_catalog() -> FeatureCatalog {
    FeatureCatalog {
        features: FEATURES,
        example: PatientRecord {
            age: 57,
            sex: 1,
            chest_pain_type: 2,
            bp: 124,
            cholesterol: 257,
            fbs: 1,
            ekg: 2,
            max_hr: 141,
            exercise_angina: 1,
            st_depression: 0.4,
            slope_st: 1,
            num_vessels: 0,
            thallium: 3,
        },
    }
}
