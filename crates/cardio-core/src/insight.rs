//! Clinical insight rules evaluated against the raw (unscaled) record.
//!
//! Each rule looks at one field and contributes at most one string. Rules are
//! independent: they run in table order and none suppresses another.

use crate::record::PatientRecord;

/// A single insight rule.
pub type InsightRule = fn(&PatientRecord) -> Option<String>;

/// The rule table, in output order.
pub const INSIGHT_RULES: [(&str, InsightRule); 9] = [
    ("thallium", thallium),
    ("max_hr", max_heart_rate),
    ("fbs", fasting_blood_sugar),
    ("num_vessels", vessels),
    ("age", age),
    ("exercise_angina", exercise_angina),
    ("bp", blood_pressure),
    ("cholesterol", cholesterol),
    ("st_depression", st_depression),
];

/// Runs every rule in order and collects the insights that fired.
pub fn clinical_insights(record: &PatientRecord) -> Vec<String> {
    INSIGHT_RULES
        .iter()
        .filter_map(|(_, rule)| rule(record))
        .collect()
}

fn thallium(r: &PatientRecord) -> Option<String> {
    let text = match r.thallium {
        3 => "Thallium stress test is normal: Low risk indicator",
        6 => "Thallium stress test shows fixed defect: Moderate risk indicator",
        7 => "Thallium stress test shows reversible defect: High risk indicator",
        _ => return None,
    };
    Some(text.to_string())
}

fn max_heart_rate(r: &PatientRecord) -> Option<String> {
    if r.max_hr > 140 {
        Some(format!(
            "High maximum heart rate ({}): Negative correlation with heart disease",
            r.max_hr
        ))
    } else if r.max_hr < 100 {
        Some(format!(
            "Low maximum heart rate ({}): May indicate reduced exercise capacity",
            r.max_hr
        ))
    } else {
        None
    }
}

fn fasting_blood_sugar(r: &PatientRecord) -> Option<String> {
    let text = if r.fbs == 1 {
        "Fasting blood sugar > 120 mg/dL: Slight risk factor"
    } else {
        "Normal fasting blood sugar: Good indicator"
    };
    Some(text.to_string())
}

fn vessels(r: &PatientRecord) -> Option<String> {
    if r.num_vessels == 0 {
        Some("No major vessels affected: Positive indicator".to_string())
    } else {
        Some(format!(
            "{} major vessel(s) affected: This increases risk",
            r.num_vessels
        ))
    }
}

fn age(r: &PatientRecord) -> Option<String> {
    if r.age > 60 {
        Some(format!("Age {}: Increased risk factor", r.age))
    } else if r.age < 40 {
        Some(format!("Age {}: Lower risk factor", r.age))
    } else {
        None
    }
}

fn exercise_angina(r: &PatientRecord) -> Option<String> {
    (r.exercise_angina == 1)
        .then(|| "Exercise-induced angina present: Significant risk factor".to_string())
}

fn blood_pressure(r: &PatientRecord) -> Option<String> {
    if r.bp > 140 {
        Some(format!("Elevated blood pressure ({} mm Hg): Risk factor", r.bp))
    } else if r.bp < 90 {
        Some(format!(
            "Low blood pressure ({} mm Hg): May require investigation",
            r.bp
        ))
    } else {
        None
    }
}

fn cholesterol(r: &PatientRecord) -> Option<String> {
    if r.cholesterol > 240 {
        Some(format!("High cholesterol ({} mg/dL): Risk factor", r.cholesterol))
    } else if r.cholesterol < 200 {
        Some(format!(
            "Normal cholesterol ({} mg/dL): Good indicator",
            r.cholesterol
        ))
    } else {
        None
    }
}

fn st_depression(r: &PatientRecord) -> Option<String> {
    (r.st_depression > 1.0).then(|| {
        format!(
            "Significant ST depression ({}): Indicates myocardial ischemia",
            format_measurement(r.st_depression)
        )
    })
}

/// Renders a float with at least one decimal place (`2.0`, `2.35`).
fn format_measurement(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
