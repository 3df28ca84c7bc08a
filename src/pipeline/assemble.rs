//! Result assembly: distribution + metadata → `PredictionResult`.

use crate::models::{
    AbcdeResult, ClassId, ClassProbabilities, MedicalFeatureSummary, PredictionResult,
    RankedPrediction, ABCDE_MAX_SCORE,
};

/// Confidence thresholds for the analysis notes.
pub mod thresholds {
    pub const HIGH_CONFIDENCE: f64 = 0.8;
    pub const MODERATE_CONFIDENCE: f64 = 0.6;
}

/// Build the caller-facing result.
///
/// The primary class is the arg-max (ties to the lowest class id). The
/// ranked list is sorted by descending confidence; equal confidences keep
/// class-id order.
pub fn assemble_prediction(
    probabilities: &ClassProbabilities,
    abcde: Option<AbcdeResult>,
    medical_features: Option<MedicalFeatureSummary>,
) -> PredictionResult {
    let primary = probabilities.argmax();
    let confidence = probabilities.get(primary);
    let profile = primary.profile();

    let mut ranked: Vec<RankedPrediction> = probabilities
        .iter()
        .map(|(id, p)| RankedPrediction {
            class_id: id,
            class_name: id.profile().display_name.to_string(),
            confidence: p,
            description: id.profile().description.to_string(),
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let analysis_notes = analysis_notes(primary, confidence, abcde.as_ref());

    let (abcde_score, abcde_max_score, abcde_reasons) = match abcde {
        Some(r) => (Some(r.score), Some(ABCDE_MAX_SCORE), Some(r.reasons)),
        None => (None, None, None),
    };

    PredictionResult {
        class_id: primary,
        predicted_class: profile.display_name.to_string(),
        confidence,
        risk_level: profile.risk_tier,
        is_malignant: profile.is_malignant,
        description: profile.description.to_string(),
        urgency: profile.urgency.to_string(),
        treatment: profile.treatment.to_string(),
        all_predictions: ranked,
        abcde_score,
        abcde_max_score,
        abcde_reasons,
        medical_features,
        analysis_notes,
    }
}

/// Short free-text interpretation of the primary finding.
pub fn analysis_notes(primary: ClassId, confidence: f64, abcde: Option<&AbcdeResult>) -> String {
    let confidence_note = if confidence > thresholds::HIGH_CONFIDENCE {
        "High confidence prediction based on characteristic dermoscopic features."
    } else if confidence > thresholds::MODERATE_CONFIDENCE {
        "Moderate confidence. Clinical correlation recommended."
    } else {
        "Lower confidence. Multiple differential diagnoses possible."
    };
    let mut notes = vec![confidence_note.to_string()];

    match primary {
        ClassId::Melanoma => notes.push(
            "URGENT: Melanoma suspected. Immediate dermatologic evaluation required.".to_string(),
        ),
        ClassId::BasalCellCarcinoma | ClassId::ActinicKeratosis => notes.push(
            "Malignant lesion suspected. Timely dermatologic assessment recommended.".to_string(),
        ),
        _ => {}
    }

    if let Some(result) = abcde {
        notes.push(result.interpretation());
    }

    notes.join(" ")
}
