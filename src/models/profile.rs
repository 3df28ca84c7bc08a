//! Static clinical metadata for the seven supported lesion classes.
//!
//! The table is indexed directly by `ClassId`; there is no name lookup.
//! Descriptions, urgency, and treatment follow standard dermatology
//! references for the HAM10000 categories.

use serde::Serialize;

use super::enums::{ClassId, RiskTier, CLASS_COUNT};

/// Read-only profile of one lesion class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassProfile {
    pub id: ClassId,
    pub display_name: &'static str,
    pub is_malignant: bool,
    pub risk_tier: RiskTier,
    pub description: &'static str,
    /// How soon a dermatologist should see the lesion.
    pub urgency: &'static str,
    pub treatment: &'static str,
}

pub static CLASS_PROFILES: [ClassProfile; CLASS_COUNT] = [
    ClassProfile {
        id: ClassId::ActinicKeratosis,
        display_name: "Actinic keratoses",
        is_malignant: true,
        risk_tier: RiskTier::Moderate,
        description: "Pre-cancerous lesion caused by sun damage. Can progress to squamous cell carcinoma if untreated.",
        urgency: "Schedule dermatologist within 2-4 weeks",
        treatment: "Cryotherapy, topical treatments, or photodynamic therapy recommended",
    },
    ClassProfile {
        id: ClassId::BasalCellCarcinoma,
        display_name: "Basal cell carcinoma",
        is_malignant: true,
        risk_tier: RiskTier::High,
        description: "Most common form of skin cancer. Rarely metastasizes but can cause local tissue damage.",
        urgency: "Schedule dermatologist within 1-2 weeks",
        treatment: "Surgical excision or Mohs surgery recommended",
    },
    ClassProfile {
        id: ClassId::BenignKeratosis,
        display_name: "Benign keratosis-like lesions",
        is_malignant: false,
        risk_tier: RiskTier::Low,
        description: "Non-cancerous growths that are typically harmless but should be monitored.",
        urgency: "Routine monitoring, annual dermatologic check",
        treatment: "Observation recommended, removal for cosmetic reasons if desired",
    },
    ClassProfile {
        id: ClassId::Dermatofibroma,
        display_name: "Dermatofibroma",
        is_malignant: false,
        risk_tier: RiskTier::Low,
        description: "Benign fibrous nodule, often the result of minor trauma or insect bites.",
        urgency: "Routine monitoring, no immediate action needed",
        treatment: "No treatment needed unless symptomatic or cosmetically bothersome",
    },
    ClassProfile {
        id: ClassId::MelanocyticNevus,
        display_name: "Melanocytic nevi",
        is_malignant: false,
        risk_tier: RiskTier::Low,
        description: "Common moles that are typically benign but should be monitored for changes.",
        urgency: "Annual monitoring for changes (ABCDE rule)",
        treatment: "Routine surveillance, removal if atypical features develop",
    },
    ClassProfile {
        id: ClassId::Melanoma,
        display_name: "Melanoma",
        is_malignant: true,
        risk_tier: RiskTier::Critical,
        description: "Aggressive skin cancer with high metastatic potential. Early detection crucial for survival.",
        urgency: "URGENT - Contact dermatologist within 24-48 hours",
        treatment: "Immediate wide local excision and staging workup required",
    },
    ClassProfile {
        id: ClassId::VascularLesion,
        display_name: "Vascular lesions",
        is_malignant: false,
        risk_tier: RiskTier::Low,
        description: "Blood vessel related lesions including hemangiomas and angiomas.",
        urgency: "Routine evaluation, no immediate concern",
        treatment: "Usually no treatment needed unless bleeding or cosmetic concerns",
    },
];

impl ClassId {
    pub fn profile(self) -> &'static ClassProfile {
        &CLASS_PROFILES[self.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_class_id() {
        for id in ClassId::ALL {
            assert_eq!(id.profile().id, id, "Profile at {} has wrong id", id.index());
            assert_eq!(id.profile().display_name, id.as_str());
        }
    }

    #[test]
    fn malignant_classes() {
        let malignant: Vec<ClassId> = CLASS_PROFILES
            .iter()
            .filter(|p| p.is_malignant)
            .map(|p| p.id)
            .collect();
        assert_eq!(
            malignant,
            vec![
                ClassId::ActinicKeratosis,
                ClassId::BasalCellCarcinoma,
                ClassId::Melanoma
            ]
        );
    }

    #[test]
    fn melanoma_is_only_critical_tier() {
        let critical: Vec<_> = CLASS_PROFILES
            .iter()
            .filter(|p| p.risk_tier == RiskTier::Critical)
            .collect();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].id, ClassId::Melanoma);
    }

    #[test]
    fn every_profile_has_guidance() {
        for p in &CLASS_PROFILES {
            assert!(!p.description.is_empty());
            assert!(!p.urgency.is_empty());
            assert!(!p.treatment.is_empty());
        }
    }
}
