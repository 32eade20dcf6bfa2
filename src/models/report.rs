//! Report View Models
//!
//! Read-side shapes returned to the CLI/HTTP layer. The stored `Report`
//! keeps raw text; the view carries the parsed sections and the diagnosis
//! so callers never re-derive them.

use serde::{Deserialize, Serialize};

use mirror_core::{classify, Report, ReportStatus, SectionMap};

/// A report prepared for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub short_code: String,
    pub status: ReportStatus,
    /// Diagnosis title, Chinese
    pub diagnosis_title: String,
    /// Diagnosis title, English
    pub diagnosis_title_translated: String,
    pub sections: SectionMap,
    pub created_at: String,
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        let diagnosis = classify(
            report.profile.father_archetype,
            report.profile.mother_archetype,
        );
        Self {
            short_code: report.short_code.clone(),
            status: report.status(),
            diagnosis_title: diagnosis.title.to_string(),
            diagnosis_title_translated: diagnosis.title_translated.to_string(),
            sections: report.sections(),
            created_at: report.created_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_core::{
        ChildhoodSound, ConflictResponse, FamilyRole, FatherArchetype, Gender, LifeStage,
        LoopPattern, MotherArchetype, Profile, SocialMask,
    };

    #[test]
    fn test_view_derives_diagnosis_and_sections() {
        let report = Report {
            short_code: "MR-TEST-0001".to_string(),
            profile: Profile {
                gender: Gender::Female,
                life_stage: LifeStage::HighPressure,
                siblings: vec![FamilyRole::OlderBrother, FamilyRole::Me],
                father_archetype: FatherArchetype::Dictator,
                mother_archetype: MotherArchetype::Victim,
                conflict_response: ConflictResponse::Fawn,
                social_mask: SocialMask::Savior,
                childhood_sound: ChildhoodSound::Argument,
                loop_pattern: LoopPattern::Prisoner,
            },
            generated_text: "【镜像投射】A【病灶溯源】B【宿命终局】C".to_string(),
            created_at: "2026-02-01T00:00:00Z".to_string(),
        };

        let view = ReportView::from(&report);
        assert_eq!(view.status, ReportStatus::Complete);
        assert_eq!(view.diagnosis_title, "悲剧拯救者");
        assert_eq!(view.sections.mirror, "A");
    }
}
