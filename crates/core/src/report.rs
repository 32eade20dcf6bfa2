//! Report Entity
//!
//! The persisted report record and its two-state lifecycle. A report is
//! created with empty text (`Pending`) and transitions to `Complete` exactly
//! once, when a generation run commits non-empty text. It never goes back.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;
use crate::sections::{self, SectionMap};

/// Lifecycle state of a report, derived from its stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Created, text not yet generated (or generation failed).
    Pending,
    /// Non-empty text committed.
    Complete,
}

/// One persisted report, keyed by its public short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Opaque public identifier, globally unique.
    pub short_code: String,
    /// The questionnaire answers, stored verbatim.
    pub profile: Profile,
    /// Full generated text; empty string means not yet generated.
    pub generated_text: String,
    /// Creation timestamp (RFC 3339, set by the store).
    pub created_at: String,
}

impl Report {
    /// Status is a function of the stored text, never tracked separately.
    pub fn status(&self) -> ReportStatus {
        if self.generated_text.is_empty() {
            ReportStatus::Pending
        } else {
            ReportStatus::Complete
        }
    }

    /// Parse the stored text into its three sections. Derived fresh on every
    /// call; an empty pending report yields an empty map.
    pub fn sections(&self) -> SectionMap {
        sections::parse(&self.generated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{
        ChildhoodSound, ConflictResponse, FamilyRole, FatherArchetype, Gender, LifeStage,
        LoopPattern, MotherArchetype, SocialMask,
    };

    fn report(text: &str) -> Report {
        Report {
            short_code: "MR-ABC123-XY9Z".to_string(),
            profile: Profile {
                gender: Gender::Male,
                life_stage: LifeStage::Lost,
                siblings: vec![FamilyRole::Me],
                father_archetype: FatherArchetype::Absent,
                mother_archetype: MotherArchetype::Engulfing,
                conflict_response: ConflictResponse::Flight,
                social_mask: SocialMask::Rebel,
                childhood_sound: ChildhoodSound::Silence,
                loop_pattern: LoopPattern::GhostShip,
            },
            generated_text: text.to_string(),
            created_at: "2026-01-15T09:30:00Z".to_string(),
        }
    }

    #[test]
    fn test_status_is_derived_from_text() {
        assert_eq!(report("").status(), ReportStatus::Pending);
        assert_eq!(report("【镜像投射】done").status(), ReportStatus::Complete);
    }

    #[test]
    fn test_sections_of_pending_report_are_empty() {
        assert!(report("").sections().is_empty());
    }

    #[test]
    fn test_sections_parse_stored_text() {
        let sections = report("【镜像投射】A【病灶溯源】B【宿命终局】C").sections();
        assert_eq!(sections.mirror, "A");
        assert_eq!(sections.origin, "B");
        assert_eq!(sections.fatal_simulation, "C");
    }
}
