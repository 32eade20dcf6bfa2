//! Report Service
//!
//! Read/create operations over the report store: validate a profile, mint a
//! short code, and expose the stored report and its parsed sections.

use std::sync::Arc;

use tracing::info;

use mirror_core::{Profile, Report, ReportStore, SectionMap};

use crate::models::report::ReportView;
use crate::utils::error::AppResult;
use crate::utils::short_code::mint_short_code;

/// Service for report lookup and creation.
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Validate the profile, mint a short code and create a pending report.
    /// Returns the short code.
    pub async fn create_report(&self, profile: &Profile) -> AppResult<String> {
        profile.validate()?;

        let short_code = mint_short_code();
        self.store.create(&short_code, profile).await?;
        info!(short_code = %short_code, "report created");

        Ok(short_code)
    }

    /// Fetch a report by short code.
    pub async fn get_report(&self, short_code: &str) -> AppResult<Report> {
        Ok(self.store.get(short_code).await?)
    }

    /// Fetch a report and parse its stored text into sections.
    pub async fn get_sections(&self, short_code: &str) -> AppResult<SectionMap> {
        Ok(self.get_report(short_code).await?.sections())
    }

    /// Fetch a report prepared for display.
    pub async fn get_view(&self, short_code: &str) -> AppResult<ReportView> {
        Ok(ReportView::from(&self.get_report(short_code).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use mirror_core::{
        ChildhoodSound, ConflictResponse, FamilyRole, FatherArchetype, Gender, LifeStage,
        LoopPattern, MotherArchetype, ReportStatus, SocialMask,
    };

    fn test_profile() -> Profile {
        Profile {
            gender: Gender::Male,
            life_stage: LifeStage::Reconciled,
            siblings: vec![FamilyRole::Me],
            father_archetype: FatherArchetype::Secure,
            mother_archetype: MotherArchetype::Secure,
            conflict_response: ConflictResponse::Fight,
            social_mask: SocialMask::Clown,
            childhood_sound: ChildhoodSound::Silence,
            loop_pattern: LoopPattern::HollowMan,
        }
    }

    fn service() -> (ReportService, Arc<Database>) {
        let db = Arc::new(Database::new_in_memory().unwrap());
        (ReportService::new(db.clone()), db)
    }

    #[tokio::test]
    async fn test_create_report_mints_and_persists() {
        let (svc, db) = service();

        let code = svc.create_report(&test_profile()).await.unwrap();
        assert!(code.starts_with("MR-"));

        let report = db.get(&code).await.unwrap();
        assert_eq!(report.status(), ReportStatus::Pending);
        assert_eq!(report.profile, test_profile());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_profile() {
        let (svc, _db) = service();

        let mut profile = test_profile();
        profile.siblings.clear();
        assert!(svc.create_report(&profile).await.is_err());
    }

    #[tokio::test]
    async fn test_sections_of_pending_report_are_empty() {
        let (svc, _db) = service();

        let code = svc.create_report(&test_profile()).await.unwrap();
        let sections = svc.get_sections(&code).await.unwrap();
        assert!(sections.is_empty());
    }

    #[tokio::test]
    async fn test_view_of_complete_report() {
        let (svc, db) = service();

        let code = svc.create_report(&test_profile()).await.unwrap();
        db.update_text(&code, "【镜像投射】A【病灶溯源】B【宿命终局】C")
            .await
            .unwrap();

        let view = svc.get_view(&code).await.unwrap();
        assert_eq!(view.status, ReportStatus::Complete);
        assert_eq!(view.diagnosis_title, "幸运的少数");
        assert_eq!(view.sections.fatal_simulation, "C");
    }
}
