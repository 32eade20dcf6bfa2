//! Application State
//!
//! Global state containing all services, shared by the CLI entry points.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::{GenerationService, ReportService};
use crate::storage::{ConfigService, Database};
use crate::utils::error::{AppError, AppResult};

use mirror_core::ReportStore;
use mirror_llm::{Generator, OpenAiGenerator};

/// Application state shared across entry points
pub struct AppState {
    /// SQLite database with connection pool
    database: Arc<RwLock<Option<Arc<Database>>>>,
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Report creation and lookup
    reports: Arc<RwLock<Option<Arc<ReportService>>>>,
    /// Generation run orchestration
    generation: Arc<RwLock<Option<Arc<GenerationService>>>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            database: Arc::new(RwLock::new(None)),
            config: Arc::new(RwLock::new(None)),
            reports: Arc::new(RwLock::new(None)),
            generation: Arc::new(RwLock::new(None)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize all services
    pub async fn initialize(&self) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        // Initialize database
        let db = Arc::new(Database::new()?);
        {
            let mut db_lock = self.database.write().await;
            *db_lock = Some(Arc::clone(&db));
        }

        // Initialize config
        let app_config = {
            let config = ConfigService::new()?;
            let app_config = config.get_config_clone();
            let mut config_lock = self.config.write().await;
            *config_lock = Some(config);
            app_config
        };

        // Wire the services over the database store and configured generator
        {
            let store: Arc<dyn ReportStore> = db;
            let generator: Arc<dyn Generator> =
                Arc::new(OpenAiGenerator::new(app_config.generator_config()));

            let mut reports_lock = self.reports.write().await;
            *reports_lock = Some(Arc::new(ReportService::new(Arc::clone(&store))));

            let mut generation_lock = self.generation.write().await;
            *generation_lock = Some(Arc::new(GenerationService::new(store, generator)));
        }

        *initialized = true;
        Ok(())
    }

    /// Check if database is healthy
    pub fn is_database_healthy(&self) -> bool {
        // Use try_read to avoid blocking
        if let Ok(guard) = self.database.try_read() {
            if let Some(ref db) = *guard {
                return db.is_healthy();
            }
        }
        false
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut guard = self.config.write().await;
        match &mut *guard {
            Some(config) => config.update_config(update),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Get the report service
    pub async fn reports(&self) -> AppResult<Arc<ReportService>> {
        let guard = self.reports.read().await;
        guard
            .as_ref()
            .cloned()
            .ok_or_else(|| AppError::internal("Report service not initialized"))
    }

    /// Get the generation service
    pub async fn generation(&self) -> AppResult<Arc<GenerationService>> {
        let guard = self.generation.read().await;
        guard
            .as_ref()
            .cloned()
            .ok_or_else(|| AppError::internal("Generation service not initialized"))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uninitialized_state_errors() {
        let state = AppState::new();
        assert!(state.reports().await.is_err());
        assert!(state.generation().await.is_err());
        assert!(state.get_config().await.is_err());
        assert!(!state.is_database_healthy());
    }
}
