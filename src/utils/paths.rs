//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Everything lives under ~/.mirror/.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Mirror directory (~/.mirror/)
pub fn mirror_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".mirror"))
}

/// Get the config file path (~/.mirror/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(mirror_dir()?.join("config.json"))
}

/// Get the database file path (~/.mirror/reports.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(mirror_dir()?.join("reports.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Mirror directory, creating if it doesn't exist
pub fn ensure_mirror_dir() -> AppResult<PathBuf> {
    let path = mirror_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir() {
        let home = home_dir();
        assert!(home.is_ok());
    }

    #[test]
    fn test_mirror_dir() {
        let dir = mirror_dir();
        assert!(dir.is_ok());
        assert!(dir.unwrap().to_string_lossy().contains(".mirror"));
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.is_ok());
        assert!(path.unwrap().to_string_lossy().contains("config.json"));
    }

    #[test]
    fn test_database_path() {
        let path = database_path();
        assert!(path.is_ok());
        assert!(path.unwrap().to_string_lossy().contains("reports.db"));
    }
}
