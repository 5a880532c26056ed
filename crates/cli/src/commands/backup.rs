//! Backup command.
//!
//! # Usage
//!
//! ```bash
//! taplist-cli backup --out /var/backups/taplist
//! ```
//!
//! Produces:
//!
//! ```text
//! <out>/taplist-backup-20250301-020000/
//! ├── taplist.db     # VACUUM INTO snapshot, safe while the server runs
//! └── uploads/       # copy of the upload directory
//! ```
//!
//! Shipping the folder off-host is left to the operator (cron + `aws s3 sync`
//! or similar).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

use taplist_server::config::{ConfigError, DATABASE_FILE, TaplistConfig};
use taplist_server::db::{self, RepositoryError};

/// Errors that can occur while backing up.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),

    #[error("Snapshot failed: {0}")]
    Snapshot(#[from] sqlx::Error),

    #[error("File copy failed: {0}")]
    Io(#[from] io::Error),

    #[error("Backup path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("Backup already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// What a backup wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    /// Folder holding the snapshot.
    pub dir: PathBuf,
    /// Number of uploaded files copied.
    pub files_copied: u64,
}

/// Back up the configured store and upload directory into `out_dir`.
///
/// # Errors
///
/// Returns `BackupError` if the store cannot be opened or a file cannot be written.
pub async fn run(out_dir: &Path) -> Result<BackupReport, BackupError> {
    let config = TaplistConfig::from_env()?;
    let pool = db::open(&config.database_path()).await?;

    let report = backup_to(&pool, &config.upload_dir, out_dir, Utc::now()).await?;
    pool.close().await;

    tracing::info!(
        dir = %report.dir.display(),
        files_copied = report.files_copied,
        "Backup complete!"
    );
    Ok(report)
}

/// Write a snapshot of `pool` and a copy of `upload_dir` under `out_dir`.
///
/// # Errors
///
/// Returns `BackupError` if the target exists, the snapshot fails, or a copy fails.
pub async fn backup_to(
    pool: &SqlitePool,
    upload_dir: &Path,
    out_dir: &Path,
    now: DateTime<Utc>,
) -> Result<BackupReport, BackupError> {
    let dir = out_dir.join(format!("taplist-backup-{}", now.format("%Y%m%d-%H%M%S")));
    if dir.exists() {
        return Err(BackupError::AlreadyExists(dir));
    }
    fs::create_dir_all(&dir)?;

    let snapshot = dir.join(DATABASE_FILE);
    let snapshot_str = snapshot
        .to_str()
        .ok_or_else(|| BackupError::InvalidPath(snapshot.clone()))?;

    tracing::info!(path = %snapshot.display(), "Writing database snapshot...");
    sqlx::query("VACUUM INTO ?")
        .bind(snapshot_str)
        .execute(pool)
        .await?;

    let files_copied = if upload_dir.is_dir() {
        tracing::info!(from = %upload_dir.display(), "Copying uploads...");
        copy_dir(upload_dir, &dir.join("uploads"))?
    } else {
        tracing::warn!(path = %upload_dir.display(), "Upload directory missing, skipping");
        0
    };

    Ok(BackupReport { dir, files_copied })
}

/// Recursively copy `from` into `to`, returning the number of files copied.
fn copy_dir(from: &Path, to: &Path) -> io::Result<u64> {
    fs::create_dir_all(to)?;
    let mut copied = 0;

    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
