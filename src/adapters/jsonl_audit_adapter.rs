//! Append-only JSON Lines audit log.
//!
//! One JSON object per line: every decision field plus `logged_at`. The file is
//! opened in append mode for each record and created if missing.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::domain::decision::QuarterlyDecision;
use crate::domain::error::DrawdownError;
use crate::ports::audit_port::AuditPort;

pub struct JsonlAuditAdapter {
    path: PathBuf,
}

#[derive(Serialize)]
struct AuditRecord<'a> {
    #[serde(flatten)]
    decision: &'a QuarterlyDecision,
    logged_at: NaiveDate,
}

impl JsonlAuditAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn audit_error(&self, reason: impl std::fmt::Display) -> DrawdownError {
        DrawdownError::Audit {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl AuditPort for JsonlAuditAdapter {
    fn append(&self, decision: &QuarterlyDecision) -> Result<(), DrawdownError> {
        let record = AuditRecord {
            decision,
            logged_at: Local::now().date_naive(),
        };
        let line = serde_json::to_string(&record).map_err(|e| self.audit_error(e))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.audit_error(e))?;
        writeln!(file, "{line}").map_err(|e| self.audit_error(e))?;

        info!(path = %self.path.display(), quarter = %decision.quarter, "audit record appended");
        Ok(())
    }
}
