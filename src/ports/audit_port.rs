//! Append-only audit store port trait.

use crate::domain::decision::QuarterlyDecision;
use crate::domain::error::DrawdownError;

pub trait AuditPort {
    /// Append exactly one decision as a self-contained record. Prior records are never
    /// rewritten.
    fn append(&self, decision: &QuarterlyDecision) -> Result<(), DrawdownError>;
}
