//! Files linked to a deal through a cloud storage provider.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DealId, FileId};

/// Import-processing status of a linked file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Processing,
    Completed,
    Failed,
}

/// Filename fragments that identify a proposal-class document.
const PROPOSAL_FRAGMENTS: &[&str] = &["proposal", "quote", "pricing", "sow", "contract"];

/// A file linked to a deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealFile {
    pub id: FileId,
    pub deal_id: DealId,
    pub filename: String,
    pub processing_status: FileStatus,
}

impl DealFile {
    /// True when the filename marks this as a proposal/quote/pricing/
    /// SOW/contract document.
    pub fn looks_like_proposal(&self) -> bool {
        let name = self.filename.to_lowercase();
        PROPOSAL_FRAGMENTS.iter().any(|f| name.contains(f))
    }
}
