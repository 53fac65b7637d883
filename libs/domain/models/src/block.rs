use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::index::SearchIndex;

/// Lifecycle state of a search block.
///
/// Legal transitions: `NOT_STARTED -> IN_PROGRESS -> FINISHED`,
/// `NOT_STARTED -> IN_PROGRESS -> FAILED`, `FAILED -> IN_PROGRESS` (retry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchBlockState {
    NotStarted,
    InProgress,
    Finished,
    Failed,
}

impl SearchBlockState {
    /// The SQL-facing spelling used in the block store schema.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            SearchBlockState::NotStarted => "NOT_STARTED",
            SearchBlockState::InProgress => "IN_PROGRESS",
            SearchBlockState::Finished => "FINISHED",
            SearchBlockState::Failed => "FAILED",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "NOT_STARTED" => Some(SearchBlockState::NotStarted),
            "IN_PROGRESS" => Some(SearchBlockState::InProgress),
            "FINISHED" => Some(SearchBlockState::Finished),
            "FAILED" => Some(SearchBlockState::Failed),
            _ => None,
        }
    }
}

/// A search block: a contiguous, inclusive index range together with its
/// lifecycle metadata. `starting_search_index` and `ending_search_index`
/// always share the same `SearchIndex` variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub starting_search_index: SearchIndex,
    pub ending_search_index: SearchIndex,
    pub state: SearchBlockState,
    pub creation_time: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub block_hash: Option<String>,
}

impl SearchMetadata {
    /// A freshly generated, unclaimed block.
    pub fn new_not_started(
        starting_search_index: SearchIndex,
        ending_search_index: SearchIndex,
        creation_time: DateTime<Utc>,
    ) -> Self {
        Self {
            starting_search_index,
            ending_search_index,
            state: SearchBlockState::NotStarted,
            creation_time,
            start_time: None,
            end_time: None,
            block_hash: None,
        }
    }

    pub fn search_index_type(&self) -> &'static str {
        self.starting_search_index.index_name()
    }
}
