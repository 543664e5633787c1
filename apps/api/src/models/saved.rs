use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::ResumeData;

/// A persisted snapshot of a CV plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub id: Uuid,
    pub title: String,
    /// Last write time; also the optimistic-concurrency token for updates.
    pub date: DateTime<Utc>,
    pub resume_data: ResumeData,
}

/// Partial update applied by `ResumeRepository::update`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePatch {
    pub title: Option<String>,
    pub resume_data: Option<ResumeData>,
    /// When set, the update only applies if the stored `date` still equals it.
    pub if_unmodified_since: Option<DateTime<Utc>>,
}

impl ResumePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn if_unmodified_since(mut self, date: DateTime<Utc>) -> Self {
        self.if_unmodified_since = Some(date);
        self
    }
}
