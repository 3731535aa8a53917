//! Soft-deletion state for persisted records.
//!
//! Tables carry a nullable `deleted_at` column. Rows decode that column into
//! [`RecordState`] so code that must skip deleted records matches on a
//! variant instead of remembering an `IS NULL` convention.

use serde::Serialize;

use crate::types::Timestamp;

/// Whether a stored record is live or has been soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RecordState {
    #[default]
    Active,
    Deleted {
        at: Timestamp,
    },
}

impl RecordState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// The deletion timestamp, if the record has been soft-deleted.
    pub fn deleted_at(&self) -> Option<Timestamp> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(*at),
        }
    }
}

impl From<Option<Timestamp>> for RecordState {
    fn from(deleted_at: Option<Timestamp>) -> Self {
        match deleted_at {
            None => Self::Active,
            Some(at) => Self::Deleted { at },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn null_deleted_at_is_active() {
        let state = RecordState::from(None);
        assert!(state.is_active());
        assert_eq!(state.deleted_at(), None);
    }

    #[test]
    fn deleted_at_round_trips() {
        let at = Utc.with_ymd_and_hms(2025, 5, 18, 8, 0, 0).unwrap();
        let state = RecordState::from(Some(at));
        assert!(!state.is_active());
        assert_eq!(state.deleted_at(), Some(at));
    }
}
