//! Booking lifecycle status, visibility policy and window rules.
//!
//! A booking reserves the inclusive window `[start, end]` during which its
//! slides are shown on the public carousel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::RecordState;
use crate::template::TemplateType;
use crate::types::{DbId, Timestamp};

/// Maximum length of `recipient_name` / `hirer_name`.
pub const MAX_NAME_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Booking lifecycle status. Stored as lowercase text in `bookings.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Active,
    Completed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [Self::Pending, Self::Active, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(CoreError::Validation(format!(
                "Unknown booking status '{other}'. Expected one of: pending, active, completed"
            ))),
        }
    }
}

impl TryFrom<String> for BookingStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Visibility policy
// ---------------------------------------------------------------------------

/// Which booking statuses make a booking eligible for the public carousel.
///
/// The default admits `pending` as well as `active`, so content shows up at
/// the start of the window without waiting for the lifecycle job to flip the
/// status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityPolicy {
    statuses: Vec<BookingStatus>,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self {
            statuses: vec![BookingStatus::Pending, BookingStatus::Active],
        }
    }
}

impl VisibilityPolicy {
    /// Build a policy from an explicit status set. Duplicates are removed.
    pub fn new(statuses: impl IntoIterator<Item = BookingStatus>) -> Result<Self, CoreError> {
        let mut unique: Vec<BookingStatus> = Vec::new();
        for status in statuses {
            if !unique.contains(&status) {
                unique.push(status);
            }
        }
        if unique.is_empty() {
            return Err(CoreError::Validation(
                "Visibility policy must admit at least one booking status".into(),
            ));
        }
        Ok(Self { statuses: unique })
    }

    /// Parse a comma-separated status list such as `"pending,active"`.
    pub fn parse(list: &str) -> Result<Self, CoreError> {
        let statuses = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(BookingStatus::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(statuses)
    }

    pub fn statuses(&self) -> &[BookingStatus] {
        &self.statuses
    }

    pub fn allows(&self, status: BookingStatus) -> bool {
        self.statuses.contains(&status)
    }
}

// ---------------------------------------------------------------------------
// Booking window
// ---------------------------------------------------------------------------

/// The slice of a booking the active-content resolver cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWindow {
    pub id: DbId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub status: BookingStatus,
    pub template_type: TemplateType,
    pub state: RecordState,
}

impl BookingWindow {
    /// Inclusive on both ends.
    pub fn covers(&self, now: Timestamp) -> bool {
        self.start <= now && now <= self.end
    }
}

/// Whether two inclusive windows share at least one instant.
pub fn windows_overlap(
    a_start: Timestamp,
    a_end: Timestamp,
    b_start: Timestamp,
    b_end: Timestamp,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a booking window is non-empty.
pub fn validate_booking_window(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if start >= end {
        return Err(CoreError::Validation(format!(
            "startDate ({start}) must be before endDate ({end})"
        )));
    }
    Ok(())
}

/// Validate a person name field (`recipientName`, `hirerName`).
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 5, 18, hour, 0, 0).unwrap()
    }

    #[test]
    fn status_parses_and_displays() {
        for status in BookingStatus::ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
            assert_eq!(status.to_string(), status.as_str());
        }
        assert_matches!(
            "cancelled".parse::<BookingStatus>(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn default_policy_admits_pending_and_active() {
        let policy = VisibilityPolicy::default();
        assert!(policy.allows(BookingStatus::Pending));
        assert!(policy.allows(BookingStatus::Active));
        assert!(!policy.allows(BookingStatus::Completed));
    }

    #[test]
    fn policy_parse_trims_and_dedupes() {
        let policy = VisibilityPolicy::parse(" active , active,").unwrap();
        assert_eq!(policy.statuses(), &[BookingStatus::Active]);
    }

    #[test]
    fn policy_rejects_empty_and_unknown() {
        assert_matches!(VisibilityPolicy::parse(""), Err(CoreError::Validation(_)));
        assert_matches!(
            VisibilityPolicy::parse("pending,archived"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn covers_is_inclusive() {
        let window = BookingWindow {
            id: 1,
            start: at(8),
            end: at(12),
            status: BookingStatus::Pending,
            template_type: TemplateType::Immersive,
            state: RecordState::Active,
        };
        assert!(window.covers(at(8)));
        assert!(window.covers(at(12)));
        assert!(!window.covers(at(12) + Duration::seconds(1)));
        assert!(!window.covers(at(8) - Duration::seconds(1)));
    }

    #[test]
    fn overlap_detects_containment_and_touching_edges() {
        // New window fully inside an existing one.
        assert!(windows_overlap(at(8), at(12), at(9), at(10)));
        // Touching end/start counts as overlap (inclusive windows).
        assert!(windows_overlap(at(8), at(10), at(10), at(12)));
        assert!(!windows_overlap(at(8), at(9), at(10), at(12)));
    }

    #[test]
    fn window_must_be_non_empty() {
        assert!(validate_booking_window(at(8), at(9)).is_ok());
        assert_matches!(
            validate_booking_window(at(9), at(9)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_booking_window(at(10), at(9)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn names_must_be_present() {
        assert!(validate_name("recipientName", "Anna").is_ok());
        assert_matches!(
            validate_name("recipientName", "   "),
            Err(CoreError::Validation(msg)) if msg.contains("recipientName")
        );
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_matches!(validate_name("hirerName", &long), Err(CoreError::Validation(_)));
    }
}
