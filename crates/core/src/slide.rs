//! Slide content types, background rules and the built-in placeholder.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::RecordState;
use crate::types::{DbId, Timestamp};

/// Maximum length of a slide title (matches `VARCHAR(255)`).
pub const MAX_TITLE_LENGTH: usize = 255;

pub const PLACEHOLDER_TITLE: &str = "Welcome to MySurprise4You";
pub const PLACEHOLDER_DESCRIPTION: &str =
    "Book a time slot to create your personalized surprise!";
pub const PLACEHOLDER_GRADIENT: &str = "linear-gradient(135deg, #FEADA6, #F5EFEF)";

// ---------------------------------------------------------------------------
// Background type
// ---------------------------------------------------------------------------

/// How `background_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    /// A CSS gradient expression, e.g. `linear-gradient(...)`.
    Gradient,
    /// An image URL or server-relative path.
    Image,
    /// A CSS colour, e.g. `#F5EFEF`.
    Solid,
}

impl BackgroundType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gradient => "gradient",
            Self::Image => "image",
            Self::Solid => "solid",
        }
    }
}

impl fmt::Display for BackgroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackgroundType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "gradient" => Ok(Self::Gradient),
            "image" => Ok(Self::Image),
            "solid" => Ok(Self::Solid),
            other => Err(CoreError::Validation(format!(
                "Unknown backgroundType '{other}'. Expected one of: gradient, image, solid"
            ))),
        }
    }
}

impl TryFrom<String> for BackgroundType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Slide record (store-facing) and slide content (wire-facing)
// ---------------------------------------------------------------------------

/// A slide as the content store hands it to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRecord {
    pub id: DbId,
    pub booking_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub background_type: BackgroundType,
    pub background_value: String,
    pub link_url: Option<String>,
    pub link_title: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub state: RecordState,
}

/// One unit of carousel content in its public JSON shape.
///
/// `id` is `None` only for the synthesized placeholder slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideContent {
    pub id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub background_type: BackgroundType,
    pub background_value: String,
    pub booking_id: Option<DbId>,
    pub order: i32,
    pub is_active: bool,
    pub link_url: Option<String>,
    pub link_title: Option<String>,
}

impl SlideContent {
    /// The slide shown when there is neither a current booking nor any
    /// default slide.
    pub fn placeholder() -> Self {
        Self {
            id: None,
            title: PLACEHOLDER_TITLE.to_string(),
            description: Some(PLACEHOLDER_DESCRIPTION.to_string()),
            background_type: BackgroundType::Gradient,
            background_value: PLACEHOLDER_GRADIENT.to_string(),
            booking_id: None,
            order: 0,
            is_active: true,
            link_url: None,
            link_title: None,
        }
    }

    /// The link, if both its URL and its title are set.
    pub fn link(&self) -> Option<(&str, &str)> {
        match (self.link_url.as_deref(), self.link_title.as_deref()) {
            (Some(url), Some(title)) if !url.is_empty() && !title.is_empty() => Some((url, title)),
            _ => None,
        }
    }
}

impl From<SlideRecord> for SlideContent {
    fn from(record: SlideRecord) -> Self {
        Self {
            id: Some(record.id),
            title: record.title,
            description: record.description,
            background_type: record.background_type,
            background_value: record.background_value,
            booking_id: record.booking_id,
            order: record.order,
            is_active: record.is_active,
            link_url: record.link_url,
            link_title: record.link_title,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that a background value is present.
///
/// The contents are not inspected: gradients and colours are passed to CSS
/// verbatim and image paths are owned by whoever hosts the image.
pub fn validate_background_value(
    background_type: BackgroundType,
    value: &str,
) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        let hint = match background_type {
            BackgroundType::Image => "an image URL or path",
            BackgroundType::Gradient => "a CSS gradient",
            BackgroundType::Solid => "a CSS colour",
        };
        return Err(CoreError::Validation(format!(
            "backgroundValue is required for {background_type} backgrounds ({hint})"
        )));
    }
    Ok(())
}
