//! Active-content resolution for the public carousel.
//!
//! Given the current instant, [`ActiveContentResolver::resolve`] decides which
//! slides the carousel shows and which template renders them:
//!
//! 1. Bookings covering `now` (inclusive) whose status the
//!    [`VisibilityPolicy`] admits are candidates. The latest `start` wins.
//! 2. A current booking contributes its live slides by ascending `order`
//!    (ties by creation time) and its own template.
//! 3. Otherwise the live, active default slides are shown by creation time
//!    with the immersive template.
//! 4. If that is empty too, a single placeholder slide is synthesized.
//!
//! Each call recomputes from the store; nothing is cached between calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::booking::{BookingStatus, BookingWindow, VisibilityPolicy};
use crate::error::CoreError;
use crate::slide::{SlideContent, SlideRecord};
use crate::template::{PresentationFragment, TemplateType};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Read access to bookings and slides needed by the resolver.
#[async_trait]
pub trait ContentStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Bookings whose window contains `now` and whose status is in `statuses`.
    async fn bookings_covering(
        &self,
        now: Timestamp,
        statuses: &[BookingStatus],
    ) -> Result<Vec<BookingWindow>, Self::Error>;

    /// Slides attached to `booking_id`.
    async fn booking_slides(&self, booking_id: DbId) -> Result<Vec<SlideRecord>, Self::Error>;

    /// Slides with no owning booking.
    async fn default_slides(&self) -> Result<Vec<SlideRecord>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The `(slides, template)` pair the carousel displays. `slides` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveContent {
    pub slides: Vec<SlideContent>,
    pub template_type: TemplateType,
}

impl ActiveContent {
    /// Content made of the placeholder slide alone.
    pub fn placeholder() -> Self {
        Self {
            slides: vec![SlideContent::placeholder()],
            template_type: TemplateType::Immersive,
        }
    }

    pub fn render(&self) -> RenderedContent {
        RenderedContent {
            template_type: self.template_type,
            container_class: self.template_type.container_class(),
            fragments: self
                .slides
                .iter()
                .map(|slide| self.template_type.render(slide))
                .collect(),
        }
    }
}

/// Active content after template dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedContent {
    pub template_type: TemplateType,
    pub container_class: &'static str,
    pub fragments: Vec<PresentationFragment>,
}

// ---------------------------------------------------------------------------
// Pure selection steps
// ---------------------------------------------------------------------------

/// Pick the current booking among `candidates`.
///
/// Re-checks coverage, visibility and deletion so a sloppy store cannot leak
/// ineligible bookings. Ties on `start` go to the higher id.
pub fn select_current_booking<'a>(
    candidates: &'a [BookingWindow],
    now: Timestamp,
    policy: &VisibilityPolicy,
) -> Option<&'a BookingWindow> {
    candidates
        .iter()
        .filter(|b| b.state.is_active() && policy.allows(b.status) && b.covers(now))
        .max_by_key(|b| (b.start, b.id))
}

/// Live slides of a booking, ascending by `order`, then creation time.
pub fn order_booking_slides(records: Vec<SlideRecord>) -> Vec<SlideContent> {
    let mut live: Vec<SlideRecord> = records.into_iter().filter(|s| s.state.is_active()).collect();
    live.sort_by_key(|s| (s.order, s.created_at, s.id));
    live.into_iter().map(SlideContent::from).collect()
}

/// Live, active default slides ascending by creation time.
pub fn order_default_slides(records: Vec<SlideRecord>) -> Vec<SlideContent> {
    let mut live: Vec<SlideRecord> = records
        .into_iter()
        .filter(|s| s.state.is_active() && s.is_active && s.booking_id.is_none())
        .collect();
    live.sort_by_key(|s| (s.created_at, s.id));
    live.into_iter().map(SlideContent::from).collect()
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

pub struct ActiveContentResolver<S> {
    store: S,
    policy: VisibilityPolicy,
}

impl<S: ContentStore> ActiveContentResolver<S> {
    pub fn new(store: S, policy: VisibilityPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &VisibilityPolicy {
        &self.policy
    }

    /// Resolve what the carousel shows at `now`.
    ///
    /// Any store failure yields [`CoreError::ContentUnavailable`]; no partial
    /// content is returned.
    pub async fn resolve(&self, now: Timestamp) -> Result<ActiveContent, CoreError> {
        let candidates = self
            .store
            .bookings_covering(now, self.policy.statuses())
            .await
            .map_err(unavailable)?;

        let (slides, template_type) =
            match select_current_booking(&candidates, now, &self.policy) {
                Some(booking) => {
                    let records = self
                        .store
                        .booking_slides(booking.id)
                        .await
                        .map_err(unavailable)?;
                    (order_booking_slides(records), booking.template_type)
                }
                None => {
                    let records = self.store.default_slides().await.map_err(unavailable)?;
                    (order_default_slides(records), TemplateType::Immersive)
                }
            };

        if slides.is_empty() {
            return Ok(ActiveContent {
                slides: vec![SlideContent::placeholder()],
                template_type,
            });
        }

        Ok(ActiveContent {
            slides,
            template_type,
        })
    }
}

fn unavailable<E: std::error::Error>(err: E) -> CoreError {
    CoreError::ContentUnavailable(err.to_string())
}
