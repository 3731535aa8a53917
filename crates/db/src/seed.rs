//! Built-in default slides.

use surprise_core::slide::BackgroundType;

use crate::DbPool;

struct DefaultSlide {
    title: &'static str,
    description: &'static str,
    background_type: BackgroundType,
    background_value: &'static str,
}

const DEFAULT_SLIDES: [DefaultSlide; 4] = [
    DefaultSlide {
        title: "Happy Birthday!",
        description: "SUN | MAY 18, 2025\n08 - 12 AM",
        background_type: BackgroundType::Gradient,
        background_value: "linear-gradient(135deg, #FEADA6, #F5EFEF)",
    },
    DefaultSlide {
        title: "Congratulations Graduate!",
        description: "Create lasting memories",
        background_type: BackgroundType::Gradient,
        background_value: "linear-gradient(135deg, #A1C4FD, #C2E9FB)",
    },
    DefaultSlide {
        title: "Welcome to MySurprise4You",
        description: "Make someone's day special",
        background_type: BackgroundType::Gradient,
        background_value: "linear-gradient(135deg, #84FAB0, #8FD3F4)",
    },
    DefaultSlide {
        title: "Celebrate Special Moments",
        description: "Create unforgettable memories",
        background_type: BackgroundType::Image,
        background_value: "https://images.unsplash.com/photo-1511795409834-432f31fbc7a8?auto=format&fit=crop&w=2070&q=80",
    },
];

/// Insert the built-in default slides if no live default slide exists.
///
/// Returns the number of slides inserted (0 when the set was already there).
pub async fn seed_default_slides(pool: &DbPool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (existing,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM slides WHERE booking_id IS NULL AND deleted_at IS NULL",
    )
    .fetch_one(&mut *tx)
    .await?;

    if existing > 0 {
        tx.rollback().await?;
        return Ok(0);
    }

    for slide in &DEFAULT_SLIDES {
        // Distinct timestamps keep the seeded order stable under ORDER BY created_at.
        sqlx::query(
            "INSERT INTO slides (title, description, background_type, background_value, created_at)
             VALUES ($1, $2, $3, $4, clock_timestamp())",
        )
        .bind(slide.title)
        .bind(slide.description)
        .bind(slide.background_type.as_str())
        .bind(slide.background_value)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    tracing::info!(count = DEFAULT_SLIDES.len(), "Seeded default slides");
    Ok(DEFAULT_SLIDES.len() as u64)
}
