//! Presentation templates for carousel slides.
//!
//! A booking picks one of a fixed set of templates. Each template turns a
//! [`SlideContent`] into a [`PresentationFragment`]; the carousel applies the
//! template's container class to the surrounding element.
//!
//! Template selection is total: any identifier other than `"split"`,
//! including a missing one, selects [`TemplateType::Immersive`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slide::{BackgroundType, SlideContent};

// ---------------------------------------------------------------------------
// Template type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TemplateType {
    /// Single column of text over a full-bleed background.
    #[default]
    Immersive,
    /// Text pane beside an image pane.
    Split,
}

impl TemplateType {
    pub const ALL: [TemplateType; 2] = [Self::Immersive, Self::Split];

    /// Map a template identifier to a template. Never fails.
    pub fn resolve(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("split") => Self::Split,
            _ => Self::Immersive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Immersive => "immersive",
            Self::Split => "split",
        }
    }

    /// CSS class applied to the slides container.
    pub fn container_class(self) -> &'static str {
        match self {
            Self::Immersive => "immersive-template",
            Self::Split => "split-template",
        }
    }

    pub fn render(self, slide: &SlideContent) -> PresentationFragment {
        let text = TextPane::from_slide(slide);
        match self {
            Self::Immersive => PresentationFragment::Immersive {
                text,
                background: BackgroundStyle::for_slide(slide),
            },
            Self::Split => PresentationFragment::Split {
                text,
                image: ImagePane::for_slide(slide),
            },
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TemplateType {
    fn from(value: String) -> Self {
        Self::resolve(Some(&value))
    }
}

impl From<&str> for TemplateType {
    fn from(value: &str) -> Self {
        Self::resolve(Some(value))
    }
}

/// Render `slide` with the template named by `tag`.
pub fn render(slide: &SlideContent, tag: Option<&str>) -> PresentationFragment {
    TemplateType::resolve(tag).render(slide)
}

// ---------------------------------------------------------------------------
// Fragment parts
// ---------------------------------------------------------------------------

/// A CSS background declaration derived from a slide's background fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackgroundStyle {
    pub property: &'static str,
    pub value: String,
}

impl BackgroundStyle {
    pub fn for_slide(slide: &SlideContent) -> Self {
        let value = slide.background_value.clone();
        match slide.background_type {
            BackgroundType::Gradient => Self {
                property: "background-image",
                value,
            },
            BackgroundType::Solid => Self {
                property: "background-color",
                value,
            },
            BackgroundType::Image => Self {
                property: "background-image",
                value: format!("url('{value}')"),
            },
        }
    }

    /// The `property: value` declaration, ready for a `style` attribute.
    pub fn declaration(&self) -> String {
        format!("{}: {}", self.property, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideLink {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPane {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<SlideLink>,
}

impl TextPane {
    fn from_slide(slide: &SlideContent) -> Self {
        Self {
            title: slide.title.clone(),
            description: slide.description.clone(),
            link: slide.link().map(|(url, title)| SlideLink {
                url: url.to_string(),
                title: title.to_string(),
            }),
        }
    }
}

/// The image half of the split template.
///
/// Only image slides carry an `image_url`; gradient and solid slides get a
/// style-only pane painted with their background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePane {
    pub image_url: Option<String>,
    pub style: BackgroundStyle,
}

impl ImagePane {
    fn for_slide(slide: &SlideContent) -> Self {
        let image_url = match slide.background_type {
            BackgroundType::Image => Some(slide.background_value.clone()),
            BackgroundType::Gradient | BackgroundType::Solid => None,
        };
        Self {
            image_url,
            style: BackgroundStyle::for_slide(slide),
        }
    }
}

// ---------------------------------------------------------------------------
// Fragment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", rename_all = "camelCase")]
pub enum PresentationFragment {
    Immersive {
        text: TextPane,
        background: BackgroundStyle,
    },
    Split {
        text: TextPane,
        image: ImagePane,
    },
}

impl PresentationFragment {
    pub fn text(&self) -> &TextPane {
        match self {
            Self::Immersive { text, .. } | Self::Split { text, .. } => text,
        }
    }

    /// Render the fragment as an HTML snippet. All slide text is escaped.
    pub fn to_html(&self) -> String {
        match self {
            Self::Immersive { text, background } => format!(
                "<div class=\"immersive-content\" style=\"{}\">{}</div>",
                escape_html(&background.declaration()),
                text_html(text),
            ),
            Self::Split { text, image } => format!(
                "<div class=\"split-content\"><div class=\"split-text\">{}</div>\
                 <div class=\"split-image-container\">\
                 <div class=\"split-image\" style=\"{}\"></div></div></div>",
                text_html(text),
                escape_html(&image.style.declaration()),
            ),
        }
    }
}

fn text_html(text: &TextPane) -> String {
    let mut html = format!(
        "<h1 class=\"slide-title\">{}</h1>",
        escape_html(&text.title)
    );
    if let Some(description) = &text.description {
        html.push_str(&format!(
            "<p class=\"slide-description\">{}</p>",
            escape_html(description)
        ));
    }
    if let Some(link) = &text.link {
        html.push_str(&format!(
            "<a href=\"{}\" class=\"slide-link\" target=\"_blank\" \
             rel=\"noopener noreferrer\">{}</a>",
            escape_html(&link.url),
            escape_html(&link.title)
        ));
    }
    html
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
