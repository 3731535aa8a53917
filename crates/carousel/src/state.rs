//! What the carousel currently shows.

use surprise_core::content::ActiveContent;
use surprise_core::slide::SlideContent;
use surprise_core::template::{PresentationFragment, TemplateType};

/// Displayed content plus the index of the visible slide.
///
/// Starts on the placeholder. [`apply`](Self::apply) replaces the content
/// only with a successful fetch, so a failing API leaves the last good
/// content on screen.
#[derive(Debug, Clone)]
pub struct CarouselState {
    content: ActiveContent,
    index: usize,
    loaded: bool,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            content: ActiveContent::placeholder(),
            index: 0,
            loaded: false,
        }
    }
}

impl CarouselState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install freshly fetched content. Returns whether anything changed.
    ///
    /// Unchanged content keeps the current position; new content restarts
    /// from the first slide.
    pub fn apply(&mut self, content: ActiveContent) -> bool {
        self.loaded = true;
        if content.slides.is_empty() || content == self.content {
            return false;
        }
        self.content = content;
        self.index = 0;
        true
    }

    /// Whether any fetch has ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn content(&self) -> &ActiveContent {
        &self.content
    }

    pub fn template_type(&self) -> TemplateType {
        self.content.template_type
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.content.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.slides.is_empty()
    }

    pub fn current(&self) -> &SlideContent {
        &self.content.slides[self.index]
    }

    /// The visible slide rendered with the content's template.
    pub fn current_fragment(&self) -> PresentationFragment {
        self.content.template_type.render(self.current())
    }

    /// Advance to the next slide, wrapping to the first.
    pub fn next(&mut self) -> &SlideContent {
        self.go_to(self.index as isize + 1)
    }

    /// Step back to the previous slide, wrapping to the last.
    pub fn previous(&mut self) -> &SlideContent {
        self.go_to(self.index as isize - 1)
    }

    /// Jump to `index`; out-of-range values wrap around.
    pub fn go_to(&mut self, index: isize) -> &SlideContent {
        let len = self.len() as isize;
        self.index = index.rem_euclid(len) as usize;
        self.current()
    }
}
