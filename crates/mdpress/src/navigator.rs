use crate::segmenter;

/// The mutually exclusive presentation context. Exactly one is active at a
/// time; entering one while another is active replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Two-pane editor with live preview. Rendering bypasses the navigator.
    #[default]
    Inline,
    /// Fullscreen slide show.
    Fullscreen,
    /// Compact slide strip shown in place of the preview pane.
    Compact,
}

impl ViewMode {
    pub fn is_presenting(self) -> bool {
        self != ViewMode::Inline
    }
}

/// Owns the slide deck, the current position and the active view mode.
///
/// All movement is bounded: out-of-range requests are silently ignored, so
/// holding "next" on the last slide is harmless. When the document shrinks
/// underneath an active presentation the position is clamped, never wrapped.
#[derive(Debug, Default)]
pub struct Navigator {
    slides: Vec<String>,
    current: usize,
    mode: ViewMode,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Option<&str> {
        self.slides.get(self.current).map(String::as_str)
    }

    /// Re-segment `document` and activate `mode` at the first slide.
    ///
    /// A document that yields zero slides leaves the navigator untouched and
    /// returns false: an empty deck is tolerated, not an error.
    pub fn enter(&mut self, mode: ViewMode, document: &str) -> bool {
        if !mode.is_presenting() {
            return false;
        }
        let slides = segmenter::segment(document);
        if slides.is_empty() {
            return false;
        }
        self.slides = slides;
        self.current = 0;
        self.mode = mode;
        true
    }

    /// Back to the inline editor view. The deck and position are retained;
    /// the next `enter` recomputes both.
    pub fn exit(&mut self) {
        self.mode = ViewMode::Inline;
    }

    /// Move to `index` iff it is in range. Returns whether the position
    /// changed, so callers know a re-render is due.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.slides.len() && index != self.current {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.go_to(self.current - 1)
    }

    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.slides.len().saturating_sub(1))
    }

    /// Re-segment after a document edit while a presentation mode is active.
    /// Clamps the position when the deck shrinks. Inline mode is untouched;
    /// inline rendering does not go through the navigator.
    pub fn document_changed(&mut self, document: &str) {
        if !self.mode.is_presenting() {
            return;
        }
        self.slides = segmenter::segment(document);
        if self.current >= self.slides.len() {
            self.current = self.slides.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE: &str = "one\n---\ntwo\n---\nthree";

    fn presenting() -> Navigator {
        let mut nav = Navigator::new();
        assert!(nav.enter(ViewMode::Fullscreen, THREE));
        nav
    }

    #[test]
    fn test_initial_state_is_inline() {
        let nav = Navigator::new();
        assert_eq!(nav.mode(), ViewMode::Inline);
        assert_eq!(nav.slide_count(), 0);
        assert!(nav.current_slide().is_none());
    }

    #[test]
    fn test_enter_segments_and_resets_position() {
        let mut nav = presenting();
        assert_eq!(nav.slide_count(), 3);
        assert_eq!(nav.current_index(), 0);

        nav.next();
        nav.exit();
        assert!(nav.enter(ViewMode::Fullscreen, THREE));
        assert_eq!(nav.current_index(), 0, "enter always restarts at slide 0");
    }

    #[test]
    fn test_enter_with_empty_document_is_a_noop() {
        let mut nav = Navigator::new();
        assert!(!nav.enter(ViewMode::Fullscreen, ""));
        assert_eq!(nav.mode(), ViewMode::Inline);
        assert!(!nav.enter(ViewMode::Compact, "---\n\n---"));
        assert_eq!(nav.mode(), ViewMode::Inline);
    }

    #[test]
    fn test_enter_inline_is_rejected() {
        let mut nav = Navigator::new();
        assert!(!nav.enter(ViewMode::Inline, THREE));
        assert_eq!(nav.slide_count(), 0);
    }

    #[test]
    fn test_modes_are_mutually_exclusive() {
        let mut nav = Navigator::new();
        assert!(nav.enter(ViewMode::Compact, THREE));
        assert_eq!(nav.mode(), ViewMode::Compact);

        assert!(nav.enter(ViewMode::Fullscreen, THREE));
        assert_eq!(nav.mode(), ViewMode::Fullscreen);

        assert!(nav.enter(ViewMode::Compact, THREE));
        assert_eq!(nav.mode(), ViewMode::Compact);
    }

    #[test]
    fn test_exit_returns_to_inline_and_keeps_deck() {
        let mut nav = presenting();
        nav.next();
        nav.exit();
        assert_eq!(nav.mode(), ViewMode::Inline);
        assert_eq!(nav.slide_count(), 3);
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_next_saturates_at_last_slide() {
        let mut nav = presenting();
        for _ in 0..10 {
            nav.next();
        }
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_previous_saturates_at_first_slide() {
        let mut nav = presenting();
        for _ in 0..10 {
            nav.previous();
        }
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_first_and_last_jumps() {
        let mut nav = presenting();
        assert!(nav.last());
        assert_eq!(nav.current_index(), 2);
        assert!(nav.first());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_go_to_out_of_range_is_ignored() {
        let mut nav = presenting();
        assert!(!nav.go_to(3));
        assert_eq!(nav.current_index(), 0);
        assert!(nav.go_to(2));
        assert!(!nav.go_to(usize::MAX));
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_go_to_same_index_reports_no_change() {
        let mut nav = presenting();
        assert!(!nav.go_to(0));
    }

    #[test]
    fn test_document_changed_reclamps_shrinking_deck() {
        let mut nav = presenting();
        nav.last();
        assert_eq!(nav.current_index(), 2);

        nav.document_changed("only slide left");
        assert_eq!(nav.slide_count(), 1);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_document_changed_keeps_valid_position() {
        let mut nav = presenting();
        nav.next();
        nav.document_changed("one\n---\ntwo edited\n---\nthree");
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.current_slide(), Some("\ntwo edited\n"));
    }

    #[test]
    fn test_document_changed_to_empty_deck() {
        let mut nav = presenting();
        nav.document_changed("---");
        assert_eq!(nav.slide_count(), 0);
        assert_eq!(nav.current_index(), 0);
        assert!(nav.current_slide().is_none(), "render step shows nothing");
    }

    #[test]
    fn test_document_changed_ignored_while_inline() {
        let mut nav = Navigator::new();
        nav.document_changed(THREE);
        assert_eq!(nav.slide_count(), 0);
    }
}
