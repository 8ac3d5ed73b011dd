//! Scroll and zoom preserving document swap

use crate::theme::Style;

/// Scroll offset of a view, in view units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    pub x: i32,
    pub y: i32,
}

/// A scrollable rich-text view, driven from the thread that owns it
pub trait ScrollView {
    /// Stop repainting until [`resume_redraw`](Self::resume_redraw)
    fn suspend_redraw(&mut self);

    fn resume_redraw(&mut self);

    fn zoom(&self) -> f32;

    fn set_zoom(&mut self, zoom: f32);

    fn scroll_position(&self) -> ScrollPosition;

    fn set_scroll_position(&mut self, position: ScrollPosition);

    fn scroll_to_bottom(&mut self);

    /// Replace the whole content with an RTF document
    fn replace_content(&mut self, document: &str);

    fn set_default_colors(&mut self, _style: Style) {}
}

/// Swap `document` into `view` without flicker, keeping zoom and, unless
/// `auto_scroll` is set, the scroll position.
pub fn apply_document<V: ScrollView + ?Sized>(view: &mut V, document: &str, auto_scroll: bool) {
    view.suspend_redraw();

    let zoom = view.zoom();
    let position = (!auto_scroll).then(|| view.scroll_position());

    view.replace_content(document);

    if (view.zoom() - zoom).abs() > f32::EPSILON {
        view.set_zoom(zoom);
    }

    match position {
        Some(position) => view.set_scroll_position(position),
        None => view.scroll_to_bottom(),
    }

    view.resume_redraw();
}
