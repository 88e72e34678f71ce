use crate::host::{Display, StenoDictionary, TextSurface};
use crate::stroke::Stroke;

/// Result of offering a stroke to a handler.
///
/// - `Consume`: the handler took the stroke; later handlers and the
///   translator never see it
/// - `Continue`: pass it on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStatus {
    Consume,
    Continue,
}

/// Collaborators a handler may use while handling one stroke.
pub struct StrokeContext<'a> {
    pub surface: &'a dyn TextSurface,
    pub dictionary: &'a mut dyn StenoDictionary,
    pub display: &'a mut dyn Display,
}

/// Intercepts strokes ahead of the translator.
pub trait StrokeHandler {
    fn handle_stroke(&mut self, stroke: &Stroke, cx: &mut StrokeContext<'_>) -> StrokeStatus;

    /// Drops any in-progress state, e.g. on focus change or resync.
    fn reset(&mut self, _cx: &mut StrokeContext<'_>) {}
}

/// Offers `stroke` to each handler in order until one consumes it.
pub fn dispatch(
    handlers: &mut [Box<dyn StrokeHandler>],
    stroke: &Stroke,
    cx: &mut StrokeContext<'_>,
) -> StrokeStatus {
    for handler in handlers.iter_mut() {
        if handler.handle_stroke(stroke, cx) == StrokeStatus::Consume {
            return StrokeStatus::Consume;
        }
    }
    StrokeStatus::Continue
}
