use crate::error::StrokeParseError;
use crate::handler::{StrokeContext, StrokeHandler, StrokeStatus};
use crate::host::Display;
use crate::stroke::{normalize_steno, Stroke};
use tracing::{debug, info, warn};

/// Interactive capture of a new dictionary entry for the word before the cursor.
///
/// The trigger stroke enters the mode. While active every stroke is consumed:
/// strokes are collected, `*` removes the last one (or cancels when none are
/// left), and the trigger stroke again writes the entry and leaves.
pub struct DictMode {
    trigger: Stroke,
    state: State,
}

#[derive(Debug)]
enum State {
    Waiting,
    Active(Session),
}

#[derive(Debug)]
struct Session {
    active_word: String,
    strokes: Vec<Stroke>,
}

impl Session {
    fn strokes_string(&self) -> String {
        self.strokes
            .iter()
            .map(|s| s.rtfcre())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn show_preview(&self, display: &mut dyn Display) {
        display.show_message(&format!("New definition for \"{}\":", self.active_word));
        display.show_candidate_list(&[self.strokes_string()]);
    }
}

impl DictMode {
    pub fn new(trigger: Stroke) -> Self {
        Self {
            trigger,
            state: State::Waiting,
        }
    }

    /// Builds the mode from the trigger stroke in steno notation.
    pub fn from_notation(trigger: &str) -> Result<Self, StrokeParseError> {
        Ok(Self::new(Stroke::parse(trigger)?))
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active(_))
    }

    /// Strokes collected so far, `/`-joined. `None` while waiting.
    pub fn pending_strokes(&self) -> Option<String> {
        match &self.state {
            State::Active(session) => Some(session.strokes_string()),
            State::Waiting => None,
        }
    }

    fn enter(&mut self, cx: &mut StrokeContext<'_>) {
        let active_word = cx.surface.word_before_cursor().unwrap_or_default();
        let existing: Vec<String> = cx
            .dictionary
            .lookup_by_word(&active_word)
            .iter()
            .map(|strokes| strokes.join("/"))
            .collect();

        if existing.is_empty() {
            cx.display
                .show_message(&format!("(no definitions for \"{}\")", active_word));
            cx.display.show_candidate_list(&[]);
        } else {
            cx.display
                .show_message(&format!("Definitions for \"{}\":", active_word));
            cx.display.show_candidate_list(&existing);
        }

        debug!("Dictionary capture started for {:?}", active_word);
        self.state = State::Active(Session {
            active_word,
            strokes: Vec::new(),
        });
    }

    fn exit(&mut self, display: &mut dyn Display) {
        self.state = State::Waiting;
        display.show_message("");
        display.show_candidate_list(&[]);
    }
}

impl StrokeHandler for DictMode {
    fn handle_stroke(&mut self, stroke: &Stroke, cx: &mut StrokeContext<'_>) -> StrokeStatus {
        if !self.is_active() {
            if *stroke != self.trigger {
                return StrokeStatus::Continue;
            }
            self.enter(cx);
            return StrokeStatus::Consume;
        }
        let State::Active(session) = &mut self.state else {
            return StrokeStatus::Continue;
        };

        let finished = if stroke.is_correction() {
            if session.strokes.pop().is_some() {
                session.show_preview(cx.display);
                false
            } else {
                debug!("Dictionary capture cancelled");
                true
            }
        } else if *stroke == self.trigger {
            if session.strokes.is_empty() {
                debug!("Dictionary capture finished without strokes");
            } else if session.active_word.is_empty() {
                warn!("No word before cursor; dropping {}", session.strokes_string());
            } else {
                let key = normalize_steno(&session.strokes_string());
                info!("Adding {:?} -> {:?}", key, session.active_word);
                cx.dictionary.add(key, &session.active_word);
            }
            true
        } else {
            session.strokes.push(stroke.clone());
            session.show_preview(cx.display);
            false
        };

        if finished {
            self.exit(cx.display);
        }
        StrokeStatus::Consume
    }

    fn reset(&mut self, cx: &mut StrokeContext<'_>) {
        if self.is_active() {
            self.exit(cx.display);
        }
    }
}
