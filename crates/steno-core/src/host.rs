//! Collaborators the engine talks to: the host's text surface, key emitter
//! and panel, plus the translator and its dictionary.

use crate::error::TranslationError;
use crate::stroke::Stroke;
use crate::types::{ComboEvent, TranslationUpdate};

/// How far back `word_before_cursor` looks.
const WORD_LOOKBEHIND: usize = 64;

/// The host document around the cursor.
pub trait TextSurface {
    /// Whether `preceding_text` reports real document contents.
    fn supports_preceding_text(&self) -> bool;

    /// Up to `length` characters immediately before the cursor. Shorter when
    /// the cursor is closer than `length` to the start of the document.
    fn preceding_text(&self, length: usize) -> Option<String>;

    /// Deletes `length` characters before the cursor.
    fn delete_preceding(&mut self, length: usize);

    /// Inserts text at the cursor.
    fn commit_text(&mut self, text: &str);

    /// The whitespace-delimited word ending at (or just before) the cursor.
    fn word_before_cursor(&self) -> Option<String> {
        if !self.supports_preceding_text() {
            return None;
        }
        let text = self.preceding_text(WORD_LOOKBEHIND)?;
        let trimmed = text.trim_end();
        let start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let word = &trimmed[start..];
        if word.is_empty() {
            None
        } else {
            Some(word.to_string())
        }
    }
}

/// Emits output that is not plain text.
pub trait KeyEmitter {
    fn send_key_combination(&mut self, events: &[ComboEvent]);
    fn send_engine_command(&mut self, command: &str);
}

/// Host-side widgets for auxiliary text and the candidate list.
pub trait PanelHost {
    /// Asks the host to call `Engine::on_idle` on its next idle tick.
    fn schedule_refresh(&mut self);
    fn update_auxiliary_text(&mut self, text: &str, visible: bool);
    fn update_lookup_table(&mut self, candidates: &[String], visible: bool);
}

/// Everything the engine needs from the host application.
pub trait Host: TextSurface + KeyEmitter + PanelHost {}

impl<T: TextSurface + KeyEmitter + PanelHost> Host for T {}

/// Message and candidate display used by stroke handlers.
pub trait Display {
    fn show_message(&mut self, text: &str);
    fn show_candidate_list(&mut self, values: &[String]);
}

/// Stroke-sequence dictionary behind the translator.
pub trait StenoDictionary {
    /// Every stroke sequence that translates to `word`.
    fn lookup_by_word(&self, word: &str) -> Vec<Vec<String>>;
    /// Maps a normalized stroke sequence to `word`.
    fn add(&mut self, strokes: Vec<String>, word: &str);
}

/// Steno-to-English translator with undo history.
pub trait Translator {
    fn translate(&mut self, stroke: &Stroke) -> Result<TranslationUpdate, TranslationError>;
    fn clear_history(&mut self);
    fn dictionary(&self) -> &dyn StenoDictionary;
    fn dictionary_mut(&mut self) -> &mut dyn StenoDictionary;

    fn set_min_undo_length(&mut self, _levels: usize) {}

    /// Hint that the next output should attach to the preceding text
    /// (cursor at start of line, or after a space).
    fn set_attach_hint(&mut self, _attach: bool) {}
}
