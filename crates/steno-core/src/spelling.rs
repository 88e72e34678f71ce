use crate::host::{Display, StenoDictionary};
use crate::panel::Panel;
use crate::types::{Translation, TranslationUpdate};
use tracing::debug;

/// The letter a fingerspelling translation (`{&a}`) spells.
fn spelled_letter(t: &Translation) -> Option<char> {
    let rest = t.english.as_deref()?.strip_prefix("{&")?;
    let mut chars = rest.chars();
    let letter = chars.next().filter(|c| c.is_ascii_lowercase())?;
    (chars.next() == Some('}')).then_some(letter)
}

/// Watches translations for fingerspelled words and shows the strokes that
/// would have written them.
#[derive(Debug, Default)]
pub struct SpellingHelper {
    buffer: Vec<Translation>,
}

impl SpellingHelper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Letters spelled so far.
    pub fn pending_word(&self) -> String {
        self.buffer.iter().filter_map(spelled_letter).collect()
    }

    pub fn observe(
        &mut self,
        update: &TranslationUpdate,
        dictionary: &dyn StenoDictionary,
        panel: &mut Panel,
    ) {
        for t in update.undo.iter().rev() {
            if self.buffer.last() == Some(t) {
                self.buffer.pop();
            }
        }

        let mut finished = false;
        for t in &update.done {
            if spelled_letter(t).is_some() {
                self.buffer.push(t.clone());
            } else {
                finished = true;
                break;
            }
        }

        if finished && !self.buffer.is_empty() {
            let word = self.pending_word();
            self.buffer.clear();
            show_strokes_for_word(&word, dictionary, panel);
        } else if panel.has_candidates() {
            panel.clear();
        }
    }
}

fn show_strokes_for_word(word: &str, dictionary: &dyn StenoDictionary, panel: &mut Panel) {
    let strokes: Vec<String> = dictionary
        .lookup_by_word(word)
        .iter()
        .map(|entry| entry.join("/"))
        .collect();
    debug!("Spelled {:?}, {} known stroke(s)", word, strokes.len());

    if strokes.is_empty() {
        panel.show_message(&format!("'{}' not in dictionary", word));
    } else {
        panel.show_message(&format!("Strokes for '{}':", word));
        panel.show_candidate_list(&strokes);
    }
}
