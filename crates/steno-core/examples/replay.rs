//! Feeds `/`-separated strokes through an engine backed by an in-memory
//! document and prints what ends up on screen.
//!
//! cargo run --example replay -- "KAT/TKOG/*/HREURB"

use std::collections::HashMap;
use steno_core::error::TranslationError;
use steno_core::host::{KeyEmitter, PanelHost, StenoDictionary, TextSurface, Translator};
use steno_core::types::ComboEvent;
use steno_core::{Engine, Profile, RenderAction, Stroke, Translation, TranslationUpdate};

#[derive(Default)]
struct Screen {
    text: String,
}

impl TextSurface for Screen {
    fn supports_preceding_text(&self) -> bool {
        true
    }
    fn preceding_text(&self, length: usize) -> Option<String> {
        let n = self.text.chars().count();
        Some(self.text.chars().skip(n.saturating_sub(length)).collect())
    }
    fn delete_preceding(&mut self, length: usize) {
        let n = self.text.chars().count();
        self.text = self.text.chars().take(n.saturating_sub(length)).collect();
    }
    fn commit_text(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

impl KeyEmitter for Screen {
    fn send_key_combination(&mut self, events: &[ComboEvent]) {
        println!("  <{} key events>", events.len());
    }
    fn send_engine_command(&mut self, command: &str) {
        println!("  <command {}>", command);
    }
}

impl PanelHost for Screen {
    fn schedule_refresh(&mut self) {}
    fn update_auxiliary_text(&mut self, text: &str, visible: bool) {
        if visible {
            println!("  [{}]", text);
        }
    }
    fn update_lookup_table(&mut self, candidates: &[String], visible: bool) {
        if visible {
            println!("  {:?}", candidates);
        }
    }
}

#[derive(Default)]
struct Words {
    by_stroke: HashMap<Vec<String>, String>,
}

impl StenoDictionary for Words {
    fn lookup_by_word(&self, word: &str) -> Vec<Vec<String>> {
        self.by_stroke
            .iter()
            .filter(|(_, w)| *w == word)
            .map(|(k, _)| k.clone())
            .collect()
    }
    fn add(&mut self, strokes: Vec<String>, word: &str) {
        self.by_stroke.insert(strokes, word.to_string());
    }
}

/// Single-stroke lookup with `*` undoing the last translation.
#[derive(Default)]
struct Lookup {
    words: Words,
    history: Vec<Translation>,
}

impl Translator for Lookup {
    fn translate(&mut self, stroke: &Stroke) -> Result<TranslationUpdate, TranslationError> {
        if stroke.is_correction() {
            return Ok(TranslationUpdate {
                undo: self.history.pop().into_iter().collect(),
                done: Vec::new(),
            });
        }
        let key = vec![stroke.rtfcre().to_string()];
        let english = self.words.by_stroke.get(&key).cloned();
        let text = format!(" {}", english.as_deref().unwrap_or(stroke.rtfcre()));
        let t = Translation {
            rtfcre: key,
            english,
            formatting: vec![RenderAction::text("", text)],
        };
        self.history.push(t.clone());
        Ok(TranslationUpdate {
            undo: Vec::new(),
            done: vec![t],
        })
    }
    fn clear_history(&mut self) {
        self.history.clear();
    }
    fn dictionary(&self) -> &dyn StenoDictionary {
        &self.words
    }
    fn dictionary_mut(&mut self) -> &mut dyn StenoDictionary {
        &mut self.words
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let strokes = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "KAT/TKOG/*/HREURB".to_string());

    let mut lookup = Lookup::default();
    lookup.words.add(vec!["KAT".into()], "cat");
    lookup.words.add(vec!["TKOG".into()], "dog");

    let mut engine = Engine::new(lookup, Screen::default(), Profile::default());
    for notation in strokes.split('/') {
        let stroke = Stroke::parse(notation)?;
        engine.on_stroke(&stroke)?;
        engine.on_idle();
        println!("{:<8} {:?}", stroke.rtfcre(), engine.host().text);
    }

    Ok(())
}
