use crate::chord_engine::{ChordEngine, Decision, Profile};
use crate::dict_mode::DictMode;
use crate::error::EngineError;
use crate::handler::{self, StrokeContext, StrokeHandler, StrokeStatus};
use crate::host::{Display, Host, Translator};
use crate::output::render_diff;
use crate::panel::Panel;
use crate::spelling::SpellingHelper;
use crate::stroke::Stroke;
use crate::types::{InputPurpose, KeyAction, KeyEvent, RELEASE_MASK};
use tracing::{debug, error, info, warn};

/// One input context: host key events in, verified text edits out.
pub struct Engine<T: Translator, H: Host> {
    chord_engine: ChordEngine,
    translator: T,
    host: H,
    panel: Panel,
    handlers: Vec<Box<dyn StrokeHandler>>,
    spelling: SpellingHelper,
    input_purpose: InputPurpose,
    enabled: bool,
}

impl<T: Translator, H: Host> Engine<T, H> {
    pub fn new(mut translator: T, host: H, profile: Profile) -> Self {
        translator.set_min_undo_length(profile.undo_levels);
        Self {
            handlers: build_handlers(&profile),
            chord_engine: ChordEngine::new(profile),
            translator,
            host,
            panel: Panel::new(),
            spelling: SpellingHelper::new(),
            input_purpose: InputPurpose::default(),
            enabled: true,
        }
    }

    /// Replaces the profile. Stroke handlers are rebuilt, dropping any
    /// capture in progress.
    pub fn set_profile(&mut self, profile: Profile) {
        self.reset_handlers();
        self.translator.set_min_undo_length(profile.undo_levels);
        self.handlers = build_handlers(&profile);
        self.chord_engine.set_profile(profile);
        self.sync_refresh();
    }

    pub fn profile(&self) -> &Profile {
        &self.chord_engine.profile
    }

    /// Appends a handler to the end of the stroke handler chain.
    pub fn add_handler(&mut self, handler: Box<dyn StrokeHandler>) {
        self.handlers.push(handler);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.chord_engine.start_capture();
        } else {
            self.chord_engine.stop_capture();
        }
        info!("Engine enabled: {}", enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn translator_mut(&mut self) -> &mut T {
        &mut self.translator
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn chord_engine_mut(&mut self) -> &mut ChordEngine {
        &mut self.chord_engine
    }

    /// Handles a key event from the host. `state` carries the modifier bits,
    /// with `RELEASE_MASK` set on key release.
    ///
    /// Returns `KeyAction::Block` for keys consumed as steno input. Errors
    /// come from the stroke the event completed; the key itself is consumed.
    pub fn process_key_event(
        &mut self,
        keyval: u32,
        keycode: u16,
        state: u32,
    ) -> Result<KeyAction, EngineError> {
        if !self.enabled || self.input_purpose == InputPurpose::Password {
            return Ok(KeyAction::Pass);
        }
        // Control-C and friends belong to the application.
        if state & !RELEASE_MASK != 0 {
            return Ok(KeyAction::Pass);
        }
        if self.chord_engine.profile.passthrough_keyvals.contains(&keyval) {
            return Ok(KeyAction::Pass);
        }

        let event = if state & RELEASE_MASK == 0 {
            KeyEvent::press(keycode)
        } else {
            KeyEvent::release(keycode)
        };

        let result = match self.chord_engine.on_event(event) {
            Decision::Passthrough => Ok(KeyAction::Pass),
            Decision::Pending => Ok(KeyAction::Block),
            Decision::Stroke(stroke) => self.on_stroke(&stroke).map(|()| KeyAction::Block),
        };
        self.sync_refresh();
        result
    }

    /// Runs a completed stroke through the handler chain and, unless a
    /// handler consumed it, the translator and output reconciliation.
    pub fn on_stroke(&mut self, stroke: &Stroke) -> Result<(), EngineError> {
        if self.dispatch(stroke) == StrokeStatus::Consume {
            debug!("Stroke {} consumed by handler", stroke);
            self.sync_refresh();
            return Ok(());
        }

        let max_attempts = self.chord_engine.profile.max_resync_attempts;
        let mut attempts = 0;
        let result = loop {
            match self.translate_and_render(stroke) {
                Err(EngineError::Reconcile(err)) if attempts < max_attempts => {
                    attempts += 1;
                    warn!("{}; resync {}/{} with {}", err, attempts, max_attempts, stroke);
                    self.reset_translator();
                    self.panel.show_message("Resetting state");
                }
                Err(EngineError::Reconcile(err)) => {
                    error!("Giving up on {} after {} resync attempt(s): {}", stroke, attempts, err);
                    self.panel.show_message("Output out of sync");
                    break Err(EngineError::OutOfSync {
                        attempts,
                        source: err,
                    });
                }
                other => break other,
            }
        };
        self.sync_refresh();
        result
    }

    fn dispatch(&mut self, stroke: &Stroke) -> StrokeStatus {
        let mut cx = StrokeContext {
            surface: &self.host,
            dictionary: self.translator.dictionary_mut(),
            display: &mut self.panel,
        };
        handler::dispatch(&mut self.handlers, stroke, &mut cx)
    }

    fn translate_and_render(&mut self, stroke: &Stroke) -> Result<(), EngineError> {
        let update = self.translator.translate(stroke)?;
        render_diff(&update.old_actions(), &update.new_actions(), &mut self.host)?;
        self.spelling
            .observe(&update, self.translator.dictionary(), &mut self.panel);
        Ok(())
    }

    fn reset_handlers(&mut self) {
        let mut cx = StrokeContext {
            surface: &self.host,
            dictionary: self.translator.dictionary_mut(),
            display: &mut self.panel,
        };
        for handler in self.handlers.iter_mut() {
            handler.reset(&mut cx);
        }
    }

    /// Forgets translation history, spelled letters and any capture in
    /// progress.
    pub fn reset_translator(&mut self) {
        debug!("Resetting translator state");
        self.spelling.clear();
        self.translator.clear_history();
        self.reset_handlers();
    }

    pub fn focus_in(&mut self) {
        debug!("Focus in");
        self.reset_translator();
        self.sync_refresh();
    }

    pub fn reset(&mut self) {
        debug!("Reset");
        self.reset_translator();
        self.sync_refresh();
    }

    /// Records the content type of the focused field. Password fields get no
    /// steno handling.
    pub fn set_content_type(&mut self, purpose: u32, hints: u32) {
        self.input_purpose = InputPurpose::from_ibus(purpose);
        debug!("Content type {:?} (hints {:#x})", self.input_purpose, hints);
    }

    /// Host report of the text around the cursor; `cursor` counts chars.
    ///
    /// Output attaches to what precedes it at the start of the text or right
    /// after a space.
    pub fn on_surrounding_text(&mut self, text: &str, cursor: usize) {
        let attach = match cursor.checked_sub(1) {
            None => true,
            Some(i) => text.chars().nth(i) == Some(' '),
        };
        debug!("Surrounding text at {}: attach {}", cursor, attach);
        self.translator.set_attach_hint(attach);
    }

    /// Idle callback scheduled through `PanelHost::schedule_refresh`.
    pub fn on_idle(&mut self) {
        if self.panel.is_invalidated() {
            self.panel.refresh(&mut self.host);
        }
    }

    fn sync_refresh(&mut self) {
        if self.panel.take_refresh_request() {
            self.host.schedule_refresh();
        }
    }
}

fn build_handlers(profile: &Profile) -> Vec<Box<dyn StrokeHandler>> {
    let mut handlers: Vec<Box<dyn StrokeHandler>> = Vec::new();
    if let Some(notation) = &profile.dict_mode_stroke {
        match DictMode::from_notation(notation) {
            Ok(mode) => handlers.push(Box::new(mode)),
            Err(e) => warn!("Dictionary capture disabled: {}", e),
        }
    }
    handlers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslationError;
    use crate::host::{KeyEmitter, PanelHost, StenoDictionary, TextSurface};
    use crate::types::{ComboEvent, TranslationUpdate, KEYVAL_BACKSPACE};

    const KEYVAL_A: u32 = 0x61;
    const CODE_S: u16 = 31; // K-
    const CODE_Z: u16 = 44;
    const SHIFT_MASK: u32 = 1;

    #[derive(Default)]
    struct NullHost {
        refreshes: usize,
    }

    impl TextSurface for NullHost {
        fn supports_preceding_text(&self) -> bool {
            false
        }
        fn preceding_text(&self, _length: usize) -> Option<String> {
            None
        }
        fn delete_preceding(&mut self, _length: usize) {}
        fn commit_text(&mut self, _text: &str) {}
    }

    impl KeyEmitter for NullHost {
        fn send_key_combination(&mut self, _events: &[ComboEvent]) {}
        fn send_engine_command(&mut self, _command: &str) {}
    }

    impl PanelHost for NullHost {
        fn schedule_refresh(&mut self) {
            self.refreshes += 1;
        }
        fn update_auxiliary_text(&mut self, _text: &str, _visible: bool) {}
        fn update_lookup_table(&mut self, _candidates: &[String], _visible: bool) {}
    }

    #[derive(Default)]
    struct NoDictionary;

    impl StenoDictionary for NoDictionary {
        fn lookup_by_word(&self, _word: &str) -> Vec<Vec<String>> {
            Vec::new()
        }
        fn add(&mut self, _strokes: Vec<String>, _word: &str) {}
    }

    #[derive(Default)]
    struct CountingTranslator {
        dictionary: NoDictionary,
        strokes: Vec<String>,
        cleared: usize,
        undo_length: usize,
        attach: Option<bool>,
    }

    impl Translator for CountingTranslator {
        fn translate(&mut self, stroke: &Stroke) -> Result<TranslationUpdate, TranslationError> {
            self.strokes.push(stroke.rtfcre().to_string());
            Ok(TranslationUpdate::default())
        }
        fn clear_history(&mut self) {
            self.cleared += 1;
        }
        fn dictionary(&self) -> &dyn StenoDictionary {
            &self.dictionary
        }
        fn dictionary_mut(&mut self) -> &mut dyn StenoDictionary {
            &mut self.dictionary
        }
        fn set_min_undo_length(&mut self, levels: usize) {
            self.undo_length = levels;
        }
        fn set_attach_hint(&mut self, attach: bool) {
            self.attach = Some(attach);
        }
    }

    fn engine() -> Engine<CountingTranslator, NullHost> {
        Engine::new(CountingTranslator::default(), NullHost::default(), Profile::default())
    }

    #[test]
    fn test_new_forwards_undo_levels() {
        let e = engine();
        assert_eq!(e.translator().undo_length, 10);
    }

    #[test]
    fn test_steno_key_is_blocked_and_translated() {
        let mut e = engine();
        assert_eq!(e.process_key_event(0x73, CODE_S, 0).unwrap(), KeyAction::Block);
        assert_eq!(
            e.process_key_event(0x73, CODE_S, RELEASE_MASK).unwrap(),
            KeyAction::Block
        );
        assert_eq!(e.translator().strokes, vec!["K"]);
    }

    #[test]
    fn test_unmapped_key_passes() {
        let mut e = engine();
        assert_eq!(e.process_key_event(0x7a, CODE_Z, 0).unwrap(), KeyAction::Pass);
    }

    #[test]
    fn test_modifier_passes() {
        let mut e = engine();
        assert_eq!(
            e.process_key_event(KEYVAL_A, CODE_S, SHIFT_MASK).unwrap(),
            KeyAction::Pass
        );
        assert_eq!(
            e.process_key_event(KEYVAL_A, CODE_S, SHIFT_MASK | RELEASE_MASK).unwrap(),
            KeyAction::Pass
        );
        assert!(e.translator().strokes.is_empty());
    }

    #[test]
    fn test_passthrough_keyvals() {
        let mut e = engine();
        assert_eq!(
            e.process_key_event(KEYVAL_BACKSPACE, 14, 0).unwrap(),
            KeyAction::Pass
        );
    }

    #[test]
    fn test_password_field_passes() {
        let mut e = engine();
        e.set_content_type(8, 0);
        assert_eq!(e.process_key_event(0x73, CODE_S, 0).unwrap(), KeyAction::Pass);
        e.set_content_type(0, 0);
        assert_eq!(e.process_key_event(0x73, CODE_S, 0).unwrap(), KeyAction::Block);
    }

    #[test]
    fn test_disabled_engine_passes_and_drops_open_chord() {
        let mut e = engine();
        e.process_key_event(0x73, CODE_S, 0).unwrap();
        e.set_enabled(false);
        assert_eq!(
            e.process_key_event(0x73, CODE_S, RELEASE_MASK).unwrap(),
            KeyAction::Pass
        );
        e.set_enabled(true);
        assert_eq!(
            e.process_key_event(0x73, CODE_S, RELEASE_MASK).unwrap(),
            KeyAction::Block
        );
        assert!(e.translator().strokes.is_empty());
    }

    #[test]
    fn test_focus_and_reset_clear_history() {
        let mut e = engine();
        e.focus_in();
        e.reset();
        assert_eq!(e.translator().cleared, 2);
    }

    #[test]
    fn test_attach_hint() {
        let mut e = engine();
        e.on_surrounding_text("", 0);
        assert_eq!(e.translator().attach, Some(true));
        e.on_surrounding_text("hello world", 5);
        assert_eq!(e.translator().attach, Some(false));
        e.on_surrounding_text("hello world", 6);
        assert_eq!(e.translator().attach, Some(true));
        e.on_surrounding_text("héllo wörld", 6);
        assert_eq!(e.translator().attach, Some(true));
    }

    #[test]
    fn test_invalid_dict_mode_stroke_disables_capture() {
        let mut profile = Profile::default();
        profile.dict_mode_stroke = Some("XYZ".to_string());
        let e = Engine::new(CountingTranslator::default(), NullHost::default(), profile);
        assert!(e.handlers.is_empty());
    }
}
