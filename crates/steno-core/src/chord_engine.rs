use crate::steno_map::keycode_to_steno_key;
use crate::stroke::Stroke;
use crate::types::{KeyEdge, KeyEvent, KEYVAL_BACKSPACE, KEYVAL_ESCAPE, KEYVAL_RETURN};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Output decision from the chord engine
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Key has no steno mapping (or capture is stopped); let it through.
    Passthrough,
    /// Key was consumed, the chord is still open.
    Pending,
    /// Key completed a chord.
    Stroke(Stroke),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Gate chord completion on a trigger key instead of all-keys-released.
    /// Carried for configuration compatibility; completion does not consult it.
    pub arpeggiate: bool,
    /// Stroke that enters and finishes dictionary capture. `None` disables it.
    pub dict_mode_stroke: Option<String>,
    /// Replays of the triggering stroke allowed after an output mismatch.
    pub max_resync_attempts: u32,
    /// Minimum translation history kept by the translator.
    pub undo_levels: usize,
    /// Keyvals that always reach the application.
    pub passthrough_keyvals: Vec<u32>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            arpeggiate: false,
            dict_mode_stroke: Some("TKUPT".to_string()),
            max_resync_attempts: 1,
            undo_levels: 10,
            passthrough_keyvals: vec![KEYVAL_BACKSPACE, KEYVAL_ESCAPE, KEYVAL_RETURN],
        }
    }
}

#[derive(Debug, Default)]
pub struct ChordState {
    pub down: HashSet<&'static str>,
    pub released: HashSet<&'static str>,
}

type StrokeCallback = Box<dyn FnMut(&Stroke) + Send>;

/// Aggregates key presses and releases into strokes.
pub struct ChordEngine {
    pub profile: Profile,
    pub state: ChordState,
    running: bool,
    callbacks: Vec<StrokeCallback>,
}

impl ChordEngine {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            state: ChordState::default(),
            running: true,
            callbacks: Vec::new(),
        }
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    /// Registers a listener invoked synchronously with every completed stroke.
    pub fn add_stroke_callback(&mut self, cb: impl FnMut(&Stroke) + Send + 'static) {
        self.callbacks.push(Box::new(cb));
    }

    pub fn start_capture(&mut self) {
        self.running = true;
    }

    /// Stops capturing; every key passes through and open chords are dropped.
    pub fn stop_capture(&mut self) {
        self.running = false;
        self.state.down.clear();
        self.state.released.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn on_event(&mut self, event: KeyEvent) -> Decision {
        match event.edge {
            KeyEdge::Press => self.press(event.code),
            KeyEdge::Release => self.release(event.code),
        }
    }

    pub fn press(&mut self, code: u16) -> Decision {
        if !self.running {
            return Decision::Passthrough;
        }
        let Some(key) = keycode_to_steno_key(code) else {
            return Decision::Passthrough;
        };
        self.state.down.insert(key);
        Decision::Pending
    }

    pub fn release(&mut self, code: u16) -> Decision {
        if !self.running {
            return Decision::Passthrough;
        }
        let Some(key) = keycode_to_steno_key(code) else {
            return Decision::Passthrough;
        };

        self.state.released.insert(key);
        // Drop releases for keys that are not tracked as down.
        let down = &self.state.down;
        self.state.released.retain(|k| down.contains(k));

        if !self.is_complete() {
            return Decision::Pending;
        }

        let stroke = Stroke::from_keys(self.state.down.iter().copied());
        self.state.down.clear();
        self.state.released.clear();
        debug!("Stroke: {}", stroke);

        for cb in self.callbacks.iter_mut() {
            cb(&stroke);
        }
        Decision::Stroke(stroke)
    }

    fn is_complete(&self) -> bool {
        if self.state.down.is_empty() || self.state.down != self.state.released {
            return false;
        }
        if self.profile.arpeggiate {
            // No trigger key is wired up, so arpeggiate completes like a normal chord.
            debug!("Arpeggiate set; completing on full release");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const Q: u16 = 16; // S-
    const A: u16 = 30; // S-
    const S: u16 = 31; // K-
    const C: u16 = 46; // A-
    const P: u16 = 25; // -T
    const T: u16 = 20; // *
    const Z: u16 = 44; // unmapped

    fn assert_stroke(res: &Decision, rtfcre: &str) {
        match res {
            Decision::Stroke(stroke) => assert_eq!(stroke.rtfcre(), rtfcre),
            _ => panic!("Expected Stroke({}), got {:?}", rtfcre, res),
        }
    }

    #[test]
    fn test_unmapped_key_passes_through() {
        let mut engine = ChordEngine::new(Profile::default());
        assert_eq!(engine.press(Z), Decision::Passthrough);
        assert_eq!(engine.release(Z), Decision::Passthrough);
        assert!(engine.state.down.is_empty());
    }

    #[test]
    fn test_chord_emitted_regardless_of_release_order() {
        let orders: [[u16; 3]; 3] = [[S, C, P], [P, C, S], [C, P, S]];
        for order in orders {
            let mut engine = ChordEngine::new(Profile::default());
            assert_eq!(engine.press(S), Decision::Pending);
            assert_eq!(engine.press(C), Decision::Pending);
            assert_eq!(engine.press(P), Decision::Pending);

            assert_eq!(engine.release(order[0]), Decision::Pending);
            assert_eq!(engine.release(order[1]), Decision::Pending);
            let res = engine.release(order[2]);
            assert_stroke(&res, "KAT");
            assert!(engine.state.down.is_empty());
            assert!(engine.state.released.is_empty());
        }
    }

    #[test]
    fn test_partial_release_does_not_emit() {
        let mut engine = ChordEngine::new(Profile::default());
        engine.press(S);
        engine.press(P);
        assert_eq!(engine.release(S), Decision::Pending);
        assert_eq!(engine.state.released.len(), 1);
        assert_stroke(&engine.release(P), "K-T");
    }

    #[test]
    fn test_release_of_never_pressed_key_is_noop() {
        let mut engine = ChordEngine::new(Profile::default());
        assert_eq!(engine.release(P), Decision::Pending);
        assert!(engine.state.released.is_empty());

        engine.press(S);
        assert_eq!(engine.release(P), Decision::Pending);
        assert_stroke(&engine.release(S), "K");
    }

    #[test]
    fn test_redundant_positions_collapse() {
        let mut engine = ChordEngine::new(Profile::default());
        engine.press(Q);
        engine.press(A);
        // Both keys are S-, so the first release completes the label set.
        assert_stroke(&engine.release(Q), "S");
        assert_eq!(engine.release(A), Decision::Pending);
        assert!(engine.state.down.is_empty());
    }

    #[test]
    fn test_arpeggiate_does_not_gate_completion() {
        let mut profile = Profile::default();
        profile.arpeggiate = true;
        let mut engine = ChordEngine::new(profile);
        engine.press(T);
        assert_stroke(&engine.release(T), "*");
    }

    #[test]
    fn test_stop_capture_passes_everything() {
        let mut engine = ChordEngine::new(Profile::default());
        engine.press(S);
        engine.stop_capture();
        assert_eq!(engine.press(P), Decision::Passthrough);
        assert_eq!(engine.release(S), Decision::Passthrough);
        engine.start_capture();
        engine.press(P);
        assert_stroke(&engine.release(P), "-T");
    }

    #[test]
    fn test_callbacks_run_on_stroke() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut engine = ChordEngine::new(Profile::default());
        let sink = seen.clone();
        engine.add_stroke_callback(move |s| sink.lock().push(s.rtfcre().to_string()));

        engine.on_event(KeyEvent::press(S));
        engine.on_event(KeyEvent::press(C));
        engine.on_event(KeyEvent::release(S));
        assert!(seen.lock().is_empty());
        engine.on_event(KeyEvent::release(C));

        assert_eq!(*seen.lock(), vec!["KA".to_string()]);
    }

    #[test]
    fn test_profile_defaults() {
        let profile = Profile::default();
        assert!(!profile.arpeggiate);
        assert_eq!(profile.max_resync_attempts, 1);
        assert_eq!(profile.undo_levels, 10);
        assert_eq!(profile.passthrough_keyvals.len(), 3);
    }

    #[test]
    fn test_partial_profile_fills_defaults() {
        let profile: Profile =
            serde_json::from_str(r#"{"max_resync_attempts": 3, "dict_mode_stroke": null}"#).unwrap();
        assert_eq!(profile.max_resync_attempts, 3);
        assert_eq!(profile.dict_mode_stroke, None);
        assert!(!profile.arpeggiate);
        assert_eq!(profile.undo_levels, 10);
        assert_eq!(
            profile.passthrough_keyvals,
            vec![KEYVAL_BACKSPACE, KEYVAL_ESCAPE, KEYVAL_RETURN]
        );

        let empty: Profile = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.dict_mode_stroke.as_deref(), Some("TKUPT"));
    }
}
