use serde::{Deserialize, Serialize};

/// IBus modifier bit set on key-release events.
pub const RELEASE_MASK: u32 = 1 << 30;

pub const KEYVAL_BACKSPACE: u32 = 0xff08;
pub const KEYVAL_RETURN: u32 = 0xff0d;
pub const KEYVAL_ESCAPE: u32 = 0xff1b;

/// Direction of a physical or emulated key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEdge {
    Press,
    Release,
}

/// Raw key event from the host, keyed by hardware keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: u16,
    pub edge: KeyEdge,
}

impl KeyEvent {
    pub const fn press(code: u16) -> Self {
        Self {
            code,
            edge: KeyEdge::Press,
        }
    }

    pub const fn release(code: u16) -> Self {
        Self {
            code,
            edge: KeyEdge::Release,
        }
    }
}

/// What the host should do with the key event it delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Not handled: let the keystroke through untouched.
    Pass,
    /// Handled: swallow the keystroke.
    Block,
}

/// Input purpose reported by the host's content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPurpose {
    #[default]
    FreeForm,
    Password,
    Other(u32),
}

impl InputPurpose {
    /// IBus numbers the purposes; 8 is `IBUS_INPUT_PURPOSE_PASSWORD`.
    pub fn from_ibus(purpose: u32) -> Self {
        match purpose {
            0 => Self::FreeForm,
            8 => Self::Password,
            other => Self::Other(other),
        }
    }
}

/// One step of an emulated key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboEvent {
    /// Canonical keysym name, e.g. `"Alt_L"`.
    pub key: &'static str,
    pub keysym: u32,
    pub edge: KeyEdge,
}

/// Text edit carried by a render action.
///
/// `before` is the text this action consumed from the output preceding it,
/// `after` is the text it leaves in its place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextChange {
    pub before: String,
    pub after: String,
}

impl TextChange {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }

    /// Plain insertion that consumes nothing.
    pub fn insert(after: impl Into<String>) -> Self {
        Self::new(String::new(), after)
    }
}

/// Atomic unit of visible output produced by the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderAction {
    TextChange(TextChange),
    /// Key combination macro, e.g. `"Control_L(z)"`.
    KeyCombination(String),
    /// Opaque engine command token.
    EngineCommand(String),
}

impl RenderAction {
    pub fn text(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self::TextChange(TextChange::new(before, after))
    }
}

/// A translation as reported by the translator collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    /// Strokes (steno notation) that produced this translation.
    pub rtfcre: Vec<String>,
    /// Dictionary text, `None` when the strokes fell back to raw steno.
    pub english: Option<String>,
    /// Render actions the formatter assigned to this translation.
    pub formatting: Vec<RenderAction>,
}

/// Translations undone and newly applied by a single stroke.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationUpdate {
    pub undo: Vec<Translation>,
    pub done: Vec<Translation>,
}

impl TranslationUpdate {
    /// Render actions previously committed for the undone translations.
    pub fn old_actions(&self) -> Vec<RenderAction> {
        self.undo
            .iter()
            .flat_map(|t| t.formatting.iter().cloned())
            .collect()
    }

    /// Render actions for the newly applied translations.
    pub fn new_actions(&self) -> Vec<RenderAction> {
        self.done
            .iter()
            .flat_map(|t| t.formatting.iter().cloned())
            .collect()
    }
}
