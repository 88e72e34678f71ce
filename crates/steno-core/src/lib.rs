pub mod chord_engine;
pub mod dict_mode;
pub mod engine;
pub mod error;
pub mod handler;
pub mod host;
pub mod key_combo;
pub mod keysym_map;
pub mod output;
pub mod panel;
pub mod spelling;
pub mod steno_map;
pub mod stroke;
pub mod types;

pub use chord_engine::{ChordEngine, Decision, Profile};
pub use engine::Engine;
pub use error::{EngineError, ReconcileError, StrokeParseError, TranslationError};
pub use key_combo::parse_key_combinations;
pub use stroke::{normalize_steno, Stroke};
pub use types::{KeyAction, RenderAction, TextChange, Translation, TranslationUpdate};
