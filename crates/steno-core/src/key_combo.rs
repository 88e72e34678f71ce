use crate::keysym_map::lookup_keysym;
use crate::types::{ComboEvent, KeyEdge};
use tracing::debug;

/// Compiles a key combination string into ordered press/release events.
///
/// Keys are keysym names separated by spaces or parentheses. A key followed
/// by `(` is held down while the enclosed keys are pressed and released in
/// turn, so `Alt_L(Tab)` holds Alt_L around a Tab tap. Parentheses nest.
/// Unknown names emit nothing and hold nothing, so a `)` after an unknown
/// held key closes the enclosing hold. Keys still held at the end (unbalanced
/// input) are released innermost first.
pub fn parse_key_combinations(combo: &str) -> Vec<ComboEvent> {
    let mut events = Vec::new();
    // Keys held by an open paren. Unknown keys are never pushed.
    let mut held: Vec<(&'static str, u32)> = Vec::new();
    let mut token = String::new();

    for c in combo.chars() {
        match c {
            ' ' => {
                if let Some(key) = resolve(&token) {
                    tap(&mut events, key);
                }
                token.clear();
            }
            '(' => {
                if let Some(key) = resolve(&token) {
                    push_event(&mut events, key, KeyEdge::Press);
                    held.push(key);
                }
                token.clear();
            }
            ')' => {
                if let Some(key) = resolve(&token) {
                    tap(&mut events, key);
                }
                if let Some(key) = held.pop() {
                    push_event(&mut events, key, KeyEdge::Release);
                }
                token.clear();
            }
            _ => token.push(c),
        }
    }

    if let Some(key) = resolve(&token) {
        tap(&mut events, key);
    }

    while let Some(key) = held.pop() {
        push_event(&mut events, key, KeyEdge::Release);
    }

    events
}

fn resolve(token: &str) -> Option<(&'static str, u32)> {
    if token.is_empty() {
        return None;
    }
    let key = lookup_keysym(token);
    if key.is_none() {
        debug!("Dropping unknown key {:?} in combination", token);
    }
    key
}

fn tap(events: &mut Vec<ComboEvent>, key: (&'static str, u32)) {
    push_event(events, key, KeyEdge::Press);
    push_event(events, key, KeyEdge::Release);
}

fn push_event(events: &mut Vec<ComboEvent>, (name, keysym): (&'static str, u32), edge: KeyEdge) {
    events.push(ComboEvent {
        key: name,
        keysym,
        edge,
    });
}
