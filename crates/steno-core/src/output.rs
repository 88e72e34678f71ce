use crate::error::ReconcileError;
use crate::host::{KeyEmitter, TextSurface};
use crate::key_combo::parse_key_combinations;
use crate::types::RenderAction;
use tracing::{debug, warn};

/// Number of leading actions `old` and `new` have in common.
pub fn common_prefix_len(old: &[RenderAction], new: &[RenderAction]) -> usize {
    old.iter().zip(new).take_while(|(a, b)| a == b).count()
}

/// Brings the host from the output of `old` to the output of `new`.
///
/// Only the actions after the common prefix are touched. Text edits between
/// key combinations or engine commands are coalesced into one verified edit.
pub fn render_diff<O>(old: &[RenderAction], new: &[RenderAction], out: &mut O) -> Result<(), ReconcileError>
where
    O: TextSurface + KeyEmitter + ?Sized,
{
    let i = common_prefix_len(old, new);
    debug!("Render: old {:?} new {:?}", &old[i..], &new[i..]);
    OutputHelper::new(out).render(&old[i..], &new[i..])
}

/// Replaces `before` (expected immediately left of the cursor) with `after`.
///
/// When the surface can report preceding text it is checked first; on
/// mismatch nothing is deleted or inserted.
pub fn change_string<S>(surface: &mut S, before: &str, after: &str) -> Result<(), ReconcileError>
where
    S: TextSurface + ?Sized,
{
    let offset = common_prefix_chars(before, after);
    let before_len = before.chars().count();
    let delete_length = before_len - offset;

    if surface.supports_preceding_text() && before_len > 0 {
        let actual = surface.preceding_text(before_len);
        if actual.as_deref() != Some(before) {
            warn!("Output mismatch: expected {:?}, found {:?}", before, actual);
            return Err(ReconcileError::Mismatch {
                expected: before.to_string(),
                actual,
            });
        }
    }

    if delete_length > 0 {
        surface.delete_preceding(delete_length);
    }
    let insert: String = after.chars().skip(offset).collect();
    if !insert.is_empty() {
        surface.commit_text(&insert);
    }
    debug!("Changed {:?} -> {:?} (deleted {})", before, after, delete_length);
    Ok(())
}

/// Accumulates the text edit for a render pass.
///
/// `before` is the text expected on screen, `after` the text that should
/// replace it.
struct OutputHelper<'a, O: ?Sized> {
    before: String,
    after: String,
    out: &'a mut O,
}

impl<'a, O> OutputHelper<'a, O>
where
    O: TextSurface + KeyEmitter + ?Sized,
{
    fn new(out: &'a mut O) -> Self {
        Self {
            before: String::new(),
            after: String::new(),
            out,
        }
    }

    fn render(mut self, undo: &[RenderAction], redo: &[RenderAction]) -> Result<(), ReconcileError> {
        // Rebuild what the undone actions left on screen.
        for action in undo {
            if let RenderAction::TextChange(tc) = action {
                if !tc.before.is_empty() {
                    let n = tc.before.chars().count();
                    if n >= self.before.chars().count() {
                        self.before.clear();
                    } else {
                        drop_last_chars(&mut self.before, n);
                    }
                }
                self.before.push_str(&tc.after);
            }
        }

        // Undo them in reverse to find what was there before.
        self.after = self.before.clone();
        for action in undo.iter().rev() {
            if let RenderAction::TextChange(tc) = action {
                drop_last_chars(&mut self.after, tc.after.chars().count());
                self.after.push_str(&tc.before);
            }
        }

        for action in redo {
            match action {
                RenderAction::TextChange(tc) => {
                    let n = tc.before.chars().count();
                    let have = self.after.chars().count();
                    if n > have {
                        // Consumes text left of the edited region; expect it on screen too.
                        let extra: String = tc.before.chars().take(n - have).collect();
                        self.before.insert_str(0, &extra);
                        self.after.clear();
                    } else {
                        drop_last_chars(&mut self.after, n);
                    }
                    self.after.push_str(&tc.after);
                }
                RenderAction::KeyCombination(combo) => {
                    self.commit()?;
                    let events = parse_key_combinations(combo);
                    debug!("Key combination {:?}: {} events", combo, events.len());
                    self.out.send_key_combination(&events);
                }
                RenderAction::EngineCommand(command) => {
                    self.commit()?;
                    debug!("Engine command {:?}", command);
                    self.out.send_engine_command(command);
                }
            }
        }

        self.commit()
    }

    fn commit(&mut self) -> Result<(), ReconcileError> {
        if self.before != self.after {
            change_string(&mut *self.out, &self.before, &self.after)?;
        }
        self.before.clear();
        self.after.clear();
        Ok(())
    }
}

fn common_prefix_chars(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

fn drop_last_chars(s: &mut String, n: usize) {
    if n == 0 {
        return;
    }
    let cut = s
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    s.truncate(cut);
}
