use crate::host::{Display, PanelHost};

/// Auxiliary text and candidate list shown next to the input context.
///
/// Changes are batched: any number of updates between two idle ticks result
/// in one host refresh. `invalidated` is the single pending-refresh flag.
#[derive(Debug, Default)]
pub struct Panel {
    aux_text: String,
    candidates: Vec<String>,
    invalidated: bool,
    refresh_requested: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aux_text(&self) -> &str {
        &self.aux_text
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Marks the panel dirty. Only the first call before a refresh asks for
    /// an idle callback.
    pub fn invalidate(&mut self) {
        if self.invalidated {
            return;
        }
        self.invalidated = true;
        self.refresh_requested = true;
    }

    /// Returns true once per pending refresh; the caller schedules it.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    pub fn clear(&mut self) {
        self.aux_text.clear();
        self.candidates.clear();
        self.invalidate();
    }

    /// Pushes current state to the host and clears the pending flag.
    pub fn refresh(&mut self, host: &mut dyn PanelHost) {
        host.update_auxiliary_text(&self.aux_text, !self.aux_text.is_empty());
        host.update_lookup_table(&self.candidates, !self.candidates.is_empty());
        self.invalidated = false;
        self.refresh_requested = false;
    }
}

impl Display for Panel {
    fn show_message(&mut self, text: &str) {
        self.aux_text = text.to_string();
        self.invalidate();
    }

    fn show_candidate_list(&mut self, values: &[String]) {
        self.candidates = values.to_vec();
        self.invalidate();
    }
}
