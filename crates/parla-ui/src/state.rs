use parla_types::SessionView;

/// Front-end state: the last snapshot the session rendered
pub struct UiState {
    view: Option<SessionView>,
    /// Whether stdout is a terminal, so a prompt is worth printing
    pub interactive: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            view: None,
            interactive: atty::is(atty::Stream::Stdout),
        }
    }

    /// Store a new snapshot; false when nothing visible changed
    pub fn update(&mut self, view: SessionView) -> bool {
        if self.view.as_ref() == Some(&view) {
            return false;
        }
        self.view = Some(view);
        true
    }

    pub fn view(&self) -> Option<&SessionView> {
        self.view.as_ref()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
