use crate::domain::model::Screen;
use crate::domain::ports::PresentationPort;

/// Tracks which screen of the bottom navigation bar is showing.
#[derive(Debug, Clone)]
pub struct ScreenRouter {
    current: Screen,
}

impl ScreenRouter {
    pub fn new(start: Screen) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Returns false, and only tells the rider, when `screen` is already
    /// showing.
    pub fn go_to<P: PresentationPort>(&mut self, screen: Screen, presenter: &mut P) -> bool {
        if screen == self.current {
            presenter.show_message(&format!("Already on {} screen!", screen));
            return false;
        }

        tracing::debug!("Navigating {} -> {}", self.current, screen);
        presenter.navigate(screen);
        self.current = screen;
        true
    }

    /// Navigate even when `screen` is already current.
    pub fn jump_to<P: PresentationPort>(&mut self, screen: Screen, presenter: &mut P) {
        presenter.navigate(screen);
        self.current = screen;
    }
}

impl Default for ScreenRouter {
    fn default() -> Self {
        Self::new(Screen::Home)
    }
}
