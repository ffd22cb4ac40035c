//! Terminal stand-in for the view layer.

use std::sync::Mutex;

use wafiles_core::transport::{Navigator, SIGN_IN_LOCATION};

/// Tracks which "view" the running command represents.
pub struct TerminalNavigator {
    location: Mutex<String>,
}

impl TerminalNavigator {
    pub fn at(location: &str) -> Self {
        Self {
            location: Mutex::new(location.to_string()),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn current_location(&self) -> String {
        self.location
            .lock()
            .map(|l| l.clone())
            .unwrap_or_default()
    }

    fn redirect_to_sign_in(&self) {
        if let Ok(mut location) = self.location.lock() {
            *location = SIGN_IN_LOCATION.to_string();
        }
        log::info!("Run `wafiles login` to sign in again.");
    }

    fn notify(&self, message: &str) {
        log::warn!("{message}");
    }
}
