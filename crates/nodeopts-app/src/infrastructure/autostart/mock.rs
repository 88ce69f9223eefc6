//! In-memory start-at-login registrar for integration tests.

use std::sync::{Arc, Mutex};

use crate::application::startup::{AutostartError, StartupRegistrar};

/// Remembers the requested state; optionally refuses every change.
///
/// Clones share state, so a test can keep one and hand the other to the
/// model.
#[derive(Debug, Clone, Default)]
pub struct MemoryAutostart {
    enabled: Arc<Mutex<bool>>,
    refuse: bool,
}

impl MemoryAutostart {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(Mutex::new(enabled)),
            refuse: false,
        }
    }

    /// A registrar whose every `set_enabled` fails.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }
}

impl StartupRegistrar for MemoryAutostart {
    fn is_enabled(&self) -> bool {
        *self.enabled.lock().expect("lock poisoned")
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), AutostartError> {
        if self.refuse {
            return Err(AutostartError::Unsupported("test registrar".to_string()));
        }
        *self.enabled.lock().expect("lock poisoned") = enabled;
        Ok(())
    }
}
