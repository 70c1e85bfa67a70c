use std::sync::{Mutex, PoisonError};

use crate::ports::HistoryPort;

/// In-memory history stack. Used where no real address bar exists.
#[derive(Debug, Default)]
pub struct RecordingHistory {
    entries: Mutex<Vec<String>>,
}

impl RecordingHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: Mutex::new(vec![initial.to_string()]),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current(&self) -> Option<String> {
        self.entries().last().cloned()
    }
}

impl HistoryPort for RecordingHistory {
    fn push(&self, location: &str) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(location.to_string());
        Ok(())
    }

    fn replace(&self, location: &str) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.last_mut() {
            Some(last) => *last = location.to_string(),
            None => entries.push(location.to_string()),
        }
        Ok(())
    }
}
