// Write-through store for the three fragment texts

use super::StorageBackend;
use playground_core::{CodeState, FragmentId, StorageError};

/// Holds the latest fragment texts and mirrors every change to storage
pub struct CodeStateStore<B: StorageBackend> {
    backend: B,
    state: CodeState,
}

impl<B: StorageBackend> CodeStateStore<B> {
    /// Load each fragment from storage, falling back to the starter text
    pub fn load(backend: B) -> Self {
        let mut state = CodeState::starter();

        for id in FragmentId::ALL {
            match backend.get_item(id.storage_key()) {
                Ok(Some(text)) => state.set(id, text),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = id.storage_key(), error = %e, "fragment load failed, using default");
                }
            }
        }

        Self { backend, state }
    }

    pub fn get(&self, id: FragmentId) -> &str {
        self.state.get(id)
    }

    pub fn snapshot(&self) -> &CodeState {
        &self.state
    }

    /// Replace all three fragments
    pub fn set_all(
        &mut self,
        html: impl Into<String>,
        css: impl Into<String>,
        js: impl Into<String>,
    ) -> Result<(), StorageError> {
        self.write_through(CodeState::new(html, css, js))
    }

    /// Sync from the values currently shown by the editing widgets
    pub fn capture_from(&mut self, live: CodeState) -> Result<(), StorageError> {
        self.write_through(live)
    }

    /// Forget the stored fragments and return to the starter content
    ///
    /// On failure the keys already removed are written back, so storage
    /// still matches the in-memory texts.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        for (done, id) in FragmentId::ALL.into_iter().enumerate() {
            if let Err(e) = self.backend.remove_item(id.storage_key()) {
                tracing::warn!(key = id.storage_key(), error = %e, "fragment remove failed");
                self.restore(&FragmentId::ALL[..done]);
                return Err(e);
            }
        }
        self.state = CodeState::starter();
        tracing::info!("fragments reset to defaults");
        Ok(())
    }

    fn write_through(&mut self, next: CodeState) -> Result<(), StorageError> {
        for (done, id) in FragmentId::ALL.into_iter().enumerate() {
            if let Err(e) = self.backend.set_item(id.storage_key(), next.get(id)) {
                tracing::warn!(key = id.storage_key(), error = %e, "fragment write failed");
                self.restore(&FragmentId::ALL[..done]);
                return Err(e);
            }
        }
        self.state = next;
        Ok(())
    }

    /// Rewrite `ids` from the in-memory state after a partial failure
    fn restore(&self, ids: &[FragmentId]) {
        for &id in ids {
            if let Err(e) = self.backend.set_item(id.storage_key(), self.state.get(id)) {
                tracing::warn!(key = id.storage_key(), error = %e, "fragment rollback failed");
            }
        }
    }
}
