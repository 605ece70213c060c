// External resource registry

use super::StorageBackend;
use playground_core::{
    classify, validate_resource_url, ContentTypeProbe, ErrorCode, ExternalResource, ProcessResult,
    ResourceKind, StorageError, ValidationError,
};

/// LocalStorage key holding the JSON array of resources
pub const RESOURCES_KEY: &str = "external-resources";

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("既に追加されています: {0}")]
    Duplicate(String),

    #[error("リソースの種類を判別できません: {0}")]
    Unclassifiable(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RegistryError {
    /// Convert to a user-facing ProcessResult
    pub fn to_process_result(&self) -> ProcessResult {
        match self {
            RegistryError::Validation(e) => {
                let result = ProcessResult::warning(e.to_error_code());
                match e.context() {
                    Some(context) => result.with_context(context),
                    None => result,
                }
            }
            RegistryError::Duplicate(url) => ProcessResult::warning(ErrorCode::ResourceDuplicate)
                .with_context(serde_json::json!({ "url": url })),
            RegistryError::Unclassifiable(url) => {
                ProcessResult::warning(ErrorCode::ResourceUnclassifiable)
                    .with_context(serde_json::json!({ "url": url }))
            }
            RegistryError::Storage(e) => e.to_process_result(),
        }
    }
}

type ChangeListener = Box<dyn Fn(&[ExternalResource])>;

/// Ordered set of external stylesheets and scripts
///
/// Every mutation persists the full list before it is applied in memory, so
/// a failed write leaves the registry unchanged.
pub struct ResourceRegistry<B: StorageBackend> {
    backend: B,
    resources: Vec<ExternalResource>,
    listeners: Vec<ChangeListener>,
}

impl<B: StorageBackend> ResourceRegistry<B> {
    /// Load the persisted list
    ///
    /// Entries are decoded one by one; malformed or duplicate entries are
    /// skipped. Unreadable data or a non-array value yields an empty registry.
    pub fn load(backend: B) -> Self {
        let resources = match backend.get_item(RESOURCES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
                Ok(entries) => decode_entries(entries),
                Err(e) => {
                    let error = StorageError::Corrupt {
                        key: RESOURCES_KEY.to_string(),
                        reason: e.to_string(),
                    };
                    tracing::warn!(error = %error, "ignoring stored resources");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "resource list load failed");
                Vec::new()
            }
        };

        Self {
            backend,
            resources,
            listeners: Vec::new(),
        }
    }

    /// Entries in insertion order
    pub fn list(&self) -> &[ExternalResource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.resources.iter().any(|r| r.url == url)
    }

    /// Register a listener called with the new list after each change
    pub fn on_change(&mut self, listener: impl Fn(&[ExternalResource]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Validate `input` and reject duplicates, without touching the network
    ///
    /// Returns the URL as it will be stored.
    pub fn prepare(&self, input: &str) -> Result<String, RegistryError> {
        let url = validate_resource_url(input)?;
        if self.contains(&url) {
            return Err(RegistryError::Duplicate(url));
        }
        Ok(url)
    }

    /// Append an already classified resource
    pub fn commit(&mut self, url: String, kind: ResourceKind) -> Result<ExternalResource, RegistryError> {
        if self.contains(&url) {
            return Err(RegistryError::Duplicate(url));
        }

        let resource = ExternalResource::new(url, kind);
        let mut next = self.resources.clone();
        next.push(resource.clone());
        self.persist(&next)?;
        self.resources = next;

        tracing::info!(url = %resource.url, kind = ?resource.kind, "external resource added");
        self.notify();
        Ok(resource)
    }

    /// Validate, classify and append `input`
    pub async fn add<P>(&mut self, input: &str, probe: &P) -> Result<ExternalResource, RegistryError>
    where
        P: ContentTypeProbe + ?Sized,
    {
        let url = self.prepare(input)?;
        match classify(&url, probe).await {
            Some(kind) => self.commit(url, kind),
            None => Err(RegistryError::Unclassifiable(url)),
        }
    }

    /// Remove every entry with exactly this URL; absent URLs are not an error
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, url: &str) -> Result<bool, StorageError> {
        let next: Vec<_> = self
            .resources
            .iter()
            .filter(|r| r.url != url)
            .cloned()
            .collect();
        let removed = next.len() != self.resources.len();

        self.persist(&next)?;
        self.resources = next;

        if removed {
            tracing::info!(url, "external resource removed");
            self.notify();
        }
        Ok(removed)
    }

    /// Remove every entry
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.persist(&[])?;
        self.resources.clear();
        tracing::info!("external resources cleared");
        self.notify();
        Ok(())
    }

    fn persist(&self, resources: &[ExternalResource]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(resources).map_err(|e| StorageError::Encode {
            key: RESOURCES_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.backend.set_item(RESOURCES_KEY, &raw).map_err(|e| {
            tracing::warn!(error = %e, "resource list write failed");
            e
        })
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.resources);
        }
    }
}

fn decode_entries(entries: Vec<serde_json::Value>) -> Vec<ExternalResource> {
    let mut resources: Vec<ExternalResource> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ExternalResource>(entry) {
            Ok(resource) if resources.iter().any(|r| r.url == resource.url) => {
                tracing::warn!(index, url = %resource.url, "skipping duplicate stored resource");
            }
            Ok(resource) => resources.push(resource),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed stored resource");
            }
        }
    }
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockStorageBackend;

    #[test]
    fn test_failed_write_leaves_registry_unchanged() {
        let mut backend = MockStorageBackend::new();
        backend.expect_get_item().returning(|_| {
            Ok(Some(r#"[{"url":"https://a.com/x.css","type":"style"}]"#.to_string()))
        });
        backend
            .expect_set_item()
            .returning(|key, _| Err(StorageError::QuotaExceeded(key.to_string())));

        let mut registry = ResourceRegistry::load(backend);
        let result = registry.commit("https://a.com/y.js".to_string(), ResourceKind::Script);

        assert!(matches!(result, Err(RegistryError::Storage(StorageError::QuotaExceeded(_)))));
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("https://a.com/x.css").is_err());
        assert!(registry.contains("https://a.com/x.css"));
    }

    #[test]
    fn test_read_failure_yields_empty_registry() {
        let mut backend = MockStorageBackend::new();
        backend.expect_get_item().returning(|_| Err(StorageError::Unavailable));

        let registry = ResourceRegistry::load(backend);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_error_to_process_result() {
        let duplicate = RegistryError::Duplicate("https://a.com/x.js".to_string());
        let result = duplicate.to_process_result();
        assert_eq!(result.code, ErrorCode::ResourceDuplicate);
        assert_eq!(result.context, Some(serde_json::json!({ "url": "https://a.com/x.js" })));

        let empty = RegistryError::Validation(ValidationError::EmptyUrl);
        assert_eq!(empty.to_process_result().code, ErrorCode::ValidationEmptyUrl);
        assert_eq!(empty.to_process_result().context, None);

        let storage = RegistryError::Storage(StorageError::Unavailable);
        assert_eq!(storage.to_process_result().code, ErrorCode::StorageWriteError);
    }
}
