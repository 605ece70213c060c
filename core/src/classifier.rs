// Resource type inference for external URLs

use crate::models::ResourceKind;
use std::{future::Future, pin::Pin};
use url::Url;

/// Object-safe boxed future used by [`ContentTypeProbe`].
pub type ProbeFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Probe errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("ネットワークエラー: {0}")]
    Network(String),

    #[error("HTTPエラー: {0}")]
    Status(u16),
}

/// Metadata-only network lookup (HEAD semantics) of a URL's content type
pub trait ContentTypeProbe {
    /// Returns the declared `content-type`, or `None` when the response has none.
    fn content_type<'a>(&'a self, url: &'a str) -> ProbeFuture<'a, Result<Option<String>, ProbeError>>;
}

/// Classify by file extension of the URL path
///
/// Query strings and fragments are ignored; the comparison is ASCII
/// case-insensitive. Falls back to the raw text when the URL does not parse.
pub fn classify_by_extension(url: &str) -> Option<ResourceKind> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_ascii_lowercase(),
        Err(_) => url.to_ascii_lowercase(),
    };

    if path.ends_with(".css") {
        Some(ResourceKind::Style)
    } else if path.ends_with(".js") {
        Some(ResourceKind::Script)
    } else {
        None
    }
}

/// Classify by a declared content type
pub fn classify_content_type(content_type: &str) -> Option<ResourceKind> {
    let content_type = content_type.to_ascii_lowercase();
    if content_type.contains("text/css") {
        Some(ResourceKind::Style)
    } else if content_type.contains("javascript") {
        Some(ResourceKind::Script)
    } else {
        None
    }
}

/// Infer whether `url` denotes a stylesheet or a script
///
/// The extension check never touches the network. Only when it is
/// inconclusive is `probe` consulted. Probe failures are folded into
/// `None` (unknown) and never retried.
pub async fn classify<P>(url: &str, probe: &P) -> Option<ResourceKind>
where
    P: ContentTypeProbe + ?Sized,
{
    if let Some(kind) = classify_by_extension(url) {
        tracing::debug!(url, ?kind, "classified by extension");
        return Some(kind);
    }

    match probe.content_type(url).await {
        Ok(Some(content_type)) => {
            let kind = classify_content_type(&content_type);
            tracing::debug!(url, content_type = %content_type, ?kind, "classified by probe");
            kind
        }
        Ok(None) => {
            tracing::debug!(url, "probe returned no content type");
            None
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "content type probe failed");
            None
        }
    }
}
