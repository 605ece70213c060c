// Mapping of transport failures to probe errors

use playground_core::ProbeError;

/// Convert a reqwest failure into a [`ProbeError`]
pub fn probe_error(error: &reqwest::Error) -> ProbeError {
    if let Some(status) = error.status() {
        return ProbeError::Status(status.as_u16());
    }

    if error.is_timeout() {
        return ProbeError::Network("タイムアウトしました".to_string());
    }

    ProbeError::Network(error.to_string())
}
