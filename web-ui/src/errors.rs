// Web UI error types

/// Web UI specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The editing widget library is missing or failed to create a widget
    WidgetUnavailable(String),
    /// A DOM or browser API call failed
    Dom(String),
    /// Component rendering error
    RenderError(String),
}

impl UiError {
    /// Wrap a thrown JavaScript value
    pub fn from_js(context: &str, value: &wasm_bindgen::JsValue) -> Self {
        let detail = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        UiError::Dom(format!("{}: {}", context, detail))
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiError::WidgetUnavailable(msg) => write!(f, "エディタを初期化できません: {}", msg),
            UiError::Dom(msg) => write!(f, "ブラウザ操作エラー: {}", msg),
            UiError::RenderError(msg) => write!(f, "描画エラー: {}", msg),
        }
    }
}

impl std::error::Error for UiError {}
