// Core data models for the code playground

use serde::{Deserialize, Serialize};

/// Editable source fragment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentId {
    Html,
    Css,
    Js,
}

impl FragmentId {
    pub const ALL: [FragmentId; 3] = [FragmentId::Html, FragmentId::Css, FragmentId::Js];

    /// LocalStorage key holding this fragment's text
    pub fn storage_key(self) -> &'static str {
        match self {
            FragmentId::Html => "html-code",
            FragmentId::Css => "css-code",
            FragmentId::Js => "js-code",
        }
    }

    /// Language mode passed to the editing widget
    pub fn language_mode(self) -> &'static str {
        match self {
            FragmentId::Html => "html",
            FragmentId::Css => "css",
            FragmentId::Js => "javascript",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FragmentId::Html => "HTML",
            FragmentId::Css => "CSS",
            FragmentId::Js => "JS",
        }
    }
}

const DEFAULT_HTML: &str = r#"<main class="card">
  <h1>Hello, Playground!</h1>
  <p>HTML・CSS・JavaScriptを編集するとプレビューが自動で更新されます。</p>
  <button id="greet">Click me</button>
</main>"#;

const DEFAULT_CSS: &str = r#"body {
  font-family: system-ui, sans-serif;
  display: grid;
  place-items: center;
  min-height: 100vh;
  margin: 0;
  background: #f4f6fb;
}

.card {
  padding: 2rem 3rem;
  border-radius: 12px;
  background: #fff;
  box-shadow: 0 4px 16px rgba(0, 0, 0, 0.08);
  text-align: center;
}"#;

const DEFAULT_JS: &str = r#"document.getElementById('greet').addEventListener('click', () => {
  alert('Hello from the playground!');
});"#;

/// Text of the three fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeState {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl CodeState {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// Built-in starter content used on first launch and after reset
    pub fn starter() -> Self {
        Self::new(DEFAULT_HTML, DEFAULT_CSS, DEFAULT_JS)
    }

    pub fn starter_text(id: FragmentId) -> &'static str {
        match id {
            FragmentId::Html => DEFAULT_HTML,
            FragmentId::Css => DEFAULT_CSS,
            FragmentId::Js => DEFAULT_JS,
        }
    }

    pub fn get(&self, id: FragmentId) -> &str {
        match id {
            FragmentId::Html => &self.html,
            FragmentId::Css => &self.css,
            FragmentId::Js => &self.js,
        }
    }

    pub fn set(&mut self, id: FragmentId, text: String) {
        match id {
            FragmentId::Html => self.html = text,
            FragmentId::Css => self.css = text,
            FragmentId::Js => self.js = text,
        }
    }
}

/// Kind of an external resource
///
/// Stored as `"style"` / `"script"`; the older `"css"` / `"js"` spellings
/// are still accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[serde(alias = "css")]
    Style,
    #[serde(alias = "js")]
    Script,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Style => "CSS",
            ResourceKind::Script => "JS",
        }
    }
}

/// Externally referenced stylesheet or script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalResource {
    /// Absolute URL, unique within the registry
    pub url: String,

    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

impl ExternalResource {
    pub fn new(url: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    pub fn is_style(&self) -> bool {
        self.kind == ResourceKind::Style
    }

    pub fn is_script(&self) -> bool {
        self.kind == ResourceKind::Script
    }
}

/// Preview surface sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceProfile {
    pub const ALL: [DeviceProfile; 3] = [
        DeviceProfile::Mobile,
        DeviceProfile::Tablet,
        DeviceProfile::Desktop,
    ];

    /// Fixed frame size in CSS pixels, `None` fills the preview pane
    pub fn frame_size(self) -> Option<(u32, u32)> {
        match self {
            DeviceProfile::Mobile => Some((375, 667)),
            DeviceProfile::Tablet => Some((768, 1024)),
            DeviceProfile::Desktop => None,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DeviceProfile::Mobile => "device-mobile",
            DeviceProfile::Tablet => "device-tablet",
            DeviceProfile::Desktop => "device-desktop",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceProfile::Mobile => "モバイル",
            DeviceProfile::Tablet => "タブレット",
            DeviceProfile::Desktop => "デスクトップ",
        }
    }
}

/// Status level for messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusLevel {
    /// 処理が正常に完了
    Info,
    /// 入力に問題があるが再試行可能
    Warning,
    /// エラーが発生し処理が失敗
    Error,
}

/// Result codes surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // 成功メッセージ (INFO)
    ResourceAdded,
    ResourceRemoved,
    PreviewRefreshed,
    ResetOk,
    ExportOk,

    // 入力エラー (WARNING)
    ValidationEmptyUrl,
    ValidationInvalidUrl,
    ResourceDuplicate,
    ResourceUnclassifiable,

    // エクスポートエラー (ERROR)
    ExportError,

    // ストレージエラー (ERROR)
    StorageWriteError,
    StorageReadError,
}

/// Processing result information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Status level (INFO/WARNING/ERROR)
    pub level: StatusLevel,

    pub code: ErrorCode,

    /// Optional additional context (e.g., the offending URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ProcessResult {
    pub fn info(code: ErrorCode) -> Self {
        Self {
            level: StatusLevel::Info,
            code,
            context: None,
        }
    }

    pub fn warning(code: ErrorCode) -> Self {
        Self {
            level: StatusLevel::Warning,
            code,
            context: None,
        }
    }

    pub fn error(code: ErrorCode) -> Self {
        Self {
            level: StatusLevel::Error,
            code,
            context: None,
        }
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Storage-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("ストレージが利用できません")]
    Unavailable,

    #[error("LocalStorage容量超過 (キー: {0})")]
    QuotaExceeded(String),

    #[error("読み込みに失敗しました (キー: {key}): {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("保存データが破損しています (キー: {key}): {reason}")]
    Corrupt { key: String, reason: String },

    #[error("保存データの変換に失敗しました (キー: {key}): {reason}")]
    Encode { key: String, reason: String },
}

impl StorageError {
    pub fn to_process_result(&self) -> ProcessResult {
        let code = match self {
            StorageError::ReadFailed { .. } | StorageError::Corrupt { .. } => {
                ErrorCode::StorageReadError
            }
            StorageError::Unavailable
            | StorageError::QuotaExceeded(_)
            | StorageError::Encode { .. } => ErrorCode::StorageWriteError,
        };
        ProcessResult::error(code)
    }
}
