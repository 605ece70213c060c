// Message mapping for error codes

use playground_core::{ErrorCode, ProcessResult, StatusLevel};

/// Message level for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageLevel {
    #[default]
    Info,
    Warning,
    Error,
}

impl From<StatusLevel> for MessageLevel {
    fn from(level: StatusLevel) -> Self {
        match level {
            StatusLevel::Info => MessageLevel::Info,
            StatusLevel::Warning => MessageLevel::Warning,
            StatusLevel::Error => MessageLevel::Error,
        }
    }
}

fn context_url(result: &ProcessResult) -> Option<&str> {
    result.context.as_ref()?.get("url")?.as_str()
}

/// Get user-friendly message from ProcessResult
pub fn get_message_from_result(result: &ProcessResult) -> String {
    match &result.code {
        // 正常完了 (INFO)
        ErrorCode::ResourceAdded => match context_url(result) {
            Some(url) => format!("外部リソースを追加しました: {}", url),
            None => "外部リソースを追加しました".to_string(),
        },
        ErrorCode::ResourceRemoved => "外部リソースを削除しました".to_string(),
        ErrorCode::PreviewRefreshed => "プレビューを更新しました".to_string(),
        ErrorCode::ResetOk => "コードを初期状態に戻しました".to_string(),
        ErrorCode::ExportOk => "プロジェクトをダウンロードしました".to_string(),

        // 入力エラー (WARNING)
        ErrorCode::ValidationEmptyUrl => "URLを入力してください".to_string(),
        ErrorCode::ValidationInvalidUrl => {
            "URLの形式が正しくありません。https:// から始まる完全なURLを入力してください".to_string()
        }
        ErrorCode::ResourceDuplicate => "このURLは既に追加されています".to_string(),
        ErrorCode::ResourceUnclassifiable => {
            "CSSかJavaScriptか判別できませんでした。拡張子が .css または .js のURLをお試しください"
                .to_string()
        }

        // エクスポートエラー (ERROR)
        ErrorCode::ExportError => {
            "ファイルのエクスポートに失敗しました。再度お試しください".to_string()
        }

        // ストレージエラー (ERROR)
        ErrorCode::StorageWriteError => {
            "ローカルストレージへの保存に失敗しました。ブラウザの設定をご確認ください".to_string()
        }
        ErrorCode::StorageReadError => {
            "ローカルストレージからの読み込みに失敗しました。保存されたデータが破損している可能性があります".to_string()
        }
    }
}

/// Message text and level for display
pub fn to_notice(result: &ProcessResult) -> (String, MessageLevel) {
    (get_message_from_result(result), result.level.into())
}

/// Get CSS class for message level
pub fn get_message_class(level: MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => "message-text",
        MessageLevel::Warning => "message-text warning",
        MessageLevel::Error => "message-text error",
    }
}
