//! HTTP アダプタ共通部品（クライアント生成・失敗詳細の抽出・multipart 組み立て）

use crate::domain::{RicefKind, SessionHandle, StagedFile};
use crate::ports::outbound::GenerationFailure;
use common::error::Error;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// 送信用クライアント。応答が返るまで待つ（タイムアウトは設けない）。
pub fn build_client() -> Result<Client, Error> {
    Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))
}

/// 非 2xx 応答の本文から利用者向けの詳細を取り出す
///
/// `detail`（FastAPI の HTTPException）→ `error` → 汎用メッセージ（ステータス付き）の順。
pub fn failure_detail(status: u16, body: &str, generic: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["detail", "error"].iter().find_map(|key| match v.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
    });
    from_body.unwrap_or_else(|| format!("{} (HTTP {})", generic, status))
}

/// ステータスを確認して本文を返す。非 2xx は GenerationFailure。
pub fn read_success_body(response: Response, generic: &str) -> Result<String, GenerationFailure> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| GenerationFailure::new(format!("Failed to read response: {}", e)))?;
    if !status.is_success() {
        return Err(GenerationFailure::new(failure_detail(
            status.as_u16(),
            &body,
            generic,
        )));
    }
    Ok(body)
}

/// 応答 JSON の形式不正
pub fn malformed(e: serde_json::Error) -> GenerationFailure {
    GenerationFailure::new(format!("Malformed response: {}", e))
}

/// アップロード用の multipart（file は必須、その他は値があるときだけ付ける）
pub fn upload_form(
    file: &StagedFile,
    message: &str,
    session: Option<&SessionHandle>,
    ricef: Option<RicefKind>,
) -> Result<Form, GenerationFailure> {
    let part = Part::bytes(file.bytes().to_vec())
        .file_name(file.name().to_string())
        .mime_str(file.content_type())
        .map_err(|e| GenerationFailure::new(format!("Invalid upload: {}", e)))?;
    let mut form = Form::new().part("file", part);
    if !message.is_empty() {
        form = form.text("message", message.to_string());
    }
    if let Some(handle) = session {
        form = form.text("thread_id", handle.as_str().to_string());
    }
    if let Some(kind) = ricef {
        form = form.text("ricef_type", kind.as_str());
    }
    Ok(form)
}
