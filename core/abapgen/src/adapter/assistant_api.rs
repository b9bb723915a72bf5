//! アシスタント API 送信戦略
//!
//! - テキストのみ: POST {base}/api/chat  `{"thread_id": string|null, "message": string}`
//! - ファイル付き: POST {base}/api/upload multipart（file, message, thread_id, ricef_type）
//!
//! 応答は `{"thread_id": string, "content": string}`。thread_id がセッションハンドルになる。

use super::http_support::{build_client, malformed, read_success_body, upload_form};
use crate::domain::SessionHandle;
use crate::ports::outbound::{
    GenerationFailure, GenerationRequest, GenerationResponse, GenerationService,
};
use common::error::Error;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const GENERIC_FAILURE: &str = "Failed to get response from assistant";

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequestBody<'a> {
    pub thread_id: Option<&'a str>,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ricef_type: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantReply {
    pub content: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

pub(crate) fn parse_assistant_reply(body: &str) -> Result<GenerationResponse, GenerationFailure> {
    let reply: AssistantReply = serde_json::from_str(body).map_err(malformed)?;
    let session = reply
        .thread_id
        .filter(|t| !t.is_empty())
        .map(SessionHandle::new);
    Ok(GenerationResponse::completed(reply.content, session))
}

pub struct AssistantApi {
    base_url: String,
    client: Client,
}

impl AssistantApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client()?,
        })
    }
}

impl GenerationService for AssistantApi {
    fn label(&self) -> &str {
        "Assistant"
    }

    fn submit(&self, request: &GenerationRequest<'_>) -> Result<GenerationResponse, GenerationFailure> {
        let response = match request.file {
            None => {
                let body = ChatRequestBody {
                    thread_id: request.session.map(|s| s.as_str()),
                    message: request.message,
                    ricef_type: request.ricef.map(|k| k.as_str()),
                };
                self.client
                    .post(format!("{}/api/chat", self.base_url))
                    .json(&body)
                    .send()
            }
            Some(file) => {
                let form = upload_form(file, request.message, request.session, request.ricef)?;
                self.client
                    .post(format!("{}/api/upload", self.base_url))
                    .multipart(form)
                    .send()
            }
        }
        .map_err(|e| GenerationFailure::new(e.to_string()))?;

        let body = read_success_body(response, GENERIC_FAILURE)?;
        parse_assistant_reply(&body)
    }

    fn health(&self) -> Result<bool, Error> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .map_err(|e| Error::http(e.to_string()))?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let v: serde_json::Value = response.json().map_err(|e| Error::json(e.to_string()))?;
        Ok(v["status"].as_str() == Some("healthy"))
    }
}
