//! ワークフロー API 送信戦略（n8n Webhook の中継）
//!
//! POST {base}/api/upload multipart（file, message）。ファイル無しの送信は受け付けない。
//! 応答は `{"success": bool, "content"?: string, "error"?: string}`。スレッドは持たない。

use super::http_support::{build_client, malformed, read_success_body, upload_form};
use crate::ports::outbound::{
    GenerationFailure, GenerationRequest, GenerationResponse, GenerationService, ResponseStatus,
};
use common::error::Error;
use reqwest::blocking::Client;
use serde::Deserialize;

const GENERIC_FAILURE: &str = "Failed to get response from n8n workflow";
const EMPTY_CONTENT: &str = "No response from workflow";
const DEGRADED_DEFAULT: &str = "Workflow returned with issues";

#[derive(Debug, Deserialize)]
struct WorkflowReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub(crate) fn parse_workflow_reply(body: &str) -> Result<GenerationResponse, GenerationFailure> {
    let reply: WorkflowReply = serde_json::from_str(body).map_err(malformed)?;
    let content = reply
        .content
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| EMPTY_CONTENT.to_string());
    let status = if reply.success {
        ResponseStatus::Completed
    } else {
        ResponseStatus::Degraded(
            reply
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEGRADED_DEFAULT.to_string()),
        )
    };
    Ok(GenerationResponse {
        content,
        session: None,
        status,
    })
}

pub struct WorkflowApi {
    base_url: String,
    client: Client,
}

impl WorkflowApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client()?,
        })
    }
}

impl GenerationService for WorkflowApi {
    fn label(&self) -> &str {
        "Workflow"
    }

    fn requires_file(&self) -> bool {
        true
    }

    fn submit(&self, request: &GenerationRequest<'_>) -> Result<GenerationResponse, GenerationFailure> {
        let file = request
            .file
            .ok_or_else(|| GenerationFailure::new("Please upload a file first"))?;
        // ワークフロー側はスレッドを持たないので thread_id は送らない
        let form = upload_form(file, request.message, None, request.ricef)?;
        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .map_err(|e| GenerationFailure::new(e.to_string()))?;
        let body = read_success_body(response, GENERIC_FAILURE)?;
        parse_workflow_reply(&body)
    }

    fn health(&self) -> Result<bool, Error> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .map_err(|e| Error::http(e.to_string()))?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let v: serde_json::Value = response.json().map_err(|e| Error::json(e.to_string()))?;
        Ok(v["n8n_reachable"].as_bool().unwrap_or(false))
    }
}
