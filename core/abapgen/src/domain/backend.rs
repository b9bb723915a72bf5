//! 送信戦略の種類（起動時に 1 つ選ぶ）

use common::error::Error;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// OpenAI アシスタントを使う API（/api/chat, /api/upload）
    #[default]
    Assistant,
    /// n8n ワークフローの Webhook を中継する API（/api/upload のみ）
    Workflow,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Assistant => "assistant",
            BackendKind::Workflow => "workflow",
        }
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assistant" | "openai" => Ok(BackendKind::Assistant),
            "workflow" | "n8n" => Ok(BackendKind::Workflow),
            other => Err(Error::invalid_argument(format!(
                "Unknown backend '{}'. Expected 'assistant' or 'workflow'",
                other
            ))),
        }
    }
}
