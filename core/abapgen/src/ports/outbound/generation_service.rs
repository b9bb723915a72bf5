//! 生成サービス Outbound ポート（送信戦略）
//!
//! テキスト・ファイル・セッションハンドルを送り、本文と（あれば）新しいハンドルを受け取る。
//! アシスタント API とワークフロー API はこの trait の実装として差し替える。

use crate::domain::{RicefKind, SessionHandle, StagedFile};
use common::error::Error;

/// 1 回分の送信内容
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// trim 済みの入力（ファイルのみの送信では空）
    pub message: &'a str,
    pub file: Option<&'a StagedFile>,
    pub session: Option<&'a SessionHandle>,
    pub ricef: Option<RicefKind>,
}

/// 2xx で返ったが中身に問題があることを示す
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    Completed,
    /// ワークフローが success: false を返した（理由付き）
    Degraded(String),
}

/// 成功応答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub content: String,
    pub session: Option<SessionHandle>,
    pub status: ResponseStatus,
}

impl GenerationResponse {
    pub fn completed(content: impl Into<String>, session: Option<SessionHandle>) -> Self {
        Self {
            content: content.into(),
            session,
            status: ResponseStatus::Completed,
        }
    }
}

/// 通信失敗（到達不能・非 2xx・応答の形式不正）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct GenerationFailure {
    pub detail: String,
}

impl GenerationFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// 送信戦略
pub trait GenerationService: Send + Sync {
    /// 表示・ログ用の名前（例: "Assistant", "Workflow"）
    fn label(&self) -> &str;

    /// ファイル無しの送信を受け付けないか
    fn requires_file(&self) -> bool {
        false
    }

    /// 1 回送信する。呼び出しは応答が返るまでブロックする。
    fn submit(&self, request: &GenerationRequest<'_>) -> Result<GenerationResponse, GenerationFailure>;

    /// バックエンドが応答可能か
    fn health(&self) -> Result<bool, Error>;
}
