//! チャットの 1 ターン（作成後は不変）

use chrono::{DateTime, Utc};

/// 発話の種別（送信者の識別ではなく分類）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
    Error,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Error => "error",
        }
    }
}

/// トランスクリプトの 1 要素。フィールドは生成時に確定し、以後変更しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    role: Role,
    content: String,
    created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// 表示専用のタイムスタンプ
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
