//! トランスクリプト（追記専用のターン列）
//!
//! 挿入順 = 表示順。作成時刻は単調非減少に保つ（時計が戻っても直前のターンの時刻に揃える）。

use super::chat_turn::{ChatTurn, Role};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// 末尾に 1 ターン追加し、追加したターンを返す
    pub fn append(&mut self, role: Role, content: impl Into<String>, at: DateTime<Utc>) -> &ChatTurn {
        let at = match self.turns.last() {
            Some(last) if last.created_at() > at => last.created_at(),
            _ => at,
        };
        self.turns.push(ChatTurn::new(role, content, at));
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// 直近の assistant ターン
    pub fn last_assistant(&self) -> Option<&ChatTurn> {
        self.turns.iter().rev().find(|t| t.role() == Role::Assistant)
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }
}
