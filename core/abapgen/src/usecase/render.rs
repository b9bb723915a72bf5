//! 1 ターン分の本文を表示ブロック列に変換する
//!
//! user / error ターンはフェンスを解釈せず 1 段落。assistant ターンはフェンススキャナで
//! Text を段落、Code を番号付きのコードブロックにする（抽出用のキーワード判定は使わない）。

use crate::domain::{ChatTurn, Role};
use common::fence;

/// 表示ブロック
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBlock {
    Paragraph(String),
    /// index はターン内で 1 始まり（`/copy <n>` の n）
    Code { index: usize, body: String },
}

pub fn render_turn(turn: &ChatTurn) -> Vec<RenderBlock> {
    match turn.role() {
        Role::User | Role::Error => vec![RenderBlock::Paragraph(turn.content().to_string())],
        Role::Assistant => render_assistant(turn.content()),
    }
}

fn render_assistant(content: &str) -> Vec<RenderBlock> {
    let mut blocks = Vec::new();
    let mut index = 0;
    for segment in fence::scan(content) {
        match segment {
            fence::Segment::Code { body, .. } => {
                index += 1;
                blocks.push(RenderBlock::Code {
                    index,
                    body: body.to_string(),
                });
            }
            fence::Segment::Text { text, .. } => {
                let text = text.trim();
                if !text.is_empty() {
                    blocks.push(RenderBlock::Paragraph(text.to_string()));
                }
            }
        }
    }
    if blocks.is_empty() {
        blocks.push(RenderBlock::Paragraph(content.to_string()));
    }
    blocks
}

/// 本文中のコードブロック本文（表示順）
pub fn code_blocks(content: &str) -> Vec<&str> {
    fence::scan(content).filter_map(|s| s.code_body()).collect()
}
