//! ターンの端末表示

use crate::domain::{ChatTurn, Role};
use crate::usecase::{render_turn, RenderBlock};

fn heading(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
        Role::Error => "Error",
    }
}

/// 1 ターンを表示用テキストにする（末尾改行付き）
///
/// コードブロックは `--- ABAP #n ---` で囲み、n を `/copy n` で指定できるようにする。
pub fn format_turn(turn: &ChatTurn) -> String {
    let mut out = format!(
        "[{}] {}\n",
        turn.created_at().format("%H:%M:%S"),
        heading(turn.role())
    );
    for block in render_turn(turn) {
        match block {
            RenderBlock::Paragraph(text) => {
                out.push_str(&text);
                out.push('\n');
            }
            RenderBlock::Code { index, body } => {
                out.push_str(&format!("--- ABAP #{} ---\n", index));
                out.push_str(&body);
                out.push_str("\n--- end ---\n");
            }
        }
    }
    out
}

pub fn print_chat_help(out: &mut dyn std::io::Write) -> std::io::Result<()> {
    writeln!(out, "Type a message and press Enter to send it.")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  /upload <path>   Stage a .json, .txt or .xlsx file for the next message")?;
    writeln!(out, "  /unstage         Remove the staged file")?;
    writeln!(out, "  /send            Send the staged file without a message")?;
    writeln!(out, "  /copy [n]        Copy the last generated code (or block n of the latest reply)")?;
    writeln!(out, "  /download        Save the last generated code as generated_code.abap")?;
    writeln!(out, "  /new             Clear the chat and start a new generation")?;
    writeln!(out, "  /help            Show this help")?;
    writeln!(out, "  /quit            Exit")
}
