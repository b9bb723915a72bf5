//! クリップボード実装
//!
//! 端末に接続されていれば OSC 52 エスケープシーケンス（SSH 越しでも効く）、
//! 失敗した場合や端末でない場合はシステムクリップボード（arboard）へ書き込む。

use crate::error::Error;
use crate::ports::outbound::ClipboardSink;
use base64::Engine as _;
use std::io::{IsTerminal, Write};

/// OSC 52 の書式: ESC ] 52 ; c ; <base64> ESC \
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{}\x1b\\", encoded)
}

/// OSC 52 → arboard の順に試すクリップボード
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn copy_osc52(text: &str) -> Result<(), Error> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(Error::system("stdout is not a terminal"));
        }
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| Error::io_msg(format!("OSC 52 clipboard failed: {}", e)))
    }

    fn copy_system(text: &str) -> Result<(), Error> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| Error::system(format!("System clipboard failed: {}", e)))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::system(format!("System clipboard failed: {}", e)))
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), Error> {
        if Self::copy_osc52(text).is_ok() {
            return Ok(());
        }
        Self::copy_system(text)
    }
}
