//! クリップボード Outbound ポート

use crate::error::Error;

/// テキストをクリップボードへ書き込む抽象
///
/// 実装は `common::adapter::SystemClipboard`（OSC 52 → arboard）やテスト用の記録実装。
pub trait ClipboardSink: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<(), Error>;
}
