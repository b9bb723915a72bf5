//! ダウンロード（ファイル保存）Outbound ポート

use crate::error::Error;
use std::path::PathBuf;

/// バイト列を名前付きファイルとして利用者に渡す抽象
///
/// ブラウザのダウンロードに相当する。保存先の決定は実装側の責務。
pub trait FileSaver: Send + Sync {
    /// 保存したファイルの場所を返す
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, Error>;
}
