//! 実行時ディレクトリ（ABAPGEN_HOME / XDG 解決結果）

use super::HomeDir;
use std::path::PathBuf;

/// 解決済みの state ディレクトリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    pub state_dir: PathBuf,
}

impl Dirs {
    /// ホーム直下に state を置く
    pub fn under(home: &HomeDir) -> Self {
        Self {
            state_dir: home.join("state"),
        }
    }

    /// JSONL ログファイル
    pub fn log_file(&self) -> PathBuf {
        self.state_dir.join("abapgen.jsonl")
    }
}
