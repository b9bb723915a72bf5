//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリ・接続先などの設定値を環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::{Dirs, HomeDir};
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. ABAPGEN_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/abapgen（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/abapgen
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// ホーム配下の state ディレクトリ
    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        let home = self.resolve_home_dir()?;
        Ok(Dirs::under(&home))
    }

    /// 任意の設定値（空文字は未設定扱い）
    fn var(&self, key: &str) -> Option<String>;
}
