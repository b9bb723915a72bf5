//! 時刻 Outbound ポート
//!
//! ChatTurn の作成時刻などはこの trait 経由で取得する（テストでは固定時刻を注入）。

use chrono::{DateTime, Utc};

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の固定時刻など。
pub trait Clock: Send + Sync {
    /// 現在時刻（UTC）
    fn now(&self) -> DateTime<Utc>;
}
