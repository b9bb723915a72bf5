//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: アプリが外界（生成サービス・テンプレート配信）を使うための trait
//!
//! 共通のポート（通知・クリップボード・保存・ログ・時刻）は common::ports::outbound にある。

pub mod inbound;
pub mod outbound;
