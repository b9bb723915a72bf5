//! 共通ポート
//!
//! common が持つのは outbound だけ。アプリの入り口（inbound）は各バイナリ側で定義する。

pub mod outbound;
