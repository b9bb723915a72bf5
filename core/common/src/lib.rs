//! abapgen 共通ライブラリ
//!
//! エラー型・Outbound ポートとその標準アダプタ、コードフェンススキャナを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型
pub mod domain;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// コードフェンススキャナ
pub mod fence;
