//! テンプレート配信 Outbound ポート

use crate::domain::RicefKind;
use common::error::Error;

/// RICEF 種別ごとの JSON テンプレートを取得する
pub trait TemplateSource: Send + Sync {
    fn fetch(&self, kind: RicefKind) -> Result<serde_json::Value, Error>;
}
