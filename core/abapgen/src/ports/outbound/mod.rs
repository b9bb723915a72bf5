//! Outbound ポート: アプリが外界（生成サービス・テンプレート配信）を使うための trait

pub mod generation_service;
pub mod template_source;

pub use generation_service::{
    GenerationFailure, GenerationRequest, GenerationResponse, GenerationService, ResponseStatus,
};
pub use template_source::TemplateSource;
