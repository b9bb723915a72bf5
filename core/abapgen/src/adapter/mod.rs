//! アダプター（abapgen 固有の Outbound ポート実装）

pub mod api_url;
pub mod assistant_api;
mod http_support;
pub mod http_template_source;
pub mod workflow_api;

pub use api_url::{resolve_api_base_url, resolve_templates_base_url};
pub use assistant_api::AssistantApi;
pub use http_template_source::HttpTemplateSource;
pub use workflow_api::WorkflowApi;
