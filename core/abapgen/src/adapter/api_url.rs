//! 接続先ベース URL の解決
//!
//! 優先順位:
//! 1. 明示指定（--api-url / ABAPGEN_API_URL）
//! 2. フロントエンドの origin が Codespaces のプレビューホストなら、ポート部分 `-5173.` を `-8000.` に置換
//! 3. http://localhost:8000

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TEMPLATES_URL: &str = "http://localhost:5173";

const FRONTEND_PORT_TOKEN: &str = "-5173.";
const BACKEND_PORT_TOKEN: &str = "-8000.";
const PREVIEW_HOST_SUFFIXES: &[&str] = &["github.dev", "githubpreview.dev"];

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// `scheme://host[:port]/...` から host 部分を取り出す
fn host_of(origin: &str) -> &str {
    let rest = origin.split_once("://").map_or(origin, |(_, r)| r);
    let authority = rest.split('/').next().unwrap_or(rest);
    authority.split(':').next().unwrap_or(authority)
}

fn is_preview_host(host: &str) -> bool {
    PREVIEW_HOST_SUFFIXES.iter().any(|s| host.contains(s))
}

/// API のベース URL を決める（末尾の `/` は除く）
pub fn resolve_api_base_url(explicit: Option<&str>, origin: Option<&str>) -> String {
    if let Some(url) = explicit.filter(|s| !s.trim().is_empty()) {
        return trim_base(url);
    }
    if let Some(origin) = origin.filter(|s| !s.trim().is_empty()) {
        if is_preview_host(host_of(origin.trim())) {
            return trim_base(&origin.replacen(FRONTEND_PORT_TOKEN, BACKEND_PORT_TOKEN, 1));
        }
    }
    DEFAULT_API_URL.to_string()
}

/// テンプレート配信元のベース URL（明示指定 → origin → 既定）
pub fn resolve_templates_base_url(explicit: Option<&str>, origin: Option<&str>) -> String {
    let non_empty = |s: &&str| !s.trim().is_empty();
    explicit
        .filter(non_empty)
        .or(origin.filter(non_empty))
        .map(trim_base)
        .unwrap_or_else(|| DEFAULT_TEMPLATES_URL.to_string())
}
