//! テンプレート配信の HTTP 実装
//!
//! GET {base}/templates/<kind>_template.json

use super::http_support::build_client;
use crate::domain::RicefKind;
use crate::ports::outbound::TemplateSource;
use common::error::Error;
use reqwest::blocking::Client;

pub struct HttpTemplateSource {
    base_url: String,
    client: Client,
}

impl HttpTemplateSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client()?,
        })
    }

    pub(crate) fn url_for(&self, kind: RicefKind) -> String {
        format!("{}/templates/{}", self.base_url, kind.template_file_name())
    }
}

impl TemplateSource for HttpTemplateSource {
    fn fetch(&self, kind: RicefKind) -> Result<serde_json::Value, Error> {
        let url = self.url_for(kind);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::http(format!("{}: {}", url, e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(format!("{}: HTTP {}", url, status.as_u16())));
        }
        let body = response
            .text()
            .map_err(|e| Error::http(format!("{}: {}", url, e)))?;
        serde_json::from_str(&body).map_err(|e| Error::json(format!("{}: {}", url, e)))
    }
}
