//! RICEF 分類（Report / Interface / Conversion / Enhancement / Form）
//!
//! テンプレートの種類と、リクエストに添える ricef_type に使う。

use common::error::Error;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RicefKind {
    Report,
    Interface,
    Conversion,
    Enhancement,
    Form,
}

impl RicefKind {
    pub const ALL: [RicefKind; 5] = [
        RicefKind::Report,
        RicefKind::Interface,
        RicefKind::Conversion,
        RicefKind::Enhancement,
        RicefKind::Form,
    ];

    /// API / ファイル名に使う識別子
    pub fn as_str(&self) -> &'static str {
        match self {
            RicefKind::Report => "report",
            RicefKind::Interface => "interface",
            RicefKind::Conversion => "conversion",
            RicefKind::Enhancement => "enhancement",
            RicefKind::Form => "form",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RicefKind::Report => "Report",
            RicefKind::Interface => "Interface",
            RicefKind::Conversion => "Conversion",
            RicefKind::Enhancement => "Enhancement",
            RicefKind::Form => "Form",
        }
    }

    /// `<kind>_template.json`
    pub fn template_file_name(&self) -> String {
        format!("{}_template.json", self.as_str())
    }
}

impl FromStr for RicefKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        RicefKind::ALL
            .into_iter()
            .find(|k| k.as_str() == lower)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Unknown RICEF type '{}'. Expected one of: report, interface, conversion, enhancement, form",
                    s
                ))
            })
    }
}
