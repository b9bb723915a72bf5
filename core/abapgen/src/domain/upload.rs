//! 送信待ちファイル（PendingUpload）と受け付け条件

use std::path::Path;

/// 受け付ける拡張子（小文字・ドット付き）
pub const ALLOWED_EXTENSIONS: &[&str] = &[".json", ".txt", ".xlsx"];

/// 1 ファイルの上限（10 MiB）
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// 選択済みファイル（名前と中身）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    name: String,
    bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 小文字化した拡張子（ドット付き）。無ければ None。
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    /// multipart の Content-Type
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some(".json") => "application/json",
            Some(".txt") => "text/plain",
            Some(".xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            _ => "application/octet-stream",
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}

/// 受け付けなかった理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingRejection {
    UnsupportedExtension { name: String },
    TooLarge { name: String, len: u64, max: u64 },
}

impl StagingRejection {
    /// 通知に出す文言
    pub fn message(&self) -> String {
        match self {
            StagingRejection::UnsupportedExtension { .. } => {
                format!("Please select a {} file", allowed_list())
            }
            StagingRejection::TooLarge { name, max, .. } => {
                format!("{} is too large. Max size: {} bytes", name, max)
            }
        }
    }
}

fn allowed_list() -> String {
    match ALLOWED_EXTENSIONS.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

/// ステージング時の検査条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_extensions: Vec<String>,
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    /// 名前とサイズだけで判定する（中身を読む前に使える）
    pub fn check(&self, name: &str, len: u64) -> Result<(), StagingRejection> {
        let ok_ext = extension_of(name)
            .map(|ext| self.allowed_extensions.iter().any(|a| *a == ext))
            .unwrap_or(false);
        if !ok_ext {
            return Err(StagingRejection::UnsupportedExtension {
                name: name.to_string(),
            });
        }
        if len > self.max_bytes {
            return Err(StagingRejection::TooLarge {
                name: name.to_string(),
                len,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// 送信待ちスロット。空か 1 件だけ。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingUpload(Option<StagedFile>);

impl PendingUpload {
    pub fn get(&self) -> Option<&StagedFile> {
        self.0.as_ref()
    }

    pub fn is_staged(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) fn stage(&mut self, file: StagedFile) {
        self.0 = Some(file);
    }

    pub(crate) fn clear(&mut self) {
        self.0 = None;
    }
}
