//! テンプレートのダウンロード（取得した JSON を整形して保存するだけ）

use crate::domain::RicefKind;
use crate::ports::outbound::TemplateSource;
use common::error::Error;
use common::ports::outbound::{FileSaver, Log, LogLevel, LogRecord, Notification, Notifier};
use std::path::PathBuf;
use std::sync::Arc;

pub struct TemplateUseCase {
    source: Arc<dyn TemplateSource>,
    file_saver: Arc<dyn FileSaver>,
    notifier: Arc<dyn Notifier>,
    log: Arc<dyn Log>,
}

impl TemplateUseCase {
    pub fn new(
        source: Arc<dyn TemplateSource>,
        file_saver: Arc<dyn FileSaver>,
        notifier: Arc<dyn Notifier>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            source,
            file_saver,
            notifier,
            log,
        }
    }

    /// `<kind>_template.json` を取得し、2 スペースインデントで保存する
    pub fn download(&self, kind: RicefKind) -> Result<PathBuf, Error> {
        match self.fetch_and_save(kind) {
            Ok(path) => {
                self.notifier.notify(Notification::success(format!(
                    "{} template downloaded successfully!",
                    kind.display_name()
                )));
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Info, "template downloaded")
                        .layer("usecase")
                        .kind("template")
                        .field("kind", kind.as_str())
                        .field("path", path.display().to_string()),
                );
                Ok(path)
            }
            Err(e) => {
                self.notifier.notify(Notification::error(
                    "Failed to download template. Please try again.",
                ));
                let _ = self.log.log(
                    &LogRecord::new(LogLevel::Error, e.to_string())
                        .layer("usecase")
                        .kind("template")
                        .field("kind", kind.as_str()),
                );
                Err(e)
            }
        }
    }

    fn fetch_and_save(&self, kind: RicefKind) -> Result<PathBuf, Error> {
        let value = self.source.fetch(kind)?;
        let pretty = serde_json::to_string_pretty(&value)?;
        self.file_saver
            .save(&kind.template_file_name(), pretty.as_bytes())
    }
}
