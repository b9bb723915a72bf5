//! 人間向けログ（LogRecord → stderr に要点のみ出力）と複数出力への分配
//!
//! -v 指定時に JSONL ファイルと並べて使う。fields の全量は出さず短く切り詰める。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 200;

fn level_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
    }
}

/// 1 行に整形する（stderr 出力用）
pub fn format_human(rec: &LogRecord) -> String {
    let mut line = format!("[log] {} {}", level_label(rec.level), rec.message);
    if let Some(kind) = &rec.kind {
        line.push_str(&format!(" ({})", kind));
    }
    if let Some(fields) = &rec.fields {
        let s = serde_json::to_string(fields).unwrap_or_default();
        if s.chars().count() > FIELDS_SUMMARY_MAX {
            let truncated: String = s.chars().take(FIELDS_SUMMARY_MAX).collect();
            line.push_str(&format!(" {}...", truncated));
        } else {
            line.push_str(&format!(" {}", s));
        }
    }
    line
}

/// stderr に人間向けに出力する Log 実装
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", format_human(record));
        Ok(())
    }
}

/// 複数の Log へ同じレコードを配る。最初のエラーを返すが残りへの配布は続ける。
pub struct TeeLog {
    logs: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(logs: Vec<Arc<dyn Log>>) -> Self {
        Self { logs }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for log in &self.logs {
            if let Err(e) = log.log(record) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
