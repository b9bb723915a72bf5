//! アダプター（Outbound ポートの標準実装）
//!
//! usecase はポートの trait 経由でのみ外界に触れる。
//! ここにあるのは本番用の標準実装で、テストでは記録用の実装を注入する。

pub mod dir_file_saver;
pub mod file_json_log;
pub mod human_log;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;
pub mod stderr_notifier;
pub mod system_clipboard;

pub use dir_file_saver::DirFileSaver;
pub use file_json_log::{FileJsonLog, NoopLog};
pub use human_log::{StderrLog, TeeLog};
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use stderr_notifier::StderrNotifier;
pub use system_clipboard::SystemClipboard;
