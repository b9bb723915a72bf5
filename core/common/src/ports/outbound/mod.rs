//! Outbound ポート: アプリが外界（FS・時刻・環境変数・ログ・クリップボード・保存・通知）を使うための trait

pub mod clipboard;
pub mod clock;
pub mod env_resolver;
pub mod file_saver;
pub mod fs;
pub mod log;
pub mod notifier;

pub use clipboard::ClipboardSink;
pub use clock::Clock;
pub use env_resolver::EnvResolver;
pub use file_saver::FileSaver;
pub use fs::{FileMetadata, FileSystem};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use notifier::{Notification, NotificationLevel, Notifier};
