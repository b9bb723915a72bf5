//! 通知を stderr に 1 行で出す Notifier 実装（トースト相当）

use crate::ports::outbound::{Notification, NotificationLevel, Notifier};

fn icon(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "✔",
        NotificationLevel::Info => "ℹ",
        NotificationLevel::Warning => "⚠",
        NotificationLevel::Error => "✖",
    }
}

/// 通知 1 件の表示文字列
pub fn format_notification(n: &Notification) -> String {
    format!("{} {}", icon(n.level), n.message)
}

#[derive(Debug, Clone, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", format_notification(&notification));
    }
}
