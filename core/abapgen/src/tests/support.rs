//! テスト用のスタブ・記録アダプタ

use crate::domain::RicefKind;
use crate::ports::outbound::{
    GenerationFailure, GenerationRequest, GenerationResponse, GenerationService, TemplateSource,
};
use crate::usecase::{EngineDeps, EngineOptions, TranscriptEngine};
use chrono::{DateTime, TimeZone, Utc};
use common::adapter::NoopLog;
use common::error::Error;
use common::ports::outbound::{
    ClipboardSink, Clock, FileSaver, Notification, NotificationLevel, Notifier,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 受け取ったリクエストの記録（借用を持てないので所有型に写す）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub message: String,
    pub file: Option<String>,
    pub session: Option<String>,
    pub ricef: Option<RicefKind>,
}

/// 台本どおりに応答する生成サービス
pub struct StubService {
    label: &'static str,
    requires_file: bool,
    replies: Mutex<VecDeque<Result<GenerationResponse, GenerationFailure>>>,
    pub seen: Mutex<Vec<SeenRequest>>,
}

impl StubService {
    pub fn new(replies: Vec<Result<GenerationResponse, GenerationFailure>>) -> Self {
        Self {
            label: "Assistant",
            requires_file: false,
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn workflow(replies: Vec<Result<GenerationResponse, GenerationFailure>>) -> Self {
        Self {
            label: "Workflow",
            requires_file: true,
            ..Self::new(replies)
        }
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl GenerationService for StubService {
    fn label(&self) -> &str {
        self.label
    }

    fn requires_file(&self) -> bool {
        self.requires_file
    }

    fn submit(&self, request: &GenerationRequest<'_>) -> Result<GenerationResponse, GenerationFailure> {
        self.seen.lock().unwrap().push(SeenRequest {
            message: request.message.to_string(),
            file: request.file.map(|f| f.name().to_string()),
            session: request.session.map(|s| s.as_str().to_string()),
            ricef: request.ricef,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationFailure::new("no scripted reply")))
    }

    fn health(&self) -> Result<bool, Error> {
        Ok(true)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notes: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notes.lock().unwrap().iter().map(|n| n.message.clone()).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notes.lock().unwrap().last().cloned()
    }

    pub fn levels(&self) -> Vec<NotificationLevel> {
        self.notes.lock().unwrap().iter().map(|n| n.level).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notes.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub copied: Mutex<Vec<String>>,
    pub fail: bool,
}

impl ClipboardSink for RecordingClipboard {
    fn copy_text(&self, text: &str) -> Result<(), Error> {
        if self.fail {
            return Err(Error::system("clipboard unavailable"));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSaver {
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FileSaver for RecordingSaver {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, Error> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from("/out").join(file_name))
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct StubTemplates {
    pub value: Result<serde_json::Value, Error>,
}

impl TemplateSource for StubTemplates {
    fn fetch(&self, _kind: RicefKind) -> Result<serde_json::Value, Error> {
        self.value.clone()
    }
}

/// エンジンと記録用アダプタ一式
pub struct Harness {
    pub engine: TranscriptEngine,
    pub service: Arc<StubService>,
    pub notifier: Arc<RecordingNotifier>,
    pub clipboard: Arc<RecordingClipboard>,
    pub saver: Arc<RecordingSaver>,
}

impl Harness {
    pub fn new(service: StubService) -> Self {
        Self::with_options(service, EngineOptions::default())
    }

    pub fn with_options(service: StubService, options: EngineOptions) -> Self {
        Self::build(service, RecordingClipboard::default(), options)
    }

    pub fn with_clipboard(service: StubService, clipboard: RecordingClipboard) -> Self {
        Self::build(service, clipboard, EngineOptions::default())
    }

    fn build(service: StubService, clipboard: RecordingClipboard, options: EngineOptions) -> Self {
        let service = Arc::new(service);
        let notifier = Arc::new(RecordingNotifier::default());
        let clipboard = Arc::new(clipboard);
        let saver = Arc::new(RecordingSaver::default());
        let deps = EngineDeps {
            service: service.clone(),
            notifier: notifier.clone(),
            clipboard: clipboard.clone(),
            file_saver: saver.clone(),
            clock: Arc::new(FixedClock::default()),
            log: Arc::new(NoopLog),
        };
        Self {
            engine: TranscriptEngine::new(deps, options),
            service,
            notifier,
            clipboard,
            saver,
        }
    }
}

pub fn reply(content: &str, thread: Option<&str>) -> Result<GenerationResponse, GenerationFailure> {
    Ok(GenerationResponse::completed(
        content,
        thread.map(crate::domain::SessionHandle::new),
    ))
}
