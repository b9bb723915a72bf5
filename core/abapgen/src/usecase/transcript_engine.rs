//! TranscriptEngine: 1 セッション分の会話状態と、送信・抽出・コピー・保存・リセット
//!
//! 送信戦略（GenerationService）と副作用（通知・クリップボード・保存・ログ・時刻）は
//! 構築時に注入する。状態はすべてこのインスタンスが所有し、送信は同時に 1 件だけ。
//!
//! 送信は begin_submit（Idle → Sending、user ターン追加）と complete_submit
//! （応答またはエラーの反映、Sending → Idle）の 2 段階。submit はその両方を続けて行う。

use crate::domain::{
    Ignored, LastCodeBlock, PendingUpload, RicefKind, Role, SessionHandle, StagedFile,
    StagingRejection, SubmissionState, SubmitOutcome, Transcript, UploadPolicy,
};
use crate::ports::outbound::{
    GenerationFailure, GenerationRequest, GenerationResponse, GenerationService, ResponseStatus,
};
use crate::usecase::render::code_blocks;
use common::ports::outbound::{
    ClipboardSink, Clock, FileSaver, Log, LogLevel, LogRecord, Notification, Notifier,
};
use std::path::PathBuf;
use std::sync::Arc;

/// ダウンロード時のファイル名
pub const DOWNLOAD_FILE_NAME: &str = "generated_code.abap";

const ERROR_TURN_PREFIX: &str = "⚠️ Connection error. Check backend is running.";

/// エンジンが使う外界
#[derive(Clone)]
pub struct EngineDeps {
    pub service: Arc<dyn GenerationService>,
    pub notifier: Arc<dyn Notifier>,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub file_saver: Arc<dyn FileSaver>,
    pub clock: Arc<dyn Clock>,
    pub log: Arc<dyn Log>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub upload_policy: UploadPolicy,
    /// 各リクエストに ricef_type として添える
    pub ricef: Option<RicefKind>,
}

/// begin_submit で確定した送信内容（Sending の間に入力が変わっても影響を受けない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSubmission {
    message: String,
    file: Option<StagedFile>,
    session: Option<SessionHandle>,
    ricef: Option<RicefKind>,
}

impl PreparedSubmission {
    pub fn request(&self) -> GenerationRequest<'_> {
        GenerationRequest {
            message: &self.message,
            file: self.file.as_ref(),
            session: self.session.as_ref(),
            ricef: self.ricef,
        }
    }
}

/// user ターンの本文: テキストのみ / ファイルのみ / 両方
fn compose_user_content(message: &str, file: Option<&StagedFile>) -> String {
    match (file, message.is_empty()) {
        (Some(f), true) => format!("📁 Uploaded: {}", f.name()),
        (Some(f), false) => format!("📁 Uploaded: {}\n\n{}", f.name(), message),
        (None, _) => message.to_string(),
    }
}

pub fn error_turn_content(detail: &str) -> String {
    format!("{}\n\nError: {}", ERROR_TURN_PREFIX, detail)
}

pub struct TranscriptEngine {
    deps: EngineDeps,
    options: EngineOptions,
    transcript: Transcript,
    last_code: LastCodeBlock,
    pending: PendingUpload,
    session: Option<SessionHandle>,
    input: String,
    state: SubmissionState,
}

impl TranscriptEngine {
    pub fn new(deps: EngineDeps, options: EngineOptions) -> Self {
        Self {
            deps,
            options,
            transcript: Transcript::new(),
            last_code: LastCodeBlock::default(),
            pending: PendingUpload::default(),
            session: None,
            input: String::new(),
            state: SubmissionState::Idle,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn last_code_block(&self) -> &LastCodeBlock {
        &self.last_code
    }

    pub fn pending_upload(&self) -> &PendingUpload {
        &self.pending
    }

    pub fn session_handle(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.options.upload_policy
    }

    pub fn service_label(&self) -> &str {
        self.deps.service.label()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record.layer("usecase"));
    }

    fn notify(&self, notification: Notification) {
        self.deps.notifier.notify(notification);
    }

    /// 名前とサイズで受け付け可否を判定する。不可なら通知してから理由を返す。
    ///
    /// 中身を読む前に呼べるので、ドライバは大きすぎるファイルを読まずに済む。
    pub fn precheck_upload(&self, name: &str, len: u64) -> Result<(), StagingRejection> {
        let result = self.options.upload_policy.check(name, len);
        if let Err(ref rejection) = result {
            self.notify(Notification::error(rejection.message()));
            self.log(
                LogRecord::new(LogLevel::Warn, "upload rejected")
                    .kind("staging")
                    .field("name", name)
                    .field("len", len)
                    .field("reason", rejection.message()),
            );
        }
        result
    }

    /// ファイルをステージする。拒否した場合 PendingUpload は変わらない。
    pub fn stage_file(&mut self, file: StagedFile) -> Result<(), StagingRejection> {
        self.precheck_upload(file.name(), file.bytes().len() as u64)?;
        self.notify(Notification::success(format!("{} ready to upload", file.name())));
        self.log(
            LogRecord::new(LogLevel::Info, "upload staged")
                .kind("staging")
                .field("name", file.name())
                .field("len", file.bytes().len()),
        );
        self.pending.stage(file);
        Ok(())
    }

    /// ステージしたファイルを外す。外した場合 true。
    pub fn unstage(&mut self) -> bool {
        let was = self.pending.is_staged();
        self.pending.clear();
        if was {
            self.log(LogRecord::new(LogLevel::Info, "upload unstaged").kind("staging"));
        }
        was
    }

    /// Idle → Sending。user ターンを追加し、送信内容を確定して返す。
    pub fn begin_submit(&mut self) -> Result<PreparedSubmission, Ignored> {
        if self.state == SubmissionState::Sending {
            self.log(LogRecord::new(LogLevel::Debug, "submit ignored while sending").kind("submit"));
            return Err(Ignored::Busy);
        }
        let message = self.input.trim().to_string();
        let file = self.pending.get().cloned();
        if message.is_empty() && file.is_none() {
            return Err(Ignored::Empty);
        }
        if file.is_none() && self.deps.service.requires_file() {
            self.notify(Notification::info("Please upload a file first"));
            return Err(Ignored::FileRequired);
        }

        let now = self.deps.clock.now();
        self.transcript
            .append(Role::User, compose_user_content(&message, file.as_ref()), now);
        self.state = SubmissionState::Sending;
        self.log(
            LogRecord::new(LogLevel::Info, "submission started")
                .kind("submit")
                .field("backend", self.deps.service.label())
                .field("message_len", message.len())
                .field("file", file.as_ref().map(|f| f.name().to_string()))
                .field("has_session", self.session.is_some()),
        );
        Ok(PreparedSubmission {
            message,
            file,
            session: self.session.clone(),
            ricef: self.options.ricef,
        })
    }

    /// 応答またはエラーを反映して Sending → Idle。入力とステージは成否にかかわらず消す。
    pub fn complete_submit(
        &mut self,
        result: Result<GenerationResponse, GenerationFailure>,
    ) -> SubmitOutcome {
        if self.state != SubmissionState::Sending {
            return SubmitOutcome::Ignored(Ignored::NotSending);
        }
        let now = self.deps.clock.now();
        let outcome = match result {
            Ok(response) => {
                let GenerationResponse {
                    content,
                    session,
                    status,
                } = response;
                self.transcript.append(Role::Assistant, content.as_str(), now);
                let extracted = self.last_code.absorb(&content);
                self.log(
                    LogRecord::new(
                        LogLevel::Debug,
                        if extracted {
                            "code block updated"
                        } else {
                            "code block unchanged"
                        },
                    )
                    .kind("extract")
                    .field("code_len", self.last_code.as_str().len()),
                );
                if self.session.is_none() {
                    self.session = session;
                }
                match status {
                    ResponseStatus::Completed => self.notify(Notification::success(format!(
                        "{} completed!",
                        self.deps.service.label()
                    ))),
                    ResponseStatus::Degraded(ref reason) => {
                        self.notify(Notification::warning(reason.clone()))
                    }
                }
                self.log(
                    LogRecord::new(LogLevel::Info, "submission succeeded")
                        .kind("submit")
                        .field("content_len", content.len())
                        .field("degraded", matches!(status, ResponseStatus::Degraded(_)))
                        .field("has_session", self.session.is_some()),
                );
                SubmitOutcome::Answered { extracted }
            }
            Err(failure) => {
                self.transcript
                    .append(Role::Error, error_turn_content(&failure.detail), now);
                self.notify(Notification::error(format!("Error: {}", failure.detail)));
                self.log(
                    LogRecord::new(LogLevel::Error, "submission failed")
                        .kind("submit")
                        .field("detail", failure.detail.as_str()),
                );
                SubmitOutcome::Failed
            }
        };
        self.input.clear();
        self.pending.clear();
        self.state = SubmissionState::Idle;
        outcome
    }

    /// 現在の入力とステージを送信し、応答を反映するまでブロックする
    pub fn submit(&mut self) -> SubmitOutcome {
        let prepared = match self.begin_submit() {
            Ok(p) => p,
            Err(reason) => return SubmitOutcome::Ignored(reason),
        };
        let service = Arc::clone(&self.deps.service);
        let result = service.submit(&prepared.request());
        self.complete_submit(result)
    }

    /// LastCodeBlock をクリップボードへ。コピーした場合 true。
    pub fn copy_last_code(&self) -> bool {
        if self.last_code.is_empty() {
            self.notify(Notification::info("No code to copy yet. Generate code first."));
            return false;
        }
        self.copy_to_clipboard(self.last_code.as_str(), "Code copied to clipboard!", "last")
    }

    /// 直近の assistant ターンの n 番目（1 始まり）のコードブロックをクリップボードへ
    pub fn copy_block(&self, n: usize) -> bool {
        let body = self
            .transcript
            .last_assistant()
            .and_then(|turn| code_blocks(turn.content()).get(n.wrapping_sub(1)).copied());
        match body {
            Some(body) => self.copy_to_clipboard(body, "Copied!", "block"),
            None => {
                self.notify(Notification::info(format!(
                    "No code block #{} in the latest response",
                    n
                )));
                false
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str, success: &str, target: &str) -> bool {
        match self.deps.clipboard.copy_text(text) {
            Ok(()) => {
                self.notify(Notification::success(success));
                self.log(
                    LogRecord::new(LogLevel::Info, "code copied")
                        .kind("action")
                        .field("target", target)
                        .field("len", text.len()),
                );
                true
            }
            Err(e) => {
                self.notify(Notification::error(format!("Failed to copy: {}", e)));
                self.log(
                    LogRecord::new(LogLevel::Error, "copy failed")
                        .kind("action")
                        .field("detail", e.to_string()),
                );
                false
            }
        }
    }

    /// LastCodeBlock を generated_code.abap として保存する。保存先を返す。
    pub fn download_last_code(&self) -> Option<PathBuf> {
        if self.last_code.is_empty() {
            self.notify(Notification::info(
                "No code to download yet. Generate code first.",
            ));
            return None;
        }
        match self
            .deps
            .file_saver
            .save(DOWNLOAD_FILE_NAME, self.last_code.as_str().as_bytes())
        {
            Ok(path) => {
                self.notify(Notification::success("Code downloaded as .abap file!"));
                self.log(
                    LogRecord::new(LogLevel::Info, "code downloaded")
                        .kind("action")
                        .field("path", path.display().to_string()),
                );
                Some(path)
            }
            Err(e) => {
                self.notify(Notification::error(format!("Failed to download: {}", e)));
                self.log(
                    LogRecord::new(LogLevel::Error, "download failed")
                        .kind("action")
                        .field("detail", e.to_string()),
                );
                None
            }
        }
    }

    /// トランスクリプト・LastCodeBlock・ステージ・入力・セッションハンドルを一度に消す
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.last_code.clear();
        self.pending.clear();
        self.input.clear();
        self.session = None;
        self.state = SubmissionState::Idle;
        self.notify(Notification::success("Chat cleared. Ready for new generation!"));
        self.log(LogRecord::new(LogLevel::Info, "chat reset").kind("action"));
    }
}
