use super::support::{reply, Harness, RecordingClipboard, SeenRequest, StubService};
use crate::domain::{
    Ignored, RicefKind, Role, SessionHandle, StagedFile, StagingRejection, SubmissionState,
    SubmitOutcome,
};
use crate::ports::outbound::{GenerationFailure, GenerationResponse, ResponseStatus};
use crate::usecase::EngineOptions;
use common::ports::outbound::NotificationLevel;

const REPORT_REPLY: &str = "Here:\n```abap\nREPORT zfoo.\n```";

#[test]
fn test_end_to_end_first_submission() {
    let mut h = Harness::new(StubService::new(vec![reply(REPORT_REPLY, Some("t1"))]));
    h.engine.set_input("generate a report");

    let prepared = h.engine.begin_submit().unwrap();
    assert_eq!(h.engine.state(), SubmissionState::Sending);
    assert_eq!(prepared.request().session, None);

    let outcome = h.engine.complete_submit(reply(REPORT_REPLY, Some("t1")));
    assert_eq!(outcome, SubmitOutcome::Answered { extracted: true });
    let roles: Vec<Role> = h.engine.transcript().turns().iter().map(|t| t.role()).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(h.engine.transcript().turns()[0].content(), "generate a report");
    assert_eq!(h.engine.session_handle(), Some(&SessionHandle::new("t1")));
    assert_eq!(h.engine.last_code_block().as_str(), "REPORT zfoo.");
    assert_eq!(h.engine.state(), SubmissionState::Idle);
    assert_eq!(h.engine.input(), "");
}

#[test]
fn test_submit_goes_through_service_and_echoes_session() {
    let mut h = Harness::new(StubService::new(vec![
        reply(REPORT_REPLY, Some("t1")),
        reply("Sure, added a selection screen.", Some("t2")),
    ]));
    h.engine.set_input("  generate a report  ");
    assert!(matches!(h.engine.submit(), SubmitOutcome::Answered { .. }));
    h.engine.set_input("add a selection screen");
    assert_eq!(h.engine.submit(), SubmitOutcome::Answered { extracted: false });

    let seen = h.service.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].message, "generate a report");
    assert_eq!(seen[0].session, None);
    assert_eq!(seen[1].session.as_deref(), Some("t1"));
    // 一度決まったハンドルは変わらない
    assert_eq!(h.engine.session_handle(), Some(&SessionHandle::new("t1")));
    // 抽出できない応答では前回のコードが残る
    assert_eq!(h.engine.last_code_block().as_str(), "REPORT zfoo.");
    assert_eq!(
        h.notifier.messages(),
        vec!["Assistant completed!", "Assistant completed!"]
    );
}

#[test]
fn test_submit_while_sending_is_ignored() {
    let mut h = Harness::new(StubService::new(vec![]));
    h.engine.set_input("first");
    let _prepared = h.engine.begin_submit().unwrap();
    assert_eq!(h.engine.transcript().len(), 1);

    h.engine.set_input("second");
    assert_eq!(h.engine.begin_submit(), Err(Ignored::Busy));
    assert_eq!(h.engine.submit(), SubmitOutcome::Ignored(Ignored::Busy));
    assert_eq!(h.engine.transcript().len(), 1);
    assert!(h.service.seen().is_empty());
}

#[test]
fn test_empty_submit_is_silent_noop() {
    let mut h = Harness::new(StubService::new(vec![]));
    h.engine.set_input("   \n ");
    assert_eq!(h.engine.submit(), SubmitOutcome::Ignored(Ignored::Empty));
    assert!(h.engine.transcript().is_empty());
    assert_eq!(h.engine.state(), SubmissionState::Idle);
    assert!(h.notifier.messages().is_empty());
    assert!(h.service.seen().is_empty());
}

#[test]
fn test_complete_without_begin_is_ignored() {
    let mut h = Harness::new(StubService::new(vec![]));
    assert_eq!(
        h.engine.complete_submit(reply("late", None)),
        SubmitOutcome::Ignored(Ignored::NotSending)
    );
    assert!(h.engine.transcript().is_empty());
}

#[test]
fn test_failure_appends_error_turn_and_clears_draft() {
    let mut h = Harness::new(StubService::new(vec![Err(GenerationFailure::new(
        "connection refused",
    ))]));
    h.engine
        .stage_file(StagedFile::new("spec.json", b"{}".to_vec()))
        .unwrap();
    h.engine.set_input("generate");
    assert_eq!(h.engine.submit(), SubmitOutcome::Failed);

    let turns = h.engine.transcript().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].content(), "📁 Uploaded: spec.json\n\ngenerate");
    assert_eq!(turns[1].role(), Role::Error);
    assert_eq!(
        turns[1].content(),
        "⚠️ Connection error. Check backend is running.\n\nError: connection refused"
    );
    assert_eq!(h.engine.input(), "");
    assert!(!h.engine.pending_upload().is_staged());
    assert!(h.engine.session_handle().is_none());
    assert_eq!(h.engine.state(), SubmissionState::Idle);
    let last = h.notifier.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(last.message, "Error: connection refused");
}

#[test]
fn test_fallback_keyword_extraction() {
    let mut h = Harness::new(StubService::new(vec![
        reply("REPORT zfoo.\nWRITE: 'hi'.\n", None),
        reply("Glad that helped!", None),
    ]));
    h.engine.set_input("plain please");
    assert_eq!(h.engine.submit(), SubmitOutcome::Answered { extracted: true });
    assert_eq!(h.engine.last_code_block().as_str(), "REPORT zfoo.\nWRITE: 'hi'.");
    h.engine.set_input("thanks");
    assert_eq!(h.engine.submit(), SubmitOutcome::Answered { extracted: false });
    assert_eq!(h.engine.last_code_block().as_str(), "REPORT zfoo.\nWRITE: 'hi'.");
}

#[test]
fn test_ricef_is_sent_with_request() {
    let options = EngineOptions {
        ricef: Some(RicefKind::Interface),
        ..EngineOptions::default()
    };
    let mut h = Harness::with_options(StubService::new(vec![reply("ok", None)]), options);
    h.engine.set_input("idoc inbound");
    h.engine.submit();
    assert_eq!(
        h.service.seen(),
        vec![SeenRequest {
            message: "idoc inbound".to_string(),
            file: None,
            session: None,
            ricef: Some(RicefKind::Interface),
        }]
    );
}

#[test]
fn test_stage_rejects_unsupported_and_keeps_previous() {
    let mut h = Harness::new(StubService::new(vec![]));
    h.engine
        .stage_file(StagedFile::new("spec.json", b"{}".to_vec()))
        .unwrap();
    let err = h
        .engine
        .stage_file(StagedFile::new("spec.pdf", b"%PDF".to_vec()))
        .unwrap_err();
    assert!(matches!(err, StagingRejection::UnsupportedExtension { .. }));
    assert_eq!(
        h.engine.pending_upload().get().map(|f| f.name()),
        Some("spec.json")
    );
    assert_eq!(
        h.notifier.messages(),
        vec![
            "spec.json ready to upload",
            "Please select a .json, .txt, or .xlsx file"
        ]
    );
    assert_eq!(
        h.notifier.levels(),
        vec![NotificationLevel::Success, NotificationLevel::Error]
    );
}

#[test]
fn test_precheck_rejects_oversized_file() {
    let h = Harness::new(StubService::new(vec![]));
    let max = h.engine.upload_policy().max_bytes;
    assert!(h.engine.precheck_upload("big.xlsx", max + 1).is_err());
    assert!(!h.engine.pending_upload().is_staged());
    assert_eq!(h.notifier.last().unwrap().level, NotificationLevel::Error);
}

#[test]
fn test_file_only_submission() {
    let mut h = Harness::new(StubService::new(vec![reply(REPORT_REPLY, Some("t9"))]));
    h.engine
        .stage_file(StagedFile::new("fs.xlsx", vec![1, 2, 3]))
        .unwrap();
    assert!(matches!(h.engine.submit(), SubmitOutcome::Answered { .. }));
    assert_eq!(h.engine.transcript().turns()[0].content(), "📁 Uploaded: fs.xlsx");
    let seen = h.service.seen();
    assert_eq!(seen[0].message, "");
    assert_eq!(seen[0].file.as_deref(), Some("fs.xlsx"));
    assert!(!h.engine.pending_upload().is_staged());
}

#[test]
fn test_workflow_requires_file() {
    let mut h = Harness::new(StubService::workflow(vec![]));
    h.engine.set_input("generate");
    assert_eq!(h.engine.submit(), SubmitOutcome::Ignored(Ignored::FileRequired));
    assert!(h.engine.transcript().is_empty());
    assert_eq!(h.engine.input(), "generate");
    assert_eq!(h.notifier.messages(), vec!["Please upload a file first"]);
}

#[test]
fn test_workflow_degraded_response_warns() {
    let degraded = GenerationResponse {
        content: "Workflow timed out".to_string(),
        session: None,
        status: ResponseStatus::Degraded("Workflow timed out".to_string()),
    };
    let mut h = Harness::new(StubService::workflow(vec![Ok(degraded)]));
    h.engine
        .stage_file(StagedFile::new("spec.txt", b"spec".to_vec()))
        .unwrap();
    assert_eq!(h.engine.submit(), SubmitOutcome::Answered { extracted: false });
    assert_eq!(h.engine.transcript().turns()[1].role(), Role::Assistant);
    let last = h.notifier.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Warning);
    assert_eq!(last.message, "Workflow timed out");
}

#[test]
fn test_workflow_success_notifies_label() {
    let mut h = Harness::new(StubService::workflow(vec![reply(REPORT_REPLY, None)]));
    h.engine
        .stage_file(StagedFile::new("spec.json", b"{}".to_vec()))
        .unwrap();
    h.engine.submit();
    assert_eq!(h.notifier.last().unwrap().message, "Workflow completed!");
    assert!(h.engine.session_handle().is_none());
}

#[test]
fn test_reset_clears_everything_at_once() {
    let mut h = Harness::new(StubService::new(vec![reply(REPORT_REPLY, Some("t1"))]));
    h.engine.set_input("generate a report");
    h.engine.submit();
    h.engine
        .stage_file(StagedFile::new("next.json", b"{}".to_vec()))
        .unwrap();
    h.engine.set_input("draft");

    h.engine.reset();

    assert!(h.engine.transcript().is_empty());
    assert!(h.engine.last_code_block().is_empty());
    assert!(!h.engine.pending_upload().is_staged());
    assert!(h.engine.session_handle().is_none());
    assert_eq!(h.engine.input(), "");
    assert_eq!(
        h.notifier.last().unwrap().message,
        "Chat cleared. Ready for new generation!"
    );
}

#[test]
fn test_copy_and_download_without_code() {
    let h = Harness::new(StubService::new(vec![]));
    assert!(!h.engine.copy_last_code());
    assert!(h.engine.download_last_code().is_none());
    assert_eq!(
        h.notifier.messages(),
        vec![
            "No code to copy yet. Generate code first.",
            "No code to download yet. Generate code first."
        ]
    );
    assert!(h.clipboard.copied.lock().unwrap().is_empty());
    assert!(h.saver.saved.lock().unwrap().is_empty());
}

#[test]
fn test_copy_and_download_last_code() {
    let mut h = Harness::new(StubService::new(vec![reply(REPORT_REPLY, Some("t1"))]));
    h.engine.set_input("generate a report");
    h.engine.submit();

    assert!(h.engine.copy_last_code());
    assert_eq!(*h.clipboard.copied.lock().unwrap(), vec!["REPORT zfoo."]);

    let path = h.engine.download_last_code().unwrap();
    assert!(path.ends_with("generated_code.abap"));
    let saved = h.saver.saved.lock().unwrap();
    assert_eq!(saved[0].0, "generated_code.abap");
    assert_eq!(saved[0].1, b"REPORT zfoo.".to_vec());
    assert_eq!(
        h.notifier.messages()[1..],
        ["Code copied to clipboard!", "Code downloaded as .abap file!"]
    );
}

#[test]
fn test_copy_block_targets_latest_reply_not_last_code() {
    let mut h = Harness::new(StubService::new(vec![
        reply("```abap\nA\n```\ntext\n```abap\nB\n```", None),
        reply("See ```CALL FUNCTION 'X'.``` inline", None),
    ]));
    h.engine.set_input("one");
    h.engine.submit();
    assert!(h.engine.copy_block(1));
    h.engine.set_input("two");
    h.engine.submit();
    assert!(h.engine.copy_block(1));
    assert!(!h.engine.copy_block(2));
    assert!(!h.engine.copy_block(0));
    assert_eq!(
        *h.clipboard.copied.lock().unwrap(),
        vec!["A", "CALL FUNCTION 'X'."]
    );
    assert_eq!(h.engine.last_code_block().as_str(), "CALL FUNCTION 'X'.");
}

#[test]
fn test_clipboard_failure_is_reported() {
    let clipboard = RecordingClipboard {
        fail: true,
        ..RecordingClipboard::default()
    };
    let mut h = Harness::with_clipboard(
        StubService::new(vec![reply(REPORT_REPLY, None)]),
        clipboard,
    );
    h.engine.set_input("go");
    h.engine.submit();
    assert!(!h.engine.copy_last_code());
    let last = h.notifier.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
    assert!(last.message.starts_with("Failed to copy"));
}

#[test]
fn test_unstage() {
    let mut h = Harness::new(StubService::new(vec![]));
    assert!(!h.engine.unstage());
    h.engine
        .stage_file(StagedFile::new("a.txt", b"a".to_vec()))
        .unwrap();
    assert!(h.engine.unstage());
    assert!(!h.engine.pending_upload().is_staged());
}

#[test]
fn test_prepared_submission_is_detached_from_later_input() {
    let mut h = Harness::new(StubService::new(vec![]));
    h.engine.set_input("original");
    let prepared = h.engine.begin_submit().unwrap();
    h.engine.set_input("edited while sending");
    assert_eq!(prepared.request().message, "original");
    let outcome = h.engine.complete_submit(Err(GenerationFailure::new("boom")));
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(h.engine.input(), "");
}
