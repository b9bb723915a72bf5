use super::support::{reply, Harness, StubService};
use crate::cli::chat::{run_chat, send_and_print, stage_path};
use crate::domain::SubmitOutcome;
use common::adapter::StdFileSystem;
use std::io::Cursor;

fn run(h: &mut Harness, input: &str) -> String {
    let mut out = Vec::new();
    run_chat(&mut h.engine, &StdFileSystem, Cursor::new(input.to_string()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_one_shot_prints_reply() {
    let mut h = Harness::new(StubService::new(vec![reply(
        "Here:\n```abap\nREPORT zfoo.\n```",
        Some("t1"),
    )]));
    let mut out = Vec::new();
    let outcome = send_and_print(&mut h.engine, "generate a report", &mut out).unwrap();
    assert_eq!(outcome, SubmitOutcome::Answered { extracted: true });
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Assistant\nHere:\n--- ABAP #1 ---\nREPORT zfoo.\n--- end ---\n"));
}

#[test]
fn test_chat_session_commands() {
    let mut h = Harness::new(StubService::new(vec![reply(
        "```abap\nREPORT zfoo.\n```",
        Some("t1"),
    )]));
    let out = run(
        &mut h,
        "generate a report\n/copy\n/copy 1\n/download\n/bogus\n/new\n/quit\nnever sent\n",
    );
    assert!(out.starts_with("abapgen (Assistant). Type /help for commands.\n"));
    assert!(out.contains("--- ABAP #1 ---"));
    assert!(out.contains("Saved /out/generated_code.abap"));
    assert!(out.contains("Unknown command: /bogus"));
    assert_eq!(h.clipboard.copied.lock().unwrap().len(), 2);
    assert_eq!(h.service.seen().len(), 1);
    assert!(h.engine.transcript().is_empty());
}

#[test]
fn test_upload_then_send_file_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec.json");
    std::fs::write(&path, b"{\"program\":\"ZREP\"}").unwrap();

    let mut h = Harness::new(StubService::workflow(vec![reply("done", None)]));
    let out = run(&mut h, &format!("/upload {}\n/send\n", path.display()));
    assert!(out.contains("Assistant\ndone\n"));
    assert_eq!(
        h.engine.transcript().turns()[0].content(),
        "📁 Uploaded: spec.json"
    );
    let seen = h.service.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].file.as_deref(), Some("spec.json"));
    assert_eq!(seen[0].message, "");
}

#[test]
fn test_stage_path_rejects_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, b"%PDF").unwrap();

    let mut h = Harness::new(StubService::new(vec![]));
    assert!(!stage_path(&mut h.engine, &StdFileSystem, &path).unwrap());
    assert!(!h.engine.pending_upload().is_staged());
    assert!(stage_path(&mut h.engine, &StdFileSystem, &dir.path().join("missing.json")).is_err());
}

#[test]
fn test_unstage_messages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    std::fs::write(&path, b"text").unwrap();
    let mut h = Harness::new(StubService::new(vec![]));
    let out = run(&mut h, &format!("/unstage\n/upload {}\n/unstage\n", path.display()));
    assert!(out.contains("No file staged.\n"));
    assert!(out.contains("Staged file removed.\n"));
}
