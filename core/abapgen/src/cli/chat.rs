//! 対話ドライバ: 1 行ずつ読み、ChatCommand に解釈してエンジンを操作する

use crate::cli::view::{format_turn, print_chat_help};
use crate::domain::{ChatCommand, StagedFile, SubmitOutcome};
use crate::usecase::TranscriptEngine;
use anyhow::Context;
use common::ports::outbound::FileSystem;
use std::io::{BufRead, Write};
use std::path::Path;

/// 送信して、追加されたターン（応答またはエラー）を表示する
pub fn send_and_print(
    engine: &mut TranscriptEngine,
    text: &str,
    out: &mut dyn Write,
) -> anyhow::Result<SubmitOutcome> {
    engine.set_input(text);
    let outcome = engine.submit();
    if matches!(outcome, SubmitOutcome::Answered { .. } | SubmitOutcome::Failed) {
        if let Some(turn) = engine.transcript().turns().last() {
            write!(out, "{}", format_turn(turn))?;
        }
    }
    Ok(outcome)
}

/// パスのファイルを検査してからステージする
pub fn stage_path(
    engine: &mut TranscriptEngine,
    fs: &dyn FileSystem,
    path: &Path,
) -> anyhow::Result<bool> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Not a file: {}", path.display()))?
        .to_string();
    let meta = fs
        .metadata(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;
    if !meta.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    if engine.precheck_upload(&name, meta.len()).is_err() {
        return Ok(false);
    }
    let bytes = fs
        .read(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    Ok(engine.stage_file(StagedFile::new(name, bytes)).is_ok())
}

/// 標準入力相当から 1 行ずつ処理する。/quit か入力終端で戻る。
pub fn run_chat<R: BufRead>(
    engine: &mut TranscriptEngine,
    fs: &dyn FileSystem,
    input: R,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "abapgen ({}). Type /help for commands.",
        engine.service_label()
    )?;
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        match ChatCommand::parse(&line) {
            ChatCommand::Send(text) => {
                send_and_print(engine, &text, out)?;
            }
            ChatCommand::Upload(path) => {
                if let Err(e) = stage_path(engine, fs, &path) {
                    writeln!(out, "{:#}", e)?;
                }
            }
            ChatCommand::Unstage => {
                if engine.unstage() {
                    writeln!(out, "Staged file removed.")?;
                } else {
                    writeln!(out, "No file staged.")?;
                }
            }
            ChatCommand::CopyLast => {
                engine.copy_last_code();
            }
            ChatCommand::CopyBlock(n) => {
                engine.copy_block(n);
            }
            ChatCommand::Download => {
                if let Some(path) = engine.download_last_code() {
                    writeln!(out, "Saved {}", path.display())?;
                }
            }
            ChatCommand::New => engine.reset(),
            ChatCommand::Help => print_chat_help(out)?,
            ChatCommand::Quit => break,
            ChatCommand::Noop => {}
            ChatCommand::Invalid(msg) => writeln!(out, "{}", msg)?,
        }
        out.flush()?;
    }
    Ok(())
}
