//! コマンドの enum（Command Pattern）
//!
//! CLI の実行モードと、対話中の 1 行入力の解釈を enum で明示する。

use crate::domain::RicefKind;
use std::path::PathBuf;

/// abapgen の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// ヘルプ表示
    Help,
    /// バックエンドの疎通確認
    Health,
    /// テンプレートのダウンロード
    Template(RicefKind),
    /// 1 回だけ送信して応答を表示
    OneShot { message: String },
    /// 標準入力からの対話
    Interactive,
}

/// 対話中の 1 行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// テキストを入力して送信
    Send(String),
    /// ファイルをステージ
    Upload(PathBuf),
    /// ステージしたファイルを外す
    Unstage,
    /// LastCodeBlock をコピー
    CopyLast,
    /// 直近の assistant ターンの n 番目（1 始まり）のコードブロックをコピー
    CopyBlock(usize),
    /// LastCodeBlock を .abap として保存
    Download,
    /// 全消去
    New,
    Help,
    Quit,
    /// 空行（何もしない）
    Noop,
    /// 解釈できないコマンド（理由付き）
    Invalid(String),
}

impl ChatCommand {
    /// 1 行を解釈する。`/` で始まらない行はすべて送信テキスト。
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ChatCommand::Noop;
        }
        if !trimmed.starts_with('/') {
            return ChatCommand::Send(line.trim_end_matches(&['\r', '\n'][..]).to_string());
        }
        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((n, r)) => (n, r.trim()),
            None => (trimmed, ""),
        };
        match name {
            "/upload" if rest.is_empty() => ChatCommand::Invalid("Usage: /upload <path>".to_string()),
            "/upload" => ChatCommand::Upload(PathBuf::from(rest)),
            "/unstage" => ChatCommand::Unstage,
            // ステージしたファイルだけを送る
            "/send" => ChatCommand::Send(rest.to_string()),
            "/copy" if rest.is_empty() => ChatCommand::CopyLast,
            "/copy" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => ChatCommand::CopyBlock(n),
                _ => ChatCommand::Invalid("Usage: /copy [block number]".to_string()),
            },
            "/download" => ChatCommand::Download,
            "/new" => ChatCommand::New,
            "/help" => ChatCommand::Help,
            "/quit" | "/exit" => ChatCommand::Quit,
            other => ChatCommand::Invalid(format!("Unknown command: {}", other)),
        }
    }
}
