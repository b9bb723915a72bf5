use crate::domain::{AppCommand, BackendKind, RicefKind};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// --health: バックエンドの疎通確認だけ行う
    pub health: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --backend: 送信戦略（未指定なら ABAPGEN_BACKEND、それも無ければ assistant）
    pub backend: Option<BackendKind>,
    pub api_url: Option<String>,
    /// --origin: フロントエンドのオリジン（API URL の推定に使う）
    pub origin: Option<String>,
    pub templates_url: Option<String>,
    /// --ricef: リクエストに添える RICEF 種別
    pub ricef: Option<RicefKind>,
    pub output_dir: Option<PathBuf>,
    /// --template <kind>: テンプレートを保存して終了
    pub template: Option<RicefKind>,
    pub message_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn parse_ricef(s: &str) -> Result<RicefKind, String> {
    s.parse::<RicefKind>().map_err(|e| e.to_string())
}

fn parse_backend(s: &str) -> Result<BackendKind, String> {
    s.parse::<BackendKind>().map_err(|e| e.to_string())
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("abapgen")
        .about("Generate ABAP code from a chat with the generation backend")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("health")
                .long("health")
                .help("Check that the backend is reachable and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit structured logs to stderr as well")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("backend")
                .short('b')
                .long("backend")
                .value_name("backend")
                .help("Submission backend: assistant or workflow")
                .value_parser(parse_backend)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("api-url")
                .long("api-url")
                .value_name("url")
                .help("Backend base URL (default: inferred from --origin, else http://localhost:8000)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("origin")
                .long("origin")
                .value_name("url")
                .help("Front-end origin used to infer the backend URL")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("templates-url")
                .long("templates-url")
                .value_name("url")
                .help("Base URL serving /templates/*.json")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("ricef")
                .short('r')
                .long("ricef")
                .value_name("kind")
                .help("RICEF category sent with each request (report, interface, conversion, enhancement, form)")
                .value_parser(parse_ricef)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("dir")
                .help("Directory for downloaded files (default: current directory)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("template")
                .long("template")
                .value_name("kind")
                .help("Download the JSON template for a RICEF category and exit")
                .value_parser(parse_ricef)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("message")
                .index(1)
                .help("Send this message once and print the reply (interactive when omitted)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        health: matches.get_flag("health"),
        verbose: matches.get_flag("verbose"),
        backend: matches.get_one::<BackendKind>("backend").copied(),
        api_url: matches.get_one::<String>("api-url").cloned(),
        origin: matches.get_one::<String>("origin").cloned(),
        templates_url: matches.get_one::<String>("templates-url").cloned(),
        ricef: matches.get_one::<RicefKind>("ricef").copied(),
        output_dir: matches.get_one::<PathBuf>("output-dir").cloned(),
        template: matches.get_one::<RicefKind>("template").copied(),
        message_args: matches
            .get_many::<String>("message")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }
    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// Config を実行モードに変換する（優先: help > health > template > メッセージ > 対話）
pub fn config_to_command(config: &Config) -> AppCommand {
    if config.help {
        return AppCommand::Help;
    }
    if config.health {
        return AppCommand::Health;
    }
    if let Some(kind) = config.template {
        return AppCommand::Template(kind);
    }
    let message = config.message_args.join(" ");
    if message.trim().is_empty() {
        AppCommand::Interactive
    } else {
        AppCommand::OneShot { message }
    }
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "abapgen", &mut std::io::stdout());
}
