mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::{self, Write};
use std::process;

use cli::chat::{run_chat, send_and_print};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::{AppCommand, SubmitOutcome};
use ports::inbound::UseCaseRunner;
use wiring::{wire_abapgen, App};

/// AppCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn health(&self) -> Result<i32, Error> {
        let service = self.app.service();
        let url = &self.app.settings.api_url;
        match service.health() {
            Ok(true) => {
                println!("{} backend at {} is healthy", service.label(), url);
                Ok(0)
            }
            Ok(false) => {
                println!("{} backend at {} is not ready", service.label(), url);
                Ok(1)
            }
            Err(e) => {
                println!("{} backend at {} is unreachable: {}", service.label(), url, e);
                Ok(1)
            }
        }
    }

    fn one_shot(&self, message: &str) -> Result<i32, Error> {
        let mut engine = self.app.engine();
        let mut stdout = io::stdout();
        let outcome = send_and_print(&mut engine, message, &mut stdout)
            .map_err(|e| Error::io_msg(format!("{:#}", e)))?;
        Ok(match outcome {
            SubmitOutcome::Answered { .. } => 0,
            SubmitOutcome::Failed => 1,
            SubmitOutcome::Ignored(_) => 1,
        })
    }

    fn interactive(&self) -> Result<i32, Error> {
        let mut engine = self.app.engine();
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        run_chat(&mut engine, self.app.fs.as_ref(), stdin.lock(), &mut stdout)
            .map_err(|e| Error::io_msg(format!("{:#}", e)))?;
        let _ = stdout.flush();
        Ok(0)
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("backend", self.app.settings.backend.as_str()),
        );

        let result = match cmd {
            AppCommand::Help => {
                print_help();
                Ok(0)
            }
            AppCommand::Health => self.health(),
            AppCommand::Template(kind) => self.app.templates.download(kind).map(|path| {
                println!("Saved {}", path.display());
                0
            }),
            AppCommand::OneShot { message } => self.one_shot(&message),
            AppCommand::Interactive => self.interactive(),
        };

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

fn cmd_name_for_log(cmd: &AppCommand) -> &'static str {
    match cmd {
        AppCommand::Help => "help",
        AppCommand::Health => "health",
        AppCommand::Template(_) => "template",
        AppCommand::OneShot { .. } => "one-shot",
        AppCommand::Interactive => "interactive",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("abapgen: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_abapgen(&config)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: abapgen [options] [message...]");
}

fn print_help() {
    println!("Usage: abapgen [options] [message...]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  -b, --backend <backend>    Submission backend: assistant (default) or workflow");
    println!("  -r, --ricef <kind>         RICEF category sent with each request");
    println!("                             (report, interface, conversion, enhancement, form)");
    println!("  --api-url <url>            Backend base URL");
    println!("  --origin <url>             Front-end origin; a Codespaces origin (-5173.) maps to the -8000. backend");
    println!("  --templates-url <url>      Base URL serving /templates/<kind>_template.json");
    println!("  -o, --output-dir <dir>     Directory for downloaded files (default: current directory)");
    println!("  --template <kind>          Download the JSON template for a RICEF category and exit");
    println!("  --health                   Check that the backend is reachable and exit");
    println!("  -v, --verbose              Emit structured logs to stderr as well");
    println!("  --generate <shell>         Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  ABAPGEN_BACKEND, ABAPGEN_API_URL, ABAPGEN_ORIGIN, ABAPGEN_TEMPLATES_URL, ABAPGEN_OUTPUT_DIR");
    println!("                 Defaults for the options above (options take precedence).");
    println!("  ABAPGEN_HOME   Home directory. Log: $ABAPGEN_HOME/state/abapgen.jsonl");
    println!("                 If unset, $XDG_CONFIG_HOME/abapgen (e.g. ~/.config/abapgen) is used.");
    println!();
    println!("Description:");
    println!("  Without a message, starts an interactive chat on stdin. Type /help there for commands.");
    println!("  With a message, sends it once and prints the reply.");
    println!();
    println!("Examples:");
    println!("  abapgen --ricef report Generate a sales report with ALV output");
    println!("  abapgen --backend workflow");
    println!("  abapgen --template interface -o templates");
}
