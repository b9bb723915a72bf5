pub mod args;
pub mod chat;
pub mod view;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
