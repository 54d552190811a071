pub mod config;
pub mod migrate;

use serde::Serialize;

/// Printed output plus process exit code for one command run.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

/// Failure classes shared by every command. Each owns a fixed exit code so
/// scripts can branch without parsing the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    ConfigValidation,
    RuntimeInit,
    DbConnectivity,
    Migration,
}

impl ErrorClass {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::ConfigValidation => 2,
            Self::RuntimeInit => 3,
            Self::DbConnectivity => 4,
            Self::Migration => 5,
        }
    }
}

#[derive(Debug, Serialize)]
struct Outcome<'a> {
    command: &'a str,
    status: &'static str,
    error_class: Option<ErrorClass>,
    message: &'a str,
}

impl CommandResult {
    pub fn success(command: &str, message: &str) -> Self {
        let outcome = Outcome { command, status: "ok", error_class: None, message };
        Self { exit_code: 0, output: render(&outcome) }
    }

    pub fn failure(command: &str, class: ErrorClass, message: &str) -> Self {
        let outcome = Outcome { command, status: "error", error_class: Some(class), message };
        Self { exit_code: class.exit_code(), output: render(&outcome) }
    }
}

fn render(outcome: &Outcome<'_>) -> String {
    serde_json::to_string(outcome).unwrap_or_else(|error| {
        serde_json::json!({
            "command": outcome.command,
            "status": "error",
            "error_class": "serialization",
            "message": error.to_string(),
        })
        .to_string()
    })
}
