//! Console commands, one per input line.
//!
//! Lines are parsed with clap in multicall mode, so the first word is the
//! subcommand and `help` comes for free.

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::domain::foundation::UserRole;
use crate::domain::profile::{DisabilityCategory, RoleField, Section, SkillLevel, TechDomain};

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ConsoleCommand {
    /// Create an account and sign in
    Register {
        role: UserRole,
        email: String,
        password: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Sign in
    Login { email: String, password: String },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Open a page by path (e.g. /onboarding)
    Go { path: String },
    /// Show the active wizard step
    Step,
    /// Print the whole profile as YAML
    Show,
    /// Write a field: set <section> <path> <json or text>
    Set {
        section: Section,
        path: String,
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Go to the next step
    Next,
    /// Go to the previous step
    Back,
    /// Jump to a step by number
    Goto { step: usize },
    /// Submit the profile from the last step
    Submit,
    /// Select or unselect a disability category
    ToggleDisability { category: DisabilityCategory },
    /// Add a special arrangement
    AddArrangement {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    RemoveArrangement { id: String },
    /// Add a skill: add-skill <level> <name>
    AddSkill {
        level: SkillLevel,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    RemoveSkill { id: String },
    /// Append a blank experience entry
    AddRole,
    /// Edit an experience entry: edit-role <id> <company|role|duration|description> <text>
    EditRole {
        id: String,
        field: RoleField,
        #[arg(num_args = 0.., trailing_var_arg = true)]
        value: Vec<String>,
    },
    RemoveRole { id: String },
    /// Add a certification
    AddCert {
        name: String,
        issuer: String,
        date: String,
        expiry: Option<String>,
    },
    RemoveCert { id: String },
    /// Select the IT domain, or clear it when omitted
    Domain { domain: Option<TechDomain> },
    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

impl ConsoleCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    ///
    /// The error carries clap's rendered usage or help text.
    pub fn parse_line(line: &str) -> Result<Option<Self>, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }
        ConsoleLine::try_parse_from(words)
            .map(|parsed| Some(parsed.command))
            .map_err(|e| e.to_string())
    }
}

/// Reads a `set` argument: JSON when it parses, plain text otherwise.
pub fn parse_value(words: &[String]) -> Value {
    let raw = words.join(" ");
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}
