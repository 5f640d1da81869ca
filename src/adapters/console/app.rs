//! Console front end: reads command lines and prints what a page would show.
//!
//! Every failure becomes a message on the output; the loop only ends on
//! `quit` or end of input. A command that panics drops the onboarding in
//! progress and reports a generic failure.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use secrecy::SecretString;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::command::{parse_value, ConsoleCommand};
use super::render::{render_decision, render_profile, render_user, render_view};
use crate::application::{
    CurrentUserHandler, LoginCommand, LoginHandler, LogoutHandler, OnboardingSession,
    RegisterCommand, RegisterHandler, SubmitProfileError,
};
use crate::domain::foundation::{
    ArrangementId, AuthError, CertificationId, DomainError, ExperienceId, SkillId, UserRole,
    ValidationError,
};
use crate::domain::profile::NewCertification;
use crate::domain::routing::{Route, RouteDecision};
use crate::domain::wizard::WizardStep;
use crate::ports::{AccountStore, ProfileStore};

const PROMPT: &str = "> ";

/// Shown when a command fails unexpectedly.
pub const UNEXPECTED_FAILURE: &str =
    "Something went wrong, please try again. Open /onboarding to start over.";

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{}", .0.message)]
    Wizard(#[from] DomainError),

    #[error("{0}")]
    Submit(#[from] SubmitProfileError),

    #[error("{0}")]
    Input(#[from] ValidationError),

    #[error("No onboarding in progress; open /onboarding first")]
    NoSession,

    #[error("Recruiter onboarding is not available yet")]
    RecruiterOnboarding,

    #[error("Could not render the profile: {0}")]
    Render(#[from] serde_yaml::Error),
}

pub struct ConsoleApp {
    register: RegisterHandler,
    login: LoginHandler,
    logout: LogoutHandler,
    current_user: CurrentUserHandler,
    profiles: Arc<dyn ProfileStore>,
    session: Option<OnboardingSession>,
}

impl ConsoleApp {
    pub fn new(accounts: Arc<dyn AccountStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            register: RegisterHandler::new(accounts.clone()),
            login: LoginHandler::new(accounts.clone()),
            logout: LogoutHandler::new(accounts.clone()),
            current_user: CurrentUserHandler::new(accounts),
            profiles,
            session: None,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output
            .write_all(b"Worksable onboarding console. Type `help` for commands.\n")
            .await?;
        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.handle_line(&line).await {
                Reply::Quit => break,
                Reply::Text(text) if text.is_empty() => {}
                Reply::Text(text) => {
                    output.write_all(text.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
            }
        }
        output.flush().await
    }

    /// Parses and runs one line, turning every error into text.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let command = match ConsoleCommand::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::Text(String::new()),
            Err(usage) => return Reply::Text(usage.trim_end().to_string()),
        };
        match AssertUnwindSafe(self.execute(command)).catch_unwind().await {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "command failed");
                Reply::Text(format!("Error: {}", err))
            }
            Err(panic) => {
                tracing::error!(panic = panic_message(&*panic), "command panicked, onboarding reset");
                self.session = None;
                Reply::Text(UNEXPECTED_FAILURE.to_string())
            }
        }
    }

    pub async fn execute(&mut self, command: ConsoleCommand) -> Result<Reply, ConsoleError> {
        use ConsoleCommand::*;

        let text = match command {
            Register {
                role,
                email,
                password,
                name,
            } => {
                let result = self
                    .register
                    .handle(RegisterCommand {
                        name: name.join(" "),
                        email,
                        password: SecretString::new(password),
                        role,
                    })
                    .await?;
                self.session = None;
                format!(
                    "Welcome, {}. Redirecting to {}",
                    result.user.name, result.redirect_to
                )
            }
            Login { email, password } => {
                let result = self
                    .login
                    .handle(LoginCommand {
                        email,
                        password: SecretString::new(password),
                    })
                    .await?;
                self.session = None;
                format!(
                    "Signed in as {}. Redirecting to {}",
                    result.user.name, result.redirect_to
                )
            }
            Logout => {
                let to = self.logout.handle().await?;
                self.session = None;
                format!("Signed out. Redirecting to {}", to)
            }
            Whoami => render_user(self.current_user.handle().await?.as_ref()),
            Go { path } => self.open(&path).await?,
            Step => self.render_step().await?,
            Show => render_profile(&self.session()?.view().await.profile)?,
            Set {
                section,
                path,
                value,
            } => {
                self.session()?
                    .set_field(section, &path, parse_value(&value))
                    .await?;
                self.render_step().await?
            }
            Next => {
                self.session()?.next().await?;
                self.render_step().await?
            }
            Back => {
                self.session()?.previous().await?;
                self.render_step().await?
            }
            Goto { step } => {
                let target = WizardStep::from_index(step)?;
                self.session()?.jump_to_step(target).await?;
                self.render_step().await?
            }
            Submit => self.submit().await?,
            ToggleDisability { category } => {
                self.session()?
                    .edit(|w| w.toggle_disability(category))
                    .await?;
                self.render_step().await?
            }
            AddArrangement { text } => {
                let id = self
                    .session()?
                    .edit(|w| w.add_arrangement(&text.join(" ")))
                    .await?;
                format!("Added arrangement {}\n{}", id, self.render_step().await?)
            }
            RemoveArrangement { id } => {
                let id = ArrangementId::parse(id)?;
                self.session()?.edit(|w| w.remove_arrangement(&id)).await?;
                self.render_step().await?
            }
            AddSkill { level, name } => {
                let id = self
                    .session()?
                    .edit(|w| w.add_skill(&name.join(" "), level))
                    .await?;
                format!("Added skill {}\n{}", id, self.render_step().await?)
            }
            RemoveSkill { id } => {
                let id = SkillId::parse(id)?;
                self.session()?.edit(|w| w.remove_skill(&id)).await?;
                self.render_step().await?
            }
            AddRole => {
                let id = self.session()?.edit(|w| w.add_role()).await?;
                format!("Added experience {}\n{}", id, self.render_step().await?)
            }
            EditRole { id, field, value } => {
                let id = ExperienceId::parse(id)?;
                self.session()?
                    .edit(|w| w.update_role(&id, field, &value.join(" ")))
                    .await?;
                self.render_step().await?
            }
            RemoveRole { id } => {
                let id = ExperienceId::parse(id)?;
                self.session()?.edit(|w| w.remove_role(&id)).await?;
                self.render_step().await?
            }
            AddCert {
                name,
                issuer,
                date,
                expiry,
            } => {
                let certification = NewCertification {
                    name,
                    issuer,
                    date,
                    expiry_date: expiry,
                };
                let id = self
                    .session()?
                    .edit(|w| w.add_certification(certification))
                    .await?;
                format!("Added certification {}\n{}", id, self.render_step().await?)
            }
            RemoveCert { id } => {
                let id = CertificationId::parse(id)?;
                self.session()?
                    .edit(|w| w.remove_certification(&id))
                    .await?;
                self.render_step().await?
            }
            Domain { domain } => {
                self.session()?.edit(|w| w.select_domain(domain)).await?;
                self.render_step().await?
            }
            Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }

    fn session(&self) -> Result<&OnboardingSession, ConsoleError> {
        self.session.as_ref().ok_or(ConsoleError::NoSession)
    }

    async fn render_step(&self) -> Result<String, ConsoleError> {
        Ok(render_view(&self.session()?.view().await)?)
    }

    /// Resolves `path` through the route guard; wizard routes start a session.
    async fn open(&mut self, path: &str) -> Result<String, ConsoleError> {
        let decision = self.current_user.navigate(path).await?;
        let opens_wizard = matches!(
            decision,
            RouteDecision::Render(Route::Onboarding | Route::ProfileSetup)
        );
        if !opens_wizard {
            return Ok(render_decision(&decision));
        }

        let user = self.current_user.require().await?;
        if user.role == UserRole::Recruiter {
            return Err(ConsoleError::RecruiterOnboarding);
        }
        let resume = self
            .session
            .as_ref()
            .is_some_and(|s| s.owner().id == user.id);
        if !resume {
            tracing::info!(user_id = %user.id, "onboarding started");
            self.session = Some(OnboardingSession::start(user, self.profiles.clone()));
        }
        Ok(format!(
            "{}\n{}",
            render_decision(&decision),
            self.render_step().await?
        ))
    }

    async fn submit(&mut self) -> Result<String, ConsoleError> {
        let result = self.session()?.submit().await?;
        self.session = None;
        Ok(format!("Profile saved. Redirecting to {}", result.redirect_to))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
