//! Text rendering of wizard views, profiles and route decisions.

use std::fmt::Write;

use crate::application::WizardView;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::profile::ProfileRecord;
use crate::domain::routing::RouteDecision;
use crate::domain::wizard::{StepSequence, StepState};

/// Renders the active step: progress bar, the section's current values,
/// inline errors and the state of the Next/Submit controls.
pub fn render_view(view: &WizardView) -> Result<String, serde_yaml::Error> {
    let mut out = String::new();
    let step = &view.step;

    let _ = writeln!(
        out,
        "Step {}/{}: {} [{}]  {}%",
        step.index,
        StepSequence::count(),
        step.label,
        step.icon,
        view.progress.percent()
    );

    let indicators: Vec<String> = view
        .progress
        .indicators()
        .into_iter()
        .map(|(descriptor, state)| {
            let mark = match state {
                StepState::Completed => "x",
                StepState::Active => ">",
                StepState::Upcoming => " ",
            };
            format!("[{}] {}", mark, descriptor.label)
        })
        .collect();
    let _ = writeln!(out, "{}", indicators.join("  "));
    let _ = writeln!(out);

    let section = serde_yaml::to_string(&view.profile.section_value(step.section))?;
    for line in section.lines() {
        let _ = writeln!(out, "  {}", line);
    }

    for error in &view.errors {
        let _ = writeln!(out, "! {}", error);
    }
    if let Some(error) = &view.submit_error {
        let _ = writeln!(out, "! {}", error);
    }

    let control = if StepSequence::is_last(step.step) {
        "submit"
    } else {
        "next"
    };
    let state = if view.busy {
        "busy"
    } else if view.can_advance {
        "enabled"
    } else {
        "disabled"
    };
    let _ = write!(out, "[{}: {}]", control, state);

    Ok(out)
}

pub fn render_profile(profile: &ProfileRecord) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(profile)
}

pub fn render_user(user: Option<&AuthenticatedUser>) -> String {
    match user {
        Some(user) => format!("{} <{}> ({})", user.name, user.email, user.role),
        None => "Not signed in".to_string(),
    }
}

pub fn render_decision(decision: &RouteDecision) -> String {
    match decision {
        RouteDecision::Render(route) => format!("Opened {}", route),
        RouteDecision::Redirect { to, from: Some(from) } => {
            format!("Redirected to {} (from {})", to, from)
        }
        RouteDecision::Redirect { to, from: None } => format!("Redirected to {}", to),
        RouteDecision::NotFound => "Page not found".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{UserId, UserRole, WizardStatus};
    use crate::domain::routing::Route;
    use crate::domain::wizard::{WizardProgress, WizardStep};

    fn view(step: WizardStep) -> WizardView {
        WizardView {
            step: step.descriptor(),
            progress: WizardProgress::new(step),
            status: WizardStatus::Editing,
            can_advance: false,
            busy: false,
            errors: vec!["Please select at least one disability type".to_string()],
            submit_error: None,
            profile: ProfileRecord::default(),
        }
    }

    #[test]
    fn view_shows_progress_errors_and_disabled_next() {
        let text = render_view(&view(WizardStep::RqthSituation)).unwrap();
        assert!(text.starts_with("Step 2/4: RQTH situation [heart]  50%"));
        assert!(text.contains("[x] Personal information"));
        assert!(text.contains("[>] RQTH situation"));
        assert!(text.contains("disabilityType"));
        assert!(text.contains("! Please select at least one disability type"));
        assert!(text.ends_with("[next: disabled]"));
    }

    #[test]
    fn last_step_shows_busy_submit() {
        let mut v = view(WizardStep::ProfessionalProfile);
        v.busy = true;
        assert!(render_view(&v).unwrap().ends_with("[submit: busy]"));
    }

    #[test]
    fn decisions_render_destination() {
        assert_eq!(
            render_decision(&RouteDecision::Render(Route::Onboarding)),
            "Opened /onboarding"
        );
        assert_eq!(
            render_decision(&RouteDecision::Redirect {
                to: "/login".to_string(),
                from: Some("/profile".to_string()),
            }),
            "Redirected to /login (from /profile)"
        );
    }

    #[test]
    fn user_line_includes_role() {
        let user = AuthenticatedUser::new(
            UserId::new("u1").unwrap(),
            "Jean",
            "jean@x.fr",
            UserRole::Candidate,
        );
        assert_eq!(render_user(Some(&user)), "Jean <jean@x.fr> (candidate)");
        assert_eq!(render_user(None), "Not signed in");
    }
}
