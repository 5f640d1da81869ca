//! Route guard - decides whether a path renders or redirects.

use super::route::{Access, Route, LOGIN_PATH};
use crate::domain::foundation::AuthenticatedUser;

/// Outcome of resolving a path for the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    /// `from` is the originally requested path, kept so sign-in can return to it.
    Redirect { to: String, from: Option<String> },
    NotFound,
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn resolve(path: &str, user: Option<&AuthenticatedUser>) -> RouteDecision {
        let Some(route) = Route::from_path(path) else {
            return RouteDecision::NotFound;
        };

        match (route.access(), user) {
            (Access::Public, _) => RouteDecision::Render(route),
            (_, None) => RouteDecision::Redirect {
                to: LOGIN_PATH.to_string(),
                from: Some(route.path().to_string()),
            },
            (Access::Authenticated, Some(_)) => RouteDecision::Render(route),
            (Access::Role(required), Some(user)) if user.role == required => {
                RouteDecision::Render(route)
            }
            (Access::Role(_), Some(user)) => RouteDecision::Redirect {
                to: Route::dashboard_for(user.role).path().to_string(),
                from: None,
            },
        }
    }
}
