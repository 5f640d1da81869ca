//! The application's routes and their access requirements.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::UserRole;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

/// Who may render a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Public,
    Authenticated,
    Role(UserRole),
}

/// Every page the router knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    About,
    CandidateLanding,
    RecruiterLanding,
    Login,
    Register,
    Onboarding,
    RecruiterOnboarding,
    Dashboard,
    RecruiterDashboard,
    Profile,
    ProfileSetup,
    RecruiterProfileSetup,
    Matching,
}

impl Route {
    pub const ALL: [Route; 14] = [
        Route::Home,
        Route::About,
        Route::CandidateLanding,
        Route::RecruiterLanding,
        Route::Login,
        Route::Register,
        Route::Onboarding,
        Route::RecruiterOnboarding,
        Route::Dashboard,
        Route::RecruiterDashboard,
        Route::Profile,
        Route::ProfileSetup,
        Route::RecruiterProfileSetup,
        Route::Matching,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => HOME_PATH,
            Route::About => "/about",
            Route::CandidateLanding => "/candidate",
            Route::RecruiterLanding => "/recruiter",
            Route::Login => LOGIN_PATH,
            Route::Register => "/register",
            Route::Onboarding => "/onboarding",
            Route::RecruiterOnboarding => "/onboarding/recruiter",
            Route::Dashboard => "/dashboard",
            Route::RecruiterDashboard => "/dashboard/recruiter",
            Route::Profile => "/profile",
            Route::ProfileSetup => "/profile/setup",
            Route::RecruiterProfileSetup => "/profile/setup/recruiter",
            Route::Matching => "/matching",
        }
    }

    /// Resolves a URL path. A trailing slash and a query string are ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { HOME_PATH } else { trimmed };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home
            | Route::About
            | Route::CandidateLanding
            | Route::RecruiterLanding
            | Route::Login
            | Route::Register => Access::Public,
            Route::Onboarding | Route::Profile | Route::Matching => Access::Authenticated,
            Route::Dashboard | Route::ProfileSetup => Access::Role(UserRole::Candidate),
            Route::RecruiterDashboard
            | Route::RecruiterOnboarding
            | Route::RecruiterProfileSetup => Access::Role(UserRole::Recruiter),
        }
    }

    /// Landing page after sign-in or a completed onboarding.
    pub fn dashboard_for(role: UserRole) -> Route {
        match role {
            UserRole::Candidate => Route::Dashboard,
            UserRole::Recruiter => Route::RecruiterDashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
