//! Routing module - the path table and its access policy.

mod guard;
mod route;

pub use guard::{RouteDecision, RouteGuard};
pub use route::{Access, Route, HOME_PATH, LOGIN_PATH};
