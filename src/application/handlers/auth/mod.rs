//! Account command and query handlers.

mod current_user;
mod login;
mod logout;
mod register;

pub use current_user::CurrentUserHandler;
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::LogoutHandler;
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
