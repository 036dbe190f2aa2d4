pub mod login;
pub mod signup;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use signup::{SignupCommand, SignupHandler, SignupResult};
