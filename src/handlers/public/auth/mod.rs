mod login;
mod oauth;
mod password;
mod register;
mod utils;
mod verify;

pub use login::login;
pub use oauth::google_callback;
pub use password::{forgot_password, reset_password};
pub use register::register;
pub use utils::{validate_email, validate_password};
pub use verify::verify_email;
