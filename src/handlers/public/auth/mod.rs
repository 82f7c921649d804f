// handlers/public/auth/mod.rs - Account entry points
//
// Signup and login are routed through the full dynamic chain (session, CSRF,
// authentication context) but do not yet create accounts or sessions: each
// handler answers with a fixed acknowledgment. They exist so the route table,
// the CSRF check on their POST forms and the login redirect target are real.

pub mod login;
pub mod signup;

pub use login::{user_login, user_login_post};
pub use signup::{user_signup, user_signup_post};
