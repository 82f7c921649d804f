// handlers/public/auth/signup.rs - /user/signup
//
// Placeholder: no account is created.

/// GET /user/signup
pub async fn user_signup() -> &'static str {
    "Display a HTML form for signing up a new user..."
}

/// POST /user/signup
pub async fn user_signup_post() -> &'static str {
    "Create a new user..."
}
