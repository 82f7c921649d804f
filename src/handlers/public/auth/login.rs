// handlers/public/auth/login.rs - /user/login
//
// Placeholder: credentials are not checked and `authenticatedUserID` is never
// written to the session here. This is also where `require_authentication`
// sends anonymous visitors.

/// GET /user/login
pub async fn user_login() -> &'static str {
    "Display a HTML form for logging in a user..."
}

/// POST /user/login
pub async fn user_login_post() -> &'static str {
    "Authenticate and login the user..."
}
