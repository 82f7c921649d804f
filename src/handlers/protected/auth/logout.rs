// handlers/protected/auth/logout.rs - POST /user/logout
//
// Placeholder: the session keeps its `authenticatedUserID`.

pub async fn user_logout_post() -> &'static str {
    "Logout the user..."
}
