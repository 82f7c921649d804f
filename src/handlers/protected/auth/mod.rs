// handlers/protected/auth/mod.rs - Session teardown

pub mod logout;

pub use logout::user_logout_post;
