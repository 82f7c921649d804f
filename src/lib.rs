pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;
pub mod validator;

#[cfg(test)]
pub mod testing;
