//! Campus administration API
//!
//! REST endpoints for departments, students, coordinators, programs,
//! homepage images, student reports and officer accounts. Handlers talk to
//! storage through [`repositories::Repository`], backed by PostgreSQL in
//! production and by in-process stores in tests.

pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
