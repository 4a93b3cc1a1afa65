//! Book recommendations over a similarity graph.
//!
//! Books loaded from a delimited file become nodes of an undirected graph in
//! which two books are linked when they share an author or a genre. A user's
//! preferred books seed a breadth-first walk of that graph, and the books it
//! reaches are filtered by genre and popularity class to produce a ranked list.

pub mod cli;
pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult, EmptyResult};
pub use library::Library;
