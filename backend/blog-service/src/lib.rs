/// Blog Service Library
///
/// Posts authored by users and filed under categories, with comments,
/// like/favorite reactions and private posts hidden from non-admin listings.
///
/// # Modules
///
/// - `domain`: Entities, inputs and the visibility rule
/// - `repository`: Store traits and their PostgreSQL implementations
/// - `services`: Post service business logic
/// - `db`: Connection pool and migrations
/// - `error`: Error types
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use services::PostService;
