/// Business logic layer for blog-service
///
/// - Post service: creation, updates, reactions, listings, authorship checks
/// - Slug derivation and reaction tallying used by the post service
pub mod posts;
pub mod reactions;
pub mod slug;

pub use posts::PostService;
