pub mod models;
pub mod visibility;

pub use visibility::Visibility;
