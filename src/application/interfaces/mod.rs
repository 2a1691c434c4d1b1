mod embedding_provider;
mod profile_repository;

pub use embedding_provider::*;
pub use profile_repository::*;
