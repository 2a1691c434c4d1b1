mod gemini_embedding;
mod in_memory_profile_repository;
mod mock_embedding;
mod openai_embedding;
mod supabase_profile_repository;

pub use gemini_embedding::*;
pub use in_memory_profile_repository::*;
pub use mock_embedding::*;
pub use openai_embedding::*;
pub use supabase_profile_repository::*;
