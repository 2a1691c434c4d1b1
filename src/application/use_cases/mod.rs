mod enrich_profile;
mod resolve_embedding;
mod store_profile;

pub use enrich_profile::*;
pub use resolve_embedding::*;
pub use store_profile::*;
