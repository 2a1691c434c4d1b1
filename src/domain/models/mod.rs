mod embedding;
mod message;
mod profile;

pub use embedding::*;
pub use message::*;
pub use profile::*;
