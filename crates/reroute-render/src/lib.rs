//! Output formats for resolved redirect mappings.

mod jsonl;
mod mapping;

pub use jsonl::JsonlWriter;
pub use mapping::MappingWriter;
