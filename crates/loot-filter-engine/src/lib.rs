pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use models::*;
pub use parsing::{
    DecodeOptions, DecodeReport, LineMatching, SkipReason, SkippedParagraph, decode_filter,
    decode_filter_with, encode_block, encode_filter,
};
