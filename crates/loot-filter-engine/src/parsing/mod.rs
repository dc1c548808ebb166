//! Conversion between [`Block`](crate::models::Block)s and filter-file text.
//!
//! [`encode_filter`] and [`decode_filter`] are pure functions: no I/O and no
//! shared state, so they can be called from any thread.

pub mod decode;
pub mod encode;
pub mod grammar;

#[cfg(test)]
mod tests;

pub use decode::{
    DecodeOptions, DecodeReport, LineMatching, SkipReason, SkippedParagraph, decode_filter,
    decode_filter_with,
};
pub use encode::{encode_block, encode_filter};
pub use grammar::{Comparator, Directive};
