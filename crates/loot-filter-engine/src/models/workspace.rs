use serde::{Deserialize, Serialize};

use crate::parsing::{DecodeOptions, SkippedParagraph, decode_filter_with, encode_filter};

use super::block::Block;

/// File extension of filter files, without the dot.
pub const FILTER_EXTENSION: &str = "filter";

/// A named, ordered list of blocks being edited.
///
/// This is the JSON shape the editor keeps between sessions
/// (`{"filterName": ..., "blocks": [...]}`) and the payload handed to
/// persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterWorkspace {
    #[serde(default)]
    pub filter_name: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl FilterWorkspace {
    pub fn new(filter_name: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            filter_name: filter_name.into(),
            blocks,
        }
    }

    /// Decodes filter text into a workspace, returning the paragraphs that
    /// were dropped alongside it.
    pub fn from_filter_text(
        filter_name: impl Into<String>,
        text: &str,
        options: &DecodeOptions,
    ) -> (Self, Vec<SkippedParagraph>) {
        let report = decode_filter_with(text, options);
        (Self::new(filter_name, report.blocks), report.skipped)
    }

    pub fn to_filter_text(&self) -> String {
        encode_filter(&self.blocks)
    }

    /// File name the filter is downloaded as.
    pub fn file_name(&self) -> String {
        format!("{}.{FILTER_EXTENSION}", self.filter_name)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Filter name for an imported file: the file name without `.filter`.
pub fn filter_name_from_file_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(FILTER_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .unwrap_or(file_name)
}
