pub mod block;
pub mod range;
pub mod validate;
pub mod workspace;

pub use block::{Block, ItemRarity, MatchRule, MinimapIcon, PlayAlertSound, PlayEffect, TextStyle};
pub use range::{RangeDomain, ValueRange};
pub use validate::{BlockIssue, is_color};
pub use workspace::{FILTER_EXTENSION, FilterWorkspace, filter_name_from_file_name};
