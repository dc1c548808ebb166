use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::decode::LineMatching;
use crate::parsing::grammar::{
    COMMENT_PREFIX, Directive, EXACT_OPERATOR, MAX_ALERT_VOLUME, MAX_MINIMAP_ICON_SIZE,
    MINIMAP_ICON_SHAPES, PALETTE_COLORS, is_known_alert_sound,
};
use crate::parsing::encode_block;

use super::block::Block;
use super::range::RangeDomain;

static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3} \d{1,3} \d{1,3}(?: \d{1,3})?$").expect("color pattern is valid")
});

/// A property of a block that either breaks a round trip through filter text
/// or produces a line the game will reject.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockIssue {
    #[error("{field} contains a line break")]
    LineBreak { field: &'static str },
    #[error("{field} has leading or trailing whitespace")]
    SurroundingWhitespace { field: &'static str },
    #[error("line {line:?} would be read back as {read_as}")]
    Misclassified { line: String, read_as: Directive },
    #[error("{field} is a fuzzy match containing \"==\"; it would read back as exact")]
    ExactOperatorInFuzzyValue { field: &'static str },
    #[error("no rarity selected; the block would read back matching every rarity")]
    NoRarity,
    #[error("{field} is outside {floor}-{ceiling}")]
    RangeOutOfDomain {
        field: &'static str,
        floor: u32,
        ceiling: u32,
    },
    #[error("font size 0 is not written; the block would read back with size 32")]
    ZeroFontSize,
    #[error("{field} {value:?} is not an \"R G B [A]\" color")]
    InvalidColor { field: &'static str, value: String },
    #[error("unknown minimap icon shape {0:?}")]
    UnknownIconShape(String),
    #[error("{field} {value:?} is not a palette color")]
    UnknownPaletteColor { field: &'static str, value: String },
    #[error("minimap icon size {0} is above 2")]
    IconSizeTooLarge(u32),
    #[error("unknown alert sound {0:?}")]
    UnknownAlertSound(String),
    #[error("alert volume {0} is above 300")]
    VolumeTooLoud(u32),
}

impl Block {
    /// Lists everything that would stop this block surviving
    /// `decode(encode(block))` under `matching`, plus values the game rejects.
    ///
    /// A block with no issues is well-formed: encoding the decoded block
    /// reproduces the same text.
    pub fn validate(&self, matching: LineMatching) -> Vec<BlockIssue> {
        let mut issues = Vec::new();

        let mut text_fields = vec![
            ("name", self.name.as_str()),
            ("class", self.class.value.as_str()),
            ("basetype", self.basetype.value.as_str()),
        ];
        for (field, value) in &text_fields {
            if value.trim() != *value {
                issues.push(BlockIssue::SurroundingWhitespace { field: *field });
            }
        }
        text_fields.extend([
            ("text color", self.text.color.as_str()),
            ("background color", self.text.background_color.as_str()),
            ("border color", self.text.border_color.as_str()),
            ("minimap icon", self.minimap_icon.icon.as_str()),
            ("minimap icon color", self.minimap_icon.color.as_str()),
            ("effect color", self.play_effect.color.as_str()),
            ("alert sound", self.play_alert_sound.sound.as_str()),
        ]);
        for (field, value) in text_fields {
            if value.contains(['\n', '\r']) {
                issues.push(BlockIssue::LineBreak { field });
            }
        }

        for (field, rule) in [("class", &self.class), ("basetype", &self.basetype)] {
            if !rule.exact && rule.value.contains(EXACT_OPERATOR) {
                issues.push(BlockIssue::ExactOperatorInFuzzyValue { field });
            }
        }

        if !self.item_rarity.any() {
            issues.push(BlockIssue::NoRarity);
        }
        for (field, range, domain) in [
            ("item level", self.item_level, RangeDomain::ITEM_LEVEL),
            ("quality", self.quality, RangeDomain::QUALITY),
            ("sockets", self.sockets, RangeDomain::SOCKETS),
            ("area level", self.area_level, RangeDomain::AREA_LEVEL),
        ] {
            if !domain.contains(range) {
                issues.push(BlockIssue::RangeOutOfDomain {
                    field,
                    floor: domain.floor,
                    ceiling: domain.ceiling,
                });
            }
        }

        if self.show {
            self.validate_styling(&mut issues);
        }

        // Only check line classification once every value is single-line.
        if !issues
            .iter()
            .any(|issue| matches!(issue, BlockIssue::LineBreak { .. }))
        {
            issues.extend(misclassified_lines(self, matching));
        }
        issues
    }

    pub fn is_well_formed(&self, matching: LineMatching) -> bool {
        self.validate(matching).is_empty()
    }

    fn validate_styling(&self, issues: &mut Vec<BlockIssue>) {
        if self.text.font_size == 0 {
            issues.push(BlockIssue::ZeroFontSize);
        }
        for (field, value) in [
            ("text color", &self.text.color),
            ("background color", &self.text.background_color),
            ("border color", &self.text.border_color),
        ] {
            if !is_color(value) {
                issues.push(BlockIssue::InvalidColor {
                    field,
                    value: value.clone(),
                });
            }
        }

        let icon = &self.minimap_icon;
        if icon.show {
            if !MINIMAP_ICON_SHAPES.contains(&icon.icon.as_str()) {
                issues.push(BlockIssue::UnknownIconShape(icon.icon.clone()));
            }
            if !PALETTE_COLORS.contains(&icon.color.as_str()) {
                issues.push(BlockIssue::UnknownPaletteColor {
                    field: "minimap icon color",
                    value: icon.color.clone(),
                });
            }
            if icon.size > MAX_MINIMAP_ICON_SIZE {
                issues.push(BlockIssue::IconSizeTooLarge(icon.size));
            }
        }

        let effect = &self.play_effect;
        if effect.show && !PALETTE_COLORS.contains(&effect.color.as_str()) {
            issues.push(BlockIssue::UnknownPaletteColor {
                field: "effect color",
                value: effect.color.clone(),
            });
        }

        let sound = &self.play_alert_sound;
        if sound.show {
            if !is_known_alert_sound(&sound.sound) {
                issues.push(BlockIssue::UnknownAlertSound(sound.sound.clone()));
            }
            if sound.volume > MAX_ALERT_VOLUME {
                issues.push(BlockIssue::VolumeTooLoud(sound.volume));
            }
        }
    }
}

/// `R G B` or `R G B A`, every channel 0-255.
pub fn is_color(value: &str) -> bool {
    COLOR.is_match(value)
        && value
            .split(' ')
            .all(|channel| channel.parse::<u8>().is_ok())
}

/// Encoded lines the decoder would attribute to a different directive.
fn misclassified_lines(block: &Block, matching: LineMatching) -> Vec<BlockIssue> {
    encode_block(block)
        .lines()
        .filter(|line| !line.starts_with(COMMENT_PREFIX))
        .filter_map(|line| {
            let written = Directive::from_keyword(line.split(' ').next().unwrap_or_default())?;
            let read_as = match matching {
                LineMatching::Substring => Directive::find_in(line)?,
                LineMatching::LeadingToken => written,
            };
            (read_as != written).then(|| BlockIssue::Misclassified {
                line: line.to_string(),
                read_as,
            })
        })
        .collect()
}
