use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{Block, ItemRarity, MatchRule, RangeDomain, ValueRange};

use super::grammar::{COMMENT_PREFIX, Comparator, Directive, TEMPORARY_FLAG, alert_sound_id};

/// One or more blank lines, with either line ending.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n){2,}").expect("paragraph break pattern is valid"));

/// How a line is matched to a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineMatching {
    /// A line belongs to the first directive whose keyword it contains.
    ///
    /// This is how filters saved by earlier versions were read, so it stays
    /// the default. A value containing a keyword (`Class = Hideout Doodads`)
    /// is read as that keyword.
    #[default]
    Substring,
    /// A line belongs to the directive named by its first token.
    LeadingToken,
}

#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub line_matching: LineMatching,
}

/// Why a paragraph did not produce a block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("paragraph has no Show or Hide directive")]
    MissingVisibility,
    #[error("{directive} expects an integer, found {token:?}")]
    InvalidNumber { directive: Directive, token: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedParagraph {
    /// Position of the paragraph in the file, counting from zero.
    pub index: usize,
    pub first_line: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub blocks: Vec<Block>,
    pub skipped: Vec<SkippedParagraph>,
}

/// Decodes a filter file into its blocks, in file order.
///
/// Paragraphs that cannot become a block are logged and left out.
pub fn decode_filter(text: &str) -> Vec<Block> {
    decode_filter_with(text, &DecodeOptions::default()).blocks
}

/// Decodes a filter file, also reporting every paragraph that was dropped.
pub fn decode_filter_with(text: &str, options: &DecodeOptions) -> DecodeReport {
    let mut report = DecodeReport::default();

    for (index, paragraph) in paragraphs(text).enumerate() {
        match decode_paragraph(paragraph, options.line_matching) {
            Ok(block) => report.blocks.push(block),
            Err(reason) => {
                let first_line = paragraph.lines().next().unwrap_or_default().to_string();
                log::warn!("Skipping paragraph {index} ({first_line:?}): {reason}");
                report.skipped.push(SkippedParagraph {
                    index,
                    first_line,
                    reason,
                });
            }
        }
    }

    log::debug!(
        "Decoded {} blocks, skipped {} paragraphs",
        report.blocks.len(),
        report.skipped.len()
    );
    report
}

/// Splits a file into paragraphs, leaving out the empty ones produced by
/// leading or trailing blank lines.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    PARAGRAPH_BREAK
        .split(text)
        .filter(|paragraph| !paragraph.trim_matches(['\r', '\n']).is_empty())
}

/// Decodes a single paragraph, starting from a fresh [`Block::parse_default`].
pub fn decode_paragraph(paragraph: &str, matching: LineMatching) -> Result<Block, SkipReason> {
    let mut block = Block::parse_default();
    let mut has_visibility = false;

    for line in paragraph.lines().map(str::trim) {
        if line.starts_with(COMMENT_PREFIX) {
            block.name = after_first_space(line).to_string();
            continue;
        }

        let tokens: Vec<&str> = line.split(' ').collect();
        let directive = match matching {
            LineMatching::Substring => Directive::find_in(line),
            LineMatching::LeadingToken => Directive::from_keyword(tokens[0]),
        };
        let Some(directive) = directive else {
            continue;
        };

        match directive {
            Directive::Show => {
                block.show = true;
                has_visibility = true;
            }
            Directive::Hide => {
                block.show = false;
                has_visibility = true;
            }
            Directive::Class => block.class = match_rule(line, &tokens),
            Directive::BaseType => block.basetype = match_rule(line, &tokens),
            Directive::Rarity => block.item_rarity = rarity(line, &tokens, matching),
            Directive::ItemLevel => {
                let domain = RangeDomain::ITEM_LEVEL;
                block.item_level =
                    narrow(directive, line, &tokens, block.item_level, domain, matching)?;
            }
            Directive::Quality => {
                let domain = RangeDomain::QUALITY;
                block.quality =
                    narrow(directive, line, &tokens, block.quality, domain, matching)?;
            }
            Directive::SetTextColor => block.text.color = after_first_space(line).to_string(),
            Directive::SetBackgroundColor => {
                block.text.background_color = after_first_space(line).to_string()
            }
            Directive::SetBorderColor => {
                block.text.border_color = after_first_space(line).to_string()
            }
            Directive::SetFontSize => block.text.font_size = number(directive, &tokens, 1)?,
            Directive::MinimapIcon => {
                block.minimap_icon.size = number(directive, &tokens, 1)?;
                block.minimap_icon.color = token(&tokens, 2).to_string();
                block.minimap_icon.icon = token(&tokens, 3).to_string();
                block.minimap_icon.show = true;
            }
            Directive::PlayEffect => {
                block.play_effect.color = token(&tokens, 1).to_string();
                block.play_effect.temporary = line.contains(TEMPORARY_FLAG);
                block.play_effect.show = true;
            }
            Directive::PlayAlertSound => {
                block.play_alert_sound.sound = alert_sound_id(token(&tokens, 1));
                block.play_alert_sound.volume = number(directive, &tokens, 2)?;
                block.play_alert_sound.show = true;
            }
        }
    }

    if !has_visibility {
        return Err(SkipReason::MissingVisibility);
    }
    Ok(block)
}

/// Everything after the first space, or nothing for a bare directive.
fn after_first_space(line: &str) -> &str {
    line.split_once(' ').map_or("", |(_, rest)| rest)
}

fn token<'a>(tokens: &[&'a str], position: usize) -> &'a str {
    tokens.get(position).copied().unwrap_or_default()
}

fn number<T: std::str::FromStr>(
    directive: Directive,
    tokens: &[&str],
    position: usize,
) -> Result<T, SkipReason> {
    let raw = token(tokens, position);
    raw.parse().map_err(|_| SkipReason::InvalidNumber {
        directive,
        token: raw.to_string(),
    })
}

fn match_rule(line: &str, tokens: &[&str]) -> MatchRule {
    MatchRule {
        value: tokens.get(2..).map(|rest| rest.join(" ")).unwrap_or_default(),
        exact: line.contains(Comparator::Equal.token()),
    }
}

fn rarity(line: &str, tokens: &[&str], matching: LineMatching) -> ItemRarity {
    let has = |label: &str| match matching {
        LineMatching::Substring => line.contains(label),
        LineMatching::LeadingToken => tokens.iter().skip(1).any(|token| *token == label),
    };
    let [normal, magic, rare, unique] = ItemRarity::LABELS;
    ItemRarity {
        normal: has(normal),
        magic: has(magic),
        rare: has(rare),
        unique: has(unique),
    }
}

/// Applies a one-sided comparison to `current`, replacing the bound it names.
///
/// Starting from the full domain this gives `>= v` as `[v, ceiling]` and
/// `<= v` as `[floor, v]`; a `>=` line followed by a `<=` line keeps both
/// bounds. A new bound that crosses the one already set resets the other
/// bound to the domain edge. A line without a recognised comparator leaves
/// `current` as is.
fn narrow(
    directive: Directive,
    line: &str,
    tokens: &[&str],
    current: ValueRange,
    domain: RangeDomain,
    matching: LineMatching,
) -> Result<ValueRange, SkipReason> {
    let comparator = match matching {
        LineMatching::Substring => Comparator::find_in(line),
        LineMatching::LeadingToken => Comparator::from_token(token(tokens, 1)),
    };
    let Some(comparator) = comparator else {
        return Ok(current);
    };

    let value: i64 = number(directive, tokens, 2)?;
    let (min, max) = (current.min(), current.max());
    let range = match comparator {
        Comparator::GreaterOrEqual => lower_bound(domain, value, max),
        Comparator::Greater => lower_bound(domain, value.saturating_add(1), max),
        Comparator::LessOrEqual => upper_bound(domain, min, value),
        Comparator::Less => upper_bound(domain, min, value.saturating_sub(1)),
        Comparator::Equal => ValueRange::exactly(domain.clamp(value)),
    };
    Ok(range)
}

fn lower_bound(domain: RangeDomain, min: i64, max: u32) -> ValueRange {
    let min = domain.clamp(min);
    ValueRange::new(min, if min > max { domain.ceiling } else { max })
}

fn upper_bound(domain: RangeDomain, min: u32, max: i64) -> ValueRange {
    let max = domain.clamp(max);
    ValueRange::new(if min > max { domain.floor } else { min }, max)
}
