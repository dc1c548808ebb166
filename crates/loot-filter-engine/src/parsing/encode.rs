use std::fmt::Write;

use crate::models::{Block, MatchRule, RangeDomain, TextStyle, ValueRange};

use super::grammar::{
    COMMENT_PREFIX, Comparator, Directive, EXACT_OPERATOR, FUZZY_OPERATOR, TEMPORARY_FLAG,
    alert_sound_index,
};

/// Encodes one block as a paragraph of directive lines, without a trailing
/// newline.
///
/// Hidden blocks stop after their conditions: styling and effects are only
/// written for shown blocks.
pub fn encode_block(block: &Block) -> String {
    let mut out = String::new();

    if !block.name.is_empty() {
        line(&mut out, format_args!("{COMMENT_PREFIX} {}", block.name));
    }
    let visibility = if block.show {
        Directive::Show
    } else {
        Directive::Hide
    };
    line(&mut out, format_args!("{visibility}"));

    write_match(&mut out, Directive::Class, &block.class);
    write_match(&mut out, Directive::BaseType, &block.basetype);

    if block.item_rarity.any() {
        let selected = block.item_rarity.selected().collect::<Vec<_>>().join(" ");
        line(
            &mut out,
            format_args!("{} {FUZZY_OPERATOR} {selected}", Directive::Rarity),
        );
    }

    write_range(&mut out, Directive::ItemLevel, block.item_level, RangeDomain::ITEM_LEVEL);
    write_range(&mut out, Directive::Quality, block.quality, RangeDomain::QUALITY);

    if block.show {
        write_style(&mut out, &block.text);
        write_effects(&mut out, block);
    }

    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    out
}

/// Encodes a whole filter: block paragraphs separated by one blank line.
pub fn encode_filter(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(encode_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn line(out: &mut String, args: std::fmt::Arguments<'_>) {
    // Writing into a String cannot fail.
    let _ = out.write_fmt(args);
    out.push('\n');
}

fn write_match(out: &mut String, directive: Directive, rule: &MatchRule) {
    if rule.is_empty() {
        return;
    }
    let operator = if rule.exact {
        EXACT_OPERATOR
    } else {
        FUZZY_OPERATOR
    };
    line(out, format_args!("{directive} {operator} {}", rule.value));
}

/// Writes the fewest comparison lines that describe `range`: a single `==`
/// for a one-value range, otherwise a `>=` and/or `<=` for each bound that
/// differs from the domain edge.
fn write_range(out: &mut String, directive: Directive, range: ValueRange, domain: RangeDomain) {
    if range.is_exact() {
        let eq = Comparator::Equal.token();
        line(out, format_args!("{directive} {eq} {}", range.min()));
        return;
    }
    if range.min() != domain.floor {
        let ge = Comparator::GreaterOrEqual.token();
        line(out, format_args!("{directive} {ge} {}", range.min()));
    }
    if range.max() != domain.ceiling {
        let le = Comparator::LessOrEqual.token();
        line(out, format_args!("{directive} {le} {}", range.max()));
    }
}

fn write_style(out: &mut String, style: &TextStyle) {
    write_color(out, Directive::SetTextColor, &style.color);
    write_color(out, Directive::SetBackgroundColor, &style.background_color);
    write_color(out, Directive::SetBorderColor, &style.border_color);
    if style.font_size != 0 {
        line(
            out,
            format_args!("{} {}", Directive::SetFontSize, style.font_size),
        );
    }
}

fn write_color(out: &mut String, directive: Directive, color: &str) {
    if color.is_empty() {
        line(out, format_args!("{directive}"));
    } else {
        line(out, format_args!("{directive} {color}"));
    }
}

fn write_effects(out: &mut String, block: &Block) {
    let icon = &block.minimap_icon;
    if icon.show {
        line(
            out,
            format_args!(
                "{} {} {} {}",
                Directive::MinimapIcon,
                icon.size,
                icon.color,
                icon.icon
            ),
        );
    }

    let effect = &block.play_effect;
    if effect.show {
        if effect.temporary {
            line(
                out,
                format_args!("{} {} {TEMPORARY_FLAG}", Directive::PlayEffect, effect.color),
            );
        } else {
            line(out, format_args!("{} {}", Directive::PlayEffect, effect.color));
        }
    }

    let sound = &block.play_alert_sound;
    if sound.show {
        line(
            out,
            format_args!(
                "{} {} {}",
                Directive::PlayAlertSound,
                alert_sound_index(&sound.sound),
                sound.volume
            ),
        );
    }
}
