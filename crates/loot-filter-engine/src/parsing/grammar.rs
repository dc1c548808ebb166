//! Keywords and tokens of the filter-file syntax.
//!
//! A filter file is a sequence of paragraphs separated by blank lines. Every
//! line of a paragraph is either a `#` comment or a directive keyword followed
//! by space separated arguments:
//!
//! ```text
//! # Currency
//! Show
//! Class == Stackable Currency
//! ItemLevel >= 20
//! SetTextColor 255 255 0 255
//! PlayAlertSound 3 150
//! ```

use std::fmt;

pub const COMMENT_PREFIX: char = '#';
pub const EXACT_OPERATOR: &str = "==";
pub const FUZZY_OPERATOR: &str = "=";
pub const TEMPORARY_FLAG: &str = "Temp";
pub const ALERT_SOUND_PREFIX: &str = "alert";
pub const ALERT_SOUND_COUNT: u32 = 16;

/// Minimap icon shapes the game accepts.
pub const MINIMAP_ICON_SHAPES: [&str; 12] = [
    "Circle",
    "Diamond",
    "Hexagon",
    "Square",
    "Star",
    "Triangle",
    "Cross",
    "Moon",
    "Raindrop",
    "Kite",
    "Pentagon",
    "UpsideDownHouse",
];

/// Named colors usable by minimap icons and ground effects.
pub const PALETTE_COLORS: [&str; 11] = [
    "Red", "Green", "Blue", "Brown", "White", "Yellow", "Cyan", "Grey", "Orange", "Pink",
    "Purple",
];

/// Minimap icon sizes run from 0 (largest) to 2 (smallest).
pub const MAX_MINIMAP_ICON_SIZE: u32 = 2;
pub const MAX_ALERT_VOLUME: u32 = 300;

/// Directive keywords, in the order a line is tested against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Show,
    Hide,
    Class,
    BaseType,
    Rarity,
    ItemLevel,
    Quality,
    SetTextColor,
    SetBackgroundColor,
    SetBorderColor,
    SetFontSize,
    MinimapIcon,
    PlayEffect,
    PlayAlertSound,
}

impl Directive {
    pub const MATCH_ORDER: [Directive; 14] = [
        Directive::Show,
        Directive::Hide,
        Directive::Class,
        Directive::BaseType,
        Directive::Rarity,
        Directive::ItemLevel,
        Directive::Quality,
        Directive::SetTextColor,
        Directive::SetBackgroundColor,
        Directive::SetBorderColor,
        Directive::SetFontSize,
        Directive::MinimapIcon,
        Directive::PlayEffect,
        Directive::PlayAlertSound,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            Directive::Show => "Show",
            Directive::Hide => "Hide",
            Directive::Class => "Class",
            Directive::BaseType => "BaseType",
            Directive::Rarity => "Rarity",
            Directive::ItemLevel => "ItemLevel",
            Directive::Quality => "Quality",
            Directive::SetTextColor => "SetTextColor",
            Directive::SetBackgroundColor => "SetBackgroundColor",
            Directive::SetBorderColor => "SetBorderColor",
            Directive::SetFontSize => "SetFontSize",
            Directive::MinimapIcon => "MinimapIcon",
            Directive::PlayEffect => "PlayEffect",
            Directive::PlayAlertSound => "PlayAlertSound",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::MATCH_ORDER
            .into_iter()
            .find(|directive| directive.keyword() == keyword)
    }

    /// First directive whose keyword occurs anywhere in `line`.
    pub fn find_in(line: &str) -> Option<Self> {
        Self::MATCH_ORDER
            .into_iter()
            .find(|directive| line.contains(directive.keyword()))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Numeric comparison operators of `ItemLevel` and `Quality`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    GreaterOrEqual,
    Greater,
    LessOrEqual,
    Less,
    Equal,
}

impl Comparator {
    /// Two-character operators come before their one-character prefixes so a
    /// substring search picks `>=` over `>`.
    pub const PRECEDENCE: [Comparator; 5] = [
        Comparator::GreaterOrEqual,
        Comparator::Greater,
        Comparator::LessOrEqual,
        Comparator::Less,
        Comparator::Equal,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Comparator::GreaterOrEqual => ">=",
            Comparator::Greater => ">",
            Comparator::LessOrEqual => "<=",
            Comparator::Less => "<",
            Comparator::Equal => "==",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::PRECEDENCE
            .into_iter()
            .find(|comparator| comparator.token() == token)
    }

    pub fn find_in(line: &str) -> Option<Self> {
        Self::PRECEDENCE
            .into_iter()
            .find(|comparator| line.contains(comparator.token()))
    }
}

/// Text-form index of a symbolic sound id: `alert7` becomes `7`.
pub fn alert_sound_index(sound: &str) -> &str {
    sound.strip_prefix(ALERT_SOUND_PREFIX).unwrap_or(sound)
}

/// Symbolic sound id of a text-form index: `7` becomes `alert7`.
pub fn alert_sound_id(index: &str) -> String {
    format!("{ALERT_SOUND_PREFIX}{index}")
}

/// Whether `sound` names one of the built-in alert sounds.
pub fn is_known_alert_sound(sound: &str) -> bool {
    (1..=ALERT_SOUND_COUNT).any(|index| alert_sound_id(&index.to_string()) == sound)
}
