use serde::{Deserialize, Serialize};

use super::range::{RangeDomain, ValueRange, single_slider};

/// One rule of a loot filter: a match condition plus either a hide directive
/// or the styling applied to matching items.
///
/// Field names serialize in camelCase (`itemRarity`, `playAlertSound`, ...)
/// so blocks persisted by the editor load directly. Missing fields are
/// back-filled from [`Block::default`], which covers shapes saved before
/// `sockets` and `areaLevel` existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    pub name: String,
    pub show: bool,
    pub class: MatchRule,
    pub basetype: MatchRule,
    pub item_rarity: ItemRarity,
    pub item_level: ValueRange,
    pub quality: ValueRange,
    /// Persisted only; the filter text has no socket directive.
    pub sockets: ValueRange,
    /// Persisted only; the filter text has no area level directive.
    pub area_level: ValueRange,
    pub text: TextStyle,
    pub minimap_icon: MinimapIcon,
    pub play_effect: PlayEffect,
    pub play_alert_sound: PlayAlertSound,
}

impl Block {
    /// Name given to blocks added from the editor.
    pub const NEW_BLOCK_NAME: &'static str = "New block";

    /// Starting shape for a decoded paragraph.
    ///
    /// Differs from [`Block::default`] in having no name (so a paragraph
    /// without a comment re-encodes without one) and an alert volume of 100.
    pub fn parse_default() -> Self {
        Self {
            name: String::new(),
            play_alert_sound: PlayAlertSound {
                volume: PlayAlertSound::PARSE_VOLUME,
                ..PlayAlertSound::default()
            },
            ..Self::default()
        }
    }

    /// A shown block with the given name and default styling.
    pub fn shown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            show: true,
            ..Self::default()
        }
    }

    /// A hidden block with the given name.
    pub fn hidden(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            show: false,
            ..Self::default()
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self {
            name: Self::NEW_BLOCK_NAME.to_string(),
            show: false,
            class: MatchRule::default(),
            basetype: MatchRule::default(),
            item_rarity: ItemRarity::default(),
            item_level: ValueRange::full(RangeDomain::ITEM_LEVEL),
            quality: ValueRange::full(RangeDomain::QUALITY),
            sockets: ValueRange::full(RangeDomain::SOCKETS),
            area_level: ValueRange::full(RangeDomain::AREA_LEVEL),
            text: TextStyle::default(),
            minimap_icon: MinimapIcon::default(),
            play_effect: PlayEffect::default(),
            play_alert_sound: PlayAlertSound::default(),
        }
    }
}

/// A `Class` or `BaseType` condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRule {
    pub value: String,
    /// `==` when set, `=` otherwise.
    pub exact: bool,
}

impl MatchRule {
    pub fn exact(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            exact: true,
        }
    }

    pub fn fuzzy(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            exact: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRarity {
    pub normal: bool,
    pub magic: bool,
    pub rare: bool,
    pub unique: bool,
}

impl ItemRarity {
    /// Rarity names in the order they are written.
    pub const LABELS: [&'static str; 4] = ["Normal", "Magic", "Rare", "Unique"];

    pub const NONE: ItemRarity = ItemRarity {
        normal: false,
        magic: false,
        rare: false,
        unique: false,
    };

    fn flags(&self) -> [bool; 4] {
        [self.normal, self.magic, self.rare, self.unique]
    }

    pub fn any(&self) -> bool {
        self.flags().iter().any(|flag| *flag)
    }

    /// Names of the selected rarities, in [`ItemRarity::LABELS`] order.
    pub fn selected(&self) -> impl Iterator<Item = &'static str> {
        Self::LABELS
            .into_iter()
            .zip(self.flags())
            .filter_map(|(label, flag)| flag.then_some(label))
    }
}

impl Default for ItemRarity {
    fn default() -> Self {
        Self {
            normal: true,
            magic: true,
            rare: true,
            unique: true,
        }
    }
}

/// Text and frame styling. Colors are `"R G B A"` strings of 0-255 channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub color: String,
    pub background_color: String,
    pub border_color: String,
    #[serde(with = "single_slider")]
    pub font_size: u32,
}

impl TextStyle {
    pub const DEFAULT_FONT_SIZE: u32 = 32;
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: "255 0 0 255".to_string(),
            background_color: "255 255 255 255".to_string(),
            border_color: "255 0 0 255".to_string(),
            font_size: Self::DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapIcon {
    pub show: bool,
    pub icon: String,
    pub color: String,
    #[serde(with = "single_slider")]
    pub size: u32,
}

impl Default for MinimapIcon {
    fn default() -> Self {
        Self {
            show: false,
            icon: String::new(),
            color: String::new(),
            size: 1,
        }
    }
}

/// Ground beam drawn on matching items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayEffect {
    pub show: bool,
    pub color: String,
    pub temporary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayAlertSound {
    pub show: bool,
    /// Symbolic id, `alert1` through `alert16`.
    pub sound: String,
    #[serde(with = "single_slider")]
    pub volume: u32,
}

impl PlayAlertSound {
    pub const DEFAULT_VOLUME: u32 = 150;
    pub const PARSE_VOLUME: u32 = 100;
}

impl Default for PlayAlertSound {
    fn default() -> Self {
        Self {
            show: false,
            sound: String::new(),
            volume: Self::DEFAULT_VOLUME,
        }
    }
}
