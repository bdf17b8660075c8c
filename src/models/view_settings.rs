//! Overlay appearance settings and the pixel geometry derived from them.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each player column stacks three elements top to bottom: the character
//! ("fei"), the Discord avatar, and the username label. Element sizes and
//! default overlaps are fixed; the user only moves the avatar and username
//! vertically. Positions are computed relative to the character's top edge,
//! then shifted so the top-most element sits at `DEFAULT_TOP_MARGIN`.

#[cfg(test)]
#[path = "view_settings_test.rs"]
mod view_settings_test;

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::{NUMBER_OF_FEI_COLORS, OBS_BASE_WIDTH, PREVIEW_SCROLLBAR_HEIGHT};

pub const DEFAULT_TOP_MARGIN: i32 = 40;
pub const DEFAULT_BOTTOM_MARGIN: i32 = 28;
pub const FEI_WIDTH: i32 = 134;
pub const FEI_HEIGHT: i32 = 200;
pub const AVATAR_WIDTH: i32 = 120;
pub const AVATAR_HEIGHT: i32 = 120;
pub const DEFAULT_AVATAR_OVERLAP: i32 = 132;
pub const DEFAULT_USERNAME_OVERLAP: i32 = 22;
/// `FEI_WIDTH - 8`
pub const USERNAME_WIDTH: i32 = 126;
pub const USERNAME_HEIGHT: i32 = 36;

/// Accepted `offsetY` range for the avatar and the username.
pub const OFFSET_Y_RANGE: RangeInclusive<i32> = -300..=300;
pub const INTERVAL_RANGE: RangeInclusive<i32> = 0..=50;
pub const FONT_SIZE_RANGE: RangeInclusive<i32> = 10..=50;

/// Avatar clipping shape. Persisted as its integer discriminant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AvatarShape {
    #[default]
    Circle,
    RoundedRectangle,
    Rectangle,
}

impl AvatarShape {
    /// CSS `border-radius` percentage.
    #[must_use]
    pub fn border_radius_percent(self) -> u8 {
        match self {
            Self::Circle => 50,
            Self::RoundedRectangle => 12,
            Self::Rectangle => 0,
        }
    }
}

impl TryFrom<u8> for AvatarShape {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Circle),
            1 => Ok(Self::RoundedRectangle),
            2 => Ok(Self::Rectangle),
            other => Err(format!("invalid avatar shape: {other}")),
        }
    }
}

impl From<AvatarShape> for u8 {
    fn from(shape: AvatarShape) -> Self {
        match shape {
            AvatarShape::Circle => 0,
            AvatarShape::RoundedRectangle => 1,
            AvatarShape::Rectangle => 2,
        }
    }
}

/// Speaking-state effects for one element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSettings {
    pub jump: bool,
    pub flash: bool,
    pub flash_color: String,
    pub outline: bool,
    pub outline_color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeiSettings {
    /// Missing in snapshots older than v1.0.0.
    #[serde(default = "default_true")]
    pub show: bool,
    pub mirror: bool,
    pub speaking: AnimationSettings,
    /// Additional horizontal margin between characters.
    pub interval: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarSettings {
    pub show: bool,
    /// Draw the avatar above the character.
    pub front: bool,
    pub shape: AvatarShape,
    pub speaking: AnimationSettings,
    pub offset_y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameSettings {
    pub show: bool,
    pub font_size: i32,
    pub font_color: String,
    pub background_color: String,
    pub offset_y: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamerSettings {
    pub show_streamer_first: bool,
}

fn default_true() -> bool {
    true
}

impl FeiSettings {
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        INTERVAL_RANGE.contains(&self.interval)
    }
}

impl AvatarSettings {
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        OFFSET_Y_RANGE.contains(&self.offset_y)
    }
}

impl UsernameSettings {
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        OFFSET_Y_RANGE.contains(&self.offset_y) && FONT_SIZE_RANGE.contains(&self.font_size)
    }
}

impl Default for FeiSettings {
    fn default() -> Self {
        Self {
            show: true,
            mirror: true,
            speaking: AnimationSettings {
                jump: true,
                flash: true,
                flash_color: "#ffffff".to_owned(),
                outline: false,
                outline_color: "#3ba53b".to_owned(),
            },
            interval: 0,
        }
    }
}

impl Default for AvatarSettings {
    fn default() -> Self {
        Self {
            show: true,
            front: true,
            shape: AvatarShape::Circle,
            speaking: AnimationSettings {
                jump: false,
                flash: false,
                flash_color: "#ffffff".to_owned(),
                outline: true,
                outline_color: "#3ba53b".to_owned(),
            },
            offset_y: 0,
        }
    }
}

impl Default for UsernameSettings {
    fn default() -> Self {
        Self {
            show: true,
            font_size: 20,
            font_color: "#ffffff".to_owned(),
            background_color: "#1e2124".to_owned(),
            offset_y: 0,
        }
    }
}

/// All appearance settings. Geometry accessors are pure and cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub fei: FeiSettings,
    pub avatar: AvatarSettings,
    pub username: UsernameSettings,
    pub streamer: StreamerSettings,
}

impl ViewSettings {
    // ── Dimensions ──────────────────────────────────────────────

    #[must_use]
    pub fn fei_width(&self) -> i32 {
        FEI_WIDTH
    }

    #[must_use]
    pub fn fei_height(&self) -> i32 {
        FEI_HEIGHT
    }

    #[must_use]
    pub fn avatar_width(&self) -> i32 {
        AVATAR_WIDTH
    }

    #[must_use]
    pub fn avatar_height(&self) -> i32 {
        AVATAR_HEIGHT
    }

    #[must_use]
    pub fn username_width(&self) -> i32 {
        USERNAME_WIDTH
    }

    #[must_use]
    pub fn username_height(&self) -> i32 {
        USERNAME_HEIGHT
    }

    // ── Positions relative to the character's top ───────────────

    #[must_use]
    pub fn fei_top_relative(&self) -> i32 {
        0
    }

    #[must_use]
    pub fn fei_bottom_relative(&self) -> i32 {
        self.fei_top_relative() + self.fei_height()
    }

    #[must_use]
    pub fn avatar_top_relative(&self) -> i32 {
        self.fei_bottom_relative() + self.avatar.offset_y - DEFAULT_AVATAR_OVERLAP
    }

    #[must_use]
    pub fn avatar_bottom_relative(&self) -> i32 {
        self.avatar_top_relative() + self.avatar_height()
    }

    #[must_use]
    pub fn username_top_relative(&self) -> i32 {
        self.avatar_bottom_relative() + self.username.offset_y - DEFAULT_USERNAME_OVERLAP
    }

    #[must_use]
    pub fn username_bottom_relative(&self) -> i32 {
        self.username_top_relative() + self.username_height()
    }

    #[must_use]
    pub fn top_element_relative(&self) -> i32 {
        self.fei_top_relative()
            .min(self.avatar_top_relative())
            .min(self.username_top_relative())
    }

    #[must_use]
    pub fn bottom_element_relative(&self) -> i32 {
        self.fei_bottom_relative()
            .max(self.avatar_bottom_relative())
            .max(self.username_bottom_relative())
    }

    // ── Margins relative to parent nodes ────────────────────────

    #[must_use]
    pub fn fei_margin_top(&self) -> i32 {
        DEFAULT_TOP_MARGIN + self.fei_top_relative() - self.top_element_relative()
    }

    #[must_use]
    pub fn avatar_margin_top(&self) -> i32 {
        DEFAULT_TOP_MARGIN + self.avatar_top_relative() - self.top_element_relative()
    }

    /// The username stacks under the avatar box; a hidden avatar still
    /// anchors it through the avatar's margin.
    #[must_use]
    pub fn username_margin_top(&self) -> i32 {
        if self.avatar.show {
            self.username_top_relative() - self.avatar_bottom_relative()
        } else {
            self.avatar_margin_top() + self.username_top_relative() - self.avatar_top_relative()
        }
    }

    // ── Overall size ────────────────────────────────────────────

    /// Height of one player column including margins.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.avatar_margin_top() + self.bottom_element_relative() - self.avatar_top_relative() + DEFAULT_BOTTOM_MARGIN
    }

    /// Browser-source width wide enough for every slot.
    #[must_use]
    pub fn obs_width(&self) -> i32 {
        let gaps = i32::try_from(NUMBER_OF_FEI_COLORS - 1).unwrap_or(0);
        OBS_BASE_WIDTH + self.fei.interval * gaps
    }

    #[must_use]
    pub fn obs_height(&self) -> i32 {
        self.height()
    }

    #[must_use]
    pub fn preview_height(&self) -> i32 {
        self.height() + PREVIEW_SCROLLBAR_HEIGHT
    }
}
