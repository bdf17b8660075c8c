use super::*;

fn with_offsets(avatar_offset: i32, username_offset: i32) -> ViewSettings {
    let mut s = ViewSettings::default();
    s.avatar.offset_y = avatar_offset;
    s.username.offset_y = username_offset;
    s
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_positions_match_fixed_overlaps() {
    let s = ViewSettings::default();
    assert_eq!(s.fei_top_relative(), 0);
    assert_eq!(s.fei_bottom_relative(), 200);
    assert_eq!(s.avatar_top_relative(), 68);
    assert_eq!(s.avatar_bottom_relative(), 188);
    assert_eq!(s.username_top_relative(), 166);
    assert_eq!(s.username_bottom_relative(), 202);
    assert_eq!(s.top_element_relative(), 0);
    assert_eq!(s.bottom_element_relative(), 202);
}

#[test]
fn default_margins_and_height() {
    let s = ViewSettings::default();
    assert_eq!(s.fei_margin_top(), 40);
    assert_eq!(s.avatar_margin_top(), 108);
    assert_eq!(s.username_margin_top(), -22);
    assert_eq!(s.height(), 270);
}

#[test]
fn default_settings_values() {
    let s = ViewSettings::default();
    assert!(s.fei.show);
    assert!(s.fei.mirror);
    assert!(s.fei.speaking.jump && s.fei.speaking.flash);
    assert_eq!(s.avatar.shape, AvatarShape::Circle);
    assert!(s.avatar.speaking.outline);
    assert_eq!(s.username.font_size, 20);
    assert_eq!(s.username.background_color, "#1e2124");
    assert!(!s.streamer.show_streamer_first);
}

// =============================================================
// Offsets
// =============================================================

#[test]
fn avatar_above_character_shifts_top_element() {
    let s = with_offsets(-100, 0);
    assert_eq!(s.avatar_top_relative(), -32);
    assert_eq!(s.top_element_relative(), -32);
    assert_eq!(s.fei_margin_top(), 72);
    assert_eq!(s.avatar_margin_top(), 40);
    assert_eq!(s.height(), 300);
}

#[test]
fn username_below_character_extends_height() {
    let s = with_offsets(0, 50);
    assert_eq!(s.username_bottom_relative(), 252);
    assert_eq!(s.height(), 320);
}

#[test]
fn hidden_avatar_anchors_username_to_avatar_margin() {
    let mut s = ViewSettings::default();
    s.avatar.show = false;
    assert_eq!(s.username_margin_top(), 108 + 166 - 68);
}

#[test]
fn height_is_margins_plus_element_span() {
    for avatar in (-200..=200).step_by(25) {
        for username in (-200..=200).step_by(25) {
            let s = with_offsets(avatar, username);
            let span = s.bottom_element_relative() - s.top_element_relative();
            assert_eq!(s.height(), DEFAULT_TOP_MARGIN + span + DEFAULT_BOTTOM_MARGIN);
        }
    }
}

#[test]
fn height_is_monotonic_in_positive_offsets() {
    let mut previous = ViewSettings::default().height();
    for offset in (0..=200).step_by(10) {
        let h = with_offsets(offset, 0).height();
        assert!(h >= previous, "avatar offset {offset} gave {h} < {previous}");
        previous = h;
    }
    let mut previous = ViewSettings::default().height();
    for offset in (0..=200).step_by(10) {
        let h = with_offsets(0, offset).height();
        assert!(h >= previous, "username offset {offset} gave {h} < {previous}");
        previous = h;
    }
}

#[test]
fn height_never_drops_below_character_span() {
    for offset in (-200..=0).step_by(10) {
        assert!(with_offsets(offset, 0).height() >= DEFAULT_TOP_MARGIN + FEI_HEIGHT + DEFAULT_BOTTOM_MARGIN);
        assert!(with_offsets(0, offset).height() >= DEFAULT_TOP_MARGIN + FEI_HEIGHT + DEFAULT_BOTTOM_MARGIN);
    }
    assert!(with_offsets(-200, 0).height() > with_offsets(-100, 0).height());
}

// =============================================================
// Embed size
// =============================================================

#[test]
fn obs_dimensions_follow_interval_and_height() {
    let mut s = ViewSettings::default();
    assert_eq!(s.obs_width(), 1772);
    s.fei.interval = 4;
    assert_eq!(s.obs_width(), 1772 + 48);
    assert_eq!(s.obs_height(), 270);
    assert_eq!(s.preview_height(), 286);
}

// =============================================================
// AvatarShape
// =============================================================

#[test]
fn avatar_shape_serializes_as_integer() {
    assert_eq!(serde_json::to_value(AvatarShape::RoundedRectangle).expect("serialize"), 1);
    let shape: AvatarShape = serde_json::from_str("2").expect("parse");
    assert_eq!(shape, AvatarShape::Rectangle);
    assert!(serde_json::from_str::<AvatarShape>("3").is_err());
}

#[test]
fn avatar_shape_border_radius() {
    assert_eq!(AvatarShape::Circle.border_radius_percent(), 50);
    assert_eq!(AvatarShape::RoundedRectangle.border_radius_percent(), 12);
    assert_eq!(AvatarShape::Rectangle.border_radius_percent(), 0);
}

#[test]
fn fei_settings_defaults_show_when_missing() {
    let fei: FeiSettings = serde_json::from_str(
        r##"{"mirror":true,"speaking":{"jump":true,"flash":true,"flashColor":"#ffffff","outline":false,"outlineColor":"#3ba53b"},"interval":4}"##,
    )
    .expect("parse");
    assert!(fei.show);
    assert_eq!(fei.interval, 4);
}
