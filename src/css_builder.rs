//! Stylesheet generator for the streamkit voice overlay.
//!
//! SYSTEM CONTEXT
//! ==============
//! The overlay page is a third-party renderer that only accepts a custom
//! stylesheet. Everything after the header line is a pure function of the
//! slot sequence and [`ViewSettings`]; OBS setups diff and cache it, so rule
//! order and exact text are part of the contract.
//!
//! Output is assembled line by line: every line is trimmed and empty lines are
//! dropped before joining with `\n`.

#[cfg(test)]
#[path = "css_builder_test.rs"]
mod css_builder_test;

use time::OffsetDateTime;
use time::macros::format_description;

use crate::consts::{APP_VERSION, FEI_COLORS};
use crate::models::feign_players::PlayerSlots;
use crate::models::view_settings::{AnimationSettings, ViewSettings};
use crate::util::color::hex_to_rgba;

const AVATAR_BORDER_WIDTH: i32 = 5;
const GLOW_SMALL_PX: i32 = 2;
const GLOW_LARGE_PX: i32 = 6;
const USERNAME_OPACITY: f64 = 0.95;
const AVATAR_ANIMATION_PREFIX: &str = "750ms infinite alternate ease-in-out ";

/// Build the overlay stylesheet, stamping the header with the current time.
pub fn build_css(players: &PlayerSlots, settings: &ViewSettings) -> String {
    build_css_at(players, settings, OffsetDateTime::now_utc())
}

/// Build the overlay stylesheet with an explicit header timestamp.
pub fn build_css_at(players: &PlayerSlots, settings: &ViewSettings, built_at: OffsetDateTime) -> String {
    let mut css = CssLines::default();
    if settings.fei.show {
        fei_back_rules(&mut css, settings);
        fei_front_rules(&mut css, settings);
        for (slot, id) in players.iter().enumerate() {
            player_rules(&mut css, settings, id, slot);
        }
    }
    animation_rules(&mut css, settings);
    layout_rules(&mut css, settings);

    format!(
        "/* CSS built on https://feign.mogproject.com (v{APP_VERSION}). {}. */\n\n{}",
        iso_timestamp(built_at),
        css.join()
    )
}

/// `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC.
fn iso_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    at.to_offset(time::UtcOffset::UTC).format(&format).unwrap_or_default()
}

// =============================================================================
// LINE ASSEMBLY
// =============================================================================

#[derive(Default)]
struct CssLines(Vec<String>);

impl CssLines {
    fn push(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref().trim();
        if !line.is_empty() {
            self.0.push(line.to_owned());
        }
    }

    fn push_if(&mut self, cond: bool, line: &str) {
        if cond {
            self.push(line);
        }
    }

    fn join(&self) -> String {
        self.0.join("\n")
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Comma-joined animation names, or `none`.
fn animation_names(flash: bool, jump: bool, flash_suffix: &str, prefix: &str) -> String {
    let mut names = Vec::with_capacity(2);
    if flash {
        names.push(format!("{prefix}speak-flash{flash_suffix}"));
    }
    if jump {
        names.push(format!("{prefix}speak-jump"));
    }
    if names.is_empty() {
        "none".to_owned()
    } else {
        names.join(",")
    }
}

/// Blur glow plus four diagonal hard shadows, all in `color`.
fn glow_filter(px: i32, color: &str) -> String {
    let diagonals = [(2, 2), (-2, -2), (-2, 2), (2, -2)]
        .iter()
        .map(|(x, y)| format!("drop-shadow({x}px {y}px 0px {color})"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(" drop-shadow(0 0 {px}px {color}) {diagonals}")
}

/// `@keyframes speak-flash-{suffix}` cycling small, large, small glow.
fn flash_keyframes(css: &mut CssLines, anim: &AnimationSettings, suffix: &str) {
    if !anim.flash {
        return;
    }
    let (base, var_suffix) = if suffix == "avatar" {
        ("brightness(100%)".to_owned(), "-a")
    } else {
        (format!("var(--f-{suffix})"), "")
    };
    css.push(format!(
        "@keyframes speak-flash-{suffix} {{\
         0% {{filter:{base} var(--shadow-sm{var_suffix});}}\
         50% {{filter:{base} var(--shadow-lg{var_suffix});}}\
         100% {{filter:{base} var(--shadow-sm{var_suffix});}}\
         }}"
    ));
}

// =============================================================================
// CHARACTER
// =============================================================================

fn fei_pseudo_element(css: &mut CssLines, settings: &ViewSettings, pseudo: &str, image: &str, filter: &str) {
    let (w, h) = (settings.fei_width(), settings.fei_height());
    css.push(format!(".voice_state::{pseudo} {{"));
    css.push(format!("background-image: var({image});"));
    css.push(format!("background-size: {w}px {h}px;"));
    css.push("display: inline-block;");
    css.push("content: \"\";");
    css.push(format!("width: {w}px;"));
    css.push(format!("height: {h}px;"));
    css.push(format!("filter: {filter};"));
    css.push("text-align: center;");
    css.push(format!("margin-top: {}px;", settings.fei_margin_top()));
    css.push("position: absolute;");
    css.push("top: 0px;");
    css.push_if(settings.fei.mirror, "-webkit-transform: scaleX(-1);");
    css.push_if(settings.fei.mirror, "transform: scaleX(-1);");
    css.push("z-index: 1");
    css.push("}");
}

fn speaking_animation(css: &mut CssLines, pseudo: &str, names: &str, filter: &str) {
    css.push(format!(".wrapper_speaking::{pseudo} {{"));
    css.push(format!("animation-name: {names};"));
    css.push("animation-duration: 750ms;");
    css.push("animation-timing-function: ease-in-out;");
    css.push("animation-delay: 0s;");
    css.push("animation-iteration-count: infinite;");
    css.push("animation-direction: alternate;");
    css.push("animation-fill-mode: forwards;");
    css.push(format!("filter: {filter};"));
    css.push("}");
}

/// Tinted background layer plus its speaking animation.
fn fei_back_rules(css: &mut CssLines, settings: &ViewSettings) {
    let speaking = &settings.fei.speaking;
    fei_pseudo_element(css, settings, "before", "--feign-icon-bg", "var(--d-default)");
    let names = animation_names(speaking.flash, speaking.jump, "-default", "");
    speaking_animation(css, "before", &names, "var(--f-default)");
}

/// Darkened foreground layer; it jumps but never flashes.
fn fei_front_rules(css: &mut CssLines, settings: &ViewSettings) {
    fei_pseudo_element(css, settings, "after", "--feign-icon-fg", "brightness(65%)");
    let names = animation_names(false, settings.fei.speaking.jump, "", "");
    speaking_animation(css, "after", &names, "brightness(100%)");
}

/// Per-user color overrides for an occupied slot.
fn player_rules(css: &mut CssLines, settings: &ViewSettings, id: &str, slot: usize) {
    if id.is_empty() {
        return;
    }
    let Some(color) = FEI_COLORS.get(slot) else {
        return;
    };
    let speaking = &settings.fei.speaking;
    css.push(format!(
        ".voice_state[data-userid=\"{id}\"]::before {{filter:var(--d-{color});}}"
    ));
    css.push(format!(
        ".wrapper_speaking[data-userid=\"{id}\"]::before {{animation-name: {};filter: var(--f-{color});}}",
        animation_names(speaking.flash, speaking.jump, &format!("-{color}"), "")
    ));
    flash_keyframes(css, speaking, color);
}

// =============================================================================
// SHARED ANIMATION
// =============================================================================

fn animation_rules(css: &mut CssLines, settings: &ViewSettings) {
    let fei = &settings.fei.speaking;
    let avatar = &settings.avatar.speaking;

    if fei.jump || avatar.jump {
        css.push("@keyframes speak-jump { 0% {top: 0px;} 50% {top: -20px;} 100% {top: 0px;} }");
    }
    flash_keyframes(css, fei, "default");
    flash_keyframes(css, avatar, "avatar");

    if fei.flash || avatar.flash {
        css.push(":root {");
        if fei.flash {
            css.push(format!("--shadow-sm:{};", glow_filter(GLOW_SMALL_PX, &fei.flash_color)));
            css.push(format!("--shadow-lg:{};", glow_filter(GLOW_LARGE_PX, &fei.flash_color)));
        }
        if avatar.flash {
            css.push(format!("--shadow-sm-a:{};", glow_filter(GLOW_SMALL_PX, &avatar.flash_color)));
            css.push(format!("--shadow-lg-a:{};", glow_filter(GLOW_LARGE_PX, &avatar.flash_color)));
        }
        css.push("}");
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

fn layout_rules(css: &mut CssLines, settings: &ViewSettings) {
    let avatar = &settings.avatar;
    let username = &settings.username;

    css.push(".voice_states {display: flex; flex-wrap: nowrap; margin: 0px 15px 0px 15px; padding: 0;}");
    css.push(format!(
        ".voice_state {{height: auto; margin: 0 {}px 0 0; display: flex; flex-direction: column; flex: 0 0 {}px; position: relative;}}",
        settings.fei.interval,
        settings.fei_width()
    ));

    // Avatar image
    css.push(".voice_avatar {");
    css.push_if(!avatar.show, "display: none;");
    css.push(format!("margin: {}px auto 0px auto;", settings.avatar_margin_top()));
    css.push(format!("width: {}px;", settings.avatar_width()));
    css.push(format!("height: {}px;", settings.avatar_height()));
    css.push(format!("border-radius: {}%;", avatar.shape.border_radius_percent()));
    css.push(format!("border-width: {AVATAR_BORDER_WIDTH}px;"));
    css.push("filter: brightness(35%);");
    css.push("position: relative;");
    css.push("top: 0px;");
    css.push(format!("z-index: {};", if avatar.front { 2 } else { 0 }));
    css.push("}");

    // Avatar speaking
    let outline = if avatar.speaking.outline {
        avatar.speaking.outline_color.as_str()
    } else {
        "transparent"
    };
    css.push("img[class*=\"Voice_avatarSpeaking\"] {");
    css.push(format!("border-color: {outline} !important;"));
    css.push("filter: brightness(100%);");
    css.push(format!(
        "animation: {};",
        animation_names(avatar.speaking.flash, avatar.speaking.jump, "-avatar", AVATAR_ANIMATION_PREFIX)
    ));
    css.push("animation-fill-mode: forwards;");
    css.push("}");

    // User name
    css.push(".voice_username {");
    css.push_if(!username.show, "display: none;");
    css.push(format!("height: {}px;", settings.username_height()));
    css.push(format!("margin: {}px 0 0 0;", settings.username_margin_top()));
    css.push("padding: 0;");
    css.push("}");
    css.push("[class*=\"Voice_name__\"] {");
    css.push(format!("font-size: {}px !important;", username.font_size));
    css.push(format!("color: {} !important;", username.font_color));
    css.push(format!(
        "background-color: {} !important;",
        hex_to_rgba(&username.background_color, USERNAME_OPACITY)
    ));
    css.push("height: 100%;");
    css.push(format!("width: {}px;", settings.username_width()));
    css.push("margin: 0 auto 0px auto;");
    css.push("padding: 10px 0px 0px 0px;");
    css.push("box-sizing: border-box;");
    css.push("text-overflow: clip;");
    css.push("white-space: nowrap;");
    css.push("overflow: hidden;");
    css.push("display: block;");
    css.push("text-align: center;");
    css.push("position: relative;");
    css.push("z-index: 3;");
    css.push("}");
}
