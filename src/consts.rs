//! Shared constants for the overlay palette and app metadata.

// ── App ─────────────────────────────────────────────────────────

/// Version stamped into generated stylesheets.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Palette ─────────────────────────────────────────────────────

/// Number of player slots; one per character color.
pub const NUMBER_OF_FEI_COLORS: usize = 13;

/// Color names in slot order. Used as CSS identifier suffixes.
pub const FEI_COLORS: [&str; NUMBER_OF_FEI_COLORS] = [
    "white", "salmon", "purple", "green", "blue", "red", "yellow", "lime", "sky", "pink", "brown", "rose", "orange",
];

/// Display color codes in slot order.
pub const FEI_COLOR_CODES: [&str; NUMBER_OF_FEI_COLORS] = [
    "#ffffff", "#ff891e", "#71348d", "#2a7b0c", "#4f71d7", "#b4000b", "#ffe551", "#85ff46", "#30d0c0", "#ff91b6",
    "#654322", "#ff00e0", "#ff4405",
];

// ── Overlay ─────────────────────────────────────────────────────

/// Base URL of the streamkit voice overlay.
pub const STREAMKIT_VOICE_URL: &str = "https://streamkit.discord.com/overlay/voice";

/// Embed width for thirteen players before per-character interval is added.
pub const OBS_BASE_WIDTH: i32 = 1772;

/// Scroll bar allowance added to the preview pane.
pub const PREVIEW_SCROLLBAR_HEIGHT: i32 = 16;
