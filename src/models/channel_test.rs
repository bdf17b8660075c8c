use super::*;

fn channel(name: &str, url: &str) -> NamedChannel {
    NamedChannel {
        name: name.to_owned(),
        url: url.to_owned(),
        created_at: 1_700_000_000_000,
    }
}

// =============================================================
// retrieve_channel_ids
// =============================================================

#[test]
fn retrieve_channel_ids_parses_valid_urls() {
    assert_eq!(retrieve_channel_ids("https://discord.com/channels/1/2"), ("1", "2"));
    assert_eq!(retrieve_channel_ids("https://discord.com/channels/1/2/"), ("1", "2"));
    assert_eq!(
        retrieve_channel_ids("https://discord.com/channels/1234567890/1234567890"),
        ("1234567890", "1234567890")
    );
}

#[test]
fn retrieve_channel_ids_rejects_malformed_urls() {
    assert_eq!(retrieve_channel_ids(""), ("", ""));
    assert_eq!(retrieve_channel_ids("http://discord.com/channels/1/2"), ("", ""));
    assert_eq!(retrieve_channel_ids("https://discord.com/channels/1/"), ("", ""));
    assert_eq!(retrieve_channel_ids("https://discord.com/channels/1/a/"), ("", ""));
    assert_eq!(retrieve_channel_ids("https://discord.com/channels/x/2/"), ("", ""));
    assert_eq!(retrieve_channel_ids("https://discord.com/channels/1/2//"), ("", ""));
    assert_eq!(retrieve_channel_ids("https://discord.com/channels/1/2/3"), ("", ""));
}

// =============================================================
// is_valid_voice_channel_url
// =============================================================

#[test]
fn is_valid_voice_channel_url_matches_retrieve() {
    for url in [
        "",
        "https://discord.com/channels/1/x/",
        "https://discord.com/channels/1/2",
        "https://discord.com/channels/1/2/",
        "https://discord.com/channels//2",
    ] {
        let (server, channel) = retrieve_channel_ids(url);
        assert_eq!(is_valid_voice_channel_url(url), !server.is_empty() && !channel.is_empty(), "{url}");
    }
    assert!(is_valid_voice_channel_url("https://discord.com/channels/1/2"));
    assert!(!is_valid_voice_channel_url("https://discord.com/channels/1/x/"));
}

#[test]
fn validate_channel_url_reports_invalid_url() {
    assert_eq!(validate_channel_url("https://discord.com/channels/1/2/"), Ok(()));
    assert_eq!(validate_channel_url(""), Err(FieldError::InvalidUrl));
    assert_eq!(validate_channel_url("https://discord.com/channels/1"), Err(FieldError::InvalidUrl));
}

// =============================================================
// create_url
// =============================================================

#[test]
fn create_url_builds_overlay_url() {
    assert_eq!(
        create_url("12345", "67890", false),
        "https://streamkit.discord.com/overlay/voice/12345/67890"
    );
    assert_eq!(
        create_url("12345", "67890", true),
        "https://streamkit.discord.com/overlay/voice/12345/67890?streamer_avatar_first=true"
    );
}

// =============================================================
// Named channel validation
// =============================================================

#[test]
fn can_register_requires_valid_and_new_url() {
    let channels = vec![channel("main", "https://discord.com/channels/1/2")];
    assert!(!can_register("https://discord.com/channels/1/2", &channels));
    assert!(!can_register("not a url", &channels));
    assert!(can_register("https://discord.com/channels/1/3", &channels));
}

#[test]
fn validate_channel_name_detects_duplicates_except_self() {
    let channels = vec![
        channel("main", "https://discord.com/channels/1/2"),
        channel("sub", "https://discord.com/channels/1/3"),
    ];
    assert_eq!(validate_channel_name("main", &channels, Some(0)), Ok(()));
    assert_eq!(
        validate_channel_name("main", &channels, Some(1)),
        Err(FieldError::AlreadyExists { field: "name" })
    );
    assert_eq!(
        validate_channel_name("sub", &channels, None),
        Err(FieldError::AlreadyExists { field: "name" })
    );
    assert_eq!(validate_channel_name("", &channels, None), Ok(()));
}

#[test]
fn named_channel_serializes_camel_case() {
    let json = serde_json::to_value(channel("main", "u")).expect("serialize");
    assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
}
