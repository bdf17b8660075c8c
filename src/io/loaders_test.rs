use serde_json::json;

use super::*;
use crate::consts::NUMBER_OF_FEI_COLORS;
use crate::models::table_settings::{DISCORD_USER_COLUMNS, NAMED_CHANNEL_COLUMNS};
use crate::models::view_settings::AvatarShape;

fn thirteen(ids: &[&str]) -> Vec<String> {
    let mut all = vec![String::new(); NUMBER_OF_FEI_COLORS];
    for (i, id) in ids.iter().enumerate() {
        all[i] = (*id).to_owned();
    }
    all
}

// =============================================================
// Channels
// =============================================================

#[test]
fn voice_channel_url_must_be_string() {
    assert_eq!(parse_voice_channel_url(&json!("https://x")).expect("url"), "https://x");
    assert!(parse_voice_channel_url(&json!(5)).is_err());
}

#[test]
fn named_channels_require_all_fields() {
    let ok = json!([{"name": "main", "url": "u", "createdAt": 12}]);
    let channels = parse_named_channels(&ok).expect("channels");
    assert_eq!(channels[0].created_at, 12);
    assert!(parse_named_channels(&json!([{"name": "main", "url": "u"}])).is_err());
    assert!(parse_named_channels(&json!({"name": "main"})).is_err());
}

// =============================================================
// Table settings
// =============================================================

#[test]
fn table_settings_accept_known_column() {
    let parsed = parse_table_settings(&json!({"sortKey": "id", "sortOrder": "DESC"}), &DISCORD_USER_COLUMNS)
        .expect("settings");
    assert_eq!(parsed, TableSettings::new(Some("id"), Some(SortOrder::Desc)));
}

#[test]
fn table_settings_reject_unknown_or_partial_state() {
    let cases = [
        json!({"sortKey": "id", "sortOrder": "ASC"}),
        json!({"sortKey": null, "sortOrder": "ASC"}),
        json!({"sortKey": "name", "sortOrder": null}),
        json!({"sortKey": "name", "sortOrder": "UP"}),
        json!(null),
    ];
    for case in cases {
        assert!(parse_table_settings(&case, &NAMED_CHANNEL_COLUMNS).is_err(), "{case}");
    }
}

// =============================================================
// Discord users
// =============================================================

#[test]
fn discord_users_without_groups_get_empty_list() {
    let users = parse_discord_users(&json!([{"name": "user-0", "id": "100"}])).expect("users");
    assert_eq!(users[0].groups, Vec::<String>::new());
}

#[test]
fn discord_users_with_malformed_groups_get_empty_list() {
    let users = parse_discord_users(&json!([
        {"name": "a", "id": "1", "groups": "red"},
        {"name": "b", "id": "2", "groups": ["red", 3]},
        {"name": "c", "id": "3", "groups": ["red", "blue"]}
    ]))
    .expect("users");
    assert!(users[0].groups.is_empty());
    assert!(users[1].groups.is_empty());
    assert_eq!(users[2].groups, vec!["red".to_owned(), "blue".to_owned()]);
}

#[test]
fn discord_users_reject_missing_identity() {
    assert!(parse_discord_users(&json!([{"name": "a"}])).is_err());
    assert!(parse_discord_users(&json!([{"id": 1, "name": "a"}])).is_err());
    assert!(parse_discord_users(&json!("users")).is_err());
}

// =============================================================
// Feign players
// =============================================================

#[test]
fn feign_players_upgrade_bare_array() {
    let ids = ["109", "105", "111", "106", "108", "107", "", "110", "101", "102", "104", "103", ""];
    let parsed = parse_feign_players(&json!(ids)).expect("players");
    assert_eq!(parsed.group, "");
    assert_eq!(parsed.players.len(), 1);
    assert_eq!(parsed.players[""].as_slice(), ids.map(str::to_owned).as_slice());
}

#[test]
fn feign_players_parse_grouped_shape() {
    let value = json!({
        "group": "red",
        "players": {"": thirteen(&["1"]), "red": thirteen(&["", "2"])}
    });
    let parsed = parse_feign_players(&value).expect("players");
    assert_eq!(parsed.group, "red");
    assert_eq!(parsed.get_players().get(1), "2");
    assert_eq!(parsed.players[""].get(0), "1");
}

#[test]
fn feign_players_enforce_sequence_length() {
    let mut short = thirteen(&[]);
    short.pop();
    assert!(parse_feign_players(&json!(short)).is_err());
    assert!(parse_feign_players(&json!({"group": "", "players": {"": short}})).is_err());
    assert!(parse_feign_players(&json!({"group": "", "players": []})).is_err());
    assert!(parse_feign_players(&json!({"group": ""})).is_err());
    assert!(parse_feign_players(&json!(null)).is_err());
}

#[test]
fn feign_players_round_trip_through_json() {
    let mut players = FeignPlayers::default().assign(0, "1").assign(4, "2");
    players.players.insert("team".to_owned(), PlayerSlots::default().assign(12, "3"));
    let players = players.select_group("team");
    let encoded = serde_json::to_value(&players).expect("serialize");
    assert_eq!(parse_feign_players(&encoded).expect("parse"), players);
}

// =============================================================
// View settings
// =============================================================

#[test]
fn view_settings_default_each_part_independently() {
    let value = json!({
        "fei": {"mirror": false, "speaking": {"jump": false, "flash": true, "flashColor": "#000000", "outline": false, "outlineColor": "#111111"}, "interval": 3},
        "avatar": {"show": true, "front": true, "shape": 7, "speaking": {}, "offsetY": 0},
        "username": {"show": false, "fontSize": 12, "fontColor": "#222222", "backgroundColor": "#333333", "offsetY": -4},
    });
    let parsed = parse_view_settings(&value);
    assert!(parsed.fei.show);
    assert!(!parsed.fei.mirror);
    assert_eq!(parsed.fei.interval, 3);
    assert_eq!(parsed.avatar, AvatarSettings::default());
    assert_eq!(parsed.username.offset_y, -4);
    assert_eq!(parsed.streamer, StreamerSettings::default());
}

#[test]
fn avatar_settings_accept_valid_shape() {
    let value = json!({
        "show": true, "front": false, "shape": 1,
        "speaking": {"jump": false, "flash": false, "flashColor": "#ffffff", "outline": true, "outlineColor": "#c7f6fa"},
        "offsetY": 5
    });
    let parsed = parse_avatar_settings(&value).expect("avatar");
    assert_eq!(parsed.shape, AvatarShape::RoundedRectangle);
    assert_eq!(parsed.speaking.outline_color, "#c7f6fa");
    assert!(!parsed.front);
}

#[test]
fn view_settings_reject_numbers_outside_ranges() {
    let speaking = json!({"jump": false, "flash": false, "flashColor": "#ffffff", "outline": true, "outlineColor": "#3ba53b"});
    let fei = |interval: i64| json!({"mirror": true, "speaking": speaking, "interval": interval});
    let avatar = |offset: i64| json!({"show": true, "front": true, "shape": 0, "speaking": speaking, "offsetY": offset});
    let username = |size: i64, offset: i64| {
        json!({"show": true, "fontSize": size, "fontColor": "#ffffff", "backgroundColor": "#1e2124", "offsetY": offset})
    };

    assert!(parse_fei_settings(&fei(0)).is_ok());
    assert!(parse_fei_settings(&fei(50)).is_ok());
    assert!(matches!(parse_fei_settings(&fei(51)), Err(LoadError::Invalid(_))));
    assert!(matches!(parse_fei_settings(&fei(-1)), Err(LoadError::Invalid(_))));
    assert!(parse_fei_settings(&fei(5_000_000_000)).is_err());

    assert!(parse_avatar_settings(&avatar(-300)).is_ok());
    assert!(parse_avatar_settings(&avatar(300)).is_ok());
    assert!(matches!(parse_avatar_settings(&avatar(301)), Err(LoadError::Invalid(_))));
    assert!(matches!(parse_avatar_settings(&avatar(2_147_483_600)), Err(LoadError::Invalid(_))));

    assert!(parse_username_settings(&username(10, -300)).is_ok());
    assert!(parse_username_settings(&username(50, 300)).is_ok());
    assert!(matches!(parse_username_settings(&username(9, 0)), Err(LoadError::Invalid(_))));
    assert!(matches!(parse_username_settings(&username(51, 0)), Err(LoadError::Invalid(_))));
    assert!(matches!(parse_username_settings(&username(20, -301)), Err(LoadError::Invalid(_))));
}

#[test]
fn or_default_substitutes_on_error() {
    let value = or_default("test", Err::<i32, _>(LoadError::Missing), || 7);
    assert_eq!(value, 7);
    assert_eq!(or_default("test", Ok(3), || 7), 3);
}
