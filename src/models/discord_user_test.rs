use super::*;

fn user(id: &str, name: &str, groups: &[&str]) -> DiscordUser {
    DiscordUser {
        id: id.to_owned(),
        name: name.to_owned(),
        groups: groups.iter().map(|g| (*g).to_owned()).collect(),
    }
}

#[test]
fn find_user_groups_sorts_and_dedups() {
    let users = vec![user("1", "a", &["red", "blue"]), user("2", "b", &["blue"]), user("3", "c", &[])];
    assert_eq!(find_user_groups(&users), vec!["blue".to_owned(), "red".to_owned()]);
    assert!(find_user_groups(&[]).is_empty());
}

#[test]
fn belongs_to_treats_empty_group_as_everyone() {
    let u = user("1", "a", &["red"]);
    assert!(u.belongs_to(""));
    assert!(u.belongs_to("red"));
    assert!(!u.belongs_to("blue"));
}

#[test]
fn deserialize_defaults_missing_groups() {
    let u: DiscordUser = serde_json::from_str(r#"{"id":"1","name":"a"}"#).expect("parse");
    assert!(u.groups.is_empty());
}

// =============================================================
// Form validation
// =============================================================

#[test]
fn validate_new_user_accepts_fresh_entry() {
    let users = vec![user("100", "alice", &[])];
    assert_eq!(validate_new_user("bob", "101", &users), Ok(()));
}

#[test]
fn validate_new_user_rejects_bad_fields() {
    let users = vec![user("100", "alice", &[])];
    assert_eq!(validate_new_user("", "101", &users), Err(FieldError::Required { field: "name" }));
    assert_eq!(
        validate_new_user("alice", "101", &users),
        Err(FieldError::AlreadyExists { field: "name" })
    );
    assert_eq!(validate_new_user("bob", "", &users), Err(FieldError::Required { field: "id" }));
    assert_eq!(validate_new_user("bob", "10x", &users), Err(FieldError::NotNumeric { field: "id" }));
    assert_eq!(
        validate_new_user("bob", "100", &users),
        Err(FieldError::AlreadyExists { field: "id" })
    );
}

#[test]
fn validate_edits_ignore_the_edited_row() {
    let users = vec![user("100", "alice", &[]), user("101", "bob", &[])];
    assert_eq!(validate_user_name("alice", &users, Some(0)), Ok(()));
    assert_eq!(validate_user_id("101", &users, Some(1)), Ok(()));
    assert_eq!(
        validate_user_id("101", &users, Some(0)),
        Err(FieldError::AlreadyExists { field: "id" })
    );
}

#[test]
fn validate_user_name_ignores_surrounding_whitespace() {
    let users = vec![user("100", "bob", &[]), user("101", " carol ", &[])];
    assert_eq!(
        validate_user_name(" bob", &users, None),
        Err(FieldError::AlreadyExists { field: "name" })
    );
    assert_eq!(
        validate_user_name("carol", &users, None),
        Err(FieldError::AlreadyExists { field: "name" })
    );
    assert_eq!(validate_user_name("  ", &users, None), Err(FieldError::Required { field: "name" }));
    assert_eq!(validate_user_name(" bob ", &users, Some(0)), Ok(()));
}
