use crate::{Account, CoreError, ExternalIdentity};

use proptest::prelude::*;

fn existing_account() -> Account {
    let mut account = Account::new("g-1".to_string(), "a@x.com".to_string());
    account.display_name = Some("Old Name".to_string());
    account.avatar_url = Some("https://img/old.png".to_string());
    account
}

#[test]
fn test_new_account_is_linked() {
    let account = Account::new("g-1".to_string(), "a@x.com".to_string());

    assert!(account.is_linked());
    assert_eq!(account.external_subject_id.as_deref(), Some("g-1"));
    assert_eq!(account.email, "a@x.com");
    assert_eq!(account.created_at, account.updated_at);
}

#[test]
fn test_link_subject_sets_subject_and_keeps_id() {
    let mut account = existing_account();
    account.external_subject_id = None;
    let id = account.id;

    account.link_subject("g-9");

    assert_eq!(account.id, id);
    assert_eq!(account.external_subject_id.as_deref(), Some("g-9"));
}

#[test]
fn given_new_values_when_refresh_profile_then_overwrites_and_keeps_email() {
    let mut account = existing_account();
    let identity = ExternalIdentity::new("g-1")
        .with_email("different@x.com")
        .with_display_name("New Name")
        .with_avatar_url("https://img/new.png");

    let changed = account.refresh_profile(&identity);

    assert!(changed);
    assert_eq!(account.display_name.as_deref(), Some("New Name"));
    assert_eq!(account.avatar_url.as_deref(), Some("https://img/new.png"));
    assert_eq!(account.email, "a@x.com");
}

#[test]
fn given_empty_values_when_refresh_profile_then_nothing_erased() {
    let mut account = existing_account();
    let identity = ExternalIdentity::new("g-1")
        .with_email("a@x.com")
        .with_display_name("")
        .with_avatar_url("");

    let changed = account.refresh_profile(&identity);

    assert!(!changed);
    assert_eq!(account.display_name.as_deref(), Some("Old Name"));
    assert_eq!(account.avatar_url.as_deref(), Some("https://img/old.png"));
}

#[test]
fn given_same_values_when_refresh_profile_then_reports_unchanged() {
    let mut account = existing_account();
    let identity = ExternalIdentity::new("g-1").with_display_name("Old Name");

    assert!(!account.refresh_profile(&identity));
}

#[test]
fn test_parse_id_rejects_garbage() {
    let result = Account::parse_id("not-a-uuid");

    assert!(matches!(result, Err(CoreError::Uuid { .. })));
}

#[test]
fn test_parse_id_accepts_account_id() {
    let account = existing_account();

    assert_eq!(Account::parse_id(&account.id.to_string()).unwrap(), account.id);
}

proptest! {
    #[test]
    fn refresh_profile_never_erases_with_blank_input(
        name in "[ \t]{0,4}",
        avatar in "[ \t]{0,4}",
    ) {
        let mut account = existing_account();
        let identity = ExternalIdentity::new("g-1")
            .with_display_name(name)
            .with_avatar_url(avatar);

        account.refresh_profile(&identity);

        prop_assert_eq!(account.display_name.as_deref(), Some("Old Name"));
        prop_assert_eq!(account.avatar_url.as_deref(), Some("https://img/old.png"));
    }
}
