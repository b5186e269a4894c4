use crate::ExternalIdentity;

#[test]
fn given_blank_fields_when_read_then_treated_as_missing() {
    let identity = ExternalIdentity {
        subject_id: "   ".to_string(),
        email: Some(String::new()),
        display_name: Some("  ".to_string()),
        avatar_url: None,
    };

    assert_eq!(identity.subject_id(), None);
    assert_eq!(identity.email(), None);
    assert_eq!(identity.display_name(), None);
    assert_eq!(identity.avatar_url(), None);
}

#[test]
fn given_padded_email_when_read_then_trimmed() {
    let identity = ExternalIdentity::new("g-1").with_email(" a@x.com ");

    assert_eq!(identity.email(), Some("a@x.com"));
    assert_eq!(identity.subject_id(), Some("g-1"));
}

#[test]
fn test_external_identity_serde_roundtrip_keeps_optional_fields() {
    let identity = ExternalIdentity::new("g-1")
        .with_email("a@x.com")
        .with_display_name("Ada");

    let json = serde_json::to_string(&identity).unwrap();
    let back: ExternalIdentity = serde_json::from_str(&json).unwrap();

    assert_eq!(back, identity);
    assert_eq!(back.avatar_url, None);
}
