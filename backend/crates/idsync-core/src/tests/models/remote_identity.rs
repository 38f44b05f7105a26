use crate::RemoteIdentity;

use serde_json::json;

#[test]
fn test_display_name_prefers_name_then_display_name() {
    let named = RemoteIdentity::new("ext-1", "a@example.com")
        .with_metadata(json!({"name": "Ada", "display_name": "ada99"}).as_object().unwrap().clone());
    assert_eq!(named.display_name(), "Ada");

    let display_only = RemoteIdentity::new("ext-1", "a@example.com")
        .with_metadata(json!({"display_name": "ada99"}).as_object().unwrap().clone());
    assert_eq!(display_only.display_name(), "ada99");

    let blank = RemoteIdentity::new("ext-1", "a@example.com")
        .with_metadata(json!({"name": "   "}).as_object().unwrap().clone());
    assert_eq!(blank.display_name(), "User");
}

#[test]
fn test_blank_fields_are_treated_as_missing() {
    let identity = RemoteIdentity {
        external_id: Some("  ".to_string()),
        email: Some("".to_string()),
        ..Default::default()
    };

    assert_eq!(identity.external_id(), None);
    assert_eq!(identity.normalized_email(), None);
}

#[test]
fn test_email_is_normalized() {
    let identity = RemoteIdentity::new("ext-1", "  Ada@Example.COM ");
    assert_eq!(identity.normalized_email().as_deref(), Some("ada@example.com"));
}
