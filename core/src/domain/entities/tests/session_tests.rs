//! Unit tests for session claims

use chrono::Utc;

use crate::domain::entities::{Account, SessionClaims, SessionPayload, TokenType, ADMIN_ROLE};

fn account() -> Account {
    Account {
        id: 7,
        email: "a@b.com".to_string(),
        username: "alice".to_string(),
        password_hash: Some("hash".to_string()),
        roles: vec![ADMIN_ROLE.to_string(), "editor".to_string()],
        active: true,
        verified: false,
        created_at: Utc::now(),
        last_login: Utc::now(),
    }
}

#[test]
fn test_claims_serialize_with_wire_names() {
    let payload = SessionPayload::from(&account());
    let claims = SessionClaims::new(&payload, TokenType::Refresh, 1_000, 60);

    let json = serde_json::to_value(&claims).unwrap();
    assert_eq!(json["iat"], 1_000);
    assert_eq!(json["exp"], 1_060);
    assert_eq!(json["type"], "refresh");
    assert_eq!(json["id"], 7);
    assert_eq!(json["username"], "alice");
    assert_eq!(json["roles"], serde_json::json!(["admin", "editor"]));
}

#[test]
fn test_claims_expiry_boundary() {
    let payload = SessionPayload::from(&account());
    let claims = SessionClaims::new(&payload, TokenType::Access, 1_000, 60);

    assert!(!claims.is_expired(1_059));
    assert!(claims.is_expired(1_060));
}

#[test]
fn test_account_password_hash_not_serialized() {
    let json = serde_json::to_value(account()).unwrap();
    assert!(json.get("password_hash").is_none());
    assert!(account().has_role(ADMIN_ROLE));
}
