//! Tests for administrative revocation commands

use crate::domain::value_objects::MassLogoutStatus;
use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;
use crate::services::testing::{auth_error, Harness, LIFETIMES, START};

const UNKNOWN_ID: i32 = 999;

#[tokio::test]
async fn test_ban_and_unban_flip_active() {
    let h = Harness::new();
    let (id, _) = h.register("alice").await;

    h.admin.ban(id).await.unwrap();
    assert!(!h.users.find_by_id(id).await.unwrap().unwrap().active);
    assert!(h.revocation.was_recently_banned(id).await.unwrap());

    h.admin.unban(id).await.unwrap();
    assert!(h.users.find_by_id(id).await.unwrap().unwrap().active);
    assert!(h.revocation.was_recently_banned(id).await.unwrap());
}

#[tokio::test]
async fn test_kick_and_unkick() {
    let h = Harness::new();
    let (id, _) = h.register("alice").await;

    h.admin.kick(id).await.unwrap();
    assert!(h.revocation.is_kicked(id).await.unwrap());

    h.admin.unkick(id).await.unwrap();
    assert!(!h.revocation.is_kicked(id).await.unwrap());

    // Unkicking twice is not an error
    h.admin.unkick(id).await.unwrap();
}

#[tokio::test]
async fn test_kick_expires_with_refresh_lifetime() {
    let h = Harness::new();
    let (id, _) = h.register("alice").await;

    h.admin.kick(id).await.unwrap();
    h.clock.advance(LIFETIMES.refresh - 1);
    assert!(h.revocation.is_kicked(id).await.unwrap());

    h.clock.advance(1);
    assert!(!h.revocation.is_kicked(id).await.unwrap());
}

#[tokio::test]
async fn test_unknown_account_leaves_no_facts() {
    let h = Harness::new();

    assert_eq!(auth_error(h.admin.ban(UNKNOWN_ID).await), AuthError::AccountNotFound);
    assert_eq!(auth_error(h.admin.unban(UNKNOWN_ID).await), AuthError::AccountNotFound);
    assert_eq!(auth_error(h.admin.kick(UNKNOWN_ID).await), AuthError::AccountNotFound);
    assert_eq!(auth_error(h.admin.unkick(UNKNOWN_ID).await), AuthError::AccountNotFound);

    assert!(!h.revocation.was_recently_banned(UNKNOWN_ID).await.unwrap());
    assert!(!h.revocation.is_kicked(UNKNOWN_ID).await.unwrap());
}

#[tokio::test]
async fn test_mass_logout_status() {
    let h = Harness::new();
    assert_eq!(h.admin.get_mass_logout_status().await.unwrap(), MassLogoutStatus::default());

    h.clock.advance(30);
    let activated = h.admin.activate_mass_logout().await.unwrap();
    assert!(activated.active);
    assert_eq!(activated.since.unwrap().timestamp(), START + 30);

    h.clock.advance(30);
    assert_eq!(h.admin.get_mass_logout_status().await.unwrap(), activated);

    h.admin.deactivate_mass_logout().await.unwrap();
    assert!(!h.admin.get_mass_logout_status().await.unwrap().active);
}

#[tokio::test]
async fn test_mass_logout_expires_with_refresh_lifetime() {
    let h = Harness::new();
    h.admin.activate_mass_logout().await.unwrap();

    h.clock.advance(LIFETIMES.refresh);
    assert!(!h.admin.get_mass_logout_status().await.unwrap().active);
}

#[tokio::test]
async fn test_ban_fails_closed_when_cache_down() {
    let h = Harness::new();
    let (id, _) = h.register("alice").await;
    h.cache.set_failing(true);

    let err = h.admin.ban(id).await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));
    // The directory is left untouched when the ban fact was not written
    assert!(h.users.find_by_id(id).await.unwrap().unwrap().active);
}
