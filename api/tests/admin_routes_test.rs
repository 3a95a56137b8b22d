//! Integration tests for the administration routes

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use common::{access_cookie, admin_post, refresh_cookie, TestEnv};
use fa_api::create_app;
use fa_core::UserRepository;

#[actix_web::test]
async fn test_admin_routes_require_admin_role() {
    let env = TestEnv::new();
    let (id, pair) = env.register("alice").await;
    let app = test::init_service(create_app(env.state.clone())).await;

    let req = admin_post(&format!("/api/v1/admin/users/{}/ban", id), &pair.access).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri("/api/v1/admin/mass_logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let account = env.users.find_by_id(id).await.unwrap().unwrap();
    assert!(account.active);
}

#[actix_web::test]
async fn test_ban_and_unban() {
    let env = TestEnv::new();
    let admin = env.admin_session().await;
    let (id, pair) = env.register("alice").await;
    let app = test::init_service(create_app(env.state.clone())).await;

    let req = admin_post(&format!("/api/v1/admin/users/{}/ban", id), &admin.access).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["action"], "ban");
    assert!(!env.users.find_by_id(id).await.unwrap().unwrap().active);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token/refresh")
        .cookie(refresh_cookie(&pair.refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = admin_post(&format!("/api/v1/admin/users/{}/unban", id), &admin.access).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(env.users.find_by_id(id).await.unwrap().unwrap().active);
}

#[actix_web::test]
async fn test_kick_and_unkick() {
    let env = TestEnv::new();
    let admin = env.admin_session().await;
    let (id, pair) = env.register("alice").await;
    let app = test::init_service(create_app(env.state.clone())).await;

    let refresh = || {
        test::TestRequest::post()
            .uri("/api/v1/auth/token/refresh")
            .cookie(refresh_cookie(&pair.refresh))
            .to_request()
    };

    let req = admin_post(&format!("/api/v1/admin/users/{}/kick", id), &admin.access).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(
        test::call_service(&app, refresh()).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = admin_post(&format!("/api/v1/admin/users/{}/unkick", id), &admin.access).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(test::call_service(&app, refresh()).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_and_malformed_account_ids() {
    let env = TestEnv::new();
    let admin = env.admin_session().await;
    let app = test::init_service(create_app(env.state.clone())).await;

    let req = admin_post("/api/v1/admin/users/999/kick", &admin.access).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");

    let req = admin_post("/api/v1/admin/users/abc/ban", &admin.access).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_mass_logout_lifecycle() {
    let env = TestEnv::new();
    let (_, early) = env.register("alice").await;
    env.clock.advance(30);
    let admin = env.admin_session().await;
    let app = test::init_service(create_app(env.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/mass_logout")
        .cookie(access_cookie(&admin.access))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["active"], false);
    assert!(body.get("since").is_none());

    let req = admin_post("/api/v1/admin/mass_logout", &admin.access).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["active"], true);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token/refresh")
        .cookie(refresh_cookie(&early.refresh))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/mass_logout")
        .cookie(access_cookie(&admin.access))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["active"], true);
    assert!(body["since"].is_string());

    let req = test::TestRequest::delete()
        .uri("/api/v1/admin/mass_logout")
        .cookie(access_cookie(&admin.access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/token/refresh")
        .cookie(refresh_cookie(&early.refresh))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_ban_with_cache_down_is_unavailable() {
    let env = TestEnv::new();
    let admin = env.admin_session().await;
    let (id, _) = env.register("alice").await;
    env.cache.set_failing(true);
    let app = test::init_service(create_app(env.state.clone())).await;

    let req = admin_post(&format!("/api/v1/admin/users/{}/ban", id), &admin.access).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(env.users.find_by_id(id).await.unwrap().unwrap().active);
}
