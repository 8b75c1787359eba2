mod common;

use anyhow::Result;
use mockito::{Matcher, Server};
use serde_json::json;

use common::{anonymous_context, config_for, user_json, ScriptedPrompter};
use gym_console_cli::auth::AuthError;
use gym_console_cli::commands::create_member;
use gym_console_cli::context::AppContext;
use gym_console_cli::models::{RegisterRequest, Role};
use gym_console_cli::storage::Storage;

fn auth_body(role: &str) -> String {
    json!({
        "access": "access-abc",
        "refresh": "refresh-abc",
        "user": user_json(role)
    })
    .to_string()
}

fn register_request(password_confirm: &str) -> RegisterRequest {
    RegisterRequest {
        username: "alex".to_string(),
        email: "alex@example.com".to_string(),
        password: "longpassword".to_string(),
        password_confirm: password_confirm.to_string(),
        first_name: "Alex".to_string(),
        last_name: "Reyes".to_string(),
        role: None,
        phone_number: None,
    }
}

#[tokio::test]
async fn test_login_publishes_and_persists_identity() -> Result<()> {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/users/login/")
        .match_body(Matcher::Json(json!({"username": "alex", "password": "pw"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body("admin"))
        .expect(1)
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    let mut identity = ctx.auth().subscribe();
    assert!(ctx.auth().current_user().is_none());

    let user = ctx.auth().login("alex", "pw").await?;
    login.assert_async().await;

    assert_eq!(user.role, Role::Admin);
    assert_eq!(ctx.auth().current_user(), Some(user.clone()));
    assert!(identity.has_changed()?);
    assert_eq!(identity.borrow_and_update().as_ref(), Some(&user));

    let storage = ctx.api().storage();
    assert_eq!(storage.access_token()?, Some("access-abc".to_string()));
    assert_eq!(storage.get("refresh_token")?, Some("refresh-abc".to_string()));
    assert_eq!(storage.load_user()?, Some(user));
    assert!(ctx.auth().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_trainee_role_logs_in_without_admin_rights() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login/")
        .with_status(200)
        .with_body(auth_body("TRAINEE"))
        .create_async()
        .await;
    let members_post = server
        .mock("POST", "/users/members/")
        .expect(0)
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    let user = ctx.auth().login("tia", "pw").await?;

    assert_eq!(user.role, Role::Member);
    assert!(!user.is_admin());
    assert_eq!(ctx.api().storage().load_user()?, Some(user));

    let mut prompter = ScriptedPrompter::default();
    create_member(&ctx, &mut prompter).await?;

    assert!(prompter.asked.is_empty());
    members_post.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_identity_and_storage() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login/")
        .with_status(200)
        .with_body(auth_body("member"))
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    ctx.auth().login("alex", "pw").await?;

    let mut identity = ctx.auth().subscribe();
    ctx.auth().logout()?;

    assert!(ctx.auth().current_user().is_none());
    assert!(identity.borrow_and_update().is_none());

    let storage = ctx.api().storage();
    assert_eq!(storage.access_token()?, None);
    assert_eq!(storage.get("refresh_token")?, None);
    assert_eq!(storage.get("currentUser")?, None);
    assert!(!ctx.auth().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_restore_reads_identity_without_network() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login/")
        .with_status(200)
        .with_body(auth_body("trainer"))
        .expect(1)
        .create_async()
        .await;

    let storage = Storage::temporary()?;

    let first = AppContext::new(config_for(&server.url()), None, storage.clone())?;
    let user = first.auth().login("alex", "pw").await?;
    drop(first);

    let untouched = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let second = AppContext::new(config_for(&server.url()), None, storage)?;
    assert_eq!(second.auth().current_user(), Some(user));
    assert!(second.require_user().is_ok());

    untouched.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_login_error_prefers_field_message_then_detail() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/login/")
        .match_body(Matcher::PartialJson(json!({"username": "field"})))
        .with_status(400)
        .with_body(json!({"non_field_errors": ["Invalid credentials"], "detail": "ignored"}).to_string())
        .create_async()
        .await;
    server
        .mock("POST", "/users/login/")
        .match_body(Matcher::PartialJson(json!({"username": "detail"})))
        .with_status(401)
        .with_body(json!({"detail": "No active account found"}).to_string())
        .create_async()
        .await;
    server
        .mock("POST", "/users/login/")
        .match_body(Matcher::PartialJson(json!({"username": "empty"})))
        .with_status(500)
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    let fallback = "Login failed.";

    let err = ctx.auth().login("field", "pw").await.unwrap_err();
    assert_eq!(err.user_message(fallback), "Invalid credentials");

    let err = ctx.auth().login("detail", "pw").await.unwrap_err();
    assert_eq!(err.user_message(fallback), "No active account found");

    let err = ctx.auth().login("empty", "pw").await.unwrap_err();
    assert_eq!(err.user_message(fallback), fallback);

    assert!(ctx.auth().current_user().is_none());
    Ok(())
}

#[tokio::test]
async fn test_register_with_tokens_logs_in_directly() -> Result<()> {
    let mut server = Server::new_async().await;
    let register = server
        .mock("POST", "/users/register/")
        .match_body(Matcher::PartialJson(json!({
            "username": "alex",
            "password_confirm": "longpassword"
        })))
        .with_status(201)
        .with_body(auth_body("member"))
        .expect(1)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/users/login/")
        .expect(0)
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    let user = ctx.auth().register(&register_request("longpassword")).await?;

    register.assert_async().await;
    login.assert_async().await;
    assert_eq!(user.username, "alex");
    assert!(ctx.auth().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_register_message_only_chains_login() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/register/")
        .with_status(201)
        .with_body(json!({"user": {"id": 1, "username": "alex"}, "message": "User registered successfully"}).to_string())
        .expect(1)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/users/login/")
        .match_body(Matcher::Json(json!({"username": "alex", "password": "longpassword"})))
        .with_status(200)
        .with_body(auth_body("member"))
        .expect(1)
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    let user = ctx.auth().register(&register_request("longpassword")).await?;

    login.assert_async().await;
    assert_eq!(ctx.auth().current_user(), Some(user));
    Ok(())
}

#[tokio::test]
async fn test_register_reports_failed_follow_up_login() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users/register/")
        .with_status(201)
        .with_body(json!({"message": "User registered successfully"}).to_string())
        .create_async()
        .await;
    server
        .mock("POST", "/users/login/")
        .with_status(401)
        .with_body(json!({"detail": "No active account found"}).to_string())
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    let err = ctx
        .auth()
        .register(&register_request("longpassword"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::LoginAfterRegister(_)));
    assert!(err.user_message("x").contains("Account created but login failed"));
    assert!(ctx.auth().current_user().is_none());
    Ok(())
}

#[tokio::test]
async fn test_register_password_mismatch_is_never_sent() -> Result<()> {
    let mut server = Server::new_async().await;
    let register = server
        .mock("POST", "/users/register/")
        .expect(0)
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    let err = ctx
        .auth()
        .register(&register_request("different1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::PasswordMismatch));
    assert_eq!(err.user_message("x"), "Passwords do not match!");
    register.assert_async().await;
    Ok(())
}
