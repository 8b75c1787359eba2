mod common;

use anyhow::Result;
use clap::Parser;
use mockito::{Matcher, Server};
use serde_json::json;

use common::{
    anonymous_context, config_for, context_as, context_with, machine_json, member_json, Answer,
    ScriptedPrompter,
};
use gym_console_cli::commands::{
    create_member, create_trainer, delete_machine, delete_member, edit_machine, list_members, Cli,
};
use gym_console_cli::models::Role;

#[tokio::test]
async fn test_non_admin_create_opens_no_dialog_and_sends_nothing() -> Result<()> {
    let mut server = Server::new_async().await;
    let members_post = server
        .mock("POST", "/users/members/")
        .expect(0)
        .create_async()
        .await;
    let trainers_post = server
        .mock("POST", "/users/trainers/")
        .expect(0)
        .create_async()
        .await;

    for role in [Role::Trainer, Role::Member] {
        let ctx = context_as(&server.url(), role);
        let mut prompter = ScriptedPrompter::default();

        create_member(&ctx, &mut prompter).await?;
        create_trainer(&ctx, &mut prompter).await?;

        assert!(prompter.asked.is_empty());
    }

    members_post.assert_async().await;
    trainers_post.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_admin_create_member_submits_and_reloads() -> Result<()> {
    let mut server = Server::new_async().await;
    let post = server
        .mock("POST", "/users/members/")
        .match_body(Matcher::PartialJson(json!({
            "username": "newbie",
            "email": "new@example.com",
            "password": "secret",
            "membership_type": "premium",
            "is_active": true
        })))
        .with_status(201)
        .with_body(member_json(5).to_string())
        .expect(1)
        .create_async()
        .await;
    let reload = server
        .mock("GET", "/users/members/")
        .with_status(200)
        .with_body(json!([member_json(5)]).to_string())
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Text("newbie"),
        Answer::Text("new@example.com"),
        Answer::Text("New"),
        Answer::Text("Bie"),
        Answer::Text("secret"),
        Answer::Select(1),
        Answer::Text(""),
        Answer::Text(""),
        Answer::Text(""),
        Answer::Text(""),
        Answer::Confirm(true),
        Answer::Confirm(true),
    ]);

    create_member(&ctx, &mut prompter).await?;

    post.assert_async().await;
    reload.assert_async().await;
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(prompter.asked.first().map(String::as_str), Some("Username"));
    Ok(())
}

#[tokio::test]
async fn test_delete_declined_sends_nothing() -> Result<()> {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/users/members/4/")
        .expect(0)
        .create_async()
        .await;
    let reload = server
        .mock("GET", "/users/members/")
        .expect(0)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let mut prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);

    delete_member(&ctx, &mut prompter, 4, false).await?;

    delete.assert_async().await;
    reload.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_delete_accepted_sends_one_delete_then_one_reload() -> Result<()> {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/users/members/4/")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let reload = server
        .mock("GET", "/users/members/")
        .with_status(200)
        .with_body(json!([member_json(1)]).to_string())
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let mut prompter = ScriptedPrompter::new(vec![Answer::Confirm(true)]);

    delete_member(&ctx, &mut prompter, 4, false).await?;

    delete.assert_async().await;
    reload.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_force_delete_through_cli_skips_prompt() -> Result<()> {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/training/machines/3/")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let reload = server
        .mock("GET", "/training/machines/")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Trainer);
    let mut prompter = ScriptedPrompter::default();

    let cli = Cli::try_parse_from(["gym-console", "machines", "delete", "3", "--force"])?;
    cli.execute_with(&ctx, &mut prompter).await?;

    delete.assert_async().await;
    reload.assert_async().await;
    assert!(prompter.asked.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_delete_skips_reload_and_errors() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/training/machines/3/")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let reload = server
        .mock("GET", "/training/machines/")
        .expect(0)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let mut prompter = ScriptedPrompter::default();

    let err = delete_machine(&ctx, &mut prompter, 3, true).await.unwrap_err();
    assert!(err.to_string().contains("Failed to delete machine 3"));
    reload.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_edit_without_changes_sends_no_patch() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/training/machines/3/")
        .with_status(200)
        .with_body(machine_json(3, "Rower").to_string())
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", "/training/machines/3/")
        .expect(0)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Text(""),
        Answer::Text(""),
        Answer::Text(""),
        Answer::Confirm(true),
    ]);

    edit_machine(&ctx, &mut prompter, 3).await?;

    patch.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_edit_patches_changed_field_and_reloads() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/training/machines/3/")
        .with_status(200)
        .with_body(machine_json(3, "Rower").to_string())
        .create_async()
        .await;
    let patch = server
        .mock("PATCH", "/training/machines/3/")
        .match_body(Matcher::Json(json!({"name": "Rower Pro"})))
        .with_status(200)
        .with_body(machine_json(3, "Rower Pro").to_string())
        .expect(1)
        .create_async()
        .await;
    let reload = server
        .mock("GET", "/training/machines/")
        .with_status(200)
        .with_body(json!([machine_json(3, "Rower Pro")]).to_string())
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Text(""),
        Answer::Text("Rower Pro"),
        Answer::Text(""),
        Answer::Confirm(true),
    ]);

    edit_machine(&ctx, &mut prompter, 3).await?;

    patch.assert_async().await;
    reload.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_list_failure_is_swallowed() -> Result<()> {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/users/members/")
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    list_members(&ctx).await?;

    list.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_pages_require_login() -> Result<()> {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/users/members/")
        .expect(0)
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    let err = list_members(&ctx).await.unwrap_err();

    assert!(err.to_string().starts_with("Not logged in"));
    list.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_bad_date_format_does_not_break_listing() -> Result<()> {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/users/members/")
        .with_status(200)
        .with_body(json!([member_json(1)]).to_string())
        .expect(1)
        .create_async()
        .await;

    let mut config = config_for(&server.url());
    config.ui.date_format = "%Y-%Q".to_string();
    let ctx = context_with(config, Role::Admin);

    list_members(&ctx).await?;

    list.assert_async().await;
    Ok(())
}
