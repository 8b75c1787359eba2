mod common;

use anyhow::Result;
use chrono::NaiveDate;
use mockito::Server;
use serde_json::json;

use common::{context_as, member_json, trainer_json};
use gym_console_cli::api::{Members, Sessions, Trainers};
use gym_console_cli::models::Role;
use gym_console_cli::summary::DashboardSummary;

#[tokio::test]
async fn test_fetch_records_failed_list_without_dropping_others() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/members/")
        .with_status(200)
        .with_body(json!([member_json(1), member_json(2)]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/users/trainers/")
        .with_status(200)
        .with_body(json!([trainer_json(7)]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/training/sessions/")
        .with_status(500)
        .with_body(json!({"detail": "boom"}).to_string())
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let summary = DashboardSummary::fetch(
        &ctx.resource::<Members>(),
        &ctx.resource::<Trainers>(),
        &ctx.resource::<Sessions>(),
        today,
    )
    .await;

    assert_eq!(summary.total_members, 2);
    assert_eq!(summary.total_trainers, 1);
    assert_eq!(summary.total_sessions, 0);
    assert_eq!(summary.load_errors.len(), 1);
    assert!(summary.load_errors[0].starts_with("sessions: "));
    Ok(())
}
