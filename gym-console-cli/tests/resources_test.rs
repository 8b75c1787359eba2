mod common;

use anyhow::Result;
use mockito::{Matcher, Server};
use serde_json::json;

use common::{anonymous_context, context_as, machine_json, member_json, trainer_json, ACCESS_TOKEN};
use gym_console_cli::api::{ApiError, Machines, Members, Plans, Sessions, Trainers};
use gym_console_cli::models::{
    MachineRequest, MachineUpdate, PlanUpdate, Role, SessionStatus, SessionUpdate,
};

#[tokio::test]
async fn test_envelope_list_yields_results_in_order() -> Result<()> {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/users/members/")
        .with_status(200)
        .with_body(
            json!({
                "count": 40,
                "next": "http://localhost:8000/api/users/members/?page=2",
                "previous": null,
                "results": [member_json(3), member_json(1), member_json(2)]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let members = ctx.resource::<Members>().list().await?;

    let ids: Vec<i64> = members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    Ok(())
}

#[tokio::test]
async fn test_bare_list_and_bearer_header() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users/trainers/")
        .match_header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str())
        .with_status(200)
        .with_body(json!([trainer_json(7), trainer_json(8)]).to_string())
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Trainer);
    let trainers = ctx.resource::<Trainers>().list().await?;

    mock.assert_async().await;
    assert_eq!(trainers.len(), 2);
    assert_eq!(trainers[0].hourly_rate, "60.00");
    Ok(())
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_token() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/training/machines/")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let ctx = anonymous_context(&server.url());
    assert!(ctx.resource::<Machines>().list().await?.is_empty());

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_plans_filter_by_trainee() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/training/plans/")
        .match_query(Matcher::UrlEncoded("trainee_id".into(), "7".into()))
        .with_status(200)
        .with_body(
            json!([{
                "id": 4,
                "trainee": {"id": 7, "username": "jo", "first_name": "Jo", "last_name": "Park"},
                "trainee_name": "Jo Park",
                "description": "Legs",
                "machines": "1,3,5",
                "days": "Monday,Thursday",
                "sets": 3,
                "reps": 12,
                "duration_minutes": null
            }])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Trainer);
    let plans = ctx.resource::<Plans>().list_for_trainee(7).await?;

    mock.assert_async().await;
    assert_eq!(plans[0].machine_ids(), vec![1, 3, 5]);
    assert_eq!(plans[0].day_names(), vec!["Monday", "Thursday"]);
    Ok(())
}

#[tokio::test]
async fn test_create_posts_payload() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/training/machines/")
        .match_body(Matcher::Json(json!({
            "code": "M-009",
            "name": "Rower",
            "description": ""
        })))
        .with_status(201)
        .with_body(machine_json(9, "Rower").to_string())
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let request = MachineRequest {
        code: "M-009".to_string(),
        name: "Rower".to_string(),
        description: String::new(),
    };
    let machine = ctx.resource::<Machines>().create(&request).await?;

    mock.assert_async().await;
    assert_eq!(machine.id, 9);
    Ok(())
}

#[tokio::test]
async fn test_update_sends_only_changed_fields() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/training/machines/3/")
        .match_body(Matcher::Json(json!({"name": "Rower Pro"})))
        .with_status(200)
        .with_body(machine_json(3, "Rower Pro").to_string())
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let existing = serde_json::from_value(machine_json(3, "Rower"))?;
    let request = MachineRequest {
        code: "M-003".to_string(),
        name: "Rower Pro".to_string(),
        description: "Concept2".to_string(),
    };

    let update = MachineUpdate::changes(&existing, &request);
    assert!(!update.is_empty());
    ctx.resource::<Machines>().update(3, &update).await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_plan_and_session_partial_updates() -> Result<()> {
    let mut server = Server::new_async().await;
    let plan_mock = server
        .mock("PATCH", "/training/plans/4/")
        .match_body(Matcher::Json(json!({"duration_minutes": null})))
        .with_status(200)
        .with_body(
            json!({
                "id": 4,
                "trainee": {"id": 7, "username": "jo"},
                "description": "Legs",
                "machines": "1",
                "days": "Monday",
                "sets": 3,
                "reps": 12
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let session_mock = server
        .mock("PATCH", "/training/sessions/11/")
        .match_body(Matcher::Json(json!({"status": "cancelled"})))
        .with_status(200)
        .with_body(
            json!({
                "id": 11,
                "trainer": 2,
                "member": 5,
                "session_type": "personal",
                "scheduled_date": "2025-06-01T12:30:00Z",
                "duration_minutes": 60,
                "status": "cancelled",
                "price": "50.00"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);

    let clear_duration = PlanUpdate {
        duration_minutes: Some(None),
        ..Default::default()
    };
    ctx.resource::<Plans>().update(4, &clear_duration).await?;

    let cancel = SessionUpdate {
        status: Some(SessionStatus::Cancelled),
        ..Default::default()
    };
    let session = ctx.resource::<Sessions>().update(11, &cancel).await?;

    plan_mock.assert_async().await;
    session_mock.assert_async().await;
    assert_eq!(session.status, SessionStatus::Cancelled);
    Ok(())
}

#[tokio::test]
async fn test_delete_and_not_found() -> Result<()> {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/training/sessions/11/")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/training/sessions/99/")
        .with_status(404)
        .with_body(json!({"detail": "Not found."}).to_string())
        .create_async()
        .await;

    let ctx = context_as(&server.url(), Role::Admin);
    let sessions = ctx.resource::<Sessions>();

    sessions.delete(11).await?;
    delete.assert_async().await;

    let err = sessions.get(99).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.to_string(), "Resource not found: Not found.");
    Ok(())
}
