//! API integration tests
//!
//! Run against a live server and database:
//! `JWT_SECRET=... cargo test --test api_tests -- --ignored`

use chrono::Utc;
use maintrack_server::models::{enums::UserRole, user::UserClaims};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Sign a token the way the identity provider does
fn token_for(user_id: i32, role: UserRole) -> String {
    let secret = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| "change-this-secret-in-production".to_string());
    let now = Utc::now().timestamp();
    UserClaims {
        sub: format!("it-user-{}", user_id),
        user_id,
        role,
        exp: now + 3600,
        iat: now,
    }
    .create_token(&secret)
    .expect("Failed to sign token")
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

/// Create a user through the admin API and return its id
async fn create_user(client: &Client, role: &str) -> i64 {
    let admin = token_for(1, UserRole::Admin);
    let response = client
        .post(format!("{}/users", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({
            "name": unique("Integration user"),
            "email": format!("{}@plant.example", unique("it")),
            "role": role
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

async fn create_equipment(client: &Client, last_maintenance: &str) -> Value {
    let manager = token_for(1, UserRole::Manager);
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&manager)
        .json(&json!({
            "name": unique("Slurry pump"),
            "equipment_type": "pump",
            "plant": "Concentrator",
            "last_maintenance": last_maintenance,
            "uptime": 97.5,
            "power_consumption": 1200.0
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn create_vsd(client: &Client) -> Value {
    let manager = token_for(1, UserRole::Manager);
    let response = client
        .post(format!("{}/vsds", BASE_URL))
        .bearer_auth(&manager)
        .json(&json!({ "serial_number": unique("VSD"), "model": "ACS880" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn weekly_due_date(client: &Client, token: &str, equipment_id: i64) -> Value {
    let response = client
        .get(format!("{}/equipment/{}/tasks?as_of=2024-07-20", BASE_URL, equipment_id))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let tasks: Vec<Value> = response.json().await.unwrap();
    tasks
        .into_iter()
        .find(|t| t["frequency"] == "weekly")
        .expect("Weekly task missing")["due_date"]
        .clone()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_equipment_specs_and_tasks() {
    let client = Client::new();
    let token = token_for(1, UserRole::Manager);
    let equipment = create_equipment(&client, "2024-07-01").await;
    let id = equipment["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/equipment/{}/specs/motor", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({ "rated_kw": 250, "poles": 4 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["specs"]["motor"]["poles"], 4);

    let response = client
        .get(format!("{}/equipment/{}/tasks?as_of=2024-07-20", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let tasks: Vec<Value> = response.json().await.unwrap();
    let weekly = tasks
        .iter()
        .find(|t| t["frequency"] == "weekly")
        .expect("Weekly task missing");
    assert_eq!(weekly["id"], format!("{}-Weekly", id));
    assert_eq!(weekly["due_date"], "2024-07-08");
    assert_eq!(weekly["status"], "overdue");
    assert!(tasks.iter().all(|t| t["frequency"] != "yearly"));
}

#[tokio::test]
#[ignore]
async fn test_invalid_uptime_rejected() {
    let client = Client::new();
    let token = token_for(1, UserRole::Manager);

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Broken gauge",
            "equipment_type": "fan",
            "uptime": 140.0
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_vsd_cannot_be_linked_twice() {
    let client = Client::new();
    let token = token_for(1, UserRole::Manager);
    let vsd = create_vsd(&client).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "name": unique("Thickener drive"),
            "equipment_type": "pump",
            "vsd_id": vsd["id"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let linked: Value = response.json().await.unwrap();
    assert_eq!(linked["vsd_id"], vsd["id"]);

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "name": unique("Standby drive"),
            "equipment_type": "pump",
            "vsd_id": vsd["id"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let other = create_equipment(&client, "2024-07-01").await;
    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, other["id"]))
        .bearer_auth(&token)
        .json(&json!({ "vsd_id": vsd["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Re-saving the same link on its own equipment is fine
    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, linked["id"]))
        .bearer_auth(&token)
        .json(&json!({ "vsd_id": vsd["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_delete_equipment_removes_linked_vsd() {
    let client = Client::new();
    let admin = token_for(1, UserRole::Admin);
    let vsd = create_vsd(&client).await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&admin)
        .json(&json!({
            "name": unique("Cyclone feed pump"),
            "equipment_type": "pump",
            "vsd_id": vsd["id"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let equipment: Value = response.json().await.unwrap();

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment["id"]))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment["id"]))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .get(format!("{}/vsds/{}", BASE_URL, vsd["id"]))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_completed_schedule_advances_last_maintenance() {
    let client = Client::new();
    let technician_id = create_user(&client, "technician").await as i32;
    let technician = token_for(technician_id, UserRole::Technician);
    let equipment = create_equipment(&client, "2024-07-01").await;
    let id = equipment["id"].as_i64().unwrap();

    assert_eq!(weekly_due_date(&client, &technician, id).await, "2024-07-08");

    // The second, older checklist must not move the date back
    for completed_date in ["2024-07-15", "2024-07-03"] {
        let response = client
            .post(format!("{}/schedules/completed", BASE_URL))
            .bearer_auth(&technician)
            .json(&json!({
                "equipment_id": id,
                "frequency": "weekly",
                "category": "mechanical",
                "completed_date": completed_date,
                "work_crew": ["A. Fitter"],
                "checklist": [{ "item": "Check gland leakage", "status": "ok" }]
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = client
            .get(format!("{}/equipment/{}", BASE_URL, id))
            .bearer_auth(&technician)
            .send()
            .await
            .expect("Failed to send request");
        let current: Value = response.json().await.unwrap();
        assert_eq!(current["last_maintenance"], "2024-07-15");
        assert_eq!(weekly_due_date(&client, &technician, id).await, "2024-07-22");
    }
}

#[tokio::test]
#[ignore]
async fn test_resolved_breakdown_is_locked() {
    let client = Client::new();
    let reporter_id = create_user(&client, "technician").await as i32;
    let reporter = token_for(reporter_id, UserRole::Technician);
    let equipment = create_equipment(&client, "2024-01-15").await;

    let response = client
        .post(format!("{}/breakdowns", BASE_URL))
        .bearer_auth(&reporter)
        .json(&json!({
            "equipment_id": equipment["id"],
            "description": "Seal leaking on drive end",
            "priority": "high"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let breakdown: Value = response.json().await.unwrap();
    let id = breakdown["id"].as_i64().unwrap();
    assert_eq!(breakdown["reported_by"], reporter_id);

    let response = client
        .put(format!("{}/breakdowns/{}", BASE_URL, id))
        .bearer_auth(&reporter)
        .json(&json!({ "status": "resolved", "resolution_notes": "Seal replaced" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let resolved: Value = response.json().await.unwrap();
    assert!(!resolved["resolved_at"].is_null());

    let manager = token_for(1, UserRole::Manager);
    let response = client
        .put(format!("{}/breakdowns/{}", BASE_URL, id))
        .bearer_auth(&manager)
        .json(&json!({ "priority": "low" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_diary_sign_off_and_finalise() {
    let client = Client::new();
    let supervisor_id = create_user(&client, "supervisor").await as i32;
    let client_manager_id = create_user(&client, "client_manager").await as i32;
    let supervisor = token_for(supervisor_id, UserRole::Supervisor);
    let client_manager = token_for(client_manager_id, UserRole::ClientManager);

    for token in [&supervisor, &client_manager] {
        let response = client
            .put(format!("{}/users/me/pin", BASE_URL))
            .bearer_auth(token)
            .json(&json!({ "new_pin": "2468" }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = client
        .post(format!("{}/diaries", BASE_URL))
        .bearer_auth(&supervisor)
        .json(&json!({
            "diary_date": "2024-08-14",
            "shift": "Day",
            "manpower": [{ "role": "Fitter", "count": 3, "hours": 9.0 }],
            "work_items": [{ "description": "Replace conveyor idlers" }],
            "delays": [{ "description": "Permit wait", "duration_minutes": 40 }]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let diary: Value = response.json().await.unwrap();
    let id = diary["id"].as_i64().unwrap();

    // Finalising before sign-off is refused
    let response = client
        .post(format!("{}/diaries/{}/finalise", BASE_URL, id))
        .bearer_auth(&client_manager)
        .json(&json!({ "pin": "2468" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .post(format!("{}/diaries/{}/sign-off", BASE_URL, id))
        .bearer_auth(&supervisor)
        .json(&json!({ "pin": "0000" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post(format!("{}/diaries/{}/sign-off", BASE_URL, id))
        .bearer_auth(&supervisor)
        .json(&json!({ "pin": "2468" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let signed: Value = response.json().await.unwrap();
    assert_eq!(signed["is_signed_off"], true);
    assert_eq!(signed["contractor_signature"]["user_id"], supervisor_id);

    let response = client
        .post(format!("{}/diaries/{}/finalise", BASE_URL, id))
        .bearer_auth(&client_manager)
        .json(&json!({ "pin": "2468" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .put(format!("{}/diaries/{}", BASE_URL, id))
        .bearer_auth(&supervisor)
        .json(&json!({ "comments": "Late edit" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .post(format!("{}/diaries/{}/finalise", BASE_URL, id))
        .bearer_auth(&client_manager)
        .json(&json!({ "pin": "2468" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_messages_flow() {
    let client = Client::new();
    let sender_id = create_user(&client, "manager").await as i32;
    let recipient_id = create_user(&client, "technician").await as i32;
    let outsider_id = create_user(&client, "technician").await as i32;
    let sender = token_for(sender_id, UserRole::Manager);
    let recipient = token_for(recipient_id, UserRole::Technician);
    let outsider = token_for(outsider_id, UserRole::Technician);

    let response = client
        .post(format!("{}/messages", BASE_URL))
        .bearer_auth(&sender)
        .json(&json!({
            "recipients": [recipient_id],
            "subject": "Shutdown Friday",
            "body": "Isolate pump 3 before 06:00."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let message: Value = response.json().await.unwrap();
    let id = message["id"].as_i64().unwrap();

    let response = client
        .get(format!("{}/messages/unread-count", BASE_URL))
        .bearer_auth(&recipient)
        .send()
        .await
        .unwrap();
    let unread: Value = response.json().await.unwrap();
    assert!(unread["unread"].as_i64().unwrap() >= 1);

    let response = client
        .get(format!("{}/messages/{}", BASE_URL, id))
        .bearer_auth(&outsider)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let response = client
            .post(format!("{}/messages/{}/read", BASE_URL, id))
            .bearer_auth(&recipient)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let read: Value = response.json().await.unwrap();
        assert_eq!(read["read_by"], json!([recipient_id]));
    }

    let response = client
        .delete(format!("{}/messages/{}", BASE_URL, id))
        .bearer_auth(&recipient)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore]
async fn test_report_summary() {
    let client = Client::new();
    let token = token_for(1, UserRole::ClientManager);

    let response = client
        .get(format!(
            "{}/reports/summary?start_date=2024-01-01&end_date=2024-12-31",
            BASE_URL
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["totals"]["breakdowns"].is_number());
    assert!(body["diaries"].is_array());
}
