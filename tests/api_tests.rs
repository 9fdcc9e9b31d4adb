use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use nominarr::config::Config;
use tower::ServiceExt;

/// Seeded admin credentials (must match the initial migration).
const ADMIN_EMAIL: &str = "admin@colaboradores.com";
const ADMIN_PASSWORD: &str = "admin123";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A pooled in-memory database would give each connection its own db.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.auth.jwt_secret = "test-secret".to_string();

    let state = nominarr::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    nominarr::api::router(state).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

fn employee_payload(email: &str, suffix: u32) -> serde_json::Value {
    serde_json::json!({
        "name": format!("Worker{suffix}"),
        "surnames": format!("Testson {suffix}"),
        "email": email,
        "phone": "+52 555 010 0000",
        "birthDate": "1990-06-15",
        "hireDate": "2020-01-15",
        "salary": 1500.50,
        "sexId": 1,
        "professionId": 2,
        "maritalStatusId": 1,
        "areaId": 3
    })
}

fn expected_risk(age: i64) -> &'static str {
    if age <= 27 {
        "High"
    } else if age <= 35 {
        "Medium"
    } else {
        "Low"
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_auth_required_on_protected_routes() {
    let app = spawn_app().await;

    let (status, _) = send(&app, Method::GET, "/api/employees", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/employees",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/catalogs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_flow() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": "wrong-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    // Password below the minimum length is rejected before hitting the db
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": "short",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Email matching is case-insensitive
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({
            "email": "Admin@Colaboradores.com",
            "password": ADMIN_PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["email"], ADMIN_EMAIL);

    let token = body["data"]["token"].as_str().unwrap();
    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_catalogs_seeded() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/catalogs", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sexes"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["professions"].as_array().unwrap().len(), 12);
    assert_eq!(body["data"]["maritalStatuses"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["areas"].as_array().unwrap().len(), 10);

    // Alphabetical within each catalog
    let areas: Vec<&str> = body["data"]["areas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    let mut sorted = areas.clone();
    sorted.sort_unstable();
    assert_eq!(areas, sorted);
}

#[tokio::test]
async fn test_employee_create_and_get() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("Ana.Garcia@Example.com", 1)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = &body["data"];
    let id = created["id"].as_i64().unwrap();

    assert_eq!(created["employeeNumber"], format!("EMP{id}"));
    // Emails are stored lowercase
    assert_eq!(created["email"], "ana.garcia@example.com");
    assert_eq!(created["active"], true);
    assert_eq!(created["sex"]["id"], 1);
    assert_eq!(created["profession"]["id"], 2);
    assert_eq!(created["area"]["id"], 3);

    let age = created["age"].as_i64().unwrap();
    assert!(age >= 18);
    assert_eq!(created["risk"], expected_risk(age));

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/employees/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_i64().unwrap(), id);
    assert_eq!(body["data"]["employeeNumber"], format!("EMP{id}"));

    let (status, _) = send(&app, Method::GET, "/api/employees/9999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/employees/0", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let mut payload = employee_payload("bad-email", 1);
    payload["email"] = serde_json::json!("not-an-email");
    let (status, _) = send(&app, Method::POST, "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut payload = employee_payload("zero.salary@example.com", 2);
    payload["salary"] = serde_json::json!(0);
    let (status, _) = send(&app, Method::POST, "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut payload = employee_payload("too.young@example.com", 3);
    payload["birthDate"] = serde_json::json!("2020-01-01");
    let (status, _) = send(&app, Method::POST, "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Well-formed but pointing at a catalog row that does not exist
    let mut payload = employee_payload("no.such.area@example.com", 4);
    payload["areaId"] = serde_json::json!(999);
    let (status, body) =
        send(&app, Method::POST, "/api/employees", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_duplicate_email_conflict() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("dup@example.com", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Case differences do not dodge the uniqueness check
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("DUP@Example.com", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_partial_update() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("patch.me@example.com", 1)),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/employees/{id}"),
        Some(&token),
        Some(serde_json::json!({ "salary": 2000.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["salary"].as_f64().unwrap(), 2000.0);
    // Untouched fields survive the patch
    assert_eq!(body["data"]["name"], "Worker1");
    assert_eq!(body["data"]["email"], "patch.me@example.com");
    assert_eq!(body["data"]["phone"], "+52 555 010 0000");

    // Explicit null clears the phone; the serializer then omits it
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/employees/{id}"),
        Some(&token),
        Some(serde_json::json!({ "phone": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("phone").is_none());

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/employees/9999",
        Some(&token),
        Some(serde_json::json!({ "salary": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_email_conflict() {
    let app = spawn_app().await;
    let token = login(&app).await;

    send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("first@example.com", 1)),
    )
    .await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("second@example.com", 2)),
    )
    .await;
    let second_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/employees/{second_id}"),
        Some(&token),
        Some(serde_json::json!({ "email": "First@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Keeping your own email is not a conflict
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/employees/{second_id}"),
        Some(&token),
        Some(serde_json::json!({ "email": "second@example.com", "salary": 1800.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_soft_delete_frees_email() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("recycled@example.com", 1)),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/employees/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/employees/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/employees/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The email of a deactivated record is reusable
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("recycled@example.com", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_pagination_and_sorting() {
    let app = spawn_app().await;
    let token = login(&app).await;

    for i in 0..25 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/employees",
            Some(&token),
            Some(employee_payload(&format!("employee{i:02}@example.com"), i)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/employees?page=3&limit=10",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["total"], 25);
    assert_eq!(body["data"]["page"], 3);
    assert_eq!(body["data"]["limit"], 10);
    assert_eq!(body["data"]["totalPages"], 3);

    // Defaults: page 1, limit 10
    let (status, body) = send(&app, Method::GET, "/api/employees", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["page"], 1);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/employees?sortBy=email&sortOrder=asc&limit=25",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = body["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["email"].as_str().unwrap())
        .collect();
    let mut sorted = emails.clone();
    sorted.sort_unstable();
    assert_eq!(emails, sorted);

    // Unknown sort keys are rejected rather than silently ignored
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/employees?sortBy=salary;drop",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/employees?sortOrder=sideways",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/employees?limit=500",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A page whose row offset cannot fit in u64 is rejected, not wrapped
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/employees?page=18446744073709551615&limit=100",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_search() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let mut payload = employee_payload("maria.lopez@example.com", 1);
    payload["name"] = serde_json::json!("María");
    payload["surnames"] = serde_json::json!("López Hernández");
    send(&app, Method::POST, "/api/employees", Some(&token), Some(payload)).await;

    send(
        &app,
        Method::POST,
        "/api/employees",
        Some(&token),
        Some(employee_payload("john.smith@example.com", 2)),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/employees?search=lopez",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"]["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["email"], "maria.lopez@example.com");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/employees?search=no-such-person",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 0);
    assert_eq!(body["data"]["totalPages"], 0);
}
