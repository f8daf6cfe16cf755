use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn build_app() -> anyhow::Result<Router> {
    let db = connect_with_config(&DatabaseConfig::in_memory_sqlite()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(server::build_app(db))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    Ok((status, json))
}

fn user_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": "pa55",
        "phone": "+380501234567",
        "email": format!("{}@example.com", username),
    })
}

async fn create_user(app: &Router, username: &str) -> anyhow::Result<i64> {
    let (status, body) = send(app, "POST", "/user", Some(user_body(username))).await?;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    Ok(body["user"]["id"].as_i64().unwrap())
}

async fn create_address(app: &Router, user_id: i64) -> anyhow::Result<i64> {
    let (status, body) = send(
        app,
        "POST",
        "/address",
        Some(json!({
            "user_id": user_id,
            "address": "Kharkiv, Sumska 10",
            "status": "active",
            "tariff": "Family 500",
            "balance": 99.9
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{}", body);
    Ok(body["id"].as_i64().unwrap())
}

#[tokio::test]
async fn test_health_and_openapi() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/user/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn test_user_create_response_shape() -> anyhow::Result<()> {
    let app = build_app().await?;
    let mut body = user_body("alice");
    body["theme"] = json!("dark");
    body["deviceId"] = json!("android-1");
    let (status, created) = send(&app, "POST", "/user", Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "User created successfully");
    assert_eq!(created["user"]["username"], "alice");
    assert_eq!(created["user"]["language"], "uk");
    assert_eq!(created["user"]["theme"], "dark");
    assert_eq!(created["user"]["deviceId"], "android-1");
    assert!(created["user"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn test_user_create_without_email_persists_nothing() -> anyhow::Result<()> {
    let app = build_app().await?;
    let mut body = user_body("bob");
    body.as_object_mut().unwrap().remove("email");
    let (status, err) = send(&app, "POST", "/user", Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err, json!({"error": "Missing required parameters: username, password, phone, email"}));

    // the first stored user would have id 1
    let (status, _) = send(&app, "GET", "/user/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_user_conflicts_and_bad_theme() -> anyhow::Result<()> {
    let app = build_app().await?;
    create_user(&app, "carol").await?;

    let mut same_name = user_body("carol");
    same_name["email"] = json!("another@example.com");
    let (status, err) = send(&app, "POST", "/user", Some(same_name)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "Username already exists");

    let mut same_email = user_body("dave");
    same_email["email"] = json!("carol@example.com");
    let (status, err) = send(&app, "POST", "/user", Some(same_email)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "Email already exists");

    let mut bad_theme = user_body("erin");
    bad_theme["theme"] = json!("purple");
    let (status, err) = send(&app, "POST", "/user", Some(bad_theme)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Invalid theme. Allowed values: light, dark, system.");
    Ok(())
}

#[tokio::test]
async fn test_user_lookup_ids() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, err) = send(&app, "GET", "/user/0", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "User ID is required and cannot be empty.");

    let (status, err) = send(&app, "GET", "/user/4242", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "User not found.");

    let (status, _) = send(&app, "GET", "/user/abc", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/user/0", Some(json!({"phone": "1"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/user/abc", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_partial_user_update() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create_user(&app, "frank").await?;

    let (status, body) = send(&app, "PUT", &format!("/user/{}", id), Some(json!({"phone": "X"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["user"]["phone"], "X");
    assert!(body["user"].get("username").is_none());

    let (_, user) = send(&app, "GET", &format!("/user/{}", id), None).await?;
    assert_eq!(user["phone"], "X");
    assert_eq!(user["username"], "frank");
    assert_eq!(user["email"], "frank@example.com");
    assert_eq!(user["language"], "uk");
    assert_eq!(user["theme"], "light");
    assert_eq!(user["password"], "pa55");
    assert!(user["deviceId"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_address_under_unknown_user() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create_user(&app, "grace").await?;

    let (status, err) = send(&app, "POST", "/address", Some(json!({"user_id": 999, "address": "x"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "User not found.");

    let (status, err) = send(&app, "POST", "/address", Some(json!({"address": "x"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "No user ID provided.");

    let (status, err) = send(&app, "POST", "/address", Some(json!({"user_id": id, "address": "x", "status": "active"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "No tariff provided.");

    let (_, user) = send(&app, "GET", &format!("/user/{}", id), None).await?;
    assert_eq!(user["addresses"], json!([]));
    Ok(())
}

#[tokio::test]
async fn test_address_round_trip_and_update() -> anyhow::Result<()> {
    let app = build_app().await?;
    let user_id = create_user(&app, "heidi").await?;
    let id = create_address(&app, user_id).await?;

    let (status, addr) = send(&app, "GET", &format!("/address/{}", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(addr["user_id"], user_id);
    assert_eq!(addr["address"], "Kharkiv, Sumska 10");
    assert_eq!(addr["status"], "active");
    assert_eq!(addr["tariff"], "Family 500");
    assert_eq!(addr["balance"].as_f64(), Some(99.9));
    assert_eq!(addr["services"], json!({}));

    let (status, err) = send(&app, "PUT", &format!("/address/{}", id), Some(json!({"address": "y"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "No status provided.");

    let change = json!({"address": "Kharkiv, Sumska 12", "status": "suspended", "tariff": "Lite", "balance": "-5"});
    let (status, updated) = send(&app, "PUT", &format!("/address/{}", id), Some(change)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "suspended");
    assert_eq!(updated["balance"].as_f64(), Some(-5.0));
    assert!(updated.get("services").is_none());

    let (status, _) = send(&app, "PUT", "/address/31337", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, err) = send(&app, "GET", "/address/0", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Address ID is required and cannot be empty.");
    Ok(())
}

#[tokio::test]
async fn test_services_map_and_duplicates() -> anyhow::Result<()> {
    let app = build_app().await?;
    let user_id = create_user(&app, "ivan").await?;
    let address_id = create_address(&app, user_id).await?;

    let (status, tv) = send(&app, "POST", "/service", Some(json!({"address_id": address_id, "type": "tv", "value": "Premium"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tv["type"], "tv");
    assert_eq!(tv["address_id"], address_id);

    let (status, err) = send(&app, "POST", "/service", Some(json!({"address_id": address_id, "type": "tv", "value": "Basic"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Service with the same type already exists for this address.");

    for (kind, value) in [("internet", "1 Gbit"), ("radio", "FM 101")] {
        let (status, _) = send(&app, "POST", "/service", Some(json!({"address_id": address_id, "type": kind, "value": value}))).await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, addr) = send(&app, "GET", &format!("/address/{}", address_id), None).await?;
    let services = addr["services"].as_object().unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services["tv"], "Premium");
    assert_eq!(services["internet"], "1 Gbit");
    assert!(services.values().all(|v| !v.is_null()));
    assert!(services.keys().all(|k| ["internet", "tv", "ip"].contains(&k.as_str())));

    let (_, user) = send(&app, "GET", &format!("/user/{}", user_id), None).await?;
    assert_eq!(user["addresses"][0]["services"], addr["services"]);

    let (status, err) = send(&app, "POST", "/service", Some(json!({"address_id": address_id, "type": "ip"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Missing required parameters: address_id, type, value");

    let (status, err) = send(&app, "POST", "/service", Some(json!({"address_id": 555, "type": "ip", "value": "1.1.1.1"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Address not found.");
    Ok(())
}

#[tokio::test]
async fn test_service_get_and_delete() -> anyhow::Result<()> {
    let app = build_app().await?;
    let user_id = create_user(&app, "judy").await?;
    let address_id = create_address(&app, user_id).await?;
    let (_, svc) = send(&app, "POST", "/service", Some(json!({"address_id": address_id.to_string(), "type": "ip", "value": "10.0.0.2"}))).await?;
    let id = svc["id"].as_i64().unwrap();

    let (status, found) = send(&app, "GET", &format!("/service/{}", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!({"id": id, "address_id": address_id, "type": "ip", "value": "10.0.0.2"}));

    let (status, err) = send(&app, "DELETE", "/service/0", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Service ID is required and cannot be empty.");

    let (status, body) = send(&app, "DELETE", &format!("/service/{}", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Service deleted successfully."}));

    let (status, err) = send(&app, "DELETE", &format!("/service/{}", id), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "Service not found.");
    Ok(())
}

#[tokio::test]
async fn test_user_delete_cascades() -> anyhow::Result<()> {
    let app = build_app().await?;
    let user_id = create_user(&app, "mallory").await?;
    let a1 = create_address(&app, user_id).await?;
    let a2 = create_address(&app, user_id).await?;
    let (_, svc) = send(&app, "POST", "/service", Some(json!({"address_id": a1, "type": "internet", "value": "100"}))).await?;
    let service_id = svc["id"].as_i64().unwrap();

    let (status, body) = send(&app, "DELETE", &format!("/user/{}", user_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User deleted successfully."}));

    for id in [a1, a2] {
        let (status, _) = send(&app, "GET", &format!("/address/{}", id), None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    let (status, _) = send(&app, "GET", &format!("/service/{}", service_id), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/user/{}", user_id), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_address_delete_removes_services() -> anyhow::Result<()> {
    let app = build_app().await?;
    let user_id = create_user(&app, "niaj").await?;
    let address_id = create_address(&app, user_id).await?;
    let (_, svc) = send(&app, "POST", "/service", Some(json!({"address_id": address_id, "type": "tv", "value": "HD"}))).await?;

    let (status, body) = send(&app, "DELETE", &format!("/address/{}", address_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Address deleted successfully.");

    let (status, _) = send(&app, "GET", &format!("/service/{}", svc["id"]), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, user) = send(&app, "GET", &format!("/user/{}", user_id), None).await?;
    assert_eq!(user["addresses"], json!([]));
    Ok(())
}

async fn send_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let resp = app.clone().oneshot(builder.body(Body::from(body.to_string()))?).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn test_body_errors_use_error_envelope() -> anyhow::Result<()> {
    let app = build_app().await?;
    let valid = user_body("olivia").to_string();

    let (status, err) = send_raw(&app, "/user", Some("application/json"), "{not json").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let (status, err) = send_raw(&app, "/user", None, &valid).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("Content-Type"));

    let (status, err) = send_raw(&app, "/user", Some("application/json"), "").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let wrong_type = r#"{"username": "peggy", "password": "pw", "phone": 380501234567, "email": "peggy@example.com"}"#;
    let (status, err) = send_raw(&app, "/user", Some("application/json"), wrong_type).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let (status, err) = send_raw(&app, "/service", Some("application/json"), r#"{"address_id": 1, "type": "tv", "value": 5}"#).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err.get("error").is_some());

    // nothing above was stored
    let (status, _) = send(&app, "GET", "/user/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
