use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, Dashboard, ADMIN_TOKEN, EXPIRED_TOKEN, GUEST_TOKEN};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, token: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

async fn send(app: &Router, req: Request<String>) -> axum::response::Response {
    app.clone().oneshot(req).await.unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let app = app();
    let resp = send(
        &app,
        Request::builder().uri("/dashboards").body(String::new()).unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_returns_401_with_message() {
    let app = app();
    let resp = send(&app, request("GET", "/dashboards", EXPIRED_TOKEN)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], 401);
    assert_eq!(body["message"], "Token expired");
}

#[tokio::test]
async fn expired_token_wins_over_malformed_body() {
    let app = app();
    let resp = send(
        &app,
        json_request("POST", "/dashboards", EXPIRED_TOKEN, r#"{"shared":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Token expired");

    let resp = send(
        &app,
        json_request("PUT", "/dashboards/1", EXPIRED_TOKEN, "not json"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- list ---

#[tokio::test]
async fn list_dashboards_empty() {
    let app = app();
    let resp = send(&app, request("GET", "/dashboards", ADMIN_TOKEN)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let dashboards: Vec<Dashboard> = body_json(resp).await;
    assert!(dashboards.is_empty());
}

#[tokio::test]
async fn list_only_returns_callers_dashboards_in_id_order() {
    let app = app();
    for name in ["b", "a"] {
        let body = format!(r#"{{"name":"{name}"}}"#);
        let resp = send(&app, json_request("POST", "/dashboards", ADMIN_TOKEN, &body)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = send(
        &app,
        json_request("POST", "/dashboards", GUEST_TOKEN, r#"{"name":"guest's"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, request("GET", "/dashboards", ADMIN_TOKEN)).await;
    let dashboards: Vec<Dashboard> = body_json(resp).await;
    let names: Vec<_> = dashboards.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
    assert!(dashboards.windows(2).all(|w| w[0].id < w[1].id));
    assert!(dashboards.iter().all(|d| d.owner_name == "admin"));
}

// --- create ---

#[tokio::test]
async fn create_dashboard_assigns_id_and_owner() {
    let app = app();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/dashboards",
            ADMIN_TOKEN,
            r#"{"name":"CPU","content":"<ag-dashboard/>","id":999,"ownerName":"mallory"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let dashboard: Dashboard = body_json(resp).await;
    assert_eq!(dashboard.id, 1);
    assert_eq!(dashboard.owner_name, "admin");
    assert_eq!(dashboard.content.as_deref(), Some("<ag-dashboard/>"));
    assert!(!dashboard.shared);
}

#[tokio::test]
async fn create_dashboard_empty_name_returns_400() {
    let app = app();
    let resp = send(
        &app,
        json_request("POST", "/dashboards", ADMIN_TOKEN, r#"{"name":""}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_dashboard_duplicate_name_returns_409() {
    let app = app();
    let body = r#"{"name":"CPU"}"#;
    let resp = send(&app, json_request("POST", "/dashboards", ADMIN_TOKEN, body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&app, json_request("POST", "/dashboards", ADMIN_TOKEN, body)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_dashboard_malformed_json_returns_422() {
    let app = app();
    let resp = send(
        &app,
        json_request("POST", "/dashboards", ADMIN_TOKEN, r#"{"not_name":1}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_dashboard_not_found() {
    let app = app();
    let resp = send(&app, request("GET", "/dashboards/42", ADMIN_TOKEN)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn get_dashboard_bad_id_returns_400() {
    let app = app();
    let resp = send(&app, request("GET", "/dashboards/not-a-number", ADMIN_TOKEN)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_private_dashboard_of_other_user_is_forbidden() {
    let app = app();
    let resp = send(
        &app,
        json_request("POST", "/dashboards", ADMIN_TOKEN, r#"{"name":"private"}"#),
    )
    .await;
    let created: Dashboard = body_json(resp).await;

    let resp = send(
        &app,
        request("GET", &format!("/dashboards/{}", created.id), GUEST_TOKEN),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn get_shared_dashboard_of_other_user_is_allowed() {
    let app = app();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/dashboards",
            ADMIN_TOKEN,
            r#"{"name":"public","shared":true}"#,
        ),
    )
    .await;
    let created: Dashboard = body_json(resp).await;

    let resp = send(
        &app,
        request("GET", &format!("/dashboards/{}", created.id), GUEST_TOKEN),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- update ---

#[tokio::test]
async fn update_dashboard_not_found() {
    let app = app();
    let resp = send(
        &app,
        json_request("PUT", "/dashboards/42", ADMIN_TOKEN, r#"{"name":"Nope"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden() {
    let app = app();
    let resp = send(
        &app,
        json_request("POST", "/dashboards", ADMIN_TOKEN, r#"{"name":"mine"}"#),
    )
    .await;
    let created: Dashboard = body_json(resp).await;

    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/dashboards/{}", created.id),
            GUEST_TOKEN,
            r#"{"name":"theirs"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// --- delete ---

#[tokio::test]
async fn delete_dashboard_not_found() {
    let app = app();
    let resp = send(&app, request("DELETE", "/dashboards/42", ADMIN_TOKEN)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let app = app();

    // create
    let resp = send(
        &app,
        json_request("POST", "/dashboards", ADMIN_TOKEN, r#"{"name":"Memory"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Dashboard = body_json(resp).await;
    let id = created.id;
    let uri = format!("/dashboards/{id}");

    // get
    let resp = send(&app, request("GET", &uri, ADMIN_TOKEN)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Dashboard = body_json(resp).await;
    assert_eq!(fetched.name, "Memory");
    assert_eq!(fetched.created_date, created.created_date);

    // update
    let body = r#"{"name":"Memory","description":"heap usage","shared":true}"#;
    let resp = send(&app, json_request("PUT", &uri, ADMIN_TOKEN, body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first: Dashboard = body_json(resp).await;
    assert_eq!(first.description.as_deref(), Some("heap usage"));
    assert!(first.shared);

    // same update again leaves the stored entity untouched
    let resp = send(&app, json_request("PUT", &uri, ADMIN_TOKEN, body)).await;
    let second: Dashboard = body_json(resp).await;
    assert_eq!(second.modified_date, first.modified_date);
    assert_eq!(second.description, first.description);

    // delete
    let resp = send(&app, request("DELETE", &uri, ADMIN_TOKEN)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete
    let resp = send(&app, request("GET", &uri, ADMIN_TOKEN)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete
    let resp = send(&app, request("GET", "/dashboards", ADMIN_TOKEN)).await;
    let dashboards: Vec<Dashboard> = body_json(resp).await;
    assert!(dashboards.is_empty());
}
