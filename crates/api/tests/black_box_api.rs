use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use warehouse_api::app::{build_app, services::AppServices};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(Arc::new(AppServices::in_memory()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        read(res).await
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        read(res).await
    }

    async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.put(self.url(path)).json(&body).send().await.unwrap();
        read(res).await
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.delete(self.url(path)).send().await.unwrap();
        read(res).await
    }

    async fn category(&self, name: &str, parent: Option<&str>) -> String {
        let (status, body) = self
            .post("/categories/", json!({"name": name, "parent_id": parent}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    async fn part(&self, serial: &str, category_id: &str, room: &str) -> String {
        let (status, body) = self
            .post(
                "/parts/",
                json!({
                    "serial_number": serial,
                    "name": "Resistor",
                    "description": "10k 1/4W",
                    "category_id": category_id,
                    "quantity": 100,
                    "price": 0.05,
                    "location": {"room": room},
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read(res: reqwest::Response) -> (StatusCode, Value) {
    let status = res.status();
    let text = res.text().await.unwrap();
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (status, body)
}

fn serials(body: &Value) -> Vec<String> {
    let mut out: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["serial_number"].as_str().unwrap().to_string())
        .collect();
    out.sort();
    out
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn parts_only_go_into_side_categories() {
    let srv = TestServer::spawn().await;

    let electronics = srv.category("Electronics", None).await;
    let resistors = srv.category("Resistors", Some(&electronics)).await;

    let (status, body) = srv
        .post(
            "/parts/",
            json!({
                "serial_number": "R1",
                "name": "Resistor",
                "description": "",
                "category_id": resistors,
                "quantity": 10,
                "price": 0.1,
                "location": {"room": "1"},
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["category_id"], resistors.as_str());
    assert_eq!(body["location"], json!({"room": "1"}));

    let (status, body) = srv
        .post(
            "/parts/",
            json!({
                "serial_number": "R2",
                "name": "Resistor",
                "description": "",
                "category_id": electronics,
                "quantity": 10,
                "price": 0.1,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "base_category_assignment");
}

#[tokio::test]
async fn malformed_and_missing_ids() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.get("/categories/not-an-id/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_identifier");

    let (status, body) = srv.get("/parts/12345").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_identifier");

    let missing = "0190f5c2-7a3e-7c3b-9d4e-2f1a6b8c9d0e";
    let (status, body) = srv.get(&format!("/categories/{missing}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = srv.delete(&format!("/parts/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = srv
        .post("/categories/", json!({"name": "Orphans", "parent_id": missing}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn duplicate_category_in_same_slot_is_rejected() {
    let srv = TestServer::spawn().await;

    let base = srv.category("Electronics", None).await;
    srv.category("Resistors", Some(&base)).await;

    let (status, body) = srv
        .post("/categories", json!({"name": "Resistors", "parent_id": base}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_category");

    // Same name under no parent is a different slot.
    srv.category("Resistors", None).await;
}

#[tokio::test]
async fn referenced_records_cannot_be_deleted() {
    let srv = TestServer::spawn().await;

    let base = srv.category("Electronics", None).await;
    let side = srv.category("Capacitors", Some(&base)).await;
    let part = srv.part("C1", &side, "2").await;

    let (status, body) = srv.delete(&format!("/categories/{base}/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "referenced_by_others");

    let (status, body) = srv.delete(&format!("/categories/{side}/")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "referenced_by_others");

    let (status, _) = srv.delete(&format!("/parts/{part}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = srv.delete(&format!("/categories/{side}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = srv.delete(&format!("/categories/{base}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = srv.get("/categories/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn side_category_with_parts_cannot_become_base() {
    let srv = TestServer::spawn().await;

    let base = srv.category("Electronics", None).await;
    let side = srv.category("Diodes", Some(&base)).await;
    let part = srv.part("D1", &side, "3").await;

    let (status, body) = srv
        .put(&format!("/categories/{side}/"), json!({"name": "Diodes"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "category_has_assigned_parts");

    let (status, body) = srv
        .put(&format!("/categories/{side}/"), json!({"parent_id": null}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "category_has_assigned_parts");

    // Renaming while naming the parent is fine.
    let (status, body) = srv
        .put(
            &format!("/categories/{side}/"),
            json!({"name": "Zener Diodes", "parent_id": base}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Zener Diodes");
    assert_eq!(body["parent_id"], base.as_str());

    let (status, _) = srv.delete(&format!("/parts/{part}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = srv
        .put(&format!("/categories/{side}"), json!({"parent_id": null}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parent_id"], Value::Null);
}

#[tokio::test]
async fn unknown_part_fields_land_in_location() {
    let srv = TestServer::spawn().await;

    let base = srv.category("Electronics", None).await;
    let side = srv.category("Sensors", Some(&base)).await;
    let part = srv.part("S1", &side, "4").await;

    let (status, body) = srv
        .put(&format!("/parts/{part}/"), json!({"shelf": "B", "quantity": 7}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 7);
    assert_eq!(body["location"], json!({"room": "4", "shelf": "B"}));

    let (status, body) = srv
        .put(&format!("/parts/{part}/"), json!({"floor": "2"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_location_field");

    // A rejected update leaves the record untouched.
    let (status, body) = srv.get(&format!("/parts/{part}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], json!({"room": "4", "shelf": "B"}));
}

#[tokio::test]
async fn duplicate_serial_numbers_are_rejected() {
    let srv = TestServer::spawn().await;

    let base = srv.category("Electronics", None).await;
    let side = srv.category("Inductors", Some(&base)).await;
    srv.part("L1", &side, "1").await;
    let other = srv.part("L2", &side, "1").await;

    let (status, body) = srv
        .put(&format!("/parts/{other}/"), json!({"serial_number": "L1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duplicate_serial_number");
}

#[tokio::test]
async fn search_filters_parts() {
    let srv = TestServer::spawn().await;

    let base = srv.category("Electronics", None).await;
    let side = srv.category("Resistors", Some(&base)).await;
    srv.part("R1", &side, "99").await;
    srv.part("R2", &side, "1").await;
    srv.part("R3", &side, "99").await;

    let (status, body) = srv.get("/parts/search/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serials(&body), vec!["R1", "R2", "R3"]);

    let (status, body) = srv.get("/parts/search/?room=99").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serials(&body), vec!["R1", "R3"]);

    let (status, body) = srv.get("/parts/search?room=99&serial_number=R3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serials(&body), vec!["R3"]);

    let (status, body) = srv.get(&format!("/parts/search/?category_id={side}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serials(&body).len(), 3);

    let (status, body) = srv.get("/parts/search/?colour=red").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = srv.get("/parts/search/?category_id=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_identifier");
}

#[tokio::test]
async fn malformed_bodies_are_400() {
    let srv = TestServer::spawn().await;

    let res = srv
        .client
        .post(srv.url("/parts/"))
        .header("content-type", "application/json")
        .body("[1, 2, 3]")
        .send()
        .await
        .unwrap();
    let (status, body) = read(res).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_payload");

    let (status, body) = srv.post("/categories/", json!({"name": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = srv.post("/categories/", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn fetched_records_put_back_unchanged() {
    let srv = TestServer::spawn().await;

    let base = srv.category("Electronics", None).await;
    let side = srv.category("Transistors", Some(&base)).await;

    let (status, created) = srv
        .post(
            "/parts/",
            json!({
                "serial_number": "T1",
                "name": "Transistor",
                "description": "NPN",
                "category_id": side,
                "quantity": "3",
                "price": 0.25,
                "room": 5,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["quantity"], 3);
    assert_eq!(created["location"], json!({"room": "5"}));
    let part = created["id"].as_str().unwrap().to_string();

    let (_, fetched) = srv.get(&format!("/parts/{part}/")).await;
    let (status, put) = srv.put(&format!("/parts/{part}/"), fetched.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(put, fetched);

    // Categories holding parts need their parent named; the fetched body does that.
    let (_, fetched) = srv.get(&format!("/categories/{side}/")).await;
    let (status, put) = srv.put(&format!("/categories/{side}/"), fetched.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(put, fetched);
}
