#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use tasktracker::config::{Config, RegistrationMode, StorageBackend};
use tasktracker::store::MemoryStore;

pub const PASSWORD: &str = "password123";

/// A running test server backed by an in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> (Value, StatusCode) {
        self.send(
            self.client
                .post(self.url("/api/users"))
                .json(&json!({ "email": email, "password": password, "name": name })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.send(
            self.client
                .post(self.url("/api/auth"))
                .json(&json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register a user and return their token.
    pub async fn signup(&self, email: &str) -> String {
        let (body, status) = self.register(email, PASSWORD, "Tester").await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a project, return the project JSON.
    pub async fn create_project(&self, token: &str, name: &str) -> Value {
        let (body, status) = self
            .post_auth(
                "/api/projects",
                token,
                &json!({ "name": name, "description": format!("{name} description") }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create project failed: {body}");
        body
    }

    /// Create a task under a project, return the task JSON.
    pub async fn create_task(&self, token: &str, project_id: &str, title: &str) -> Value {
        let (body, status) = self
            .post_auth(
                &format!("/api/projects/{project_id}/tasks"),
                token,
                &json!({ "title": title, "description": format!("{title} details") }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create task failed: {body}");
        body
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        self.send(self.client.get(self.url(path)).bearer_auth(token))
            .await
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        self.send(self.client.post(self.url(path)).bearer_auth(token).json(body))
            .await
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        self.send(self.client.put(self.url(path)).bearer_auth(token).json(body))
            .await
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        self.send(self.client.delete(self.url(path)).bearer_auth(token))
            .await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> (Value, StatusCode) {
        let resp = request.send().await.expect("request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config() -> Config {
    Config {
        storage: StorageBackend::Memory,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        jwt_expiry_minutes: 60,
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        registration: RegistrationMode::Open,
        allowed_origins: vec!["http://localhost:3000".to_string()],
        max_body_size: 65_536,
        log_level: "warn".to_string(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

/// Spawn a test app on a random port.
pub async fn spawn_app_with(config: Config) -> TestApp {
    let app = tasktracker::build_app(Arc::new(MemoryStore::new()), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}
