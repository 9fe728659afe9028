// Server module entry
// Listener setup, accept loop, connection serving, and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::shutdown_signal;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use crate::data::Dataset;
    use http_body_util::{BodyExt, Full};
    use hyper::body::Bytes;
    use hyper::{Method, Request, StatusCode};
    use hyper_util::client::legacy::connect::HttpConnector;
    use hyper_util::client::legacy::Client;
    use hyper_util::rt::TokioExecutor;
    use std::net::SocketAddr;
    use std::sync::Arc;

    type TestClient = Client<HttpConnector, Full<Bytes>>;

    async fn send(
        client: &TestClient,
        addr: SocketAddr,
        method: Method,
        path: &str,
        body: &str,
    ) -> (StatusCode, Bytes) {
        let req = Request::builder()
            .method(method)
            .uri(format!("http://{addr}{path}"))
            .header("content-type", "application/json")
            .header("x-api-key", "reqres-free-v1")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap();
        let response = client.request(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes)
    }

    #[tokio::test]
    async fn test_serves_api_over_tcp() {
        let mut config = Config::default();
        config.logging.access_log = false;
        config.performance.write_timeout = 1;
        let state = Arc::new(AppState::new(config, Dataset::embedded().unwrap()));

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(start_server_loop(listener, state, async {
            let _ = stop_rx.await;
        }));

        let client: TestClient = Client::builder(TokioExecutor::new()).build_http();

        let (status, body) = send(&client, addr, Method::GET, "/api/users?page=2", "").await;
        assert_eq!(status, StatusCode::OK);
        let page: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(page["data"].as_array().unwrap().len(), 7);

        let (status, again) = send(&client, addr, Method::GET, "/api/users?page=2", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, again);

        let (status, body) = send(
            &client,
            addr,
            Method::POST,
            "/api/users",
            r#"{"name":"morpheus","job":"leader"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(created["name"], "morpheus");
        assert!(!created["id"].as_str().unwrap().is_empty());
        assert!(!created["createdAt"].as_str().unwrap().is_empty());

        let (status, body) = send(&client, addr, Method::DELETE, "/api/users/2", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = send(&client, addr, Method::DELETE, "/api/users/999", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        drop(client);
        stop_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
