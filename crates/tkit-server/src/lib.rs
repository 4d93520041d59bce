//! HTTP server for tkit.
//!
//! Exposes the text delta engine over JSON, validating and bounding input
//! before any comparison runs.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{AppState, DiffRequest, HealthResponse};
pub use server::TkitServer;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tkit_diff::{HunkKind, InputLimits, Report};
    use tower::util::ServiceExt;

    async fn get(uri: &str) -> Response {
        router::build_router(ServerConfig::default())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post(config: ServerConfig, uri: &str, body: serde_json::Value) -> Response {
        router::build_router(config)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = get("/v1/health").await;
        assert_eq!(response.status(), 200);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let response = get("/v1/info").await;
        assert_eq!(response.status(), 200);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["algorithm"], "lcs");
        assert_eq!(json["limits"]["max_lines"], 5_000);
    }

    #[tokio::test]
    async fn diff_returns_report() {
        let response = post(
            ServerConfig::default(),
            "/v1/diff",
            serde_json::json!({ "source": "a\nb\nc", "target": "a\nx\nc" }),
        )
        .await;
        assert_eq!(response.status(), 200);
        let report: Report = serde_json::from_str(&body_text(response).await).unwrap();
        let kinds: Vec<HunkKind> = report.hunks.iter().map(|h| h.kind).collect();
        assert_eq!(kinds, vec![HunkKind::Equal, HunkKind::Replace, HunkKind::Equal]);
        let pairs = report.hunks[1].word_pairs.as_ref().unwrap();
        assert_eq!(pairs[0].source_token, "b");
        assert!(pairs[0].differs);
    }

    #[tokio::test]
    async fn diff_text_brackets_changes() {
        let response = post(
            ServerConfig::default(),
            "/v1/diff/text",
            serde_json::json!({ "source": "hello world", "target": "hello there" }),
        )
        .await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_text(response).await,
            "@@ -1,1 +1,1 @@ replace\n- hello [world]\n+ hello [there]\n"
        );
    }

    #[tokio::test]
    async fn diff_text_identical() {
        let response = post(
            ServerConfig::default(),
            "/v1/diff/text",
            serde_json::json!({ "source": "same", "target": "same", "algorithm": "myers" }),
        )
        .await;
        assert_eq!(response.status(), 200);
        assert_eq!(body_text(response).await, "No differences.\n");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = post(
            ServerConfig::default(),
            "/v1/diff",
            serde_json::json!({ "source": "only one side" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"], "invalid_input");
    }

    #[tokio::test]
    async fn unknown_algorithm_is_bad_request() {
        let response = post(
            ServerConfig::default(),
            "/v1/diff",
            serde_json::json!({ "source": "a", "target": "b", "algorithm": "magic" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn too_many_lines_is_payload_too_large() {
        let config = ServerConfig {
            limits: InputLimits { max_lines: 2, max_bytes: 1024 },
            ..Default::default()
        };
        let response = post(
            config,
            "/v1/diff",
            serde_json::json!({ "source": "1\n2\n3", "target": "1" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"], "size_exceeded");
        assert_eq!(json["message"], "source lines exceeds limit: 3 > 2");
    }

    #[tokio::test]
    async fn body_over_limit_is_rejected() {
        let config = ServerConfig { max_body_bytes: 16, ..Default::default() };
        let response = post(
            config,
            "/v1/diff",
            serde_json::json!({ "source": "a long enough source", "target": "b" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
