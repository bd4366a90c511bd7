//! Axum router construction.

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`].
///
/// There are no named routes: every request falls through to the static asset
/// handler, which resolves it against the served root.
pub fn build(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::asset)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(middleware::REQUEST_TIMEOUT))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn fixture_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.html"), "<h1>home</h1>").unwrap();
        fs::write(temp.path().join("style.css"), "body { margin: 0 }").unwrap();
        fs::write(temp.path().join("logo.png"), [0x89, 0x50, 0x4E, 0x47]).unwrap();
        let sub = temp.path().join("docs");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("index.html"), "<h1>docs</h1>").unwrap();
        fs::write(sub.join("guide.txt"), "read me").unwrap();
        temp
    }

    fn app(root: &TempDir) -> Router {
        build(AppState::new(root.path()))
    }

    async fn get(app: Router, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn serves_file_bytes_verbatim() {
        let root = fixture_root();
        let (status, body) = get(app(&root), "/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, fs::read(root.path().join("style.css")).unwrap());
    }

    #[tokio::test]
    async fn serves_binary_file_with_content_type() {
        let root = fixture_root();
        let req = Request::builder()
            .uri("/logo.png")
            .body(Body::empty())
            .unwrap();
        let resp = app(&root).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], [0x89, 0x50, 0x4E, 0x47]);
    }

    #[tokio::test]
    async fn root_path_serves_index_document() {
        let root = fixture_root();
        let (status, body) = get(app(&root), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>home</h1>");
    }

    #[tokio::test]
    async fn directory_is_equivalent_to_its_index_document() {
        let root = fixture_root();
        let (dir_status, dir_body) = get(app(&root), "/docs").await;
        let (file_status, file_body) = get(app(&root), "/docs/index.html").await;
        assert_eq!(dir_status, StatusCode::OK);
        assert_eq!(dir_status, file_status);
        assert_eq!(dir_body, file_body);
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let root = fixture_root();
        let (status, _) = get(app(&root), "/nonexistent.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn traversal_is_404_with_no_outside_content() {
        let root = fixture_root();
        for path in ["/../../../etc/passwd", "/%2e%2e/%2e%2e/etc/passwd"] {
            let (status, body) = get(app(&root), path).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "path: {path}");
            assert_eq!(body, b"Not Found");
        }
    }

    #[tokio::test]
    async fn non_retrieval_method_is_404() {
        let root = fixture_root();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/style.css")
            .body(Body::empty())
            .unwrap();
        let resp = app(&root).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn head_carries_headers_without_body() {
        let root = fixture_root();
        let req = Request::builder()
            .method(Method::HEAD)
            .uri("/style.css")
            .body(Body::empty())
            .unwrap();
        let resp = app(&root).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let expected_len = fs::metadata(root.path().join("style.css")).unwrap().len();
        let content_length = resp
            .headers()
            .get(header::CONTENT_LENGTH)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(content_length, expected_len.to_string());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn concurrent_large_downloads_complete_independently() {
        let root = fixture_root();
        let first = vec![0xAAu8; 1 << 20];
        let second = vec![0x55u8; (1 << 20) + 7];
        fs::write(root.path().join("first.bin"), &first).unwrap();
        fs::write(root.path().join("second.bin"), &second).unwrap();

        let (a, b) = tokio::join!(
            get(app(&root), "/first.bin"),
            get(app(&root), "/second.bin"),
        );

        assert_eq!(a.0, StatusCode::OK);
        assert_eq!(b.0, StatusCode::OK);
        assert_eq!(a.1, first);
        assert_eq!(b.1, second);
    }
}
