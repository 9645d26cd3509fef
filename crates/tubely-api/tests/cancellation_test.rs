//! Upload cancellation tests.
//!
//! A request future dropped mid-body (client disconnect or transport
//! timeout) must leave no staged bytes and no record update behind.
//!
//! Run with: `cargo test -p tubely-api --test cancellation_test`

mod helpers;

use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::http::{header, HeaderMap, HeaderValue, Request};
use bytes::Bytes;
use futures::StreamExt;
use helpers::auth::{bearer, make_token};
use helpers::fixtures::{fake_mp4, tiny_png};
use helpers::{setup_test_app, TestApp};
use std::time::Duration;
use tubely_core::UploadClass;
use uuid::Uuid;

const BOUNDARY: &str = "tubely-cancel-boundary";

/// A multipart body that delivers the headers and the first bytes of the file
/// part, then stalls forever.
async fn stalled_multipart(field: &str, mime: &str, first_bytes: Vec<u8>) -> Multipart {
    let mut head = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\nContent-Type: {mime}\r\n\r\n"
    )
    .into_bytes();
    head.extend_from_slice(&first_bytes);

    let stream = futures::stream::iter(vec![Ok::<Bytes, std::io::Error>(Bytes::from(head))])
        .chain(futures::stream::pending());

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from_stream(stream))
        .unwrap();

    Multipart::from_request(request, &()).await.unwrap()
}

fn auth_headers(owner: Uuid) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&bearer(&make_token(owner))).unwrap(),
    );
    headers
}

/// Wait until `count` reports a staged entry, failing after a few seconds.
async fn wait_for_staged(count: impl Fn() -> usize) {
    for _ in 0..300 {
        if count() > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("upload never reached the staging step");
}

async fn spawn_stalled_ingest(
    app: &TestApp,
    class: UploadClass,
    mime: &str,
    first_bytes: Vec<u8>,
) -> (Uuid, tokio::task::JoinHandle<()>) {
    let owner = Uuid::new_v4();
    let video_id = app.store.seed(owner).id;
    let multipart = stalled_multipart(class.field_name(), mime, first_bytes).await;
    let headers = auth_headers(owner);
    let uploads = app.state.uploads.clone();

    let handle = tokio::spawn(async move {
        let _ = uploads
            .ingest(class, video_id, &headers, Ok(multipart))
            .await;
    });

    (video_id, handle)
}

#[tokio::test]
async fn test_cancelled_video_upload_removes_spooled_file() {
    let app = setup_test_app().await;
    let (video_id, handle) =
        spawn_stalled_ingest(&app, UploadClass::Video, "video/mp4", fake_mp4(4096)).await;

    wait_for_staged(|| app.staged_count()).await;
    assert!(!handle.is_finished());

    handle.abort();
    let _ = handle.await;

    assert_eq!(app.staged_count(), 0);
    assert_eq!(app.objects.object_count(), 0);
    assert_eq!(app.store.updates(), 0);
    assert_eq!(app.store.get(video_id).unwrap().video_url, None);
}

#[tokio::test]
async fn test_timed_out_thumbnail_upload_removes_partial_asset() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.store.seed(owner);
    let multipart = stalled_multipart("thumbnail", "image/png", tiny_png()).await;
    let headers = auth_headers(owner);

    let result = tokio::time::timeout(
        Duration::from_millis(200),
        app.state
            .uploads
            .ingest(UploadClass::Thumbnail, video.id, &headers, Ok(multipart)),
    )
    .await;

    assert!(result.is_err(), "stalled upload should not complete");
    assert_eq!(app.asset_count(), 0);
    assert_eq!(app.store.updates(), 0);
    assert_eq!(app.store.get(video.id).unwrap().thumbnail_url, None);
}

#[tokio::test]
async fn test_cancelled_thumbnail_upload_removes_partial_asset() {
    let app = setup_test_app().await;
    let (video_id, handle) =
        spawn_stalled_ingest(&app, UploadClass::Thumbnail, "image/png", tiny_png()).await;

    wait_for_staged(|| app.asset_count()).await;
    assert!(!handle.is_finished());

    handle.abort();
    let _ = handle.await;

    assert_eq!(app.asset_count(), 0);
    assert_eq!(app.store.updates(), 0);
    assert_eq!(app.store.get(video_id).unwrap().thumbnail_url, None);
}
