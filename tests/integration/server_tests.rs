use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use hazreg::config::Config;
use hazreg::server::{router, AppState};
use hazreg::source::{InlineSource, SdsSource, SeedTable, SpreadsheetSource};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const BENZENE: &[u8] = b"%PDF-1.4 benzene";

/// A document root with two folders plus a secret file beside it.
fn sds_fixture() -> (TempDir, AppState) {
    let dir = tempdir().unwrap();
    let root = dir.path().join("sds");
    fs::create_dir_all(root.join("ChemicalsA")).unwrap();
    fs::create_dir_all(root.join("ChemicalsB")).unwrap();
    fs::write(root.join("ChemicalsA/Benzene_MSDS.pdf"), BENZENE).unwrap();
    fs::write(root.join("ChemicalsB/lead compound.pdf"), b"%PDF-1.4 lead").unwrap();
    fs::write(dir.path().join("app_secrets.txt"), b"secret").unwrap();

    let state = AppState {
        source: Box::new(SdsSource::new(&root, &dir.path().join("sds_index.csv"))),
        title: "Hazardous Materials Register".to_string(),
        document_root: Some(root),
    };
    (dir, state)
}

fn inline_state() -> AppState {
    AppState {
        source: Box::new(InlineSource::new(SeedTable::default())),
        title: "Hazardous Materials Register".to_string(),
        document_root: None,
    }
}

async fn get(state: AppState, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router(Arc::new(state))
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn test_index_renders_inline_rows_in_column_order() {
    let (status, headers, body) = get(inline_state(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Showing 4 of 4 materials"));
    assert_eq!(html.matches("<tr").count(), 5);

    let code = html.find("<th>MaterialCode</th>").unwrap();
    let name = html.find("<th>MaterialName</th>").unwrap();
    let regulation = html.find("<th>Regulation</th>").unwrap();
    assert!(code < name && name < regulation);
    assert!(html.find("HM-001").unwrap() < html.find("HM-004").unwrap());
}

#[tokio::test]
async fn test_index_links_sds_materials() {
    let (_dir, state) = sds_fixture();
    let (status, _, body) = get(state, "/").await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Showing 2 of 2 materials"));
    assert!(html.contains("href=\"/pdf/ChemicalsA/Benzene_MSDS.pdf\""));
    assert!(html.contains("href=\"/pdf/ChemicalsB/lead%20compound.pdf\""));
}

#[tokio::test]
async fn test_pdf_served_inline() {
    let (_dir, state) = sds_fixture();
    let (status, headers, body) = get(state, "/pdf/ChemicalsA/Benzene_MSDS.pdf").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, BENZENE);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "inline; filename=\"Benzene_MSDS.pdf\""
    );
}

#[tokio::test]
async fn test_pdf_percent_encoded_space() {
    let (_dir, state) = sds_fixture();
    let (status, _, body) = get(state, "/pdf/ChemicalsB/lead%20compound.pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"%PDF-1.4 lead");
}

#[tokio::test]
async fn test_pdf_traversal_is_not_found() {
    for uri in [
        "/pdf/../app_secrets.txt",
        "/pdf/%2E%2E/app_secrets.txt",
        "/pdf/ChemicalsA/../../app_secrets.txt",
        "/pdf/ChemicalsA",
        "/pdf/ChemicalsA/missing.pdf",
        "/pdf/%FF.pdf",
        "/pdf/ChemicalsA/%C3%28.pdf",
        "/pdf/ChemicalsA/a%00b.pdf",
    ] {
        let (_dir, state) = sds_fixture();
        let (status, _, body) = get(state, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(!String::from_utf8_lossy(&body).contains("secret"));
    }
}

#[tokio::test]
async fn test_pdf_outside_sds_mode_is_not_found() {
    let (status, _, _) = get(inline_state(), "/pdf/ChemicalsA/Benzene_MSDS.pdf").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_spreadsheet_is_server_error() {
    let dir = tempdir().unwrap();
    let state = AppState {
        source: Box::new(SpreadsheetSource::new(&dir.path().join("hazmat.csv"))),
        title: "Register".to_string(),
        document_root: None,
    };
    let (status, _, body) = get(state, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(String::from_utf8(body).unwrap().contains("not found"));
}

#[tokio::test]
async fn test_app_state_from_config() {
    let config = Config::default();
    let state = AppState::from_config(&config);
    assert!(state.document_root.is_none());
    assert_eq!(state.title, "Hazardous Materials Register");

    let config = Config {
        source: hazreg::cli::SourceMode::Sds,
        document_root: Path::new("/srv/sds").to_path_buf(),
        ..Config::default()
    };
    let state = AppState::from_config(&config);
    assert_eq!(state.document_root.as_deref(), Some(Path::new("/srv/sds")));
}
