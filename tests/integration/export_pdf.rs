//! Integration tests for paginated PDF export

use crate::integration::support::{FakeApi, FakeServer};
use colab::api::{ApiClient, ProcessSource};
use colab::config::{ApiConfig, ExportConfig};
use colab::error::{ApiError, ExportError};
use colab::export::{
    export_process, render_document, DocumentInfo, PageGeometry, ProcessSheet, Raster, Surface,
};
use colab::views::ProcessView;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn client_for(server: &FakeServer) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: server.base_url.clone(),
        ..ApiConfig::default()
    })
    .unwrap()
}

fn export_config(dir: &Path, scale: u32) -> ExportConfig {
    ExportConfig {
        scale,
        margin_mm: 10.0,
        output_dir: dir.to_path_buf(),
    }
}

/// A process with one round holding `count` activities.
fn long_process(count: i64) -> FakeApi {
    let mut api = FakeApi::empty();
    api.insert(
        "colaborative_process",
        json!({ "id_process": 7, "name_process": "Quarterly (Planning)" }),
    );
    api.insert(
        "round",
        json!({
            "id_activity": 70,
            "name_activity": "Backlog review",
            "round_status": "PLANEAR_ESTRATEGIA",
            "id_process": 7
        }),
    );
    for i in 0..count {
        api.insert(
            "child_activity",
            json!({
                "id_activity": 1000 + i,
                "name_activity": format!("Review item {}", i),
                "description_activity": "Walk through the item, estimate it and record open questions for the owner",
                "id_process": 7,
                "parent_round_id": 70
            }),
        );
    }
    api
}

fn page_objects(pdf: &[u8]) -> usize {
    String::from_utf8_lossy(pdf).matches("/Type /Page /Parent").count()
}

#[tokio::test]
async fn test_long_process_spans_several_pages() {
    let server = FakeServer::start(long_process(150));
    let client = client_for(&server);
    let temp = TempDir::new().unwrap();

    let summary = export_process(
        &client,
        client.base_url(),
        7,
        &export_config(temp.path(), 2),
        None,
        None,
    )
    .await
    .unwrap();

    assert_eq!(
        summary.path,
        temp.path().join("process-7-quarterly-planning.pdf")
    );
    assert!(summary.pages > 1, "expected several pages, got {}", summary.pages);
    assert_eq!(summary.orphans, 0);

    let bytes = std::fs::read(&summary.path).unwrap();
    assert_eq!(bytes.len(), summary.bytes);
    assert_eq!(page_objects(&bytes), summary.pages);
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains(&format!("/Count {}", summary.pages)));
    assert!(text.contains("/Title (Quarterly \\(Planning\\))"));
}

#[tokio::test]
async fn test_page_count_matches_pagination_of_the_rendered_sheet() {
    let server = FakeServer::start(long_process(60));
    let client = client_for(&server);
    let temp = TempDir::new().unwrap();

    let summary = export_process(
        &client,
        client.base_url(),
        7,
        &export_config(temp.path(), 3),
        None,
        Some("quarterly"),
    )
    .await
    .unwrap();
    assert_eq!(summary.path, temp.path().join("quarterly.pdf"));

    // Render the same view directly and compare with the page formula.
    let full = client.full_process(7).await.unwrap();
    let view = ProcessView::assemble(&full);
    let sheet = ProcessSheet::new(&view, client.base_url());
    let geometry = PageGeometry::a4_portrait(10.0);
    let rendered = render_document(&sheet, 3, &geometry, &DocumentInfo::default()).unwrap();

    let image_height =
        rendered.raster_height as f64 * geometry.printable_width() / rendered.raster_width as f64;
    let expected = (image_height / geometry.printable_height()).ceil() as usize;
    assert_eq!(rendered.pagination.page_count(), expected);
    assert_eq!(summary.pages, expected);
}

#[tokio::test]
async fn test_explicit_output_dir_wins_over_config() {
    let server = FakeServer::seeded();
    let client = client_for(&server);
    let configured = TempDir::new().unwrap();
    let chosen = TempDir::new().unwrap();
    let nested = chosen.path().join("exports").join("2026");

    let summary = export_process(
        &client,
        client.base_url(),
        1,
        &export_config(configured.path(), 2),
        Some(&nested),
        None,
    )
    .await
    .unwrap();

    assert_eq!(summary.path, nested.join("process-1-design-workshop.pdf"));
    assert!(summary.path.exists());
    assert_eq!(summary.orphans, 1);
    assert_eq!(std::fs::read_dir(configured.path()).unwrap().count(), 0);
    // No partial file is left next to the document.
    let names: Vec<String> = std::fs::read_dir(&nested)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["process-1-design-workshop.pdf".to_string()]);
}

#[tokio::test]
async fn test_fetch_failure_aborts_export() {
    let mut api = FakeApi::seeded();
    api.outage = true;
    let server = FakeServer::start(api);
    let client = client_for(&server);
    let temp = TempDir::new().unwrap();

    let err = export_process(
        &client,
        client.base_url(),
        1,
        &export_config(temp.path(), 3),
        None,
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_invalid_margin_rejected_before_fetch() {
    let server = FakeServer::seeded();
    let client = client_for(&server);
    let temp = TempDir::new().unwrap();
    let config = ExportConfig {
        margin_mm: 120.0,
        ..export_config(temp.path(), 3)
    };

    let err = export_process(&client, client.base_url(), 1, &config, None, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Export(ExportError::InvalidGeometry(_))
    ));
    assert!(server.api().requests().is_empty());
}

/// A blank surface of fixed layout size.
struct Blank {
    width: u32,
    height: u32,
}

impl Surface for Blank {
    fn rasterize(&self, scale: u32) -> Result<Raster, ExportError> {
        Raster::new(self.width * scale, self.height * scale, [0xFF, 0xFF, 0xFF])
    }
}

#[test]
fn test_render_document_slices_tall_surface() {
    // 190 mm wide printable area; a 1:3 surface is 570 mm tall, 277 mm per page.
    let surface = Blank {
        width: 100,
        height: 300,
    };
    let geometry = PageGeometry::a4_portrait(10.0);
    let rendered = render_document(&surface, 2, &geometry, &DocumentInfo::default()).unwrap();

    assert_eq!(rendered.raster_width, 200);
    assert_eq!(rendered.raster_height, 600);
    let pages = &rendered.pagination.pages;
    assert_eq!(pages.len(), 3);
    assert!((pages[0].offset_mm - 10.0).abs() < 1e-9);
    assert!((pages[1].offset_mm - (10.0 - 277.0)).abs() < 1e-9);
    assert!((pages[2].band_end_mm - 570.0).abs() < 1e-9);
    assert_eq!(page_objects(&rendered.bytes), 3);
}

#[test]
fn test_render_document_rejects_empty_surface() {
    let surface = Blank {
        width: 0,
        height: 10,
    };
    let err = render_document(
        &surface,
        2,
        &PageGeometry::a4_portrait(10.0),
        &DocumentInfo::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::EmptySurface(_)));
}
