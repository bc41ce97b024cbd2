//! Document Export
//!
//! Renders the grouped process view to a raster, slices it across A4 pages and
//! writes `<name>.pdf`. Rasterization and encoding run on a blocking worker;
//! the file appears only once the whole document has been written.

use crate::api::ProcessSource;
use crate::config::ExportConfig;
use crate::error::{ApiError, ExportError};
use crate::search::slug;
use crate::views::ProcessView;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, instrument, warn};

pub mod font;
pub mod layout;
pub mod pdf;
pub mod raster;
pub mod sheet;

pub use layout::{paginate, PageGeometry, PagePlacement, Pagination};
pub use pdf::DocumentInfo;
pub use raster::Raster;
pub use sheet::{ProcessSheet, Surface};

/// Lowest supported oversampling factor; used when the configured one does
/// not fit the raster pixel budget.
pub const FALLBACK_SCALE: u32 = 2;

/// A finished document held in memory.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub pagination: Pagination,
    pub raster_width: u32,
    pub raster_height: u32,
    pub scale: u32,
}

/// Outcome of a completed export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub bytes: usize,
    pub orphans: usize,
    pub scale: u32,
}

/// Rasterize `surface` and paginate it into a PDF document.
pub fn render_document<S: Surface + ?Sized>(
    surface: &S,
    scale: u32,
    geometry: &PageGeometry,
    info: &DocumentInfo,
) -> Result<RenderedDocument, ExportError> {
    geometry.validate()?;
    let (raster, scale) = rasterize_within_budget(surface, scale)?;
    let pagination = paginate(raster.width(), raster.height(), geometry)?;
    debug!(
        width = raster.width(),
        height = raster.height(),
        pages = pagination.page_count(),
        "Paginated raster"
    );
    let bytes = pdf::write_document(&raster, &pagination, info);
    Ok(RenderedDocument {
        bytes,
        raster_width: raster.width(),
        raster_height: raster.height(),
        scale,
        pagination,
    })
}

/// Rasterize at `scale`, stepping down to [`FALLBACK_SCALE`] when the surface
/// is too tall for the pixel budget.
fn rasterize_within_budget<S: Surface + ?Sized>(
    surface: &S,
    scale: u32,
) -> Result<(Raster, u32), ExportError> {
    match surface.rasterize(scale) {
        Err(ExportError::RasterTooLarge { width, height }) if scale > FALLBACK_SCALE => {
            warn!(
                scale,
                fallback = FALLBACK_SCALE,
                width,
                height,
                "Raster exceeds pixel budget, lowering oversampling"
            );
            Ok((surface.rasterize(FALLBACK_SCALE)?, FALLBACK_SCALE))
        }
        outcome => outcome.map(|raster| (raster, scale)),
    }
}

/// Default base name: `process-<id>-<slug>`, or `process-<id>` for a blank name.
pub fn default_file_name(id: i64, name: &str) -> String {
    let slug = slug(name);
    if slug.is_empty() {
        format!("process-{}", id)
    } else {
        format!("process-{}-{}", id, slug)
    }
}

/// `<base>.pdf`. The extension is always appended.
fn pdf_file_name(base: &str) -> String {
    format!("{}.pdf", base)
}

/// A user-supplied base name may name subdirectories of the output directory
/// but must stay inside it.
fn check_base_name(name: &str) -> Result<(), ApiError> {
    let path = Path::new(name);
    let inside = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !inside || path.file_name().is_none() {
        return Err(ApiError::InvalidInput(format!(
            "Export name must be a relative path inside the output directory: {}",
            name
        )));
    }
    Ok(())
}

/// Write `bytes` to `dir/file_name` through a temporary sibling file.
///
/// `file_name` may contain subdirectories; they are created as needed.
pub fn write_atomically(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let target = dir.join(file_name);
    let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
        return Err(ExportError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("not a file path: {}", target.display()),
        )));
    };
    fs::create_dir_all(parent)?;
    let partial = target.with_file_name(format!(".{}.part", name.to_string_lossy()));

    let written = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&partial)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&partial, &target)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&partial);
        return Err(ExportError::Io(e));
    }
    Ok(target)
}

/// Export one process to a PDF file.
///
/// The process is fetched first; a fetch failure aborts before anything is
/// rendered.
#[instrument(skip(source, config), fields(process_id = id))]
pub async fn export_process<S: ProcessSource + ?Sized>(
    source: &S,
    base_url: &str,
    id: i64,
    config: &ExportConfig,
    output_dir: Option<&Path>,
    name: Option<&str>,
) -> Result<ExportSummary, ApiError> {
    let geometry = PageGeometry::a4_portrait(config.margin_mm);
    geometry.validate()?;
    if !(FALLBACK_SCALE..=3).contains(&config.scale) {
        return Err(ExportError::InvalidScale(config.scale).into());
    }
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    if let Some(name) = name {
        check_base_name(name)?;
    }

    let full = source.full_process(id).await?;
    let view = ProcessView::assemble(&full);
    let orphans = view.orphans.len();
    debug!(
        activities = view.shown_activity_count(),
        orphans, "Assembled process view"
    );

    let base = match name {
        Some(name) => name.to_string(),
        None => default_file_name(full.process.id, &full.process.name),
    };
    let file_name = pdf_file_name(&base);
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output_dir.clone());

    let sheet = ProcessSheet::new(&view, base_url);
    let info = DocumentInfo {
        title: full.process.name.clone(),
        created: Some(chrono::Utc::now()),
    };
    let scale = config.scale;

    let (path, rendered) = tokio::task::spawn_blocking(move || {
        let rendered = render_document(&sheet, scale, &geometry, &info)?;
        let path = write_atomically(&dir, &file_name, &rendered.bytes)?;
        Ok::<_, ExportError>((path, rendered))
    })
    .await
    .map_err(|e| ExportError::Worker(e.to_string()))??;

    info!(
        path = %path.display(),
        pages = rendered.pagination.page_count(),
        scale = rendered.scale,
        "Exported process document"
    );

    Ok(ExportSummary {
        path,
        pages: rendered.pagination.page_count(),
        bytes: rendered.bytes.len(),
        orphans,
        scale: rendered.scale,
    })
}
