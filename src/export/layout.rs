//! Page geometry and pagination.
//!
//! All lengths are millimetres. The image is scaled to the printable width
//! and drawn in full on every page, shifted up by one printable height per
//! page; the writer clips each page to its printable band.

use crate::error::ExportError;
use serde::Serialize;

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_mm: f64,
}

impl PageGeometry {
    pub fn new(width_mm: f64, height_mm: f64, margin_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            margin_mm,
        }
    }

    pub fn a4_portrait(margin_mm: f64) -> Self {
        Self::new(A4_WIDTH_MM, A4_HEIGHT_MM, margin_mm)
    }

    /// `W - 2m`
    pub fn printable_width(&self) -> f64 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// `H - 2m`
    pub fn printable_height(&self) -> f64 {
        self.height_mm - 2.0 * self.margin_mm
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        let finite = [self.width_mm, self.height_mm, self.margin_mm]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.margin_mm < 0.0 {
            return Err(ExportError::InvalidGeometry(format!(
                "margin must be a non-negative number (got {})",
                self.margin_mm
            )));
        }
        if self.printable_width() <= 0.0 || self.printable_height() <= 0.0 {
            return Err(ExportError::InvalidGeometry(format!(
                "margin of {} mm leaves no printable area on a {} x {} mm page",
                self.margin_mm, self.width_mm, self.height_mm
            )));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4_portrait(10.0)
    }
}

/// Where the image sits on one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PagePlacement {
    pub index: usize,
    /// Distance from the top of the page to the top of the image: `m - k * ph`.
    pub offset_mm: f64,
    /// Slice of the image visible on this page, measured from the image top.
    pub band_start_mm: f64,
    pub band_end_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub geometry: PageGeometry,
    pub image_width_mm: f64,
    pub image_height_mm: f64,
    pub pages: Vec<PagePlacement>,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lay out a `source_width` x `source_height` image across pages.
pub fn paginate(
    source_width: u32,
    source_height: u32,
    geometry: &PageGeometry,
) -> Result<Pagination, ExportError> {
    geometry.validate()?;
    if source_width == 0 || source_height == 0 {
        return Err(ExportError::EmptySurface(format!(
            "rendered surface is {}x{} pixels",
            source_width, source_height
        )));
    }

    let iw = geometry.printable_width();
    let ih = f64::from(source_height) * iw / f64::from(source_width);
    let ph = geometry.printable_height();
    let m = geometry.margin_mm;

    let mut pages = Vec::new();
    let mut k = 0usize;
    loop {
        let start = k as f64 * ph;
        pages.push(PagePlacement {
            index: k,
            offset_mm: m - start,
            band_start_mm: start,
            band_end_mm: ih.min((k + 1) as f64 * ph),
        });
        let remaining = ih - (k + 1) as f64 * ph;
        if remaining <= 0.0 {
            break;
        }
        k += 1;
    }

    Ok(Pagination {
        geometry: *geometry,
        image_width_mm: iw,
        image_height_mm: ih,
        pages,
    })
}
