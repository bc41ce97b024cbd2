//! Minimal PDF 1.4 writer for paginated raster documents.
//!
//! Object layout: 1 catalog, 2 page tree, 3 info, 4 shared image XObject,
//! then a page object and its content stream for every page.

use super::layout::Pagination;
use super::raster::Raster;
use std::fmt::Write as _;

const POINTS_PER_MM: f64 = 72.0 / 25.4;

fn pt(mm: f64) -> String {
    let value = mm * POINTS_PER_MM;
    let mut text = format!("{:.3}", value);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Document metadata written to the info dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub created: Option<chrono::DateTime<chrono::Utc>>,
}

struct PdfBuffer {
    bytes: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfBuffer {
    fn new() -> Self {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            bytes,
            offsets: Vec::new(),
        }
    }

    /// Objects must be written in id order starting at 1.
    fn object(&mut self, id: usize, dictionary: &str) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.bytes.len());
        self.bytes
            .extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, dictionary).as_bytes());
    }

    fn stream(&mut self, id: usize, dictionary: &str, data: &[u8]) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.bytes.len());
        let head = format!(
            "{} 0 obj\n<< {} /Length {} >>\nstream\n",
            id,
            dictionary,
            data.len()
        );
        self.bytes.extend_from_slice(head.as_bytes());
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_at = self.bytes.len();
        let mut table = format!("xref\n0 {}\n0000000000 65535 f \n", self.offsets.len() + 1);
        for offset in &self.offsets {
            let _ = writeln!(table, "{:010} 00000 n ", offset);
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {} /Root 1 0 R /Info 3 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.offsets.len() + 1,
            xref_at
        );
        self.bytes.extend_from_slice(table.as_bytes());
        self.bytes
    }
}

/// Serialize `raster` across the pages of `pagination`.
pub fn write_document(raster: &Raster, pagination: &Pagination, info: &DocumentInfo) -> Vec<u8> {
    let geometry = pagination.geometry;
    let page_count = pagination.pages.len();
    let first_page_id = 5;
    let page_ids: Vec<usize> = (0..page_count).map(|i| first_page_id + 2 * i).collect();

    let mut pdf = PdfBuffer::new();
    pdf.object(1, "<< /Type /Catalog /Pages 2 0 R >>");

    let kids = page_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");
    pdf.object(
        2,
        &format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_count),
    );

    let mut info_dict = format!(
        "<< /Title ({}) /Producer (colab {})",
        escape_text(&info.title),
        env!("CARGO_PKG_VERSION")
    );
    if let Some(created) = info.created {
        let _ = write!(
            info_dict,
            " /CreationDate (D:{})",
            created.format("%Y%m%d%H%M%SZ")
        );
    }
    info_dict.push_str(" >>");
    pdf.object(3, &info_dict);

    pdf.stream(
        4,
        &format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB \
             /BitsPerComponent 8 /Filter /RunLengthDecode",
            raster.width(),
            raster.height()
        ),
        &run_length_encode(raster.pixels()),
    );

    let media_box = format!(
        "[0 0 {} {}]",
        pt(geometry.width_mm),
        pt(geometry.height_mm)
    );
    let m = geometry.margin_mm;
    for (placement, page_id) in pagination.pages.iter().zip(&page_ids) {
        // PDF space has its origin at the bottom left of the page.
        let image_bottom = geometry.height_mm - placement.offset_mm - pagination.image_height_mm;
        let content = format!(
            "q\n{} {} {} {} re W n\n{} 0 0 {} {} {} cm\n/Im0 Do\nQ\n",
            pt(m),
            pt(m),
            pt(geometry.printable_width()),
            pt(geometry.printable_height()),
            pt(pagination.image_width_mm),
            pt(pagination.image_height_mm),
            pt(m),
            pt(image_bottom),
        );
        pdf.object(
            *page_id,
            &format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox {} \
                 /Resources << /XObject << /Im0 4 0 R >> >> /Contents {} 0 R >>",
                media_box,
                page_id + 1
            ),
        );
        pdf.stream(page_id + 1, "", content.as_bytes());
    }

    pdf.finish()
}

/// PDF literal string body: ASCII only, delimiters escaped.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in super::font::printable(text).chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// PackBits-style encoding understood by the `RunLengthDecode` filter.
fn run_length_encode(data: &[u8]) -> Vec<u8> {
    fn flush(out: &mut Vec<u8>, literal: &[u8]) {
        for chunk in literal.chunks(128) {
            out.push((chunk.len() - 1) as u8);
            out.extend_from_slice(chunk);
        }
    }

    let mut out = Vec::with_capacity(data.len() / 8 + 2);
    let mut literal_start = 0;
    let mut i = 0;
    while i < data.len() {
        let mut run = 1;
        while i + run < data.len() && run < 128 && data[i + run] == data[i] {
            run += 1;
        }
        if run >= 2 {
            flush(&mut out, &data[literal_start..i]);
            out.push((257 - run) as u8);
            out.push(data[i]);
            i += run;
            literal_start = i;
        } else {
            i += 1;
        }
    }
    flush(&mut out, &data[literal_start..]);
    out.push(128);
    out
}
