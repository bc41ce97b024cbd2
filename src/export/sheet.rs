//! Printable process sheet: the grouped process view laid out as text blocks
//! and rasterized with the embedded font.

use super::font::{self, GLYPH_WIDTH};
use super::raster::{Raster, Rgb, ACCENT, BAND, BLACK, GREY, RULE, WHITE};
use crate::error::ExportError;
use crate::model::Activity;
use crate::views::ProcessView;

/// Anything that can be drawn into a raster for export.
pub trait Surface {
    /// Render at `scale` device pixels per layout pixel.
    fn rasterize(&self, scale: u32) -> Result<Raster, ExportError>;
}

// Layout units, in layout pixels at scale 1.
const CELL_W: u32 = GLYPH_WIDTH + 1;
const LINE_H: u32 = 10;
const PADDING: u32 = 16;
const COLUMNS: u32 = 96;
const INDENT: u32 = 3;
const SHEET_WIDTH: u32 = PADDING * 2 + COLUMNS * CELL_W;

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Title(String),
    Heading(String),
    Field { label: &'static str, value: String },
    Text { text: String, indent: u32, color: Rgb },
    Rule,
    Gap,
}

impl Block {
    fn text(text: impl Into<String>, indent: u32) -> Self {
        Block::Text {
            text: text.into(),
            indent,
            color: BLACK,
        }
    }

    fn muted(text: impl Into<String>, indent: u32) -> Self {
        Block::Text {
            text: text.into(),
            indent,
            color: GREY,
        }
    }
}

/// One wrapped line ready to draw.
struct Line {
    text: String,
    x: u32,
    dot: u32,
    height: u32,
    color: Rgb,
    band: Option<Rgb>,
}

/// The process detail view as a printable sheet.
#[derive(Debug, Clone)]
pub struct ProcessSheet {
    blocks: Vec<Block>,
}

impl ProcessSheet {
    /// `base_url` resolves relative process image names.
    pub fn new(view: &ProcessView, base_url: &str) -> Self {
        let process = &view.process;
        let mut blocks = vec![
            Block::Title(process.name.clone()),
            Block::muted(format!("Process #{}", process.id), 0),
            Block::Rule,
            Block::Heading("Details".to_string()),
            Block::Field {
                label: "Id",
                value: process.id.to_string(),
            },
            Block::Field {
                label: "Name",
                value: process.name.clone(),
            },
            Block::Field {
                label: "Description",
                value: non_blank(&process.description),
            },
            Block::Field {
                label: "Version",
                value: process.version.as_deref().map(non_blank).unwrap_or_else(dash),
            },
            Block::Field {
                label: "Image",
                value: process.image_url(base_url).unwrap_or_else(|| "none".to_string()),
            },
            Block::Gap,
        ];

        for group in &view.groups {
            blocks.push(Block::Heading(format!("Round: {}", group.round.name)));
            blocks.push(Block::text(
                format!("Status: {}", group.round.status.label()),
                1,
            ));
            if !group.round.description.trim().is_empty() {
                blocks.push(Block::muted(group.round.description.clone(), 1));
            }
            push_activities(&mut blocks, &group.activities);
            blocks.push(Block::Gap);
        }

        blocks.push(Block::Heading("Activities without round".to_string()));
        push_activities(&mut blocks, &view.ungrouped);

        Self { blocks }
    }

    fn lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Title(text) => {
                    for chunk in wrap(text, COLUMNS / 2) {
                        lines.push(Line {
                            text: chunk,
                            x: PADDING,
                            dot: 2,
                            height: LINE_H * 2,
                            color: ACCENT,
                            band: None,
                        });
                    }
                }
                Block::Heading(text) => {
                    for chunk in wrap(text, COLUMNS - 1) {
                        lines.push(Line {
                            text: chunk,
                            x: PADDING + CELL_W / 2,
                            dot: 1,
                            height: LINE_H + 4,
                            color: ACCENT,
                            band: Some(BAND),
                        });
                    }
                }
                Block::Field { label, value } => {
                    let label_cols = 14;
                    let wrapped = wrap(value, COLUMNS - label_cols);
                    for (i, chunk) in wrapped.into_iter().enumerate() {
                        let prefix = if i == 0 { *label } else { "" };
                        lines.push(Line {
                            text: format!("{:<width$}{}", prefix, chunk, width = label_cols as usize),
                            x: PADDING,
                            dot: 1,
                            height: LINE_H,
                            color: BLACK,
                            band: None,
                        });
                    }
                }
                Block::Text {
                    text,
                    indent,
                    color,
                } => {
                    let indent_cols = indent * INDENT;
                    for chunk in wrap(text, COLUMNS - indent_cols) {
                        lines.push(Line {
                            text: chunk,
                            x: PADDING + indent_cols * CELL_W,
                            dot: 1,
                            height: LINE_H,
                            color: *color,
                            band: None,
                        });
                    }
                }
                Block::Rule => lines.push(Line {
                    text: String::new(),
                    x: PADDING,
                    dot: 1,
                    height: 6,
                    color: RULE,
                    band: None,
                }),
                Block::Gap => lines.push(Line {
                    text: String::new(),
                    x: PADDING,
                    dot: 1,
                    height: LINE_H / 2,
                    color: WHITE,
                    band: None,
                }),
            }
        }
        lines
    }
}

impl Surface for ProcessSheet {
    fn rasterize(&self, scale: u32) -> Result<Raster, ExportError> {
        if !(2..=3).contains(&scale) {
            return Err(ExportError::InvalidScale(scale));
        }
        let lines = self.lines();
        if lines.is_empty() {
            return Err(ExportError::EmptySurface("sheet has no content".to_string()));
        }

        let layout_height: u32 = PADDING * 2 + lines.iter().map(|l| l.height).sum::<u32>();
        let mut raster = Raster::new(SHEET_WIDTH * scale, layout_height * scale, WHITE)?;

        let mut y = PADDING;
        for line in &lines {
            if let Some(band) = line.band {
                raster.fill_rect(
                    PADDING * scale,
                    y * scale,
                    COLUMNS * CELL_W * scale,
                    line.height * scale,
                    band,
                );
            }
            if line.text.is_empty() && line.color == RULE {
                raster.fill_rect(
                    PADDING * scale,
                    (y + line.height / 2) * scale,
                    COLUMNS * CELL_W * scale,
                    scale,
                    RULE,
                );
            } else if !line.text.is_empty() {
                let top = y + (line.height - 7 * line.dot) / 2;
                raster.draw_text(
                    line.x * scale,
                    top * scale,
                    &line.text,
                    line.dot * scale,
                    line.color,
                );
            }
            y += line.height;
        }

        Ok(raster)
    }
}

fn push_activities(blocks: &mut Vec<Block>, activities: &[Activity]) {
    if activities.is_empty() {
        blocks.push(Block::muted("No activities", 1));
        return;
    }
    for activity in activities {
        blocks.push(Block::text(format!("- {}", activity.name), 1));
        if !activity.description.trim().is_empty() {
            blocks.push(Block::muted(activity.description.clone(), 2));
        }
        let details = [
            ("Practice", activity.practice_label().map(str::to_string)),
            ("Thinklet", activity.thinklet_label().map(str::to_string)),
            ("Pattern", activity.pattern_label().map(str::to_string)),
        ];
        for (label, value) in details {
            if let Some(value) = value {
                blocks.push(Block::muted(format!("{}: {}", label, value), 2));
            }
        }
        let roles = activity.role_names();
        if !roles.is_empty() {
            blocks.push(Block::muted(format!("Roles: {}", roles.join(", ")), 2));
        }
    }
}

fn non_blank(value: &str) -> String {
    if value.trim().is_empty() {
        dash()
    } else {
        value.to_string()
    }
}

fn dash() -> String {
    "-".to_string()
}

/// Word-wrap to `width` columns after reducing to drawable characters.
/// Words longer than a line are split.
fn wrap(text: &str, width: u32) -> Vec<String> {
    let width = width.max(1) as usize;
    let text = font::printable(text);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if current.is_empty() {
                word.len()
            } else {
                current.chars().count() + 1 + word.len()
            };
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
