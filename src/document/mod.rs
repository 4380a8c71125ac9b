// src/document/mod.rs

use crate::error::{Result, TodoError};
use crate::sanitize::file_stem;
use chrono::NaiveDateTime;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_OUTPUT_DIR: &str = "pdfs";
pub const DOCUMENT_EXTENSION: &str = "pdf";
pub const DOCUMENT_MIME: &str = "application/pdf";

// A4, 10 mm margins, 2 cm bottom break, 10 mm lines.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const BOTTOM_MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 10.0;
const FONT_SIZE: f32 = 12.0;
// Courier advance is 600/1000 em.
const CHAR_WIDTH: f32 = FONT_SIZE * 0.6 * 25.4 / 72.0;
// Baseline offset inside a line cell.
const BASELINE: f32 = 7.0;

/// Characters per line at the fixed font size.
pub fn line_capacity() -> usize {
    ((PAGE_WIDTH - 2.0 * MARGIN) / CHAR_WIDTH).floor() as usize
}

pub fn lines_per_page() -> usize {
    ((PAGE_HEIGHT - MARGIN - BOTTOM_MARGIN) / LINE_HEIGHT).floor() as usize
}

/// `{stem}{YYYYMMDDHHMMSS}.pdf`
pub fn document_file_name(title: &str, at: NaiveDateTime) -> String {
    format!(
        "{}{}.{}",
        file_stem(title),
        at.format("%Y%m%d%H%M%S"),
        DOCUMENT_EXTENSION
    )
}

/// Greedy word wrap on single spaces. Newlines start a new line, blank
/// lines and runs of spaces are kept, the space at a break is dropped and
/// words longer than `width` are split.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut line = String::new();
        let mut line_len = 0;
        let mut fresh = true;

        for word in paragraph.split(' ') {
            let mut chars: Vec<char> = word.chars().collect();
            let oversized = chars.len() > width;

            while chars.len() > width {
                if !fresh {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                lines.push(chars.drain(..width).collect());
                fresh = true;
            }
            if oversized && chars.is_empty() {
                continue;
            }

            if !fresh && line_len + 1 + chars.len() > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
                fresh = true;
                if chars.is_empty() {
                    continue;
                }
            }
            if !fresh {
                line.push(' ');
                line_len += 1;
            }
            line_len += chars.len();
            line.extend(chars);
            fresh = false;
        }

        lines.push(line);
    }

    lines
}

pub struct DocumentWriter {
    output_dir: PathBuf,
}

impl DocumentWriter {
    /// Creates the output directory if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let writer = Self {
            output_dir: output_dir.into(),
        };
        writer.ensure_output_dir()?;
        Ok(writer)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| TodoError::filesystem(&self.output_dir, e))
    }

    /// Renders `text` (already Latin-1) into a new PDF named after `title`.
    /// The file is closed and synced before the path is returned.
    pub fn write(&self, title: &str, text: &str, at: NaiveDateTime) -> Result<PathBuf> {
        let path = self.output_dir.join(document_file_name(title, at));
        let lines = wrap_lines(text, line_capacity());
        debug!(path = %path.display(), lines = lines.len(), "rendering document");

        let file = File::create_new(&path).map_err(|e| TodoError::filesystem(&path, e))?;
        let mut out = BufWriter::new(file);
        render_pdf(&file_stem(title), &lines, &mut out)?;

        let file = out
            .into_inner()
            .map_err(|e| TodoError::filesystem(&path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| TodoError::filesystem(&path, e))?;

        info!(path = %path.display(), "document written");
        Ok(path)
    }
}

fn render_pdf(doc_title: &str, lines: &[String], out: &mut BufWriter<File>) -> Result<()> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(doc_title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| TodoError::Render(e.to_string()))?;

    let per_page = lines_per_page();
    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    for (page_index, chunk) in lines.chunks(per_page).enumerate() {
        if page_index > 0 {
            let (page, page_layer) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}, Layer 1", page_index + 1),
            );
            layer = doc.get_page(page).get_layer(page_layer);
        }

        for (row, line) in chunk.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = PAGE_HEIGHT - MARGIN - BASELINE - row as f32 * LINE_HEIGHT;
            layer.use_text(line.as_str(), FONT_SIZE, Mm(MARGIN), Mm(y), &font);
        }
    }

    doc.save(out).map_err(|e| TodoError::Render(e.to_string()))
}
