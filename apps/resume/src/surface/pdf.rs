//! PDF backend for [`Surface`], written with `pdf-writer`.
//!
//! Only the base-14 Type 1 fonts are used, so nothing is embedded. Content
//! streams are buffered per page and the object graph (page tree, fonts,
//! link annotations, outline, document info) is assembled in [`PdfSurface::finish`].

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::types::{ActionType, AnnotationType, PageLayout, PageMode};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

use crate::layout::font_metrics::{FontFamily, FontSpec, FontStyle};
use crate::models::Resume;
use crate::surface::{Cell, PageGeometry, Pen, Surface};

/// PostScript points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Document metadata
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub keywords: String,
    pub created: DateTime<Utc>,
}

impl DocumentInfo {
    /// Title and subject are "<name>'s Resume"; author and creator are the contact name.
    pub fn for_resume(resume: &Resume, created: DateTime<Utc>) -> Self {
        DocumentInfo {
            title: format!("{}'s Resume", resume.contact.name),
            author: resume.contact.name.clone(),
            keywords: resume.controls.pdf.keywords.join(" "),
            created,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Surface implementation
// ────────────────────────────────────────────────────────────────────────────

struct PageBuffer {
    content: Content,
    links: Vec<(Rect, String)>,
}

#[derive(Debug, Clone)]
struct Bookmark {
    title: String,
    level: u8,
    page: usize,
    y: f32,
}

pub struct PdfSurface {
    pen: Pen,
    pages: Vec<PageBuffer>,
    /// Faces in first-use order; index `i` is the resource `/F{i+1}`.
    fonts: Vec<(FontFamily, FontStyle)>,
    bookmarks: Vec<Bookmark>,
}

impl PdfSurface {
    pub fn new(geometry: PageGeometry) -> Self {
        PdfSurface {
            pen: Pen::new(geometry),
            pages: Vec::new(),
            fonts: Vec::new(),
            bookmarks: Vec::new(),
        }
    }

    fn font_key(&mut self, font: FontSpec) -> String {
        let face = (font.family, font.style);
        let index = match self.fonts.iter().position(|f| *f == face) {
            Some(i) => i,
            None => {
                self.fonts.push(face);
                self.fonts.len() - 1
            }
        };
        format!("F{}", index + 1)
    }

    /// Converts a top-left millimetre y coordinate into PDF user space.
    fn pdf_y(&self, y: f32) -> f32 {
        (self.pen.geometry.height - y) * PT_PER_MM
    }

    /// Serializes the whole document.
    pub fn finish(self, info: &DocumentInfo) -> Vec<u8> {
        let geometry = self.pen.geometry;
        let mut pdf = Pdf::new();
        let mut alloc = Ref::new(1);

        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let info_id = alloc.bump();
        let font_ids: Vec<Ref> = self.fonts.iter().map(|_| alloc.bump()).collect();
        let page_ids: Vec<Ref> = self.pages.iter().map(|_| alloc.bump()).collect();
        let content_ids: Vec<Ref> = self.pages.iter().map(|_| alloc.bump()).collect();

        let outline_root = if self.bookmarks.is_empty() {
            None
        } else {
            Some(write_outline(
                &mut pdf,
                &mut alloc,
                &self.bookmarks,
                &page_ids,
                geometry.height,
            ))
        };

        {
            let mut catalog = pdf.catalog(catalog_id);
            catalog.pages(page_tree_id);
            catalog.page_layout(PageLayout::SinglePage);
            if let Some(root) = outline_root {
                catalog.outlines(root);
                catalog.page_mode(PageMode::UseOutlines);
            }
        }

        pdf.pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        let date = pdf_date(&info.created);
        pdf.document_info(info_id)
            .title(TextStr(&info.title))
            .subject(TextStr(&info.title))
            .author(TextStr(&info.author))
            .creator(TextStr(&info.author))
            .keywords(TextStr(&info.keywords))
            .creation_date(date)
            .modified_date(date);

        for (face, id) in self.fonts.iter().zip(&font_ids) {
            let base = crate::layout::font_metrics::base_font_name(face.0, face.1);
            pdf.type1_font(*id)
                .base_font(Name(base.as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let font_names: Vec<String> = (1..=self.fonts.len()).map(|i| format!("F{i}")).collect();
        let page_count = self.pages.len();

        for (i, page) in self.pages.into_iter().enumerate() {
            let raw = page.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);

            let annotation_ids: Vec<Ref> = page
                .links
                .iter()
                .map(|(rect, uri)| {
                    let id = alloc.bump();
                    let mut annotation = pdf.annotation(id);
                    annotation
                        .subtype(AnnotationType::Link)
                        .rect(*rect)
                        .border(0.0, 0.0, 0.0, None);
                    annotation
                        .action()
                        .action_type(ActionType::Uri)
                        .uri(Str(uri.as_bytes()));
                    id
                })
                .collect();

            let mut page_writer = pdf.page(page_ids[i]);
            page_writer
                .media_box(Rect::new(
                    0.0,
                    0.0,
                    geometry.width * PT_PER_MM,
                    geometry.height * PT_PER_MM,
                ))
                .parent(page_tree_id)
                .contents(content_ids[i]);
            if !annotation_ids.is_empty() {
                page_writer.annotations(annotation_ids.iter().copied());
            }
            let mut resources = page_writer.resources();
            let mut fonts = resources.fonts();
            for (name, id) in font_names.iter().zip(&font_ids) {
                fonts.pair(Name(name.as_bytes()), *id);
            }
        }

        debug!(pages = page_count, fonts = font_ids.len(), "PDF assembled");
        pdf.finish()
    }
}

impl Surface for PdfSurface {
    fn geometry(&self) -> &PageGeometry {
        &self.pen.geometry
    }

    fn font(&self) -> FontSpec {
        self.pen.font
    }

    fn set_font(&mut self, font: FontSpec) {
        self.pen.font = font;
    }

    fn cell(&mut self, cell: Cell<'_>) {
        if self.pages.is_empty() {
            self.add_page();
        }
        let font = self.pen.font;
        let key = self.font_key(font);
        let placed = self.pen.place(&cell);

        let x = placed.x * PT_PER_MM;
        let bottom = self.pdf_y(placed.y + placed.height);
        let top = self.pdf_y(placed.y);
        let width = placed.width * PT_PER_MM;
        let baseline = self.pdf_y(placed.baseline);

        let Some(page) = self.pages.last_mut() else {
            return;
        };

        if let Some(grey) = cell.fill {
            page.content.set_fill_gray(grey);
            page.content.rect(x, bottom, width, top - bottom);
            page.content.fill_nonzero();
            page.content.set_fill_gray(0.0);
        }

        if !cell.text.is_empty() {
            page.content.begin_text();
            page.content.set_font(Name(key.as_bytes()), font.size_pt);
            page.content.next_line(placed.text_x * PT_PER_MM, baseline);
            page.content.show(Str(&encode_win_ansi(cell.text)));
            page.content.end_text();
        }

        if let Some(target) = cell.link {
            page.links
                .push((Rect::new(x, bottom, x + width, top), target.to_string()));
        }
    }

    fn line_break(&mut self, height: f32) {
        self.pen.line_break(height);
    }

    fn x(&self) -> f32 {
        self.pen.x
    }

    fn y(&self) -> f32 {
        self.pen.y
    }

    fn set_x(&mut self, x: f32) {
        self.pen.x = x;
    }

    fn set_y(&mut self, y: f32) {
        self.pen.set_y(y);
    }

    fn add_page(&mut self) {
        self.pen.new_page();
        self.pages.push(PageBuffer {
            content: Content::new(),
            links: Vec::new(),
        });
    }

    fn page_number(&self) -> usize {
        self.pen.page
    }

    fn bookmark(&mut self, title: &str, level: u8) {
        self.bookmarks.push(Bookmark {
            title: title.to_string(),
            level,
            page: self.pages.len().saturating_sub(1),
            y: self.pen.y,
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Writes a two-level outline: level-0 bookmarks at the top, deeper ones under
/// the preceding level-0 entry. Returns the outline root reference.
fn write_outline(
    pdf: &mut Pdf,
    alloc: &mut Ref,
    bookmarks: &[Bookmark],
    page_ids: &[Ref],
    page_height: f32,
) -> Ref {
    let root = alloc.bump();
    let ids: Vec<Ref> = bookmarks.iter().map(|_| alloc.bump()).collect();

    let mut tree: Vec<(usize, Vec<usize>)> = Vec::new();
    for (i, bookmark) in bookmarks.iter().enumerate() {
        match tree.last_mut() {
            Some((_, children)) if bookmark.level > 0 => children.push(i),
            _ => tree.push((i, Vec::new())),
        }
    }

    if let (Some(first), Some(last)) = (tree.first(), tree.last()) {
        pdf.outline(root)
            .first(ids[first.0])
            .last(ids[last.0])
            .count(bookmarks.len() as i32);
    }

    let write_item = |pdf: &mut Pdf, index: usize, parent: Ref, prev: Option<usize>, next: Option<usize>, children: &[usize]| {
        let bookmark = &bookmarks[index];
        let mut item = pdf.outline_item(ids[index]);
        item.title(TextStr(&bookmark.title)).parent(parent);
        if let Some(p) = prev {
            item.prev(ids[p]);
        }
        if let Some(n) = next {
            item.next(ids[n]);
        }
        if let (Some(first), Some(last)) = (children.first(), children.last()) {
            item.first(ids[*first])
                .last(ids[*last])
                .count(children.len() as i32);
        }
        if let Some(page) = page_ids.get(bookmark.page) {
            item.dest()
                .page(*page)
                .xyz(0.0, (page_height - bookmark.y) * PT_PER_MM, None);
        }
    };

    for (t, (index, children)) in tree.iter().enumerate() {
        let prev = t.checked_sub(1).map(|p| tree[p].0);
        let next = tree.get(t + 1).map(|n| n.0);
        write_item(pdf, *index, root, prev, next, children);

        for (c, child) in children.iter().enumerate() {
            let prev = c.checked_sub(1).map(|p| children[p]);
            let next = children.get(c + 1).copied();
            write_item(pdf, *child, ids[*index], prev, next, &[]);
        }
    }

    root
}

fn pdf_date(at: &DateTime<Utc>) -> Date {
    Date::new(at.year().clamp(0, 9999) as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(0)
}

/// Encodes text as WinAnsi bytes; characters outside the code page become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::controls::Margins;
    use crate::surface::Align;
    use chrono::TimeZone;

    fn make_info() -> DocumentInfo {
        DocumentInfo {
            title: "Jane Doe's Resume".to_string(),
            author: "Jane Doe".to_string(),
            keywords: "rust pdf".to_string(),
            created: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn sample_document() -> Vec<u8> {
        let mut surface = PdfSurface::new(PageGeometry::letter(&Margins::default()));
        surface.add_page();
        surface.set_font(FontSpec::new(FontFamily::Helvetica, FontStyle::Bold, 14.0));
        surface.bookmark("Experience", 0);
        surface.cell(Cell::new(0.0, 8.5, "Experience").fill(0.78));
        surface.line_break(10.0);
        surface.set_font(FontSpec::new(FontFamily::Times, FontStyle::Italic, 11.0));
        surface.bookmark("Acme Corp", 1);
        surface
            .cell(Cell::new(40.0, 11.0, "Jane Doe").link("mailto:jane@example.com"));
        surface.cell(Cell::new(0.0, 11.0, "Springfield").align(Align::Right));
        surface.add_page();
        surface.cell(Cell::new(0.0, 11.0, "Second page"));
        surface.finish(&make_info())
    }

    #[test]
    fn test_finish_writes_pdf_header_and_structure() {
        let bytes = sample_document();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"/Outlines"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/Times-Italic"));
        assert!(contains(&bytes, b"mailto:jane@example.com"));
        assert!(contains(&bytes, b"/Count 2"));
    }

    #[test]
    fn test_text_is_extractable() {
        let bytes = sample_document();
        let text = pdf_extract::extract_text_from_mem(&bytes).expect("extract text");
        assert!(text.contains("Jane Doe"), "extracted: {text}");
        assert!(text.contains("Second page"), "extracted: {text}");
    }

    #[test]
    fn test_bookmark_records_current_page() {
        let mut surface = PdfSurface::new(PageGeometry::letter(&Margins::default()));
        surface.add_page();
        surface.add_page();
        surface.bookmark("Projects", 0);
        assert_eq!(surface.bookmarks[0].page, 1);
        assert_eq!(surface.page_number(), 2);
    }

    #[test]
    fn test_font_keys_are_stable_per_face() {
        let mut surface = PdfSurface::new(PageGeometry::letter(&Margins::default()));
        let regular = FontSpec::new(FontFamily::Helvetica, FontStyle::Regular, 11.0);
        let bold = FontSpec::new(FontFamily::Helvetica, FontStyle::Bold, 11.0);
        assert_eq!(surface.font_key(regular), "F1");
        assert_eq!(surface.font_key(bold), "F2");
        assert_eq!(
            surface.font_key(FontSpec { size_pt: 20.0, ..regular }),
            "F1"
        );
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("A é\u{2022}€"), vec![b'A', b' ', 0xe9, 0x95, 0x80]);
        assert_eq!(encode_win_ansi("\u{4e2d}"), vec![b'?']);
    }
}
