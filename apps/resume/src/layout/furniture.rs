//! Running header and footer drawn on every page.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};

use crate::layout::font_metrics::{FontFamily, FontSpec, FontStyle};
use crate::models::Resume;
use crate::surface::{Align, Cell, Surface};

const HEADER_NAME_PT: f32 = 18.0;
const HEADER_FLAVOR_PT: f32 = 14.0;
const HEADER_ADVANCE: f32 = 5.0;
const FOOTER_PT: f32 = 8.0;
/// Footer baseline row, measured up from the bottom edge.
const FOOTER_OFFSET: f32 = -15.0;
const FOOTER_HEIGHT: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct Furniture {
    pub name: String,
    pub header_flavor: String,
    pub footer_flavor: String,
    pub header_family: FontFamily,
    pub footer_family: FontFamily,
    /// Render time, shared by every page's footer stamp.
    pub stamp: DateTime<Utc>,
}

impl Furniture {
    pub fn from_resume(resume: &Resume, stamp: DateTime<Utc>) -> Self {
        let controls = &resume.controls;
        Furniture {
            name: resume.contact.name.clone(),
            header_flavor: controls.flavor.header.clone(),
            footer_flavor: controls.flavor.footer.clone(),
            header_family: controls.pdf.fonts.header,
            footer_family: controls.pdf.fonts.footer,
            stamp,
        }
    }

    /// Name on the left, header flavor flush right.
    pub fn draw_header<S: Surface>(&self, surface: &mut S) {
        surface.set_font(FontSpec::new(self.header_family, FontStyle::BoldItalic, HEADER_NAME_PT));
        surface.cell(Cell::new(0.0, 0.0, &self.name));

        surface.set_font(FontSpec::new(self.header_family, FontStyle::BoldItalic, HEADER_FLAVOR_PT));
        surface.cell(Cell::new(0.0, 0.0, &self.header_flavor).align(Align::Right));
        surface.line_break(HEADER_ADVANCE);
    }

    /// Digest on the left, stamp flush right.
    pub fn draw_footer<S: Surface>(&self, surface: &mut S) {
        surface.set_font(FontSpec::new(self.footer_family, FontStyle::Italic, FOOTER_PT));
        surface.set_y(FOOTER_OFFSET);

        let stamp = self.footer_stamp(surface.page_number());
        let digest = stamp_digest(&stamp);
        let digest_width = surface.text_width(&digest);

        surface.cell(Cell::new(digest_width, FOOTER_HEIGHT, &digest));
        surface.cell(Cell::new(0.0, FOOTER_HEIGHT, &stamp).align(Align::Right));
    }

    /// `"<flavor>_<YYYY-MM-DD-HH-MM-SS+ZZZZ>_p<page>"`.
    pub fn footer_stamp(&self, page: usize) -> String {
        format!(
            "{}_{}_p{}",
            self.footer_flavor,
            self.stamp.format("%Y-%m-%d-%H-%M-%S%z"),
            page
        )
    }
}

/// SHA-1 of the stamp, URL-safe base64 with padding.
pub fn stamp_digest(stamp: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(stamp.as_bytes());
    URL_SAFE.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::controls::Margins;
    use crate::surface::recording::{Op, RecordingSurface};
    use crate::surface::PageGeometry;
    use chrono::TimeZone;

    fn furniture() -> Furniture {
        Furniture {
            name: "Jane Doe".to_string(),
            header_flavor: "Backend Engineer".to_string(),
            footer_flavor: "jdoe".to_string(),
            header_family: FontFamily::Helvetica,
            footer_family: FontFamily::Times,
            stamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_footer_stamp_format() {
        assert_eq!(
            furniture().footer_stamp(2),
            "jdoe_2024-01-02-03-04-05+0000_p2"
        );
    }

    #[test]
    fn test_stamp_digest_is_url_safe_sha1() {
        // sha1("abc") = a9993e36 4706816a ba3e2571 7850c26c 9cd0d89d
        assert_eq!(stamp_digest("abc"), "qZk-NkcGgWq6PiVxeFDCbJzQ2J0=");
        assert_eq!(stamp_digest("abc").len(), 28);
    }

    #[test]
    fn test_footer_drawn_fifteen_mm_from_bottom() {
        let mut surface = RecordingSurface::new(PageGeometry::letter(&Margins::default()));
        surface.add_page();
        furniture().draw_footer(&mut surface);

        let cells: Vec<&Op> = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Cell { .. }))
            .collect();
        assert_eq!(cells.len(), 2);
        if let Op::Cell { y, text, align, .. } = cells[1] {
            assert!((y - 264.4).abs() < 1e-3);
            assert_eq!(text, "jdoe_2024-01-02-03-04-05+0000_p1");
            assert_eq!(*align, Align::Right);
        }
    }

    #[test]
    fn test_header_advances_five_mm() {
        let mut surface = RecordingSurface::new(PageGeometry::letter(&Margins::default()));
        surface.add_page();
        furniture().draw_header(&mut surface);
        assert_eq!(surface.texts(), vec!["Jane Doe", "Backend Engineer"]);
        assert!((surface.y() - 15.0).abs() < 1e-3);
    }
}
