//! Pieces every section shares: the section title band and the contact line.

use crate::layout::context::LayoutContext;
use crate::layout::font_metrics::FontStyle;
use crate::models::Contact;
use crate::surface::{Align, Cell, Surface};

const TITLE_PT: f32 = 14.0;
const TITLE_LEADING: f32 = 11.0;
const TITLE_BAND_HEIGHT: f32 = 8.5;
/// RGB 200/200/200.
const TITLE_BAND_GREY: f32 = 200.0 / 255.0;
/// Space between a section title and its first line, for sections that do
/// not paginate per item.
pub const SECTION_BODY_LEADING: f32 = 8.0;

const CONTACT_PT: f32 = 9.0;

/// Bold title on a grey band, registered as a level-0 bookmark.
pub fn section_title<S: Surface>(ctx: &mut LayoutContext<S>, title: &str) {
    ctx.set_font(FontStyle::Bold, TITLE_PT);
    ctx.line_break(TITLE_LEADING);
    ctx.bookmark(title, 0);
    ctx.cell(Cell::new(0.0, TITLE_BAND_HEIGHT, title).fill(TITLE_BAND_GREY));
}

/// E-mail, phone, URL and location spread evenly across the working width.
pub fn contact_line<S: Surface>(ctx: &mut LayoutContext<S>, contact: &Contact) {
    ctx.set_font(FontStyle::Regular, CONTACT_PT);

    let email_width = ctx.text_width(&contact.email_address);
    let phone_width = ctx.text_width(&contact.phone_number);
    let url_width = ctx.text_width(&contact.url);
    let location_width = ctx.text_width(&contact.location);
    let pad = (ctx.working_width() - email_width - phone_width - url_width - location_width) / 3.0;

    let mailto = link_target("mailto:", &contact.email_address);
    let tel = link_target("tel:", &dialable(&contact.phone_number));

    ctx.cell(Cell::new(email_width, CONTACT_PT, &contact.email_address).link(&mailto));
    ctx.cell(
        Cell::new(phone_width + pad, CONTACT_PT, &contact.phone_number)
            .align(Align::Right)
            .link(&tel),
    );
    ctx.cell(
        Cell::new(url_width + pad, CONTACT_PT, &contact.url)
            .align(Align::Right)
            .link(&contact.url),
    );
    ctx.cell(Cell::new(location_width + pad, CONTACT_PT, &contact.location).align(Align::Right));
}

/// Phone number with `+`, spaces, parentheses and dashes removed.
pub fn dialable(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, '+' | ' ' | '(' | ')' | '-'))
        .collect()
}

fn link_target(scheme: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{scheme}{value}")
    }
}
