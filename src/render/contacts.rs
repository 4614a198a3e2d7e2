//! Contacts block.

use super::templates;
use super::{set_html, set_text};
use crate::models::Contacts;
use crate::page::Page;

pub fn render_contacts(page: &mut Page, contacts: &Contacts) {
    set_text(page, "#contacts-text", &contacts.text);
    set_html(
        page,
        "#contacts-links",
        &templates::contact_links(&contacts.links),
    );
}
