//! RSS 2.0 feed of the catalog

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::domains::resources::models::Catalog;

/// Site name used in feed channels and calendar product ids
pub const SITE_NAME: &str = "Teaching Resources Hub";

/// The feed carries the first this-many records in document order
pub const FEED_ITEMS: usize = 50;

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the feed document. `link` is the site root the feed is served from.
pub fn rss_feed(catalog: &Catalog, link: &str, built_at: DateTime<Utc>) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\"><channel>");
    let _ = write!(xml, "<title>{}</title>", escape_xml(SITE_NAME));
    let _ = write!(xml, "<link>{}</link>", escape_xml(link));
    xml.push_str("<description>Latest teaching resources and educational tools</description>");
    xml.push_str("<language>en-us</language>");
    let _ = write!(
        xml,
        "<lastBuildDate>{}</lastBuildDate>",
        built_at.format("%a, %d %b %Y %H:%M:%S GMT")
    );

    for resource in catalog.resources().iter().take(FEED_ITEMS) {
        let url = escape_xml(resource.url.as_deref().unwrap_or_default());
        xml.push_str("<item>");
        let _ = write!(xml, "<title>{}</title>", escape_xml(&resource.name));
        let _ = write!(xml, "<link>{}</link>", url);
        let _ = write!(
            xml,
            "<description>{}</description>",
            escape_xml(&resource.description)
        );
        let _ = write!(xml, "<category>{}</category>", escape_xml(&resource.category));
        let _ = write!(xml, "<guid>{}</guid>", url);
        xml.push_str("</item>");
    }

    xml.push_str("</channel></rss>");
    xml
}
