//! Extraction of albums, songs, links, artist details and lyrics from wiki pages.
//!
//! Wiki pages are loosely structured: an artist page is a flat run of `<h2>` headings, each followed
//! by the lists that make up that album's track listing. Sections are therefore found by walking
//! siblings forward from a heading until the next heading, rather than by selectors alone. Nothing
//! here mutates the document.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::common::uniq;
use crate::lyrics::process_lyrics;
use crate::names::title_case;

static ALBUM_HEADLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2 .mw-headline").unwrap());
static EXTERNAL_LINKS_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("#External_links").unwrap());
static EXTERNAL_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a.external.text").unwrap());
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static BOLD: Lazy<Selector> = Lazy::new(|| Selector::parse("b").unwrap());
static ARTIST_INFO_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("div.artist-info div.css-table-cell").unwrap());
static LYRICBOX: Lazy<Selector> = Lazy::new(|| Selector::parse("div.lyricbox").unwrap());
static PAGE_HEADER: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());

const SECTION_TAG: &str = "h2";

/// Track listings of the artist's own releases.
pub const CANONICAL_LISTS: &[&str] = &["ol"];
/// Track listings including compilations, remixes and other releases.
pub const ALL_LISTS: &[&str] = &["ol", "ul"];

/// Only links to these platforms are kept.
pub const LINK_PLATFORMS: &[&str] = &[
    "Amazon",
    "Last.fm",
    "iTunes",
    "AllMusic",
    "Discogs",
    "MusicBrainz",
    "Spotify",
    "Bandcamp",
    "Wikipedia",
    "Pandora",
    "Hype Machine",
];

/// Platform name to the URLs found for it, in page order.
pub type Links = BTreeMap<String, Vec<String>>;

/// Extra details from an artist page's info table, e.g. `Years Active` or `Genres`.
pub type ArtistInfo = BTreeMap<String, InfoValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Missing,
    Text(String),
    List(Vec<String>),
}

pub fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>()
}

/// Elements following `heading` up to, not including, the next section heading.
fn section_siblings<'a>(heading: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != SECTION_TAG)
}

/// Yields the label of every second-level heading, in page order.
pub fn scrape_albums(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.select(&ALBUM_HEADLINE)
}

/// The `<h2>` that owns a heading label returned by [`scrape_albums`].
pub fn section_heading(label: ElementRef<'_>) -> Option<ElementRef<'_>> {
    label.parent().and_then(ElementRef::wrap)
}

/// Yields the song link of every list item in the section opened by `heading`. Only lists whose tag
/// is in `list_tags` are read.
pub fn scrape_songs<'a>(
    heading: ElementRef<'a>,
    list_tags: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    section_siblings(heading)
        .filter(move |el| list_tags.contains(&el.value().name()))
        .flat_map(|list| list.select(&LIST_ITEM))
        .filter_map(|item| item.select(&ANCHOR).next())
}

/// Whether a song link sits in an ordered track listing (`<ol><li><b><a>`), which marks the section
/// as a proper release whose type can be derived from its length.
pub fn is_canonical_track(link: ElementRef<'_>) -> bool {
    link.ancestors()
        .nth(2)
        .and_then(|node| node.value().as_element().map(|el| el.name() == "ol"))
        .unwrap_or(false)
}

/// Yields the blocks of the "External links" section.
pub fn scrape_external_links(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.select(&EXTERNAL_LINKS_ANCHOR)
        .next()
        .and_then(section_heading)
        .into_iter()
        .flat_map(section_siblings)
        .filter(|el| el.value().name() == "div")
}

pub fn get_external_links(doc: &Html) -> Links {
    let mut links = Links::new();
    for block in scrape_external_links(doc) {
        let text = text_of(block);
        let key = text.split(':').next().unwrap_or_default().trim();
        if !LINK_PLATFORMS.contains(&key) {
            continue;
        }
        for link in block.select(&EXTERNAL_LINK) {
            if let Some(href) = link.value().attr("href") {
                links.entry(key.to_string()).or_default().push(href.to_string());
            }
        }
    }
    links
}

pub fn get_artist_info(doc: &Html) -> ArtistInfo {
    let mut info = ArtistInfo::new();
    let mut key = "other".to_string();
    for cell in doc.select(&ARTIST_INFO_CELL) {
        for child in cell.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "p" => {
                    let label = title_case(text_of(child).trim());
                    key = label.strip_suffix(':').unwrap_or(&label).to_string();
                    info.insert(key.clone(), InfoValue::Missing);
                }
                "div" => {
                    for item in child.children().filter_map(ElementRef::wrap) {
                        match item.value().name() {
                            "p" => {
                                info.insert(key.clone(), InfoValue::Text(text_of(item).trim().to_string()));
                            }
                            "ul" => {
                                let values = item
                                    .select(&ANCHOR)
                                    .chain(item.select(&BOLD))
                                    .map(|el| text_of(el).trim().to_string())
                                    .collect();
                                info.insert(key.clone(), InfoValue::List(uniq(values)));
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
    }
    info
}

pub fn get_lyrics(doc: &Html) -> String {
    doc.select(&LYRICBOX).next().map(|container| process_lyrics(&container.html())).unwrap_or_default()
}

/// The page title, e.g. `Daughter:His Young Heart (2011)`.
pub fn get_header(doc: &Html) -> Option<String> {
    doc.select(&PAGE_HEADER).next().map(|h1| text_of(h1).trim().to_string()).filter(|h| !h.is_empty())
}
