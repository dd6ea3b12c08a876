use scraper::Html;

use crate::scrape::*;
use crate::testing;

fn artist_doc() -> Html {
    testing::init();
    Html::parse_document(testing::ARTIST_PAGE)
}

#[test]
fn test_scrape_albums_in_page_order() {
    let doc = artist_doc();
    let labels: Vec<String> = scrape_albums(&doc).map(text_of).collect();
    assert_eq!(labels, vec!["Demo (2009)", "His Young Heart (2011)", "Other Songs", "External links"]);
}

#[test]
fn test_scrape_songs_stops_at_next_heading() {
    let doc = artist_doc();
    let heading = scrape_albums(&doc).nth(1).and_then(section_heading).unwrap();
    let titles: Vec<&str> = scrape_songs(heading, CANONICAL_LISTS).filter_map(|a| a.value().attr("title")).collect();
    assert_eq!(
        titles,
        vec!["Daughter:Candles", "Daughter:Landfill", "Daughter:Love", "Daughter:Human (page does not exist)"]
    );
}

#[test]
fn test_scrape_songs_list_tags() {
    let doc = artist_doc();
    let heading = scrape_albums(&doc).nth(2).and_then(section_heading).unwrap();
    assert_eq!(scrape_songs(heading, CANONICAL_LISTS).count(), 0);
    assert_eq!(scrape_songs(heading, ALL_LISTS).count(), 3);
}

#[test]
fn test_scrape_songs_empty_section() {
    let doc = artist_doc();
    let heading = scrape_albums(&doc).next().and_then(section_heading).unwrap();
    assert_eq!(scrape_songs(heading, ALL_LISTS).count(), 0);
}

#[test]
fn test_is_canonical_track() {
    let doc = artist_doc();
    let ep = scrape_albums(&doc).nth(1).and_then(section_heading).unwrap();
    assert!(scrape_songs(ep, CANONICAL_LISTS).all(is_canonical_track));
    let other = scrape_albums(&doc).nth(2).and_then(section_heading).unwrap();
    assert!(!scrape_songs(other, ALL_LISTS).any(is_canonical_track));
}

#[test]
fn test_get_external_links() {
    let doc = artist_doc();
    let links = get_external_links(&doc);
    assert_eq!(links.keys().collect::<Vec<_>>(), vec!["Last.fm", "Spotify"]);
    assert_eq!(
        links["Last.fm"],
        vec!["https://www.last.fm/music/Daughter", "https://www.last.fm/music/Daughter/+wiki"]
    );
    assert_eq!(links["Spotify"], vec!["https://open.spotify.com/artist/daughter"]);
    assert!(links.keys().all(|k| LINK_PLATFORMS.contains(&k.as_str())));
}

#[test]
fn test_get_external_links_accumulates_repeated_platforms() {
    let doc = Html::parse_document(
        r#"<html><body>
<h2><span class="mw-headline" id="External_links">External links</span></h2>
<div>Amazon: <a class="external text" href="https://amazon.com/1">1</a></div>
<div>Amazon: <a class="external text" href="https://amazon.com/2">2</a></div>
<h2><span class="mw-headline">Trivia</span></h2>
<div>Discogs: <a class="external text" href="https://discogs.com/x">x</a></div>
</body></html>"#,
    );
    let links = get_external_links(&doc);
    assert_eq!(links.len(), 1);
    assert_eq!(links["Amazon"], vec!["https://amazon.com/1", "https://amazon.com/2"]);
}

#[test]
fn test_get_external_links_without_section() {
    let doc = Html::parse_document("<html><body><h1>Daughter</h1></body></html>");
    assert!(get_external_links(&doc).is_empty());
}

#[test]
fn test_get_artist_info() {
    let doc = artist_doc();
    let info = get_artist_info(&doc);
    assert_eq!(info["Years Active"], InfoValue::Text("2010 - present".to_string()));
    assert_eq!(info["Genres"], InfoValue::List(vec!["Indie Folk".to_string(), "Dream Pop".to_string()]));
    assert_eq!(info.len(), 2);
}

#[test]
fn test_get_artist_info_label_without_value() {
    let doc = Html::parse_document(
        r#"<html><body><div class="artist-info"><div class="css-table-cell"><p>members:</p></div></div></body></html>"#,
    );
    assert_eq!(get_artist_info(&doc)["Members"], InfoValue::Missing);
}

#[test]
fn test_get_lyrics() {
    let doc = Html::parse_document(&testing::song_page("Daughter:Youth Lyrics", "Line one<br/>Line <i>two</i>\n"));
    assert_eq!(get_lyrics(&doc), "Line one\nLine two");
}

#[test]
fn test_get_lyrics_without_container() {
    let doc = Html::parse_document("<html><body><p>Nothing here</p></body></html>");
    assert_eq!(get_lyrics(&doc), "");
}

#[test]
fn test_get_header() {
    let doc = artist_doc();
    assert_eq!(get_header(&doc).as_deref(), Some("Daughter"));
    let doc = Html::parse_document("<html><body></body></html>");
    assert_eq!(get_header(&doc), None);
}
