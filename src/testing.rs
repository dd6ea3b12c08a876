use std::sync::Once;

use crate::config::DEFAULT_BASE_URL;
use crate::fetch::PageStore;

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn url(href: &str) -> String {
    format!("{DEFAULT_BASE_URL}{href}")
}

// An artist page with an empty release, a four track EP in an ordered list, a compilation in an
// unordered list holding a cover, an info table and an external links section.
pub const ARTIST_PAGE: &str = r#"<html><body>
<h1>Daughter</h1>
<div class="artist-info">
  <div class="css-table-cell">
    <p>years active:</p>
    <div><p>2010 - present</p></div>
    <p>genres:</p>
    <div><ul><li><a href="/wiki/Indie_Folk">Indie Folk</a></li><li><a
      href="/wiki/Dream_Pop">Dream Pop</a></li><li><b>Indie Folk</b></li></ul></div>
  </div>
</div>
<h2><span class="mw-headline" id="Demo_.282009.29">Demo (2009)</span></h2>
<p>No track listing yet.</p>
<h2><span class="mw-headline" id="His_Young_Heart_.282011.29">His Young Heart (2011)</span></h2>
<ol>
  <li><b><a href="/wiki/Daughter:Candles" title="Daughter:Candles">Candles</a></b></li>
  <li><b><a href="/wiki/Daughter:Landfill" title="Daughter:Landfill">Landfill</a></b></li>
  <li><b><a href="/wiki/Daughter:Love" title="Daughter:Love">Love</a></b></li>
  <li><b><a href="/index.php?title=Daughter:Human&amp;action=edit"
      title="Daughter:Human (page does not exist)">Human</a></b></li>
</ol>
<h2><span class="mw-headline" id="Other_Songs">Other Songs</span></h2>
<ul>
  <li><a href="/wiki/Daughter:Get_Lucky" title="Daughter:Get Lucky">Get Lucky</a></li>
  <li><a href="/wiki/Ben_Howard:Youth" title="Ben Howard:Youth">Youth</a></li>
  <li><a href="/wiki/Daughter">Daughter</a></li>
</ul>
<h2><span class="mw-headline" id="External_links">External links</span></h2>
<div>Spotify: <a class="external text" href="https://open.spotify.com/artist/daughter">Daughter</a></div>
<div>MySpace: <a class="external text" href="https://myspace.com/daughter">Daughter</a></div>
<div>Last.fm: <a class="external text" href="https://www.last.fm/music/Daughter">Daughter</a> <a class="external text"
  href="https://www.last.fm/music/Daughter/+wiki">Wiki</a></div>
</body></html>"#;

pub fn song_page(header: &str, lyricbox: &str) -> String {
    format!(
        r#"<html><body><h1>{header}</h1>
<div class="lyricbox">{lyricbox}<div class="lyricsbreak"></div></div></body></html>"#
    )
}

pub fn album_page(header: &str) -> String {
    format!(r#"<html><body><h1>{header}</h1><p>Album page</p></body></html>"#)
}

/// A store holding [`ARTIST_PAGE`] and the lyrics pages of its EP.
pub fn page_store() -> PageStore {
    init();
    PageStore::new()
        .with_page(url("/wiki/Daughter"), ARTIST_PAGE)
        .with_page(url("/wiki/Daughter:Candles"), song_page("Daughter:Candles Lyrics", "Candles<br/>burn <i>slow</i>"))
        .with_page(url("/wiki/Daughter:Landfill"), song_page("Daughter:Landfill Lyrics", "Landfill"))
        .with_page(url("/wiki/Daughter:Love"), song_page("Daughter:Love Lyrics", "Love"))
        .with_page(url("/wiki/Daughter:Human"), song_page("Daughter:Human Lyrics", "Human"))
        .with_page(url("/wiki/Daughter:His_Young_Heart_(2011)"), album_page("Daughter:His Young Heart (2011)"))
}
