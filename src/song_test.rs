use crate::album::AlbumType;
use crate::fetch::PageStore;
use crate::remote::RemoteIdentity;
use crate::serialize::Encoding;
use crate::song::*;
use crate::testing;

#[test]
fn test_new_song() {
    let song = Song::new("bon iver", "re: stacks");
    assert_eq!(song.artist_name(), "Bon Iver");
    assert_eq!(song.name(), "Re: Stacks");
    assert_eq!(song.album_name(), None);
    assert_eq!(song.url().as_deref(), Some("https://lyrics.fandom.com/wiki/Bon_Iver:Re:_Stacks"));
}

#[test]
fn test_lyrics_are_fetched_once() {
    let store = testing::page_store();
    let mut song = Song::new("daughter", "candles");
    assert_eq!(song.lyrics(&store), "Candles\nburn slow");
    assert_eq!(song.lyrics(&store), "Candles\nburn slow");
    assert_eq!(store.request_count(&testing::url("/wiki/Daughter:Candles")), 1);
}

#[test]
fn test_lyrics_of_missing_page() {
    testing::init();
    let store = PageStore::new();
    let mut song = Song::new("daughter", "unreleased");
    assert_eq!(song.lyrics(&store), "");

    // Retried once the page is available.
    let store =
        store.with_page(testing::url("/wiki/Daughter:Unreleased"), testing::song_page("Daughter:Unreleased", "Soon"));
    assert_eq!(song.lyrics(&store), "Soon");
}

#[test]
fn test_set_and_clear_lyrics() {
    let store = testing::page_store();
    let mut song = Song::new("daughter", "landfill");
    song.set_lyrics("Offline copy");
    assert_eq!(song.lyrics(&store), "Offline copy");
    assert!(store.requests().is_empty());

    song.clear_lyrics();
    assert_eq!(song.lyrics(&store), "Landfill");
}

#[test]
fn test_lyrics_strip_bold_wrapper_and_instrumental() {
    testing::init();
    let store = PageStore::new()
        .with_page(
            testing::url("/wiki/Daughter:Bold"),
            testing::song_page("Daughter:Bold Lyrics", "<b>Kept<br/>lines</b> dropped"),
        )
        .with_page(
            testing::url("/wiki/Daughter:Intro"),
            testing::song_page("Daughter:Intro Lyrics", "Instrumental"),
        );
    assert_eq!(Song::new("daughter", "bold").lyrics(&store), "Kept\nlines");
    assert_eq!(Song::new("daughter", "intro").lyrics(&store), "");
}

#[test]
fn test_unregister_keeps_names() {
    let mut song = Song::new("daughter", "youth").on_album("the wild youth", Some("2011"), Some(AlbumType::Ep));
    song.unregister();
    assert_eq!(song.album_name(), Some("The Wild Youth"));
    assert_eq!(song.album_id(), None);
    assert_eq!(song.artist_id(), None);
}

#[test]
fn test_from_url_finds_song_in_discography() {
    let store = testing::page_store();
    let mut song = Song::from_url(&testing::url("/wiki/Daughter:Love"), &store).unwrap();
    assert_eq!(song.name(), "Love");
    assert_eq!(song.album_name(), Some("His Young Heart"));
    assert_eq!(song.album_type(), Some(AlbumType::Ep));
    assert_eq!(song.lyrics(&store), "Love");
    assert_eq!(store.request_count(&testing::url("/wiki/Daughter:Love")), 1);
}

#[test]
fn test_from_url_outside_discography() {
    let store = testing::page_store().with_page(
        testing::url("/wiki/Daughter:Demo_Song"),
        testing::song_page("Daughter:Demo Song Lyrics", "Demo"),
    );
    let mut song = Song::from_url(&testing::url("/wiki/Daughter:Demo_Song"), &store).unwrap();
    assert_eq!(song.name(), "Demo Song");
    assert_eq!(song.album_name(), None);
    assert_eq!(song.lyrics(&store), "Demo");
}

#[test]
fn test_display() {
    let song = Song::new("daughter", "youth").on_album("the wild youth", Some("2011"), Some(AlbumType::Ep));
    assert_eq!(song.to_string(), "Daughter: \"Youth\", from EP \"The Wild Youth\" (2011)");
    assert_eq!(Song::new("daughter", "youth").to_string(), "Daughter: \"Youth\"");
}

#[test]
fn test_to_json_ascii() {
    testing::init();
    let store = PageStore::new().with_page(
        testing::url("/wiki/Sigur_R%C3%B3s:Hopp%C3%ADpolla"),
        testing::song_page("Sigur Rós:Hoppípolla Lyrics", "Hoppípolla"),
    );
    let mut song = Song::new("sigur rós", "hoppípolla");
    let value = song.to_json(&store, Encoding::Ascii).unwrap();
    assert_eq!(value["artist"], "Sigur Ros");
    assert_eq!(value["song"], "Hoppipolla");
    assert_eq!(value["lyrics"], "Hoppipolla");
    assert_eq!(value["album"], serde_json::Value::Null);
    assert_eq!(value["url"], "https://lyrics.fandom.com/wiki/Sigur_R%C3%B3s:Hopp%C3%ADpolla");
}
