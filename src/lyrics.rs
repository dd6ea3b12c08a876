//! Turns the serialized lyrics container of a song page into plain text.

use once_cell::sync::Lazy;
use regex::Regex;

static LYRICBOX_OPEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<div[^>]*class="lyricbox"[^>]*>"#).unwrap());
static LYRICSBREAK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"<div[^>]*class="lyricsbreak"[^>]*>"#).unwrap());
static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br\s*/?>").unwrap());

const ENTITIES: &[(&str, &str)] = &[("&nbsp;", " "), ("&lt;", "<"), ("&gt;", ">"), ("&quot;", "\""), ("&amp;", "&")];

pub fn process_lyrics(raw: &str) -> String {
    let mut lyrics = match LYRICBOX_OPEN_REGEX.find_iter(raw).last() {
        Some(m) => &raw[m.end()..],
        None => raw,
    };
    if let Some(m) = LYRICSBREAK_REGEX.find(lyrics) {
        lyrics = &lyrics[..m.start()];
    }
    let lyrics = lyrics.trim_end();
    let lyrics = lyrics.strip_suffix("</div>").unwrap_or(lyrics);

    let lyrics = match lyrics.find("<b>") {
        Some(open) => {
            let inner = &lyrics[open + "<b>".len()..];
            inner.split("</b>").next().unwrap_or_default()
        }
        None => lyrics,
    };

    let lyrics = lyrics.replace("Instrumental", "").replace("<i>", "").replace("</i>", "").replace('\n', "");
    let mut lyrics = LINE_BREAK_REGEX.replace_all(&lyrics, "\n").into_owned();
    for (entity, text) in ENTITIES {
        lyrics = lyrics.replace(entity, text);
    }
    lyrics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_container_passes_text_through() {
        assert_eq!(process_lyrics(""), "");
        assert_eq!(process_lyrics("la la<br/>la"), "la la\nla");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(process_lyrics(r#"<div class="lyricbox">Rock &amp; Roll</div>"#), "Rock & Roll");
    }
}
