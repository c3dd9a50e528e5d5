//! Extraction of game and song listings from site HTML.
//!
//! Only anchors matter: `/game/<id>` links on the home page and `/song/<id>`
//! links on a game page. A link that starts with the expected prefix but does
//! not end in a plain numeric id fails the whole page; a partial listing is
//! never returned.

use std::sync::LazyLock;

use quick_xml::escape::resolve_html5_entity;
use regex::{Captures, Regex};

use crate::error::ScrapeError;
use crate::types::{GameInfo, SongInfo};

static OPEN_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a\b([^>]*)>").expect("static pattern"));

static CLOSE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</a\s*>").expect("static pattern"));

static CLOSE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</[a-zA-Z]").expect("static pattern"));

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).expect("static pattern")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static pattern"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("static pattern")
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("static pattern"));

/// An anchor whose href starts with a given prefix.
struct Link {
    id: u64,
    title: String,
    /// Byte range of the whole anchor element in the page.
    start: usize,
    end: usize,
}

/// Parse the home page into its game list.
///
/// Each game's song count is the first number found in the markup between
/// its anchor and the next game anchor.
pub fn parse_home_page(html: &str) -> Result<Vec<GameInfo>, ScrapeError> {
    let links = find_links(html, "game")?;
    let games: Vec<GameInfo> = links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let tail_end = links.get(i + 1).map_or(html.len(), |next| next.start);
            GameInfo {
                id: link.id,
                title: link.title.clone(),
                song_count: first_number(&html[link.end..tail_end]),
            }
        })
        .collect();
    log::info!("Parsed {} game(s) from home page.", games.len());
    Ok(games)
}

/// Parse a game page into its song list.
pub fn parse_game_page(html: &str) -> Result<Vec<SongInfo>, ScrapeError> {
    let songs: Vec<SongInfo> = find_links(html, "song")?
        .into_iter()
        .map(|link| SongInfo {
            id: link.id,
            title: link.title,
        })
        .collect();
    log::info!("Extracted {} song(s) from game page.", songs.len());
    Ok(songs)
}

fn find_links(html: &str, kind: &str) -> Result<Vec<Link>, ScrapeError> {
    let prefix = format!("/{kind}/");
    let opens: Vec<Captures> = OPEN_ANCHOR.captures_iter(html).collect();
    let mut links = Vec::new();
    for (i, open) in opens.iter().enumerate() {
        let Some(tag) = open.get(0) else {
            continue;
        };
        let Some(href) = href_of(&open[1]) else {
            continue;
        };
        let Some(rest) = href.strip_prefix(&prefix) else {
            continue;
        };
        let id = parse_id(rest)
            .ok_or_else(|| ScrapeError::parsing(format!("unable to find the {kind} id in {href}")))?;
        let limit = opens
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(html.len(), |next| next.start());
        let (body_end, end) = match CLOSE_ANCHOR.find(&html[tag.end()..limit]) {
            Some(close) => (tag.end() + close.start(), tag.end() + close.end()),
            None => {
                log::debug!("Link to {href} is not closed, its text stops at the next tag.");
                let end = CLOSE_TAG
                    .find(&html[tag.end()..limit])
                    .map_or(limit, |m| tag.end() + m.start());
                (end, end)
            }
        };
        links.push(Link {
            id,
            title: text_of(&html[tag.end()..body_end]),
            start: tag.start(),
            end,
        });
    }
    Ok(links)
}

fn href_of(attributes: &str) -> Option<String> {
    let caps = HREF.captures(attributes)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str();
    Some(decode_entities(raw))
}

fn parse_id(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Visible text of an anchor: tags removed, entities decoded, trimmed.
fn text_of(inner: &str) -> String {
    let stripped = TAG.replace_all(inner, "");
    decode_entities(&stripped).trim().to_string()
}

fn first_number(markup: &str) -> Option<u32> {
    let text = TAG.replace_all(markup, " ");
    NUMBER.find(&text).and_then(|m| m.as_str().parse().ok())
}

/// Decode numeric character references and the HTML5 named entities.
/// References that resolve to nothing are kept as written.
pub fn decode_entities(s: &str) -> String {
    ENTITY
        .replace_all(s, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body
                .strip_prefix("#x")
                .or_else(|| body.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32).map(String::from)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32).map(String::from)
            } else {
                resolve_html5_entity(body).map(String::from)
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod tests;
