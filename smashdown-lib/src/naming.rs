//! Deterministic on-disk layout for downloaded songs.
//!
//! A song lives at `<game id>[_<game slug>]/<song id>[_<song slug>].brstm`
//! relative to the output directory. A slug that comes out empty drops its
//! separator too.

use std::path::PathBuf;

use smashdown_catalog::{Game, Song};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const SONG_EXTENSION: &str = "brstm";

/// Remove diacritics by decomposing and dropping combining marks.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lowercase ASCII slug: every run of characters outside `[a-z0-9]` becomes a
/// single `_`, with none at either end.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut separator = false;
    for c in strip_diacritics(text).to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if separator && !slug.is_empty() {
                slug.push('_');
            }
            separator = false;
            slug.push(c);
        } else {
            separator = true;
        }
    }
    slug
}

fn id_with_slug(id: u64, title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        id.to_string()
    } else {
        format!("{id}_{slug}")
    }
}

/// Directory of a game's songs, relative to the output directory.
pub fn game_dir(game: &Game) -> PathBuf {
    PathBuf::from(id_with_slug(game.id, &game.title))
}

/// Location of a song's file, relative to the output directory.
pub fn song_path(game: &Game, song: &Song) -> PathBuf {
    game_dir(game).join(format!(
        "{}.{SONG_EXTENSION}",
        id_with_slug(song.id, &song.title)
    ))
}
