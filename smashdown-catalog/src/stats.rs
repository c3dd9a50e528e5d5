use crate::types::Site;

/// Aggregate counts over the whole catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub games: usize,
    pub games_visited: usize,
    pub games_not_visited: usize,
    pub games_deleted_from_site: usize,
    pub songs: usize,
    pub songs_downloaded: usize,
    pub songs_not_downloaded: usize,
    pub songs_deleted_from_site: usize,
    /// Oldest "last visit" across visited games.
    pub oldest_game_visit: Option<i64>,
}

impl CatalogStats {
    pub fn collect(site: &Site) -> Self {
        let mut stats = Self::default();
        for game in &site.games {
            stats.games += 1;
            match game.last_checked() {
                Some(ts) => {
                    stats.games_visited += 1;
                    stats.oldest_game_visit =
                        Some(stats.oldest_game_visit.map_or(ts, |oldest| oldest.min(ts)));
                }
                None => stats.games_not_visited += 1,
            }
            if game.is_deleted_from_site {
                stats.games_deleted_from_site += 1;
            }

            for song in &game.songs {
                stats.songs += 1;
                if song.is_downloaded() {
                    stats.songs_downloaded += 1;
                } else {
                    stats.songs_not_downloaded += 1;
                }
                if song.is_deleted_from_site {
                    stats.songs_deleted_from_site += 1;
                }
            }
        }
        stats
    }
}
