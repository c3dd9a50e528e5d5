/// A game as listed on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub id: u64,
    pub title: String,
    /// Song count advertised next to the game, when the page shows one.
    pub song_count: Option<u32>,
}

/// A song as listed on a game page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongInfo {
    pub id: u64,
    pub title: String,
}
