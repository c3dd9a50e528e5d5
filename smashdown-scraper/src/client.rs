use std::time::Duration;

use reqwest::Url;

use crate::error::ScrapeError;
use crate::nap::Nap;
use crate::parser::{parse_game_page, parse_home_page};
use crate::types::{GameInfo, SongInfo};
use crate::writer::HtmlWriter;

pub const DEFAULT_BASE_URL: &str = "http://www.smashcustommusic.net";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of game and song listings and of song payloads.
///
/// Methods take `&mut self` because real clients keep request pacing state.
pub trait SiteClient {
    /// Every game listed on the home page.
    fn fetch_game_list(&mut self) -> Result<Vec<GameInfo>, ScrapeError>;

    /// Every song listed on the page of `game_id`.
    fn fetch_song_list(&mut self, game_id: u64) -> Result<Vec<SongInfo>, ScrapeError>;

    /// Raw bytes of the audio file for `song_id`.
    fn fetch_song_file(&mut self, song_id: u64) -> Result<Vec<u8>, ScrapeError>;
}

/// Settings for [`HttpSiteClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub user_agent: String,
    /// Politeness delay range in seconds; `None` disables napping.
    pub nap: Option<(u64, u64)>,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            nap: Some((60, 120)),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Blocking HTTP client for the live site.
pub struct HttpSiteClient {
    http: reqwest::blocking::Client,
    base: Url,
    nap: Nap,
    writer: Option<Box<dyn HtmlWriter>>,
}

impl HttpSiteClient {
    pub fn new(options: ClientOptions) -> Result<Self, ScrapeError> {
        let base = Url::parse(&options.base_url)
            .map_err(|e| ScrapeError::invalid_url(format!("{}: {e}", options.base_url)))?;
        let http = reqwest::blocking::Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.timeout)
            .build()?;
        let nap = match options.nap {
            Some((min, max)) => Nap::new(min, max),
            None => Nap::disabled(),
        };
        Ok(Self {
            http,
            base,
            nap,
            writer: None,
        })
    }

    /// Keep a copy of every listing page fetched.
    pub fn with_writer(mut self, writer: Box<dyn HtmlWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    fn url_for(&self, path: &str) -> Result<Url, ScrapeError> {
        self.base
            .join(path)
            .map_err(|e| ScrapeError::invalid_url(format!("{path}: {e}")))
    }

    fn get(&mut self, url: Url) -> Result<reqwest::blocking::Response, ScrapeError> {
        self.nap.take();
        log::debug!("GET {url}");
        let resp = self.http.get(url.clone()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        log::info!("Fetched {url}");
        Ok(resp)
    }

    fn get_text(&mut self, url: Url) -> Result<String, ScrapeError> {
        Ok(self.get(url)?.text()?)
    }
}

impl SiteClient for HttpSiteClient {
    fn fetch_game_list(&mut self) -> Result<Vec<GameInfo>, ScrapeError> {
        let url = self.base.clone();
        let html = self.get_text(url)?;
        if let Some(writer) = &self.writer {
            writer.write_home_page(&html)?;
        }
        parse_home_page(&html)
    }

    fn fetch_song_list(&mut self, game_id: u64) -> Result<Vec<SongInfo>, ScrapeError> {
        let url = self.url_for(&format!("/game/{game_id}"))?;
        let html = self.get_text(url)?;
        if let Some(writer) = &self.writer {
            writer.write_game_page(game_id, &html)?;
        }
        parse_game_page(&html)
    }

    fn fetch_song_file(&mut self, song_id: u64) -> Result<Vec<u8>, ScrapeError> {
        let url = self.url_for(&format!("/brstm/{song_id}"))?;
        let bytes = self.get(url)?.bytes()?;
        log::debug!("Received {} bytes for song {song_id}", bytes.len());
        Ok(bytes.to_vec())
    }
}
