pub mod client;
pub mod error;
pub mod nap;
pub mod parser;
pub mod types;
pub mod writer;

pub use client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpSiteClient, SiteClient};
pub use error::ScrapeError;
pub use nap::Nap;
pub use parser::{parse_game_page, parse_home_page};
pub use types::{GameInfo, SongInfo};
pub use writer::{FileHtmlWriter, HtmlWriter};
