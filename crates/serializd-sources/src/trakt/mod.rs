pub mod api;
pub mod client;

pub use api::{TraktEpisode, TraktIds, TraktShowRef};
pub use client::TraktClient;
