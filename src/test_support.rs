//! Hand-rolled recording fakes for the two remote seams.
//!
//! Every call is appended to an ordered log so tests can assert on the exact
//! sequence, not just the end state. Interior mutability keeps the fakes
//! usable through the `&self` trait methods.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::spotify::{CreatedPlaylist, SpotifyApi};
use crate::web_scraper::ChartSource;
use rspotify::model::{Id, PlaylistId, TrackId, UserId};

pub const PLAYLIST_ID: &str = "3cEYpjA9oz9GiPac4AsH4n";
pub const SHARE_URL: &str = "https://open.spotify.com/playlist/3cEYpjA9oz9GiPac4AsH4n";

pub fn track(raw: &'static str) -> TrackId<'static> {
    TrackId::from_id(raw).unwrap()
}

pub fn user() -> UserId<'static> {
    UserId::from_id("billboardfan").unwrap()
}

/// One observed call against [`FakeSpotify`], in argument-bearing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CurrentUser,
    CreatePlaylist { name: String, description: String },
    SearchTrack { query: String },
    AddTracks { playlist: String, count: usize },
}

/// In-memory Spotify that resolves a fixed title-to-id table and records
/// everything asked of it.
pub struct FakeSpotify {
    hits: HashMap<String, TrackId<'static>>,
    calls: RefCell<Vec<Call>>,
    pub fail_create: bool,
    pub fail_search: bool,
}

impl FakeSpotify {
    pub fn resolving(pairs: &[(&'static str, &'static str)]) -> Self {
        let hits = pairs
            .iter()
            .map(|&(title, id)| (title.to_string(), track(id)))
            .collect();
        Self {
            hits,
            calls: RefCell::new(Vec::new()),
            fail_create: false,
            fail_search: false,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl SpotifyApi for FakeSpotify {
    async fn current_user_id(&self) -> Result<UserId<'static>> {
        self.record(Call::CurrentUser);
        Ok(user())
    }

    async fn create_playlist(
        &self,
        _user: UserId<'static>,
        name: &str,
        description: &str,
    ) -> Result<CreatedPlaylist> {
        self.record(Call::CreatePlaylist {
            name: name.to_string(),
            description: description.to_string(),
        });
        if self.fail_create {
            return Err(Error::CreatePlaylist("quota exceeded".to_string()));
        }
        Ok(CreatedPlaylist {
            id: PlaylistId::from_id(PLAYLIST_ID).unwrap(),
            url: SHARE_URL.to_string(),
        })
    }

    async fn search_track(&self, query: &str) -> Result<Option<TrackId<'static>>> {
        self.record(Call::SearchTrack { query: query.to_string() });
        if self.fail_search {
            return Err(Error::Spotify("search backend unavailable".to_string()));
        }
        Ok(self.hits.get(query).cloned())
    }

    async fn add_tracks(
        &self,
        playlist: PlaylistId<'static>,
        tracks: Vec<TrackId<'static>>,
    ) -> Result<()> {
        self.record(Call::AddTracks {
            playlist: playlist.id().to_string(),
            count: tracks.len(),
        });
        Ok(())
    }
}

/// Canned chart that replays a fixed title list and logs the dates asked for.
pub struct FakeChart {
    titles: Vec<String>,
    fetches: RefCell<Vec<String>>,
}

impl FakeChart {
    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            titles: titles.iter().map(|title| title.to_string()).collect(),
            fetches: RefCell::new(Vec::new()),
        }
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ChartSource for FakeChart {
    async fn fetch(&self, date: &str) -> Result<Vec<String>> {
        self.fetches.borrow_mut().push(date.to_string());
        Ok(self.titles.clone())
    }
}

/// Chart source whose fetch always fails, as if the site were down.
pub struct FailingChart;

#[async_trait(?Send)]
impl ChartSource for FailingChart {
    async fn fetch(&self, _date: &str) -> Result<Vec<String>> {
        Err(Error::Fetch("503 Service Unavailable".to_string()))
    }
}
