//! Playlist building against the Spotify Web API.
//!
//! The pipeline only ever talks to [`SpotifyApi`], a four-call slice of the
//! Web API; the real implementation sits on `rspotify::AuthCodeSpotify` and
//! tests substitute a recording fake.

use async_trait::async_trait;
use rspotify::model::{Id, PlayableId, PlaylistId, SearchResult, SearchType, TrackId, UserId};
use rspotify::prelude::{BaseClient, OAuthClient};
use rspotify::AuthCodeSpotify;

use crate::error::{Error, Result};

fn playlist_name(date: &str) -> String {
    format!("Billboard Top 100 • {date}")
}

fn playlist_description(date: &str) -> String {
    format!("Billboard Hot-100 songs for {date}")
}

/// A freshly created playlist: its id for the add call that follows, and the
/// public share link reported back to the user.
#[derive(Debug, Clone)]
pub struct CreatedPlaylist {
    pub id: PlaylistId<'static>,
    pub url: String,
}

/// The slice of the Spotify Web API the playlist builder needs.
#[async_trait(?Send)]
pub trait SpotifyApi {
    /// The id of the user the session belongs to; playlists are created
    /// under this identity.
    async fn current_user_id(&self) -> Result<UserId<'static>>;

    /// Creates a public, non-collaborative playlist owned by `user`.
    async fn create_playlist(
        &self,
        user: UserId<'static>,
        name: &str,
        description: &str,
    ) -> Result<CreatedPlaylist>;

    /// Best search match for `query`, or `None` when the search comes back
    /// empty. There is no fuzzy re-query.
    async fn search_track(&self, query: &str) -> Result<Option<TrackId<'static>>>;

    /// Appends `tracks` to `playlist` in one call.
    async fn add_tracks(
        &self,
        playlist: PlaylistId<'static>,
        tracks: Vec<TrackId<'static>>,
    ) -> Result<()>;
}

#[async_trait(?Send)]
impl SpotifyApi for AuthCodeSpotify {
    async fn current_user_id(&self) -> Result<UserId<'static>> {
        let user = self.me().await?;
        Ok(user.id)
    }

    async fn create_playlist(
        &self,
        user: UserId<'static>,
        name: &str,
        description: &str,
    ) -> Result<CreatedPlaylist> {
        let playlist = self
            .user_playlist_create(user, name, Some(true), Some(false), Some(description))
            .await
            .map_err(|err| Error::CreatePlaylist(err.to_string()))?;

        let url = playlist
            .external_urls
            .get("spotify")
            .cloned()
            .unwrap_or_else(|| playlist.id.url());

        Ok(CreatedPlaylist {
            id: playlist.id,
            url,
        })
    }

    async fn search_track(&self, query: &str) -> Result<Option<TrackId<'static>>> {
        let found = self
            .search(query, SearchType::Track, None, None, Some(1), None)
            .await?;

        match found {
            SearchResult::Tracks(page) => {
                Ok(page.items.into_iter().next().and_then(|track| track.id))
            }
            _ => Ok(None),
        }
    }

    async fn add_tracks(
        &self,
        playlist: PlaylistId<'static>,
        tracks: Vec<TrackId<'static>>,
    ) -> Result<()> {
        let items = tracks.into_iter().map(PlayableId::Track);
        self.playlist_add_items(playlist, items, None).await?;
        Ok(())
    }
}

/// Creates the dated playlist under `user` and fills it with the best match
/// for every title, returning the share link.
///
/// Titles whose search comes back empty are skipped without any user-visible
/// record, so the playlist can legitimately hold fewer tracks than the chart
/// listed. Search and add failures abort the run after the playlist already
/// exists; nothing deletes it on the way out.
pub async fn build_playlist(
    spotify: &impl SpotifyApi,
    user: UserId<'static>,
    date: &str,
    titles: &[String],
) -> Result<String> {
    let name = playlist_name(date);
    let playlist = spotify
        .create_playlist(user, &name, &playlist_description(date))
        .await?;
    log::info!("[Spotify] Created playlist '{name}'");

    let mut tracks = Vec::new();
    for title in titles {
        match spotify.search_track(title).await? {
            Some(id) => tracks.push(id),
            None => log::debug!("[Spotify] No match for '{title}'"),
        }
    }
    log::info!(
        "[Spotify] Resolved {} of {} titles",
        tracks.len(),
        titles.len()
    );

    // One add call. The endpoint takes at most 100 ids per call and a Hot
    // 100 chart yields at most 100, so no chunking; longer charts would
    // overflow this.
    if !tracks.is_empty() {
        spotify.add_tracks(playlist.id.clone(), tracks).await?;
    }

    Ok(playlist.url)
}
