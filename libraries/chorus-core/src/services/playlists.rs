//! Playlist orchestration
//!
//! Every operation that reads playlist content or mutates it runs through
//! the [`AccessResolver`] first and aborts before touching the repositories
//! when the decision is not a grant.
//!
//! | Operation         | Check               |
//! |-------------------|---------------------|
//! | `create_playlist` | none                |
//! | `list_playlists`  | none (query filter) |
//! | `get_playlist`    | owner or collaborator |
//! | `add_song`        | owner or collaborator |
//! | `remove_song`     | owner only          |
//! | `delete_playlist` | owner only          |

use super::logged;
use crate::access::{AccessResolver, Grant};
use crate::error::{ChorusError, Result};
use crate::repository::{PlaylistRepository, PlaylistSongRepository, Repositories, SongCatalog};
use crate::types::*;
use std::sync::Arc;
use tracing::instrument;

/// Playlist and membership operations
#[derive(Clone)]
pub struct PlaylistService {
    resolver: AccessResolver,
    playlists: Arc<dyn PlaylistRepository>,
    memberships: Arc<dyn PlaylistSongRepository>,
    songs: Arc<dyn SongCatalog>,
}

impl PlaylistService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            resolver: AccessResolver::new(repos.playlists.clone(), repos.collaborations.clone()),
            playlists: repos.playlists.clone(),
            memberships: repos.memberships.clone(),
            songs: repos.songs.clone(),
        }
    }

    pub fn resolver(&self) -> &AccessResolver {
        &self.resolver
    }

    /// Create a playlist owned by `user_id`
    #[instrument(skip(self))]
    pub async fn create_playlist(&self, user_id: &UserId, name: &str) -> Result<PlaylistId> {
        logged("create_playlist", self.create_inner(user_id, name).await)
    }

    async fn create_inner(&self, user_id: &UserId, name: &str) -> Result<PlaylistId> {
        if name.trim().is_empty() {
            return Err(ChorusError::invalid_input("Playlist name must not be empty"));
        }

        let id = self
            .playlists
            .insert(NewPlaylist::new(name, user_id.clone()))
            .await?;
        if id.is_empty() {
            return Err(ChorusError::invariant("Playlist could not be added"));
        }

        tracing::info!(playlist_id = %id, "Created playlist");
        Ok(id)
    }

    /// Playlists the user owns or collaborates on
    #[instrument(skip(self))]
    pub async fn list_playlists(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
        logged("list_playlists", self.playlists.list_for_user(user_id).await)
    }

    /// Playlist header plus its songs, for owners and collaborators
    #[instrument(skip(self))]
    pub async fn get_playlist(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<PlaylistDetail> {
        logged("get_playlist", self.get_inner(playlist_id, user_id).await)
    }

    async fn get_inner(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<PlaylistDetail> {
        self.require_access(playlist_id, user_id).await?;

        let summary = self
            .playlists
            .find_summary(playlist_id)
            .await?
            .ok_or_else(|| ChorusError::PlaylistNotFound(playlist_id.clone()))?;

        let songs = self.memberships.list_members(playlist_id).await?;
        // An empty playlist is reported exactly like a missing one. Callers
        // cannot tell the two apart until product intent says otherwise.
        if songs.is_empty() {
            return Err(ChorusError::PlaylistNotFound(playlist_id.clone()));
        }

        Ok(PlaylistDetail::new(summary, songs))
    }

    /// Add a catalog song to the playlist, for owners and collaborators
    #[instrument(skip(self))]
    pub async fn add_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<MembershipId> {
        logged(
            "add_song",
            self.add_song_inner(playlist_id, song_id, user_id).await,
        )
    }

    async fn add_song_inner(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<MembershipId> {
        self.require_access(playlist_id, user_id).await?;

        if !self.songs.song_exists(song_id).await? {
            return Err(ChorusError::SongNotFound(song_id.clone()));
        }

        let id = self.memberships.add_membership(playlist_id, song_id).await?;
        if id.is_empty() {
            return Err(ChorusError::invariant("Song could not be added to playlist"));
        }

        tracing::info!(playlist_id = %playlist_id, song_id = %song_id, "Added song to playlist");
        Ok(id)
    }

    /// Remove a song from the playlist. Owner only.
    #[instrument(skip(self))]
    pub async fn remove_song(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<()> {
        logged(
            "remove_song",
            self.remove_song_inner(playlist_id, song_id, user_id).await,
        )
    }

    async fn remove_song_inner(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
    ) -> Result<()> {
        self.require_owner(playlist_id, user_id).await?;

        let removed = self
            .memberships
            .remove_membership(playlist_id, song_id)
            .await?;
        if removed == 0 {
            return Err(ChorusError::invariant("Song could not be removed"));
        }

        tracing::info!(playlist_id = %playlist_id, song_id = %song_id, removed, "Removed song from playlist");
        Ok(())
    }

    /// Delete the playlist. Owner only.
    #[instrument(skip(self))]
    pub async fn delete_playlist(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        logged("delete_playlist", self.delete_inner(playlist_id, user_id).await)
    }

    async fn delete_inner(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
        self.require_owner(playlist_id, user_id).await?;

        if !self.playlists.delete(playlist_id).await? {
            return Err(ChorusError::PlaylistNotFound(playlist_id.clone()));
        }

        tracing::info!(playlist_id = %playlist_id, "Deleted playlist");
        Ok(())
    }

    async fn require_access(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<Grant> {
        self.resolver
            .resolve_access(playlist_id, user_id)
            .await?
            .authorize(playlist_id)
    }

    async fn require_owner(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<Grant> {
        self.resolver
            .resolve_ownership(playlist_id, user_id)
            .await?
            .authorize(playlist_id)
    }
}
