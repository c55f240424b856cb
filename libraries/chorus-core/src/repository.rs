//! Repository traits consumed by the access resolver and services
//!
//! These abstract the relational store so the core can run against the
//! `SQLite` implementation in `chorus-storage` or the in-process
//! [`MemoryStore`](crate::memory::MemoryStore).

use crate::error::Result;
use crate::types::{
    Collaboration, CollaborationId, MembershipId, NewPlaylist, Playlist, PlaylistId,
    PlaylistSummary, SongId, SongSummary, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence for playlists
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    /// Look up a playlist by id
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Look up a playlist joined with its owner's username
    async fn find_summary(&self, id: &PlaylistId) -> Result<Option<PlaylistSummary>>;

    /// Insert a playlist and return the stored id
    async fn insert(&self, playlist: NewPlaylist) -> Result<PlaylistId>;

    /// Delete a playlist, returning whether a row was removed
    async fn delete(&self, id: &PlaylistId) -> Result<bool>;

    /// Playlists the user owns or collaborates on
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>>;
}

/// Persistence for collaborator grants
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollaborationRepository: Send + Sync {
    /// Whether a collaboration record exists for the pair
    async fn is_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool>;

    /// Grant collaboration and return the record id
    async fn add_collaborator(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<CollaborationId>;

    /// Revoke collaboration, returning whether a record was removed
    async fn remove_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId)
        -> Result<bool>;

    /// Collaboration records on a playlist, oldest grant first
    async fn list_collaborators(&self, playlist_id: &PlaylistId) -> Result<Vec<Collaboration>>;
}

/// Persistence for playlist song membership
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaylistSongRepository: Send + Sync {
    /// Insert a membership record and return its id
    async fn add_membership(&self, playlist_id: &PlaylistId, song_id: &SongId)
        -> Result<MembershipId>;

    /// Songs in the playlist (possibly empty)
    async fn list_members(&self, playlist_id: &PlaylistId) -> Result<Vec<SongSummary>>;

    /// Remove every membership of the song, returning the number of rows removed
    async fn remove_membership(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<u64>;
}

/// External song catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SongCatalog: Send + Sync {
    async fn song_exists(&self, song_id: &SongId) -> Result<bool>;
}

/// External user directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, user_id: &UserId) -> Result<bool>;
}

/// Repository handles injected into the resolver and services
#[derive(Clone)]
pub struct Repositories {
    pub playlists: Arc<dyn PlaylistRepository>,
    pub collaborations: Arc<dyn CollaborationRepository>,
    pub memberships: Arc<dyn PlaylistSongRepository>,
    pub songs: Arc<dyn SongCatalog>,
    pub users: Arc<dyn UserDirectory>,
}

impl Repositories {
    /// Use one store for every repository role
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PlaylistRepository
            + CollaborationRepository
            + PlaylistSongRepository
            + SongCatalog
            + UserDirectory
            + 'static,
    {
        Self {
            playlists: store.clone(),
            collaborations: store.clone(),
            memberships: store.clone(),
            songs: store.clone(),
            users: store,
        }
    }
}
