use crate::{collaborations, playlist_songs, playlists, songs, users};
use async_trait::async_trait;
use chorus_core::{
    error::Result,
    repository::{
        CollaborationRepository, PlaylistRepository, PlaylistSongRepository, SongCatalog,
        UserDirectory,
    },
    types::*,
};
use sqlx::SqlitePool;

/// `SQLite`-backed implementation of every repository trait
///
/// Holds a pool handle; each call acquires a connection for the duration
/// of one statement.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlaylistRepository for SqliteStore {
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn find_summary(&self, id: &PlaylistId) -> Result<Option<PlaylistSummary>> {
        playlists::get_summary(&self.pool, id).await
    }

    async fn insert(&self, playlist: NewPlaylist) -> Result<PlaylistId> {
        playlists::create(&self.pool, playlist).await
    }

    async fn delete(&self, id: &PlaylistId) -> Result<bool> {
        playlists::delete(&self.pool, id).await
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
        playlists::get_user_playlists(&self.pool, user_id).await
    }
}

#[async_trait]
impl CollaborationRepository for SqliteStore {
    async fn is_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
        collaborations::is_collaborator(&self.pool, playlist_id, user_id).await
    }

    async fn add_collaborator(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<CollaborationId> {
        collaborations::add(&self.pool, playlist_id, user_id).await
    }

    async fn remove_collaborator(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<bool> {
        collaborations::remove(&self.pool, playlist_id, user_id).await
    }

    async fn list_collaborators(&self, playlist_id: &PlaylistId) -> Result<Vec<Collaboration>> {
        collaborations::get_for_playlist(&self.pool, playlist_id).await
    }
}

#[async_trait]
impl PlaylistSongRepository for SqliteStore {
    async fn add_membership(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<MembershipId> {
        playlist_songs::add(&self.pool, playlist_id, song_id).await
    }

    async fn list_members(&self, playlist_id: &PlaylistId) -> Result<Vec<SongSummary>> {
        playlist_songs::get_songs(&self.pool, playlist_id).await
    }

    async fn remove_membership(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<u64> {
        playlist_songs::remove(&self.pool, playlist_id, song_id).await
    }
}

#[async_trait]
impl SongCatalog for SqliteStore {
    async fn song_exists(&self, song_id: &SongId) -> Result<bool> {
        songs::exists(&self.pool, song_id).await
    }
}

#[async_trait]
impl UserDirectory for SqliteStore {
    async fn user_exists(&self, user_id: &UserId) -> Result<bool> {
        users::exists(&self.pool, user_id).await
    }
}
