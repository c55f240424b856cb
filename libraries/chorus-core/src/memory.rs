//! In-process store implementing every repository trait
//!
//! Used by tests and by short-lived sessions that do not need a database.
//! Deleting a playlist cascades to its collaborations and memberships the
//! same way the `SQLite` schema does.

use crate::error::Result;
use crate::repository::{
    CollaborationRepository, PlaylistRepository, PlaylistSongRepository, SongCatalog,
    UserDirectory,
};
use crate::types::*;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    songs: HashMap<SongId, Song>,
    playlists: Vec<Playlist>,
    collaborations: Vec<Collaboration>,
    memberships: Vec<PlaylistSong>,
}

impl State {
    fn summary(&self, playlist: &Playlist) -> PlaylistSummary {
        PlaylistSummary {
            id: playlist.id.clone(),
            name: playlist.name.clone(),
            username: self
                .users
                .get(&playlist.owner)
                .map(|user| user.username.clone()),
        }
    }
}

/// Store backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user
    pub async fn add_user(&self, user: User) -> UserId {
        let id = user.id.clone();
        self.state.write().await.users.insert(id.clone(), user);
        id
    }

    /// Register a catalog song
    pub async fn add_song(&self, song: NewSong) -> SongId {
        let now = Utc::now().to_rfc3339();
        let song = Song {
            id: SongId::generate(),
            title: song.title,
            year: song.year,
            performer: song.performer,
            genre: song.genre,
            duration: song.duration,
            created_at: now.clone(),
            updated_at: now,
        };
        let id = song.id.clone();
        self.state.write().await.songs.insert(id.clone(), song);
        id
    }

    /// Number of membership records stored for a playlist
    pub async fn membership_count(&self, playlist_id: &PlaylistId) -> usize {
        self.state
            .read()
            .await
            .memberships
            .iter()
            .filter(|m| m.playlist_id == *playlist_id)
            .count()
    }
}

#[async_trait]
impl PlaylistRepository for MemoryStore {
    async fn find_by_id(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        let state = self.state.read().await;
        Ok(state.playlists.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_summary(&self, id: &PlaylistId) -> Result<Option<PlaylistSummary>> {
        let state = self.state.read().await;
        Ok(state
            .playlists
            .iter()
            .find(|p| p.id == *id)
            .map(|p| state.summary(p)))
    }

    async fn insert(&self, playlist: NewPlaylist) -> Result<PlaylistId> {
        let mut state = self.state.write().await;
        let id = playlist.id.clone();
        state.playlists.push(Playlist {
            id: playlist.id,
            name: playlist.name,
            owner: playlist.owner,
        });
        Ok(id)
    }

    async fn delete(&self, id: &PlaylistId) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.playlists.len();
        state.playlists.retain(|p| p.id != *id);
        if state.playlists.len() == before {
            return Ok(false);
        }

        state.collaborations.retain(|c| c.playlist_id != *id);
        state.memberships.retain(|m| m.playlist_id != *id);
        Ok(true)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
        let state = self.state.read().await;
        Ok(state
            .playlists
            .iter()
            .filter(|p| {
                p.is_owned_by(user_id)
                    || state
                        .collaborations
                        .iter()
                        .any(|c| c.playlist_id == p.id && c.user_id == *user_id)
            })
            .map(|p| state.summary(p))
            .collect())
    }
}

#[async_trait]
impl CollaborationRepository for MemoryStore {
    async fn is_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state
            .collaborations
            .iter()
            .any(|c| c.playlist_id == *playlist_id && c.user_id == *user_id))
    }

    async fn add_collaborator(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<CollaborationId> {
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .collaborations
            .iter()
            .find(|c| c.playlist_id == *playlist_id && c.user_id == *user_id)
        {
            return Ok(existing.id.clone());
        }

        let collaboration = Collaboration {
            id: CollaborationId::generate(),
            playlist_id: playlist_id.clone(),
            user_id: user_id.clone(),
        };
        let id = collaboration.id.clone();
        state.collaborations.push(collaboration);
        Ok(id)
    }

    async fn remove_collaborator(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.collaborations.len();
        state
            .collaborations
            .retain(|c| !(c.playlist_id == *playlist_id && c.user_id == *user_id));
        Ok(state.collaborations.len() != before)
    }

    async fn list_collaborators(&self, playlist_id: &PlaylistId) -> Result<Vec<Collaboration>> {
        let state = self.state.read().await;
        Ok(state
            .collaborations
            .iter()
            .filter(|c| c.playlist_id == *playlist_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PlaylistSongRepository for MemoryStore {
    async fn add_membership(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<MembershipId> {
        let mut state = self.state.write().await;
        let membership = PlaylistSong {
            id: MembershipId::generate(),
            playlist_id: playlist_id.clone(),
            song_id: song_id.clone(),
        };
        let id = membership.id.clone();
        state.memberships.push(membership);
        Ok(id)
    }

    async fn list_members(&self, playlist_id: &PlaylistId) -> Result<Vec<SongSummary>> {
        let state = self.state.read().await;
        Ok(state
            .memberships
            .iter()
            .filter(|m| m.playlist_id == *playlist_id)
            .filter_map(|m| state.songs.get(&m.song_id))
            .cloned()
            .map(SongSummary::from)
            .collect())
    }

    async fn remove_membership(&self, playlist_id: &PlaylistId, song_id: &SongId) -> Result<u64> {
        let mut state = self.state.write().await;
        let before = state.memberships.len();
        state
            .memberships
            .retain(|m| !(m.playlist_id == *playlist_id && m.song_id == *song_id));
        Ok((before - state.memberships.len()) as u64)
    }
}

#[async_trait]
impl SongCatalog for MemoryStore {
    async fn song_exists(&self, song_id: &SongId) -> Result<bool> {
        Ok(self.state.read().await.songs.contains_key(song_id))
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn user_exists(&self, user_id: &UserId) -> Result<bool> {
        Ok(self.state.read().await.users.contains_key(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delete_cascades_to_memberships_and_collaborations() {
        let store = MemoryStore::new();
        let owner = store.add_user(User::new("owner", "Owner")).await;
        let guest = store.add_user(User::new("guest", "Guest")).await;
        let song = store
            .add_song(NewSong {
                title: "Fix You".to_string(),
                year: 2005,
                performer: "Coldplay".to_string(),
                genre: None,
                duration: None,
            })
            .await;

        let id = store.insert(NewPlaylist::new("Mix", owner)).await.unwrap();
        store.add_collaborator(&id, &guest).await.unwrap();
        store.add_membership(&id, &song).await.unwrap();

        assert!(store.delete(&id).await.unwrap());
        assert_eq!(store.membership_count(&id).await, 0);
        assert!(!store.is_collaborator(&id, &guest).await.unwrap());
        assert!(!store.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn listing_includes_collaborations() {
        let store = MemoryStore::new();
        let owner = store.add_user(User::new("owner", "Owner")).await;
        let guest = store.add_user(User::new("guest", "Guest")).await;

        let shared = store
            .insert(NewPlaylist::new("Shared", owner.clone()))
            .await
            .unwrap();
        store
            .insert(NewPlaylist::new("Private", owner.clone()))
            .await
            .unwrap();
        store.add_collaborator(&shared, &guest).await.unwrap();

        assert_eq!(store.list_for_user(&owner).await.unwrap().len(), 2);

        let guest_view = store.list_for_user(&guest).await.unwrap();
        assert_eq!(guest_view.len(), 1);
        assert_eq!(guest_view[0].id, shared);
        assert_eq!(guest_view[0].username.as_deref(), Some("owner"));
    }

    #[tokio::test]
    async fn repeated_grant_keeps_one_collaboration() {
        let store = MemoryStore::new();
        let owner = store.add_user(User::new("owner", "Owner")).await;
        let guest = store.add_user(User::new("guest", "Guest")).await;
        let id = store.insert(NewPlaylist::new("Mix", owner)).await.unwrap();

        let first = store.add_collaborator(&id, &guest).await.unwrap();
        let second = store.add_collaborator(&id, &guest).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.state.read().await.collaborations.len(), 1);
        assert_eq!(store.list_collaborators(&id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn membership_is_a_multiset() {
        let store = MemoryStore::new();
        let owner = store.add_user(User::new("owner", "Owner")).await;
        let song = store
            .add_song(NewSong {
                title: "Yellow".to_string(),
                year: 2000,
                performer: "Coldplay".to_string(),
                genre: Some("Rock".to_string()),
                duration: Some(266),
            })
            .await;
        let id = store.insert(NewPlaylist::new("Mix", owner)).await.unwrap();

        store.add_membership(&id, &song).await.unwrap();
        store.add_membership(&id, &song).await.unwrap();
        assert_eq!(store.list_members(&id).await.unwrap().len(), 2);

        assert_eq!(store.remove_membership(&id, &song).await.unwrap(), 2);
        assert_eq!(store.remove_membership(&id, &song).await.unwrap(), 0);
    }
}
