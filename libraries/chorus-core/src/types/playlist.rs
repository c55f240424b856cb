/// Playlist domain types
use super::ids::{CollaborationId, PlaylistId, UserId};
use super::song::SongSummary;
use serde::{Deserialize, Serialize};

/// Playlist with its single, immutable owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Owner user ID
    pub owner: UserId,
}

impl Playlist {
    /// Whether `user_id` owns this playlist
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner == *user_id
    }
}

/// Data for creating a new playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlaylist {
    pub id: PlaylistId,
    pub name: String,
    pub owner: UserId,
}

impl NewPlaylist {
    /// New playlist with a freshly generated id
    pub fn new(name: impl Into<String>, owner: UserId) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            owner,
        }
    }
}

/// Listing row: playlist joined with the owner's username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,

    /// Owner's username (absent when the owner has no user record)
    pub username: Option<String>,
}

/// Playlist together with its song membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub id: PlaylistId,
    pub name: String,
    pub username: Option<String>,
    pub songs: Vec<SongSummary>,
}

impl PlaylistDetail {
    pub fn new(summary: PlaylistSummary, songs: Vec<SongSummary>) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            username: summary.username,
            songs,
        }
    }
}

/// Grant of access to a playlist for a user who is not its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    pub id: CollaborationId,
    pub playlist_id: PlaylistId,
    pub user_id: UserId,
}
