//! Song catalog types

use super::ids::{MembershipId, PlaylistId, SongId};
use serde::{Deserialize, Serialize};

/// Catalog song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: Option<String>,
    /// Duration in seconds
    pub duration: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for inserting a song into the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: Option<String>,
    pub duration: Option<i32>,
}

/// Song as listed inside a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id: SongId,
    pub title: String,
    pub performer: String,
}

impl From<Song> for SongSummary {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            title: song.title,
            performer: song.performer,
        }
    }
}

/// A song's membership in a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSong {
    pub id: MembershipId,
    pub playlist_id: PlaylistId,
    pub song_id: SongId,
}
