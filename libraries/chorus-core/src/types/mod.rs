mod ids;
mod playlist;
mod song;
mod user;

pub use ids::{CollaborationId, MembershipId, PlaylistId, SongId, UserId};
pub use playlist::{Collaboration, NewPlaylist, Playlist, PlaylistDetail, PlaylistSummary};
pub use song::{NewSong, PlaylistSong, Song, SongSummary};
pub use user::User;
