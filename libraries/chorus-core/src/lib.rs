//! Chorus Core
//!
//! Playlist ownership and collaboration rules for Chorus.
//!
//! This crate decides, for any (playlist, user) pair, whether the user may
//! view or modify the playlist, and gates every playlist operation on that
//! decision. Persistence is reached only through the traits in
//! [`repository`].
//!
//! # Architecture
//!
//! - **Repositories**: `PlaylistRepository`, `CollaborationRepository`,
//!   `PlaylistSongRepository`, `SongCatalog`, `UserDirectory`
//! - **Access Resolver**: ownership first, collaboration second
//! - **Services**: `PlaylistService`, `CollaborationService`
//! - **Error Handling**: unified `ChorusError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use chorus_core::memory::MemoryStore;
//! use chorus_core::types::User;
//! use chorus_core::{PlaylistService, Repositories};
//! use std::sync::Arc;
//!
//! # async fn example() -> chorus_core::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let owner = store.add_user(User::new("alice", "Alice")).await;
//!
//! let service = PlaylistService::new(&Repositories::from_store(store));
//! let playlist_id = service.create_playlist(&owner, "Road Trip").await?;
//! let visible = service.list_playlists(&owner).await?;
//! assert_eq!(visible[0].id, playlist_id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod access;
pub mod error;
pub mod memory;
pub mod repository;
pub mod services;
pub mod types;

pub use access::{AccessDecision, AccessResolver, Grant};
pub use error::{ChorusError, ErrorKind, Result};
pub use repository::{
    CollaborationRepository, PlaylistRepository, PlaylistSongRepository, Repositories,
    SongCatalog, UserDirectory,
};
pub use services::{CollaborationService, PlaylistService};
pub use types::{MembershipId, PlaylistId, SongId, UserId};
