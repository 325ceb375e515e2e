//! Administrative REST client for a Nexus repository manager
//!
//! This crate issues a fixed set of administrative calls against one
//! repository manager:
//!
//! - **Hosted repositories**: check existence, create a Maven2 SNAPSHOT
//!   repository, delete (idempotent)
//! - **Repository groups**: add or remove a repository, with set semantics
//!   enforced client-side before the write
//!
//! Group mutations are read-modify-write: the group is fetched whole, the
//! membership list edited in memory, and the whole group written back.
//! There is no concurrency token on the write, so concurrent mutators of
//! the same group race; callers needing stronger guarantees must serialize
//! externally.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nexus_admin::{ClientConfig, NexusClient, RepositoryId, RepositoryManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("http://localhost:8081/nexus", "admin", "admin123")?;
//! let client = NexusClient::new(config)?;
//!
//! let id = RepositoryId::from("plat.trnk.trnk679");
//! if !client.repository_exists(&id).await? {
//!     client.create_snapshot_repository(&id).await?;
//!     client.add_repository_to_group(&id, &"snapshotgroup".into()).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;

// Re-exports for convenience
pub use client::{NOOP_STATUS, NexusClient, RepositoryManager};
pub use config::{ClientConfig, PayloadFormat};
pub use error::{ClientError, Result};
pub use model::{CreateRepository, GroupId, GroupRepository, RepositoryGroup, RepositoryId};
