//! crates/archstudio_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like databases
//! or provider APIs.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use futures::Stream;
use std::pin::Pin;
use uuid::Uuid;

use crate::domain::{GlobalSettings, ImageData, UserRecord};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The provider-facing variants (`Unauthorized`, `RateLimited`,
/// `EmptyResponse`) carry the machine-distinguishable categories the
/// generation orchestrator maps into its own failure taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("The provider returned no usable content")]
    EmptyResponse,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

/// A stream of full user-list snapshots, pushed after every directory
/// mutation. Consumers never see incremental diffs, only whole snapshots.
pub type UserSnapshots = Pin<Box<dyn Stream<Item = Vec<UserRecord>> + Send>>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait UserDirectoryService: Send + Sync {
    /// Creates a user with an expiry computed from `duration_days`.
    async fn create_user(
        &self,
        username: &str,
        password: &str,
        daily_quota: u32,
        duration_days: i64,
    ) -> PortResult<UserRecord>;

    /// All users, ordered by creation time descending.
    async fn list_users(&self) -> PortResult<Vec<UserRecord>>;

    async fn get_user_by_id(&self, id: Uuid) -> PortResult<UserRecord>;

    async fn set_active(&self, id: Uuid, active: bool) -> PortResult<()>;

    /// Irreversible.
    async fn delete_user(&self, id: Uuid) -> PortResult<()>;

    async fn update_password(&self, id: Uuid, password: &str) -> PortResult<()>;

    async fn update_quota(&self, id: Uuid, daily_quota: u32) -> PortResult<()>;

    async fn update_expiry(&self, id: Uuid, expiry_date: DateTime<Utc>) -> PortResult<()>;

    /// Writes the usage counter and its date in one partial update. The
    /// caller is responsible for the read-then-write protocol; concurrent
    /// sessions are last-write-wins.
    async fn write_usage(
        &self,
        id: Uuid,
        usage_count: u32,
        last_usage_date: NaiveDate,
    ) -> PortResult<()>;

    /// The singleton settings document, if it has ever been written.
    async fn get_global_settings(&self) -> PortResult<Option<GlobalSettings>>;

    async fn upsert_global_api_key(&self, api_key: &str) -> PortResult<GlobalSettings>;

    /// Realtime subscription to the user list as a stream of full snapshots.
    fn subscribe_users(&self) -> UserSnapshots;
}

/// Output shaping hints passed through to the generation provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Request the higher-resolution output tier.
    pub high_resolution: bool,
    /// Force widescreen (16:9) framing. Never set when an input image is
    /// present, so source framing is preserved.
    pub widescreen: bool,
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Issues one generation call: prompt text followed by zero, one or two
    /// inline images. Returns the first image the provider produced, or
    /// `PortError::EmptyResponse` when the call succeeded without one.
    async fn generate_image(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        images: &[ImageData],
        options: OutputOptions,
    ) -> PortResult<ImageData>;

    /// Vision call that turns a 2D floor plan image into a detailed textual
    /// layout description.
    async fn describe_plan(
        &self,
        api_key: &str,
        model: &str,
        instruction: &str,
        plan: &ImageData,
    ) -> PortResult<String>;
}
