//! crates/archstudio_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A managed account in the user directory.
///
/// `usage_count` is only meaningful relative to `last_usage_date`: when the
/// stored date is not today, the effective usage is zero regardless of the
/// stored count.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    /// Stored as-is. The source system keeps plaintext credentials and the
    /// admin surface is unauthenticated; preserved descriptively.
    pub password: String,
    pub is_active: bool,
    pub expiry_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Premium generations allowed per day. Zero is a valid value meaning
    /// no premium allowance at all.
    pub daily_quota: u32,
    /// Premium generations recorded for `last_usage_date`.
    pub usage_count: u32,
    pub last_usage_date: NaiveDate,
}

impl UserRecord {
    /// Marketing tier derived from the configured daily quota.
    pub fn plan_name(&self) -> &'static str {
        match self.daily_quota {
            q if q >= 500 => "ENTERPRISE",
            q if q >= 50 => "PRO PLAN",
            q if q >= 1 => "STARTER",
            _ => "FREE",
        }
    }
}

/// The singleton settings document holding the shared fallback credential
/// for the generation provider. Mutable only through the admin surface.
#[derive(Debug, Clone)]
pub struct GlobalSettings {
    pub gemini_api_key: String,
    pub updated_at: DateTime<Utc>,
}

/// An image payload as exchanged with the generation provider and the
/// editor client: raw bytes plus their mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub data: Bytes,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// One generated result kept for the lifetime of an editor session,
/// most-recent-first. Lost when the session ends.
#[derive(Debug, Clone)]
pub struct SessionHistoryEntry {
    pub id: Uuid,
    pub image: ImageData,
    /// Human-readable wall-clock time, e.g. "14:07".
    pub timestamp: String,
    /// The prompt or edit command that produced the image.
    pub prompt: String,
}

/// Who is driving an editor session. Administrators are unlimited and are
/// never metered; members carry their directory record.
#[derive(Debug, Clone)]
pub enum Requester {
    Admin,
    Member(UserRecord),
}

impl Requester {
    pub fn is_admin(&self) -> bool {
        matches!(self, Requester::Admin)
    }

    pub fn member(&self) -> Option<&UserRecord> {
        match self {
            Requester::Admin => None,
            Requester::Member(user) => Some(user),
        }
    }
}
