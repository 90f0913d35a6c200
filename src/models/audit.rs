//! Audit domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed request's actor and outcome, append-only
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditEntry {
    pub id: Uuid,
    /// Actor's domain record link, when authenticated
    pub ref_id: Option<String>,
    /// Actor's role, when authenticated
    pub role: Option<String>,
    pub action: String,
    pub path: String,
    pub method: String,
    /// The actual response status returned to the caller
    pub status: i32,
    pub client_ip: String,
    pub occurred_at: DateTime<Utc>,
}

/// Audit listing filters
#[derive(Debug, Default, Deserialize)]
pub struct AuditEntryFilters {
    pub role: Option<String>,
    pub path: Option<String>,
    pub method: Option<String>,
    pub status: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
