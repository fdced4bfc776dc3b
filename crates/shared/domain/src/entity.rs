//! Traits shared by every identity-bearing aggregate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity and lifecycle timestamps common to all entities.
///
/// `id` never changes after construction; `updated_at` moves forward on every
/// mutation.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;
}

/// Generate a fresh opaque entity id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
