// Service exports
pub mod auth;
pub mod cache;
pub mod postgres;
pub mod supabase;

pub use auth::{AuthError, TokenVerifier};
pub use cache::CatalogCache;
pub use postgres::{PostgresClient, PostgresError, StoredRecommendation};
pub use supabase::{SupabaseClient, SupabaseError};
