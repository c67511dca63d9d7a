use crate::models::College;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

const CATALOG_KEY: &str = "colleges";

/// In-process TTL cache for the college catalog
///
/// Every generation request needs the full catalog and the catalog
/// changes rarely, so the last successful fetch is kept in memory for a
/// short window. This lives strictly at the service layer; the scoring
/// engine itself stays a pure function.
pub struct CatalogCache {
    inner: Cache<&'static str, Arc<Vec<College>>>,
}

impl CatalogCache {
    pub fn new(ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    pub async fn get(&self) -> Option<Arc<Vec<College>>> {
        self.inner.get(CATALOG_KEY).await
    }

    /// Store a fresh catalog and return it in shared form
    pub async fn set(&self, colleges: Vec<College>) -> Arc<Vec<College>> {
        let shared = Arc::new(colleges);
        self.inner.insert(CATALOG_KEY, shared.clone()).await;
        shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_college(id: &str) -> College {
        College {
            id: id.to_string(),
            name: format!("College {}", id),
            state: String::new(),
            city: String::new(),
            acceptance_rate: 50.0,
            avg_gpa: 3.2,
            sat_range_min: 1100,
            sat_range_max: 1300,
            act_range_min: 22,
            act_range_max: 28,
            tuition_out_state: 30000.0,
            majors_offered: vec![],
            specializations: vec![],
            ranking: 100,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = CatalogCache::new(60);

        assert!(cache.get().await.is_none());

        let stored = cache.set(vec![sample_college("1"), sample_college("2")]).await;
        assert_eq!(stored.len(), 2);

        let fetched = cache.get().await.expect("catalog should be cached");
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].id, "1");
    }
}
