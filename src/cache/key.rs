// src/cache/key.rs
//! Structured cache keys and their persisted string form

/// Prefix shared by every key this cache owns
pub const NAMESPACE_PREFIX: &str = "hex:";

/// Singleton key holding the most recently observed version string
pub const LATEST_VERSION_KEY: &str = "hex:latest-version";

/// Composite key of one cached hex entry.
///
/// The `:`-delimited string form (`hex:{campaign}:{id}:{version}`) exists
/// only at the persistence boundary; everywhere else the key is this record.
/// Campaign and id must not contain the delimiter; the cache rejects such
/// campaigns up front and ids from the grid are `[A-Z][0-9]+`. The version
/// segment is last, so a version carrying `:` still round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub campaign: String,
    pub id: String,
    pub version: String,
}

impl CacheKey {
    pub fn new(campaign: &str, id: &str, version: &str) -> Self {
        Self {
            campaign: campaign.to_string(),
            id: id.to_string(),
            version: version.to_string(),
        }
    }

    /// Persisted string form: `hex:{campaign}:{id}:{version}`
    pub fn encode(&self) -> String {
        format!("hex:{}:{}:{}", self.campaign, self.id, self.version)
    }

    /// Prefix matching every version of one `(campaign, id)` pair
    pub fn pair_prefix(campaign: &str, id: &str) -> String {
        format!("hex:{}:{}:", campaign, id)
    }

    /// Parse a persisted key string; `None` for anything that is not an
    /// entry key (including the latest-version singleton).
    pub fn parse(key: &str) -> Option<CacheKey> {
        let rest = key.strip_prefix(NAMESPACE_PREFIX)?;
        let mut parts = rest.splitn(3, ':');
        let campaign = parts.next()?;
        let id = parts.next()?;
        let version = parts.next()?;
        if campaign.is_empty() || id.is_empty() {
            return None;
        }
        Some(CacheKey::new(campaign, id, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_parse_roundtrip() {
        let key = CacheKey::new("camp1", "G7", "3");
        assert_eq!(key.encode(), "hex:camp1:G7:3");
        assert_eq!(CacheKey::parse(&key.encode()), Some(key));
    }

    #[test]
    fn test_version_may_contain_delimiter() {
        let key = CacheKey::new("camp1", "G7", "3:beta");
        assert_eq!(CacheKey::parse(&key.encode()), Some(key));
    }

    #[test]
    fn test_parse_rejects_non_entries() {
        assert_eq!(CacheKey::parse(LATEST_VERSION_KEY), None);
        assert_eq!(CacheKey::parse("hex:only:two"), None);
        assert_eq!(CacheKey::parse("hex:short"), None);
        assert_eq!(CacheKey::parse("other:camp:id:1"), None);
        assert_eq!(CacheKey::parse(""), None);
    }

    #[test]
    fn test_pair_prefix_matches_all_versions() {
        let prefix = CacheKey::pair_prefix("camp1", "G7");
        assert!(CacheKey::new("camp1", "G7", "1").encode().starts_with(&prefix));
        assert!(CacheKey::new("camp1", "G7", "2").encode().starts_with(&prefix));
        assert!(!CacheKey::new("camp1", "G8", "1").encode().starts_with(&prefix));
        assert!(!CacheKey::new("camp2", "G7", "1").encode().starts_with(&prefix));
    }
}
