// src/cache/hex_cache.rs
//! Read-through hex cache with version-aware invalidation

use super::key::{CacheKey, LATEST_VERSION_KEY, NAMESPACE_PREFIX};
use super::store::CacheStore;
use crate::backend::client::HexFetcher;
use crate::backend::data::HexData;
use crate::error::{Result, HexError};

/// Where a returned payload came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Cached,
    Live,
    Fallback { error: String },
}

impl Origin {
    /// Short label for presenting provenance to the user
    pub fn label(&self) -> &str {
        match self {
            Origin::Cached => "from cache",
            Origin::Live => "live",
            Origin::Fallback { .. } => "demo data",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Origin::Fallback { .. })
    }
}

/// A resolved payload together with its provenance
#[derive(Debug, Clone)]
pub struct HexLookup {
    pub data: HexData,
    pub origin: Origin,
}

/// Metadata of one cached entry, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryMeta {
    pub campaign: String,
    pub id: String,
    pub version: String,
}

/// Read-through cache over an injected store and fetcher.
///
/// At most one version is retained per `(campaign, id)` pair; a successful
/// fetch prunes every other version for that pair. The most recently
/// observed version is persisted under [`LATEST_VERSION_KEY`] and gates the
/// optimistic cache check. Concurrent lookups for the same pair are not
/// deduplicated; the last writer wins.
pub struct HexCache<S, F> {
    store: S,
    fetcher: F,
}

impl<S: CacheStore, F: HexFetcher> HexCache<S, F> {
    pub fn new(store: S, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// Resolve the payload for `(campaign, id)`.
    ///
    /// Fails only on an invalid campaign. Backend and storage failures are
    /// absorbed: the call then resolves to a placeholder payload with
    /// [`Origin::Fallback`] carrying the error description. Performs at most
    /// one network round-trip and never retries.
    pub async fn get(&self, campaign: &str, id: &str) -> Result<HexLookup> {
        let campaign = validate_campaign(campaign)?;

        // Optimistic check: assume the last observed version is still
        // current and skip the round-trip when an entry exists at it.
        if let Some(version) = self.latest_version() {
            let key = CacheKey::new(campaign, id, &version).encode();
            if let Ok(Some(raw)) = self.store.read(&key) {
                if let Ok(data) = serde_json::from_str::<HexData>(&raw) {
                    return Ok(HexLookup {
                        data,
                        origin: Origin::Cached,
                    });
                }
                // Unreadable entry: fall through to a fresh fetch.
            }
        }

        match self.fetcher.fetch_hex(campaign, id).await {
            Ok(data) => {
                let version = data.version.clone().unwrap_or_else(|| "0".to_string());
                self.evict_superseded(campaign, id, &version);

                let key = CacheKey::new(campaign, id, &version).encode();
                match serde_json::to_string(&data) {
                    Ok(raw) => {
                        if let Err(e) = self.store.write(&key, &raw) {
                            eprintln!("Failed to cache {}: {}", key, e);
                        }
                    }
                    Err(e) => eprintln!("Failed to serialize {}: {}", key, e),
                }
                if let Err(e) = self.store.write(LATEST_VERSION_KEY, &version) {
                    eprintln!("Failed to record latest version: {}", e);
                }

                Ok(HexLookup {
                    data,
                    origin: Origin::Live,
                })
            }
            Err(err) => Ok(HexLookup {
                data: HexData::placeholder(id),
                origin: Origin::Fallback {
                    error: err.to_string(),
                },
            }),
        }
    }

    /// Most recently observed version, if any
    pub fn latest_version(&self) -> Option<String> {
        self.store.read(LATEST_VERSION_KEY).ok().flatten()
    }

    /// Cached entry metadata, sorted by key; local storage only
    pub fn list_cached(&self, campaign: Option<&str>) -> Result<Vec<CacheEntryMeta>> {
        let mut keys = self.store.keys()?;
        keys.sort();

        let mut entries = Vec::new();
        for key in keys {
            let Some(parsed) = CacheKey::parse(&key) else {
                continue;
            };
            if let Some(filter) = campaign {
                if parsed.campaign != filter {
                    continue;
                }
            }
            entries.push(CacheEntryMeta {
                campaign: parsed.campaign,
                id: parsed.id,
                version: parsed.version,
            });
        }
        Ok(entries)
    }

    /// Remove every key in this cache's namespace, including the version
    /// pointer. Idempotent.
    pub fn clear_all(&self) -> Result<()> {
        for key in self.store.keys()? {
            if key.starts_with(NAMESPACE_PREFIX) {
                self.store.remove(&key)?;
            }
        }
        Ok(())
    }

    /// Drop every version of `(campaign, id)` except `keep_version`.
    ///
    /// Invoked on the live path before persisting a fresh entry, which
    /// bounds storage to one entry per hex per campaign.
    fn evict_superseded(&self, campaign: &str, id: &str, keep_version: &str) {
        let keep = CacheKey::new(campaign, id, keep_version).encode();
        let prefix = CacheKey::pair_prefix(campaign, id);

        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                eprintln!("Failed to scan cache for eviction: {}", e);
                return;
            }
        };
        for key in keys {
            if key.starts_with(&prefix) && key != keep {
                if let Err(e) = self.store.remove(&key) {
                    eprintln!("Failed to evict {}: {}", key, e);
                }
            }
        }
    }
}

fn validate_campaign(campaign: &str) -> Result<&str> {
    let trimmed = campaign.trim();
    if trimmed.is_empty() {
        return Err(HexError::InvalidCampaign(
            "campaign must not be empty".to_string(),
        ));
    }
    if trimmed.contains(':') {
        return Err(HexError::InvalidCampaign(
            "campaign must not contain ':'".to_string(),
        ));
    }
    Ok(trimmed)
}
