// src/viewer.rs
//! Map viewer coordination between cache, grid and display

use crate::backend::client::HexFetcher;
use crate::backend::data::HexSummary;
use crate::cache::{CacheStore, HexCache, HexLookup};
use crate::error::Result;
use crate::grid::{axial_to_id, build_grid, id_to_axial, GridCell};
use std::collections::HashMap;

/// Biome class shown for hexes whose data has not been loaded
pub const UNLOADED_BIOME: &str = "unloaded";

/// Coordinates one campaign's map view: the laid-out grid, the biome
/// display index, the current selection and the cache behind it all.
pub struct MapViewer<S, F> {
    cache: HexCache<S, F>,
    campaign: String,
    radius: i32,
    hex_size: f64,
    cells: Vec<GridCell>,
    biomes: HashMap<String, String>,
    selected: String,
    last: Option<HexLookup>,
}

impl<S: CacheStore, F: HexFetcher> MapViewer<S, F> {
    pub fn new(cache: HexCache<S, F>, campaign: String, radius: i32, hex_size: f64) -> Self {
        Self {
            cache,
            campaign,
            radius,
            hex_size,
            cells: build_grid(radius, hex_size),
            biomes: HashMap::new(),
            selected: axial_to_id(0, 0, radius),
            last: None,
        }
    }

    pub fn campaign(&self) -> &str {
        &self.campaign
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn hex_size(&self) -> f64 {
        self.hex_size
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn selected_id(&self) -> &str {
        &self.selected
    }

    /// Payload and provenance of the most recent lookup
    pub fn last_lookup(&self) -> Option<&HexLookup> {
        self.last.as_ref()
    }

    /// Biome shown for a hex, defaulting to the unloaded class
    pub fn biome_of(&self, id: &str) -> &str {
        self.biomes
            .get(id)
            .map(String::as_str)
            .unwrap_or(UNLOADED_BIOME)
    }

    /// Pre-seed the biome index from the hex-index endpoint.
    ///
    /// Entries may name hexes by id or by axial coordinates; anything
    /// unresolvable is skipped. Best-effort only.
    pub fn seed_biomes(&mut self, summaries: &[HexSummary]) {
        for summary in summaries {
            let id = match (&summary.id, summary.q, summary.r) {
                (Some(id), _, _) => id.clone(),
                (None, Some(q), Some(r)) => axial_to_id(q, r, self.radius),
                _ => continue,
            };
            self.biomes.insert(id, summary.biome.clone());
        }
    }

    /// Move the selection by an axial delta, staying on the grid
    pub fn move_selection(&mut self, dq: i32, dr: i32) -> bool {
        let Some(current) = id_to_axial(&self.selected, self.radius) else {
            return false;
        };
        let next = current.offset(dq, dr);
        if !next.in_range(self.radius) {
            return false;
        }
        self.selected = axial_to_id(next.q, next.r, self.radius);
        true
    }

    /// Resolve a hex through the cache and record its biome for display
    pub async fn select(&mut self, id: &str) -> Result<HexLookup> {
        self.selected = id.to_string();
        let lookup = self.cache.get(&self.campaign, id).await?;

        if !lookup.origin.is_fallback() {
            if let Some(biome) = lookup.data.biome_name() {
                self.biomes.insert(id.to_string(), biome.to_string());
            }
        }

        self.last = Some(lookup.clone());
        Ok(lookup)
    }

    /// Resolve whichever hex is currently selected
    pub async fn select_current(&mut self) -> Result<()> {
        let id = self.selected.clone();
        self.select(&id).await.map(|_| ())
    }

    /// Number of cached entries for this campaign
    pub fn cached_count(&self) -> usize {
        self.cache
            .list_cached(Some(&self.campaign))
            .map(|entries| entries.len())
            .unwrap_or(0)
    }
}
