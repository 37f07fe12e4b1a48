// src/backend/data.rs
//! Hex payload structures as returned by the backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeInfo {
    pub name: String,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub humidity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterInfo {
    pub name: String,
}

/// Per-hex payload.
///
/// Only the fields the client presents are typed; anything else the backend
/// sends is kept in `extra` so cached entries round-trip the full payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexData {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biome: Option<BiomeInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter: Option<EncounterInfo>,
    #[serde(default)]
    pub discovered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HexData {
    /// Deterministic placeholder shown when the backend is unreachable
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            biome: Some(BiomeInfo {
                name: "demo".to_string(),
                altitude: 0.0,
                temperature: 0.0,
                humidity: 0.0,
            }),
            features: vec![FeatureInfo {
                name: "demo".to_string(),
            }],
            encounter: Some(EncounterInfo {
                name: "demo".to_string(),
            }),
            discovered: false,
            notes: None,
            created_at: None,
            version: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Biome name, if the payload carries one
    pub fn biome_name(&self) -> Option<&str> {
        self.biome.as_ref().map(|b| b.name.as_str())
    }
}

/// One entry of the hex-index endpoint, used to pre-seed biome display.
///
/// The index is best-effort; entries may carry an id, axial coordinates,
/// or both.
#[derive(Debug, Clone, Deserialize)]
pub struct HexSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub q: Option<i32>,
    #[serde(default)]
    pub r: Option<i32>,
    pub biome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload_parses() {
        let json = r#"{
            "id": "G7",
            "biome": {"name": "forest", "altitude": 0.42, "temperature": 0.6, "humidity": 0.8},
            "features": [{"name": "ruins"}, {"name": "spring"}],
            "encounter": {"name": "wolves"},
            "discovered": true,
            "created_at": "2024-03-01T12:00:00Z",
            "version": "3"
        }"#;

        let hex: HexData = serde_json::from_str(json).unwrap();
        assert_eq!(hex.id, "G7");
        assert_eq!(hex.biome_name(), Some("forest"));
        assert_eq!(hex.features.len(), 2);
        assert!(hex.discovered);
        assert_eq!(hex.version.as_deref(), Some("3"));
    }

    #[test]
    fn test_minimal_payload_parses() {
        let hex: HexData = serde_json::from_str(r#"{"id": "A1"}"#).unwrap();
        assert_eq!(hex.id, "A1");
        assert!(hex.biome.is_none());
        assert!(hex.features.is_empty());
        assert!(!hex.discovered);
        assert!(hex.version.is_none());
    }

    #[test]
    fn test_unknown_fields_roundtrip() {
        let json = r#"{"id": "B2", "seed_tag": "xyz", "danger": 4}"#;
        let hex: HexData = serde_json::from_str(json).unwrap();
        assert_eq!(hex.extra.get("seed_tag").unwrap(), "xyz");

        let out = serde_json::to_string(&hex).unwrap();
        let back: HexData = serde_json::from_str(&out).unwrap();
        assert_eq!(back.extra.get("danger").unwrap(), 4);
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        let a = HexData::placeholder("C3");
        let b = HexData::placeholder("C3");
        assert_eq!(a.id, b.id);
        assert_eq!(a.biome_name(), Some("demo"));
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_summary_parses_partial_entries() {
        let json = r#"[{"id": "G7", "biome": "forest"}, {"q": 1, "r": -1, "biome": "desert"}]"#;
        let list: Vec<HexSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id.as_deref(), Some("G7"));
        assert_eq!(list[1].q, Some(1));
    }
}
