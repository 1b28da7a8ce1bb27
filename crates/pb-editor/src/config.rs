//! Drag behavior configuration.

use serde::{Deserialize, Serialize};

/// Tunables for target resolution and drop-zone classification.
///
/// Hosts may pass a partial JSON object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragConfig {
    /// Fraction of a target's width/height treated as an edge zone on each
    /// side. Pointers deeper than this into a container nest inside it.
    /// Default: **0.25**. Clamped to `[0.0, 0.5]`.
    pub edge_fraction: f32,

    /// Skip the document root when no rectangle contains the pointer and the
    /// resolver falls back to the nearest center. Without this, any drop on
    /// empty canvas lands in the root. Default: **true**.
    pub exclude_root_from_fallback: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            edge_fraction: 0.25,
            exclude_root_from_fallback: true,
        }
    }
}

impl DragConfig {
    /// The edge fraction, clamped so the four edge zones never overlap
    /// past the center.
    pub fn edge_fraction(&self) -> f32 {
        if self.edge_fraction.is_nan() {
            return Self::default().edge_fraction;
        }
        self.edge_fraction.clamp(0.0, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: DragConfig = serde_json::from_str(r#"{"edgeFraction":0.1}"#).unwrap();
        assert_eq!(cfg.edge_fraction(), 0.1);
        assert!(cfg.exclude_root_from_fallback);

        let cfg: DragConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, DragConfig::default());
    }

    #[test]
    fn edge_fraction_is_clamped() {
        let cfg = DragConfig {
            edge_fraction: 0.9,
            ..DragConfig::default()
        };
        assert_eq!(cfg.edge_fraction(), 0.5);
        let cfg = DragConfig {
            edge_fraction: f32::NAN,
            ..DragConfig::default()
        };
        assert_eq!(cfg.edge_fraction(), 0.25);
    }
}
