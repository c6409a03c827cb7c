//! Configuration structures for the parsing pipeline.

use serde::{Deserialize, Serialize};

use crate::layout::LineGrouping;
use crate::models::vendor::Vendor;

/// Main configuration for the inkvoice pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkvoiceConfig {
    /// Line reconstruction configuration.
    pub layout: LayoutConfig,

    /// Vendor grammar configuration.
    pub extraction: ExtractionConfig,
}

/// How each vendor's fragments are clustered into lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// World Famous renderer puts each cell on an exact baseline.
    pub world_famous: LineGrouping,

    /// Eternal invoices jitter by a unit or two between columns.
    pub eternal: LineGrouping,

    /// Solid Ink rows share a rounded baseline.
    pub solid_ink: LineGrouping,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            world_famous: LineGrouping::Rounded,
            eternal: LineGrouping::Tolerance { units: 2.0 },
            solid_ink: LineGrouping::Rounded,
        }
    }
}

impl LayoutConfig {
    /// Grouping mode used for `vendor`.
    pub fn grouping_for(&self, vendor: Vendor) -> LineGrouping {
        match vendor {
            Vendor::WorldFamous => self.world_famous,
            Vendor::Eternal => self.eternal,
            Vendor::SolidInk => self.solid_ink,
        }
    }
}

/// Vendor grammar configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines after a World Famous quantity line searched for the item code.
    pub lookahead_lines: usize,

    /// Lines, starting at the item code, gathered into the description.
    pub description_lines: usize,

    /// Keep skipped-line diagnostics in the parse outcome.
    pub collect_diagnostics: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lookahead_lines: 3,
            description_lines: 3,
            collect_diagnostics: true,
        }
    }
}

impl InkvoiceConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: InkvoiceConfig =
            serde_json::from_str(r#"{"extraction":{"lookahead_lines":5}}"#).unwrap();
        assert_eq!(config.extraction.lookahead_lines, 5);
        assert_eq!(config.extraction.description_lines, 3);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_grouping_serialization() {
        let json = serde_json::to_value(LayoutConfig::default()).unwrap();
        assert_eq!(json["eternal"]["mode"], "tolerance");
        assert_eq!(json["eternal"]["units"], 2.0);
        assert_eq!(json["solid_ink"]["mode"], "rounded");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InkvoiceConfig::default();
        config.layout.eternal = LineGrouping::Tolerance { units: 3.5 };
        config.save(&path).unwrap();

        let loaded = InkvoiceConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_grouping_for_vendor() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.grouping_for(Vendor::WorldFamous), LineGrouping::Rounded);
        assert_eq!(
            layout.grouping_for(Vendor::Eternal),
            LineGrouping::Tolerance { units: 2.0 }
        );
    }
}
