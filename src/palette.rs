//! Label to color lookup for renderers.
//!
//! The palette is supplied by the caller; the engine only defines how labels
//! map onto it (`label % len`, with a dedicated color for noise) so the same
//! labels always render the same way.

use serde::{Deserialize, Serialize};

use crate::dbscan::NOISE;

/// An ordered palette cycled by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Colors assigned to labels `0, 1, 2, ...` (cycled)
    pub colors: Vec<String>,
    /// Color for routes that belong to no pattern
    pub noise_color: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(
            [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ],
            "#9e9e9e",
        )
    }
}

impl ColorPalette {
    pub fn new<I, S>(colors: I, noise_color: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            noise_color: noise_color.into(),
        }
    }

    /// Palette index for a label, or `None` for noise or an empty palette.
    pub fn index_for_label(&self, label: i32) -> Option<usize> {
        if label <= NOISE {
            return None;
        }
        color_index(label as usize, self.colors.len())
    }

    /// Color for a pattern label (`-1` yields the noise color).
    pub fn color_for_label(&self, label: i32) -> &str {
        self.index_for_label(label)
            .map_or(self.noise_color.as_str(), |i| self.colors[i].as_str())
    }

    /// Color for a K-Means cluster index.
    pub fn color_for_cluster(&self, cluster: usize) -> &str {
        color_index(cluster, self.colors.len())
            .map_or(self.noise_color.as_str(), |i| self.colors[i].as_str())
    }
}

/// `label % palette_len`, or `None` for an empty palette.
pub fn color_index(label: usize, palette_len: usize) -> Option<usize> {
    if palette_len == 0 {
        None
    } else {
        Some(label % palette_len)
    }
}
