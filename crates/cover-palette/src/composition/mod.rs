//! Composition advice: how strongly the gradient paints behind text.
//!
//! The canvas is split into three vertical zones (top 30%, middle, bottom
//! 30%). Top and bottom receive a light scrim for bar contrast; the overall
//! opacity comes from a small table keyed by cover brightness and
//! [`ColorScheme`].

mod advisor;

pub use advisor::{
    AccessibilitySettings, BrightnessBucket, ColorScheme, CompositionAdvisor, CompositionParams,
    LayerMode, BOTTOM_ZONE_START, FLAT_OPACITY, TOP_ZONE_END,
};
