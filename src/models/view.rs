//! View density and viewport types for the file view.

use crate::config::LayoutConfig;

/// Display density of the file view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// One entry per row with name, date, type and size columns (default)
    #[default]
    CompactList,
    /// Square cells around 128px
    MediumGrid,
    /// Square cells around 256px
    LargeGrid,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [Self::CompactList, Self::MediumGrid, Self::LargeGrid];

    pub fn is_grid(self) -> bool {
        !matches!(self, Self::CompactList)
    }

    /// Target cell edge, or `None` for the list.
    pub fn cell_target(self, config: &LayoutConfig) -> Option<f64> {
        match self {
            Self::CompactList => None,
            Self::MediumGrid => Some(config.medium_cell_target),
            Self::LargeGrid => Some(config.large_cell_target),
        }
    }

    /// CSS class applied to the content layer.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::CompactList => "min-view",
            Self::MediumGrid => "mid-view",
            Self::LargeGrid => "max-view",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CompactList => "List",
            Self::MediumGrid => "Medium icons",
            Self::LargeGrid => "Large icons",
        }
    }
}

/// Inner size of the scroll container, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
