//! Grid layout items and per-breakpoint layouts.

pub mod pack;
mod resolve;

pub use pack::{GridOccupancy, fit_layout, pack, place_drop, splice};
pub use resolve::LayoutResolver;

use crate::breakpoint::Breakpoint;
use crate::widget::{SizeProfile, WidgetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tallest item the grid accepts, in rows.
pub const MAX_ITEM_HEIGHT: u32 = 1_000;

/// Placement of one widget on one breakpoint's grid, in cell units.
///
/// Field names on the wire follow the react-grid-layout convention. The
/// interaction flags are derived from the store's edit mode and are never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    #[serde(rename = "i")]
    pub widget_id: WidgetId,
    pub x: u32,
    pub y: u32,
    #[serde(rename = "w")]
    pub width: u32,
    #[serde(rename = "h")]
    pub height: u32,
    #[serde(rename = "minW", default = "one")]
    pub min_width: u32,
    #[serde(rename = "minH", default = "one")]
    pub min_height: u32,
    #[serde(rename = "maxW", default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(rename = "maxH", default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    #[serde(skip, default = "yes")]
    pub is_static: bool,
    #[serde(skip)]
    pub is_draggable: bool,
    #[serde(skip)]
    pub is_resizable: bool,
}

fn one() -> u32 {
    1
}

fn yes() -> bool {
    true
}

impl LayoutItem {
    /// Create a locked item with no size constraints beyond one cell.
    pub fn new(widget_id: impl Into<WidgetId>, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            widget_id: widget_id.into(),
            x,
            y,
            width,
            height,
            min_width: 1,
            min_height: 1,
            max_width: None,
            max_height: None,
            is_static: true,
            is_draggable: false,
            is_resizable: false,
        }
    }

    /// Create an item at the origin sized from a catalog profile.
    pub fn from_profile(widget_id: impl Into<WidgetId>, profile: &SizeProfile) -> Self {
        Self::new(widget_id, 0, 0, profile.default_width, profile.default_height)
            .with_min(profile.min_width, profile.min_height)
            .with_max(profile.max_width, profile.max_height)
    }

    pub fn with_min(mut self, min_width: u32, min_height: u32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    pub fn with_max(mut self, max_width: Option<u32>, max_height: Option<u32>) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Set the interaction flags for the given edit mode.
    pub fn set_editable(&mut self, editing: bool) {
        self.is_static = !editing;
        self.is_draggable = editing;
        self.is_resizable = editing;
    }

    pub fn with_editable(mut self, editing: bool) -> Self {
        self.set_editable(editing);
        self
    }

    /// First column past the item.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// First row below the item.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the cell rectangles of two items intersect.
    pub fn overlaps(&self, other: &LayoutItem) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Clamp size constraints and position so the item fits a grid of
    /// `columns`. Heights are capped at [`MAX_ITEM_HEIGHT`].
    pub fn fit_to_columns(&mut self, columns: u32) {
        let columns = columns.max(1);
        let min_width = self.min_width.clamp(1, columns);
        let max_width = self.max_width.unwrap_or(u32::MAX).max(min_width);
        self.min_width = min_width;
        self.width = self.width.clamp(min_width, max_width).min(columns);

        let min_height = self.min_height.clamp(1, MAX_ITEM_HEIGHT);
        let max_height = self.max_height.unwrap_or(u32::MAX).max(min_height);
        self.min_height = min_height;
        self.height = self.height.clamp(min_height, max_height).min(MAX_ITEM_HEIGHT);

        self.x = self.x.min(columns - self.width);
    }
}

/// One layout per breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Vec<LayoutItem>>",
    into = "BTreeMap<String, Vec<LayoutItem>>"
)]
pub struct ResponsiveLayouts(BTreeMap<Breakpoint, Vec<LayoutItem>>);

impl ResponsiveLayouts {
    pub fn new() -> Self {
        Self::default()
    }

    /// The layout for a breakpoint, if one is stored.
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&[LayoutItem]> {
        self.0.get(&breakpoint).map(Vec::as_slice)
    }

    /// The layout for a breakpoint, empty if none is stored.
    pub fn items(&self, breakpoint: Breakpoint) -> &[LayoutItem] {
        self.get(breakpoint).unwrap_or(&[])
    }

    /// Replace the layout for a breakpoint.
    pub fn insert(&mut self, breakpoint: Breakpoint, items: Vec<LayoutItem>) {
        self.0.insert(breakpoint, items);
    }

    pub fn with(mut self, breakpoint: Breakpoint, items: Vec<LayoutItem>) -> Self {
        self.insert(breakpoint, items);
        self
    }

    /// Iterate layouts, largest breakpoint first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &[LayoutItem])> {
        self.0.iter().map(|(bp, items)| (*bp, items.as_slice()))
    }

    /// Iterate every item of every breakpoint mutably.
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut LayoutItem> {
        self.0.values_mut().flatten()
    }

    /// Find the item for a widget on a breakpoint.
    pub fn find(&self, breakpoint: Breakpoint, widget_id: &str) -> Option<&LayoutItem> {
        self.items(breakpoint)
            .iter()
            .find(|item| item.widget_id == widget_id)
    }

}

impl FromIterator<(Breakpoint, Vec<LayoutItem>)> for ResponsiveLayouts {
    fn from_iter<T: IntoIterator<Item = (Breakpoint, Vec<LayoutItem>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, Vec<LayoutItem>>> for ResponsiveLayouts {
    fn from(raw: BTreeMap<String, Vec<LayoutItem>>) -> Self {
        raw.into_iter()
            .filter_map(|(name, items)| match Breakpoint::parse(&name) {
                Some(bp) => Some((bp, items)),
                None => {
                    log::warn!("Dropping layout for unknown breakpoint '{}'", name);
                    None
                }
            })
            .collect()
    }
}

impl From<ResponsiveLayouts> for BTreeMap<String, Vec<LayoutItem>> {
    fn from(layouts: ResponsiveLayouts) -> Self {
        layouts
            .0
            .into_iter()
            .map(|(bp, items)| (bp.name().to_string(), items))
            .collect()
    }
}
