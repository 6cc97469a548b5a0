//! Derives per-breakpoint layouts from the canonical layout.

use super::{LayoutItem, ResponsiveLayouts, pack};
use crate::breakpoint::Breakpoint;
use crate::config::GridConfig;
use crate::widget::{Widget, catalog};
use std::collections::HashSet;

/// Produces and repairs the `{breakpoint -> layout}` map.
#[derive(Debug, Clone, Copy)]
pub struct LayoutResolver<'a> {
    config: &'a GridConfig,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(config: &'a GridConfig) -> Self {
        Self { config }
    }

    pub fn columns(&self, breakpoint: Breakpoint) -> u32 {
        self.config.columns(breakpoint)
    }

    /// Pack the canonical items into a breakpoint's columns.
    pub fn derive(&self, canonical: &[LayoutItem], breakpoint: Breakpoint) -> Vec<LayoutItem> {
        pack::pack(self.columns(breakpoint), canonical)
    }

    /// The canonical layout fitted to the configured canonical columns.
    ///
    /// A layout that already fits is returned as is; one that overflows the
    /// columns or overlaps once clamped is repacked.
    pub fn fit_canonical(&self, canonical: &[LayoutItem]) -> Vec<LayoutItem> {
        let columns = self.columns(Breakpoint::CANONICAL);
        let fitted = pack::fit_layout(columns, canonical);
        if pack::is_valid(columns, &fitted) {
            return fitted;
        }
        log::debug!("Canonical layout does not fit {} columns, repacking", columns);
        pack::pack(columns, &fitted)
    }

    /// Full layout map: the canonical layout fitted to its columns, every
    /// other breakpoint derived from it.
    pub fn resolve(&self, canonical: &[LayoutItem]) -> ResponsiveLayouts {
        let canonical = self.fit_canonical(canonical);
        let mut layouts = ResponsiveLayouts::new();
        for bp in Breakpoint::ALL.into_iter().filter(|bp| !bp.is_canonical()) {
            layouts.insert(bp, self.derive(&canonical, bp));
        }
        layouts.insert(Breakpoint::CANONICAL, canonical);
        layouts
    }

    /// A new item for a widget on a breakpoint, sized from the catalog.
    pub fn synthesize(&self, widget: &Widget, breakpoint: Breakpoint) -> LayoutItem {
        let profile = catalog::size_profile(&widget.widget_type);
        let mut item = LayoutItem::from_profile(widget.id.clone(), &profile);
        item.fit_to_columns(self.columns(breakpoint));
        item
    }

    /// Add items for `widgets` that are missing from a breakpoint's layout,
    /// keeping the existing items in place.
    pub fn complete(
        &self,
        items: Vec<LayoutItem>,
        widgets: &[Widget],
        breakpoint: Breakpoint,
    ) -> Vec<LayoutItem> {
        let present: HashSet<&str> = items.iter().map(|i| i.widget_id.as_str()).collect();
        let missing: Vec<LayoutItem> = widgets
            .iter()
            .filter(|w| !present.contains(w.id.as_str()))
            .map(|w| self.synthesize(w, breakpoint))
            .collect();

        if missing.is_empty() {
            return items;
        }
        pack::splice(self.columns(breakpoint), &items, &missing)
    }

    /// Reconcile possibly stale or partial layouts with a widget set.
    ///
    /// Items for unknown widgets and duplicate ids are dropped, items are
    /// clamped to their breakpoint's columns and missing widgets are spliced
    /// in. Overlaps between stored items are kept, the same as for a manual
    /// layout change. Breakpoints that are absent or empty are derived from
    /// the repaired canonical layout, which itself falls back to
    /// `fallback_canonical`.
    pub fn repair(
        &self,
        widgets: &[Widget],
        layouts: &ResponsiveLayouts,
        fallback_canonical: &[LayoutItem],
    ) -> ResponsiveLayouts {
        let known: HashSet<&str> = widgets.iter().map(|w| w.id.as_str()).collect();

        let canonical = match layouts.get(Breakpoint::CANONICAL) {
            Some(items) if !items.is_empty() => self.sanitize(items, &known, Breakpoint::CANONICAL),
            _ => {
                let fallback = self.sanitize(fallback_canonical, &known, Breakpoint::CANONICAL);
                self.fit_canonical(&fallback)
            }
        };
        let canonical = self.complete(canonical, widgets, Breakpoint::CANONICAL);

        let mut repaired = ResponsiveLayouts::new();
        for bp in Breakpoint::ALL.into_iter().filter(|bp| !bp.is_canonical()) {
            let items = match layouts.get(bp) {
                Some(items) if !items.is_empty() => {
                    let items = self.sanitize(items, &known, bp);
                    self.complete(items, widgets, bp)
                }
                _ => self.derive(&canonical, bp),
            };
            repaired.insert(bp, items);
        }
        repaired.insert(Breakpoint::CANONICAL, canonical);
        repaired
    }

    /// Whether every breakpoint has exactly one item per widget and nothing else.
    pub fn is_complete(widgets: &[Widget], layouts: &ResponsiveLayouts) -> bool {
        Breakpoint::ALL.into_iter().all(|bp| {
            let Some(items) = layouts.get(bp) else {
                return false;
            };
            items.len() == widgets.len()
                && widgets
                    .iter()
                    .all(|w| items.iter().filter(|i| i.widget_id == w.id).count() == 1)
        })
    }

    fn sanitize(
        &self,
        items: &[LayoutItem],
        known: &HashSet<&str>,
        breakpoint: Breakpoint,
    ) -> Vec<LayoutItem> {
        let mut seen = HashSet::new();
        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let id = item.widget_id.as_str();
            if !known.contains(id) {
                log::warn!("Dropping {} layout item for unknown widget '{}'", breakpoint, id);
                continue;
            }
            if !seen.insert(id) {
                log::warn!("Dropping duplicate {} layout item for '{}'", breakpoint, id);
                continue;
            }
            result.push(item.clone());
        }
        pack::fit_layout(self.columns(breakpoint), &result)
    }
}
