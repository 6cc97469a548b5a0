//! Layout store: the widget set and its per-breakpoint layouts.

use crate::breakpoint::Breakpoint;
use crate::config::GridConfig;
use crate::defaults;
use crate::layout::{LayoutItem, LayoutResolver, ResponsiveLayouts, pack};
use crate::schema::PersistedDashboard;
use crate::widget::{Widget, WidgetType, catalog};
use std::collections::HashSet;

/// Everything the grid surface renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutState {
    pub widgets: Vec<Widget>,
    pub layouts: ResponsiveLayouts,
    pub edit_mode: bool,
}

/// Owns the active widgets and their layouts.
///
/// Every mutation builds the next state in full and commits it with a single
/// assignment, so no reader ever sees a widget without its layout items on
/// every breakpoint, or a layout item without its widget.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    state: LayoutState,
    config: GridConfig,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl LayoutStore {
    /// Create a store holding the default dashboard.
    pub fn new(config: GridConfig) -> Self {
        let layouts = LayoutResolver::new(&config).resolve(&defaults::canonical_layout());
        Self {
            state: LayoutState {
                widgets: defaults::initial_widgets(),
                layouts,
                edit_mode: false,
            },
            config,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.state.widgets
    }

    pub fn layouts(&self) -> &ResponsiveLayouts {
        &self.state.layouts
    }

    /// The layout of one breakpoint.
    pub fn layout(&self, breakpoint: Breakpoint) -> &[LayoutItem] {
        self.state.layouts.items(breakpoint)
    }

    pub fn is_edit_mode(&self) -> bool {
        self.state.edit_mode
    }

    pub fn contains(&self, widget_id: &str) -> bool {
        self.state.widgets.iter().any(|w| w.id == widget_id)
    }

    pub fn widget(&self, widget_id: &str) -> Option<&Widget> {
        self.state.widgets.iter().find(|w| w.id == widget_id)
    }

    fn resolver(&self) -> LayoutResolver<'_> {
        LayoutResolver::new(&self.config)
    }

    fn commit(&mut self, next: LayoutState) {
        self.state = next;
    }

    /// Add a widget, placing it on every breakpoint from its catalog profile.
    ///
    /// Existing items stay where they are; the new item takes the first free
    /// slot. Returns false if the widget id is already present.
    pub fn add_widget(&mut self, widget: Widget) -> bool {
        if self.contains(&widget.id) {
            log::debug!("Widget {} already present", widget.id);
            return false;
        }

        let mut layouts = ResponsiveLayouts::new();
        for bp in Breakpoint::ALL {
            layouts.insert(bp, self.splice_new(&widget, bp));
        }

        log::debug!("Adding widget {} ({})", widget.id, widget.widget_type);
        let mut widgets = self.state.widgets.clone();
        widgets.push(widget);
        self.commit(LayoutState {
            widgets,
            layouts,
            edit_mode: self.state.edit_mode,
        });
        true
    }

    /// Add a widget dropped onto a specific breakpoint's grid.
    ///
    /// The given layout for `breakpoint` is kept, clamped to the columns;
    /// every other breakpoint gets the widget the same way as
    /// [`add_widget`](Self::add_widget). If the given layout does not cover
    /// exactly the widget set it is reconciled first. Returns false if the widget id is already present.
    pub fn add_widget_with_layout(
        &mut self,
        widget: Widget,
        breakpoint: Breakpoint,
        layout: Vec<LayoutItem>,
    ) -> bool {
        if self.contains(&widget.id) {
            log::debug!("Widget {} already present", widget.id);
            return false;
        }

        let mut widgets = self.state.widgets.clone();
        widgets.push(widget);
        let widget = &widgets[widgets.len() - 1];

        let mut layouts = ResponsiveLayouts::new();
        for bp in Breakpoint::ALL {
            if bp == breakpoint {
                continue;
            }
            layouts.insert(bp, self.splice_new(widget, bp));
        }

        let layout = if covers_exactly(&widgets, &layout) {
            pack::fit_layout(self.config.columns(breakpoint), &layout)
        } else {
            log::warn!("Dropped layout for {} does not match the widget set, reconciling", breakpoint);
            self.reconcile(&widgets, &layout, breakpoint)
        };
        layouts.insert(breakpoint, layout);

        log::debug!("Dropped widget {} onto {}", widget.id, breakpoint);
        self.commit(LayoutState {
            widgets,
            layouts,
            edit_mode: self.state.edit_mode,
        });
        true
    }

    /// Remove a widget and its items from every breakpoint.
    pub fn remove_widget(&mut self, widget_id: &str) -> bool {
        if !self.contains(widget_id) {
            return false;
        }

        let widgets: Vec<Widget> = self
            .state
            .widgets
            .iter()
            .filter(|w| w.id != widget_id)
            .cloned()
            .collect();
        let layouts: ResponsiveLayouts = self
            .state
            .layouts
            .iter()
            .map(|(bp, items)| {
                let kept: Vec<LayoutItem> = items.iter().filter(|i| i.widget_id != widget_id).cloned().collect();
                (bp, kept)
            })
            .collect();

        log::debug!("Removing widget {}", widget_id);
        self.commit(LayoutState {
            widgets,
            layouts,
            edit_mode: self.state.edit_mode,
        });
        true
    }

    /// Replace one breakpoint's layout after a manual drag or resize.
    ///
    /// Other breakpoints are untouched. Overlap prevention is the grid
    /// surface's job: overlapping items are kept, but every item is clamped
    /// to the columns, and items that do not cover exactly the widget set
    /// are reconciled.
    pub fn update_layout(&mut self, breakpoint: Breakpoint, items: Vec<LayoutItem>) {
        let items = if covers_exactly(&self.state.widgets, &items) {
            pack::fit_layout(self.config.columns(breakpoint), &items)
        } else {
            log::warn!("Manual layout for {} does not match the widget set, reconciling", breakpoint);
            self.reconcile(&self.state.widgets, &items, breakpoint)
        };

        let mut layouts = self.state.layouts.clone();
        layouts.insert(breakpoint, items);
        self.commit(LayoutState {
            widgets: self.state.widgets.clone(),
            layouts,
            edit_mode: self.state.edit_mode,
        });
    }

    /// Replace all layouts. Breakpoints missing or empty in `layouts` fall
    /// back to layouts derived from the canonical one.
    pub fn set_layouts(&mut self, layouts: ResponsiveLayouts) {
        let widgets = self.state.widgets.clone();
        self.replace_state(widgets, layouts);
    }

    /// Replace widgets and layouts, repairing layouts that are partial or stale.
    pub fn replace_state(&mut self, widgets: Vec<Widget>, layouts: ResponsiveLayouts) {
        let widgets = dedup_widgets(widgets);
        let canonical = defaults::canonical_layout();
        let mut layouts = self.resolver().repair(&widgets, &layouts, &canonical);
        let edit_mode = self.state.edit_mode;
        for item in layouts.items_mut() {
            item.set_editable(edit_mode);
        }
        self.commit(LayoutState {
            widgets,
            layouts,
            edit_mode,
        });
    }

    /// Restore the default widgets and layouts.
    pub fn reset_to_default(&mut self) {
        let edit_mode = self.state.edit_mode;
        let mut layouts = self.resolver().resolve(&defaults::canonical_layout());
        for item in layouts.items_mut() {
            item.set_editable(edit_mode);
        }
        log::debug!("Resetting layout to defaults");
        self.commit(LayoutState {
            widgets: defaults::initial_widgets(),
            layouts,
            edit_mode,
        });
    }

    /// Enter or leave edit mode, flipping every item's interaction flags.
    /// Returns false if the mode did not change.
    pub fn set_edit_mode(&mut self, editing: bool) -> bool {
        if self.state.edit_mode == editing {
            return false;
        }
        let mut layouts = self.state.layouts.clone();
        for item in layouts.items_mut() {
            item.set_editable(editing);
        }
        self.commit(LayoutState {
            widgets: self.state.widgets.clone(),
            layouts,
            edit_mode: editing,
        });
        true
    }

    pub fn toggle_edit_mode(&mut self) {
        self.set_edit_mode(!self.state.edit_mode);
    }

    /// The layout a drop of `widget_type` at `(x, y)` would produce on
    /// `breakpoint`, with the new item keyed by `widget_id`.
    ///
    /// The drop position is kept when free; otherwise the item moves to the
    /// first free slot at or below the requested row. Rows far below the
    /// layout are pulled up to its bottom.
    pub fn drop_layout(
        &self,
        breakpoint: Breakpoint,
        widget_id: &str,
        widget_type: &WidgetType,
        x: u32,
        y: u32,
    ) -> Vec<LayoutItem> {
        let profile = catalog::size_profile(widget_type);
        let mut item = LayoutItem::from_profile(widget_id, &profile).with_editable(self.state.edit_mode);
        item.x = x;
        item.y = y;
        pack::place_drop(self.config.columns(breakpoint), self.layout(breakpoint), item)
    }

    /// The persistable form of the current state.
    pub fn snapshot(&self) -> PersistedDashboard {
        PersistedDashboard::new(self.state.widgets.clone(), self.state.layouts.clone())
    }

    /// The current layout of `breakpoint` with an item for `widget` spliced in.
    fn splice_new(&self, widget: &Widget, breakpoint: Breakpoint) -> Vec<LayoutItem> {
        let existing = self.layout(breakpoint);
        if existing.iter().any(|i| i.widget_id == widget.id) {
            return existing.to_vec();
        }
        let item = self
            .resolver()
            .synthesize(widget, breakpoint)
            .with_editable(self.state.edit_mode);
        pack::splice(self.config.columns(breakpoint), existing, &[item])
    }

    fn reconcile(&self, widgets: &[Widget], items: &[LayoutItem], breakpoint: Breakpoint) -> Vec<LayoutItem> {
        let partial = ResponsiveLayouts::new().with(breakpoint, items.to_vec());
        let repaired = self.resolver().repair(widgets, &partial, self.layout(Breakpoint::CANONICAL));
        let mut items = repaired.items(breakpoint).to_vec();
        for item in &mut items {
            item.set_editable(self.state.edit_mode);
        }
        items
    }
}

/// Whether `items` has exactly one entry per widget and nothing else.
fn covers_exactly(widgets: &[Widget], items: &[LayoutItem]) -> bool {
    let ids: HashSet<&str> = widgets.iter().map(|w| w.id.as_str()).collect();
    let mut seen = HashSet::new();
    items.len() == ids.len()
        && items
            .iter()
            .all(|i| ids.contains(i.widget_id.as_str()) && seen.insert(i.widget_id.as_str()))
}

fn dedup_widgets(widgets: Vec<Widget>) -> Vec<Widget> {
    let mut seen = HashSet::new();
    widgets
        .into_iter()
        .filter(|w| {
            let fresh = seen.insert(w.id.clone());
            if !fresh {
                log::warn!("Dropping duplicate widget '{}'", w.id);
            }
            fresh
        })
        .collect()
}
