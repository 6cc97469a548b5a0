//! Dashboard service: the layout store plus its persistence side effects.

use crate::breakpoint::Breakpoint;
use crate::config::GridConfig;
use crate::layout::{LayoutItem, ResponsiveLayouts};
use crate::schema::{self, Migration};
use crate::storage::{BoxFuture, LayoutStorage};
use crate::store::LayoutStore;
use crate::widget::{Widget, WidgetId, WidgetType};
use std::sync::Arc;

/// Runs a fire-and-forget save.
pub type SaveSpawner = Box<dyn Fn(BoxFuture<'static, ()>)>;

/// Owns the only [`LayoutStore`] and persists it after every mutation.
///
/// Saves are handed to the spawner and never awaited. Each one writes the
/// state as it was when the mutation committed, so a later save always
/// carries the newer state. Storage failures are logged and never undo an
/// in-memory change.
pub struct DashboardService<S: LayoutStorage + 'static> {
    store: LayoutStore,
    storage: Arc<S>,
    user_id: Option<String>,
    spawner: SaveSpawner,
}

impl<S: LayoutStorage + 'static> DashboardService<S> {
    /// Create a service holding the default dashboard.
    pub fn new(config: GridConfig, storage: Arc<S>, spawner: SaveSpawner) -> Self {
        Self {
            store: LayoutStore::new(config),
            storage,
            user_id: None,
            spawner,
        }
    }

    /// Set the user whose layout is loaded and saved.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn set_user(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Load the current user's layout into the store.
    ///
    /// Returns true if the store was replaced. Without a user, without a
    /// stored layout or on failure the current state is kept.
    pub async fn fetch_layout(&mut self) -> bool {
        let Some(user_id) = self.user_id.clone() else {
            log::debug!("No user, skipping layout fetch");
            return false;
        };

        let document = match self.storage.load(&user_id).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                log::info!("No stored layout for {}, using defaults", user_id);
                return false;
            }
            Err(e) => {
                log::error!("Failed to fetch layout for {}: {}", user_id, e);
                return false;
            }
        };

        match schema::migrate(document) {
            Migration::Current(document) => {
                log::info!("Loaded layout for {} ({} widgets)", user_id, document.widgets.len());
                self.store.replace_state(document.widgets, document.layouts);
            }
            Migration::Reset => self.store.reset_to_default(),
        }
        true
    }

    /// Persist the current state for the current user without waiting.
    pub fn save_layout(&self) {
        let Some(user_id) = self.user_id.clone() else {
            log::debug!("No user, skipping layout save");
            return;
        };

        let document = self.store.snapshot();
        let storage = Arc::clone(&self.storage);
        (self.spawner)(Box::pin(async move {
            match storage.save(&user_id, &document).await {
                Ok(()) => log::debug!("Saved layout for {}", user_id),
                Err(e) => log::error!("Failed to save layout for {}: {}", user_id, e),
            }
        }));
    }

    pub fn add_widget(&mut self, widget: Widget) -> bool {
        let added = self.store.add_widget(widget);
        if added {
            self.save_layout();
        }
        added
    }

    pub fn add_widget_with_layout(
        &mut self,
        widget: Widget,
        breakpoint: Breakpoint,
        layout: Vec<LayoutItem>,
    ) -> bool {
        let added = self.store.add_widget_with_layout(widget, breakpoint, layout);
        if added {
            self.save_layout();
        }
        added
    }

    pub fn remove_widget(&mut self, widget_id: &str) -> bool {
        let removed = self.store.remove_widget(widget_id);
        if removed {
            self.save_layout();
        }
        removed
    }

    pub fn update_layout(&mut self, breakpoint: Breakpoint, items: Vec<LayoutItem>) {
        self.store.update_layout(breakpoint, items);
        self.save_layout();
    }

    pub fn set_layouts(&mut self, layouts: ResponsiveLayouts) {
        self.store.set_layouts(layouts);
        self.save_layout();
    }

    pub fn reset_to_default(&mut self) {
        self.store.reset_to_default();
        self.save_layout();
    }

    /// Edit mode only changes interaction flags, which are never persisted.
    pub fn set_edit_mode(&mut self, editing: bool) -> bool {
        self.store.set_edit_mode(editing)
    }

    pub fn toggle_edit_mode(&mut self) {
        self.store.toggle_edit_mode();
    }

    /// Grid surface callback after a manual drag or resize.
    pub fn on_manual_layout_change(&mut self, breakpoint: Breakpoint, items: Vec<LayoutItem>) {
        self.update_layout(breakpoint, items);
    }

    /// Grid surface callback for a catalog entry dropped at cell `(x, y)`.
    ///
    /// Returns the id of the new widget.
    pub fn on_external_drop(
        &mut self,
        breakpoint: Breakpoint,
        widget_type: WidgetType,
        x: u32,
        y: u32,
    ) -> WidgetId {
        let widget = Widget::generate(widget_type);
        let layout = self
            .store
            .drop_layout(breakpoint, &widget.id, &widget.widget_type, x, y);
        let id = widget.id.clone();
        log::debug!("Widget {} dropped onto {} at ({}, {})", id, breakpoint, x, y);
        self.add_widget_with_layout(widget, breakpoint, layout);
        id
    }

    /// Grid surface callback for a widget's remove control.
    pub fn on_widget_remove(&mut self, widget_id: &str) -> bool {
        self.remove_widget(widget_id)
    }
}
