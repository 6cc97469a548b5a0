//! Widget drawer and the drag-and-drop protocol onto the grid.
//!
//! Dragging is two-phase. The drawer starts a drag carrying only the widget
//! type; nothing touches the layout store until the drop commits, so a
//! cancelled drag leaves no trace.

use crate::breakpoint::Breakpoint;
use crate::layout::LayoutItem;
use crate::service::DashboardService;
use crate::storage::LayoutStorage;
use crate::store::LayoutStore;
use crate::widget::{CatalogEntry, WidgetId, WidgetType, catalog};

/// Id of the placeholder item shown while a drag hovers over the grid.
pub const DROPPING_ITEM_ID: &str = "__dropping_elem__";

/// What a drag from the drawer carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub widget_type: WidgetType,
}

/// Side panel listing the catalog.
#[derive(Debug, Clone, Default)]
pub struct WidgetDrawer {
    open: bool,
    query: String,
}

impl WidgetDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Catalog entries whose title contains the query, ignoring case.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        let query = self.query.trim().to_lowercase();
        catalog::entries()
            .into_iter()
            .filter(|entry| query.is_empty() || entry.title.to_lowercase().contains(&query))
            .collect()
    }

    /// Start dragging a catalog entry. The drawer hides so the grid is
    /// reachable.
    pub fn begin_drag(&mut self, widget_type: WidgetType) -> DragPayload {
        log::debug!("Drag started for {}", widget_type);
        self.close();
        DragPayload { widget_type }
    }
}

/// Transient state of a drag in progress over the grid.
#[derive(Debug, Clone, Default)]
pub struct DropSession {
    payload: Option<DragPayload>,
}

impl DropSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase one: a drag entered the grid.
    pub fn begin(&mut self, payload: DragPayload) {
        self.payload = Some(payload);
    }

    pub fn is_active(&self) -> bool {
        self.payload.is_some()
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        self.payload.as_ref()
    }

    /// The drag left the grid or was aborted.
    pub fn cancel(&mut self) {
        if self.payload.take().is_some() {
            log::debug!("Drag cancelled");
        }
    }

    /// Placeholder item for the drop target at cell `(x, y)`.
    pub fn preview(&self, store: &LayoutStore, breakpoint: Breakpoint, x: u32, y: u32) -> Option<LayoutItem> {
        let payload = self.payload.as_ref()?;
        store
            .drop_layout(breakpoint, DROPPING_ITEM_ID, &payload.widget_type, x, y)
            .pop()
    }

    /// Phase two: the drag was released over cell `(x, y)`.
    ///
    /// This is the only step that mutates the store. Returns the new
    /// widget's id, or `None` if no drag was in progress.
    pub fn commit<S: LayoutStorage + 'static>(
        &mut self,
        service: &mut DashboardService<S>,
        breakpoint: Breakpoint,
        x: u32,
        y: u32,
    ) -> Option<WidgetId> {
        let payload = self.payload.take()?;
        Some(service.on_external_drop(breakpoint, payload.widget_type, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::storage::{BoxFuture, MemoryStorage, block_on};
    use std::sync::Arc;

    fn service(storage: &Arc<MemoryStorage>) -> DashboardService<MemoryStorage> {
        DashboardService::new(
            GridConfig::default(),
            Arc::clone(storage),
            Box::new(|future: BoxFuture<'static, ()>| block_on(future)),
        )
        .with_user("user-1")
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut drawer = WidgetDrawer::new();
        assert_eq!(drawer.entries().len(), WidgetType::KNOWN.len());

        drawer.set_query("PROJ");
        let titles: Vec<String> = drawer.entries().into_iter().map(|e| e.title).collect();
        assert!(titles.contains(&"Total Projects".to_string()));
        assert!(titles.contains(&"Projects".to_string()));
        assert!(!titles.contains(&"Calendar".to_string()));

        drawer.set_query("zzz");
        assert!(drawer.entries().is_empty());
    }

    #[test]
    fn test_begin_drag_closes_drawer() {
        let mut drawer = WidgetDrawer::new();
        drawer.open();
        let payload = drawer.begin_drag(WidgetType::Calendar);
        assert!(!drawer.is_open());
        assert_eq!(payload.widget_type, WidgetType::Calendar);
    }

    #[test]
    fn test_cancelled_drag_leaves_store_untouched() {
        let storage = Arc::new(MemoryStorage::new());
        let mut service = service(&storage);
        let before = service.store().state().clone();

        let mut session = DropSession::new();
        session.begin(DragPayload { widget_type: WidgetType::Team });
        let ghost = session.preview(service.store(), Breakpoint::Lg, 0, 40).unwrap();
        assert_eq!(ghost.widget_id, DROPPING_ITEM_ID);
        assert_eq!((ghost.x, ghost.y, ghost.width, ghost.height), (0, 40, 6, 8));
        session.cancel();

        assert!(session.commit(&mut service, Breakpoint::Lg, 0, 40).is_none());
        assert_eq!(service.store().state(), &before);
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_commit_adds_widget_at_preview() {
        let storage = Arc::new(MemoryStorage::new());
        let mut service = service(&storage);
        let mut drawer = WidgetDrawer::new();

        let mut session = DropSession::new();
        session.begin(drawer.begin_drag(WidgetType::Stats));
        let ghost = session.preview(service.store(), Breakpoint::Sm, 0, 0).unwrap();
        let id = session.commit(&mut service, Breakpoint::Sm, 0, 0).unwrap();

        assert!(!session.is_active());
        let item = service.store().layouts().find(Breakpoint::Sm, &id).unwrap();
        assert_eq!((item.x, item.y, item.width, item.height), (ghost.x, ghost.y, ghost.width, ghost.height));
        assert!(service.store().layouts().find(Breakpoint::Lg, &id).is_some());
        assert_eq!(storage.save_count(), 1);
    }
}
