//! Gridboard Core Library
//!
//! Widget layout engine for a responsive dashboard grid: the widget catalog,
//! bin-packing across breakpoints, the layout store and its persistence.

pub mod breakpoint;
pub mod config;
pub mod defaults;
pub mod drawer;
pub mod layout;
pub mod schema;
pub mod service;
pub mod storage;
pub mod store;
pub mod widget;

pub use breakpoint::Breakpoint;
pub use config::{BreakpointConfig, ConfigError, GridConfig};
pub use drawer::{DragPayload, DropSession, WidgetDrawer};
pub use layout::{LayoutItem, LayoutResolver, ResponsiveLayouts};
pub use schema::{CURRENT_SCHEMA_VERSION, Migration, PersistedDashboard};
pub use service::{DashboardService, SaveSpawner};
pub use storage::{BoxFuture, FileStorage, LayoutStorage, MemoryStorage, StorageError, StorageResult};
pub use store::{LayoutState, LayoutStore};
pub use widget::{DataSource, SizeProfile, Widget, WidgetId, WidgetType};
