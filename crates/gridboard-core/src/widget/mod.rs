//! Dashboard widgets and the catalog describing them.
//!
//! A widget is pure identity plus a type tag. Where it sits on the grid is
//! owned by the layout store, one `LayoutItem` per breakpoint.

pub mod catalog;
mod kind;

pub use catalog::{CatalogEntry, FALLBACK_PROFILE, SizeProfile};
pub use kind::{DataSource, WidgetType};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque widget identifier.
pub type WidgetId = String;

/// A widget on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Widget {
    /// Create a widget with an explicit id.
    pub fn new(id: impl Into<WidgetId>, widget_type: WidgetType) -> Self {
        Self {
            id: id.into(),
            widget_type,
            title: None,
        }
    }

    /// Create a widget with a fresh random id and the catalog title.
    pub fn generate(widget_type: WidgetType) -> Self {
        let title = catalog::title(&widget_type);
        Self::new(Uuid::new_v4().to_string(), widget_type).with_title(title)
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Title to display, falling back to the catalog title.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| catalog::title(&self.widget_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_assigns_unique_ids() {
        let a = Widget::generate(WidgetType::Calendar);
        let b = Widget::generate(WidgetType::Calendar);
        assert_ne!(a.id, b.id);
        assert_eq!(a.title.as_deref(), Some("Calendar"));
    }

    #[test]
    fn test_serde_shape() {
        let widget = Widget::new("w1", WidgetType::Team);
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json, serde_json::json!({ "id": "w1", "type": "team" }));

        let parsed: Widget =
            serde_json::from_str(r#"{"id":"w2","type":"gauge","title":"Progress"}"#).unwrap();
        assert_eq!(parsed.widget_type, WidgetType::Gauge);
        assert_eq!(parsed.display_title(), "Progress");
    }
}
