//! The compiled-in default dashboard.

use crate::layout::LayoutItem;
use crate::widget::{Widget, WidgetType, catalog};

/// Default widgets paired with their canonical (largest breakpoint) placement.
const DEFAULT_DASHBOARD: [(WidgetType, u32, u32); 10] = [
    (WidgetType::StatTotal, 0, 0),
    (WidgetType::StatEnded, 3, 0),
    (WidgetType::StatRunning, 6, 0),
    (WidgetType::StatPending, 9, 0),
    (WidgetType::Analytics, 0, 4),
    (WidgetType::Team, 6, 4),
    (WidgetType::Reminders, 0, 12),
    (WidgetType::Gauge, 3, 12),
    (WidgetType::ProjectList, 6, 12),
    (WidgetType::TimeTracker, 9, 12),
];

/// The default widget set. Default widgets use their type tag as id.
pub fn initial_widgets() -> Vec<Widget> {
    DEFAULT_DASHBOARD
        .iter()
        .map(|(kind, _, _)| Widget::new(kind.as_str(), kind.clone()).with_title(catalog::title(kind)))
        .collect()
}

/// The author-specified layout for the canonical breakpoint.
pub fn canonical_layout() -> Vec<LayoutItem> {
    DEFAULT_DASHBOARD
        .iter()
        .map(|(kind, x, y)| {
            let mut item = LayoutItem::from_profile(kind.as_str(), &catalog::size_profile(kind));
            item.x = *x;
            item.y = *y;
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::pack;

    #[test]
    fn test_widgets_match_layout() {
        let widgets = initial_widgets();
        let layout = canonical_layout();
        assert_eq!(widgets.len(), 10);
        for (widget, item) in widgets.iter().zip(&layout) {
            assert_eq!(widget.id, item.widget_id);
        }
    }

    #[test]
    fn test_canonical_layout_is_valid() {
        assert!(pack::is_valid(12, &canonical_layout()));
    }

    #[test]
    fn test_canonical_sizes() {
        let layout = canonical_layout();
        let project_list = layout.iter().find(|i| i.widget_id == "project-list").unwrap();
        assert_eq!((project_list.x, project_list.y, project_list.width, project_list.height), (6, 12, 3, 9));
        let analytics = layout.iter().find(|i| i.widget_id == "analytics").unwrap();
        assert_eq!((analytics.width, analytics.height, analytics.min_width, analytics.min_height), (6, 8, 4, 6));
    }
}
