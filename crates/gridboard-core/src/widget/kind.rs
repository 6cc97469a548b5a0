//! Widget type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a widget's renderer and its sizing profile.
///
/// Tags that are not recognised (experimental widgets, payloads from newer
/// clients) are kept verbatim in `Other` so they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetType {
    StatTotal,
    StatEnded,
    StatRunning,
    StatPending,
    Analytics,
    Team,
    Reminders,
    Gauge,
    ProjectList,
    TimeTracker,
    Calendar,
    Stats,
    KanbanBoard,
    Other(String),
}

/// The data a widget renderer consumes from the dashboard data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Aggregate project counters.
    ProjectStats,
    /// The project list.
    Projects,
    /// Team members and their current tasks.
    TeamMembers,
    Reminders,
    TimeTracking,
    CalendarEvents,
    /// Kanban columns and tasks.
    Tasks,
    /// Renders static content.
    None,
}

impl WidgetType {
    /// Every recognised widget type, in catalog order.
    pub const KNOWN: [WidgetType; 13] = [
        WidgetType::StatTotal,
        WidgetType::StatEnded,
        WidgetType::StatRunning,
        WidgetType::StatPending,
        WidgetType::Analytics,
        WidgetType::Team,
        WidgetType::Reminders,
        WidgetType::Gauge,
        WidgetType::ProjectList,
        WidgetType::TimeTracker,
        WidgetType::Calendar,
        WidgetType::Stats,
        WidgetType::KanbanBoard,
    ];

    /// The wire tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            WidgetType::StatTotal => "stat-total",
            WidgetType::StatEnded => "stat-ended",
            WidgetType::StatRunning => "stat-running",
            WidgetType::StatPending => "stat-pending",
            WidgetType::Analytics => "analytics",
            WidgetType::Team => "team",
            WidgetType::Reminders => "reminders",
            WidgetType::Gauge => "gauge",
            WidgetType::ProjectList => "project-list",
            WidgetType::TimeTracker => "time-tracker",
            WidgetType::Calendar => "calendar",
            WidgetType::Stats => "stats",
            WidgetType::KanbanBoard => "kanban-board",
            WidgetType::Other(tag) => tag,
        }
    }

    /// Whether the tag was recognised.
    pub fn is_known(&self) -> bool {
        !matches!(self, WidgetType::Other(_))
    }

    /// Which data the renderer for this type needs.
    pub fn data_source(&self) -> DataSource {
        match self {
            WidgetType::StatTotal
            | WidgetType::StatEnded
            | WidgetType::StatRunning
            | WidgetType::StatPending
            | WidgetType::Gauge
            | WidgetType::Stats => DataSource::ProjectStats,
            WidgetType::ProjectList => DataSource::Projects,
            WidgetType::Team => DataSource::TeamMembers,
            WidgetType::Reminders => DataSource::Reminders,
            WidgetType::TimeTracker => DataSource::TimeTracking,
            WidgetType::Calendar => DataSource::CalendarEvents,
            WidgetType::KanbanBoard => DataSource::Tasks,
            WidgetType::Analytics | WidgetType::Other(_) => DataSource::None,
        }
    }
}

impl From<&str> for WidgetType {
    fn from(tag: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str() == tag)
            .unwrap_or_else(|| WidgetType::Other(tag.to_string()))
    }
}

impl From<String> for WidgetType {
    fn from(tag: String) -> Self {
        match WidgetType::from(tag.as_str()) {
            WidgetType::Other(_) => WidgetType::Other(tag),
            known => known,
        }
    }
}

impl From<WidgetType> for String {
    fn from(kind: WidgetType) -> Self {
        match kind {
            WidgetType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
