//! Static registry of widget sizing profiles.

use super::kind::WidgetType;

/// Grid-cell sizing for a widget type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeProfile {
    pub default_width: u32,
    pub default_height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl SizeProfile {
    const fn new(default_width: u32, default_height: u32, min_width: u32, min_height: u32) -> Self {
        Self {
            default_width,
            default_height,
            min_width,
            min_height,
            max_width: None,
            max_height: None,
        }
    }

    const fn with_max(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = Some(max_width);
        self.max_height = Some(max_height);
        self
    }
}

/// Profile used for widget types the catalog does not know.
pub const FALLBACK_PROFILE: SizeProfile = SizeProfile::new(4, 4, 2, 4);

/// A catalog entry as shown in the widget drawer.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub widget_type: WidgetType,
    pub title: String,
    pub profile: SizeProfile,
}

/// Look up the sizing profile for a widget type.
///
/// Unknown types get [`FALLBACK_PROFILE`] so experimental widgets never break the grid.
pub fn size_profile(widget_type: &WidgetType) -> SizeProfile {
    match widget_type {
        WidgetType::StatTotal
        | WidgetType::StatEnded
        | WidgetType::StatRunning
        | WidgetType::StatPending => SizeProfile::new(3, 4, 2, 3),
        WidgetType::Analytics | WidgetType::Team => SizeProfile::new(6, 8, 4, 6),
        WidgetType::Reminders | WidgetType::Gauge | WidgetType::TimeTracker => {
            SizeProfile::new(3, 6, 2, 4)
        }
        WidgetType::ProjectList => SizeProfile::new(3, 9, 2, 5),
        WidgetType::Calendar => SizeProfile::new(4, 4, 3, 4).with_max(6, 8),
        WidgetType::Stats => SizeProfile::new(6, 4, 4, 3),
        WidgetType::KanbanBoard => SizeProfile::new(12, 10, 6, 8),
        WidgetType::Other(_) => FALLBACK_PROFILE,
    }
}

/// Human-readable title for a widget type.
pub fn title(widget_type: &WidgetType) -> String {
    let title = match widget_type {
        WidgetType::StatTotal => "Total Projects",
        WidgetType::StatEnded => "Ended Projects",
        WidgetType::StatRunning => "Running Projects",
        WidgetType::StatPending => "Pending Projects",
        WidgetType::Analytics => "Project Analytics",
        WidgetType::Team => "Team",
        WidgetType::Reminders => "Reminders",
        WidgetType::Gauge => "Progress",
        WidgetType::ProjectList => "Projects",
        WidgetType::TimeTracker => "Time Tracker",
        WidgetType::Calendar => "Calendar",
        WidgetType::Stats => "Stats",
        WidgetType::KanbanBoard => "Tasks",
        WidgetType::Other(tag) => return capitalize(tag),
    };
    title.to_string()
}

/// Catalog entry for a widget type.
pub fn entry(widget_type: &WidgetType) -> CatalogEntry {
    CatalogEntry {
        widget_type: widget_type.clone(),
        title: title(widget_type),
        profile: size_profile(widget_type),
    }
}

/// All entries the widget drawer can offer.
pub fn entries() -> Vec<CatalogEntry> {
    WidgetType::KNOWN.iter().map(entry).collect()
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
