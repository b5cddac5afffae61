//! Backend endpoints the site reads from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A listing endpoint of the university backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    AcademicBuildings,
    Dormitories,
    Hospitals,
    Laboratories,
    Announcements,
    News,
    Events,
    ScheduleSubsections,
    Conferences,
    Achievements,
    Statistics,
    Management,
    Partners,
    Councils,
    Accreditations,
    AboutSections,
}

impl Endpoint {
    pub const ALL: [Endpoint; 16] = [
        Endpoint::AcademicBuildings,
        Endpoint::Dormitories,
        Endpoint::Hospitals,
        Endpoint::Laboratories,
        Endpoint::Announcements,
        Endpoint::News,
        Endpoint::Events,
        Endpoint::ScheduleSubsections,
        Endpoint::Conferences,
        Endpoint::Achievements,
        Endpoint::Statistics,
        Endpoint::Management,
        Endpoint::Partners,
        Endpoint::Councils,
        Endpoint::Accreditations,
        Endpoint::AboutSections,
    ];

    /// Stable key used on the command line, in config overrides and as the
    /// fixture file name.
    pub fn key(self) -> &'static str {
        match self {
            Endpoint::AcademicBuildings => "academic-buildings",
            Endpoint::Dormitories => "dormitories",
            Endpoint::Hospitals => "hospitals",
            Endpoint::Laboratories => "laboratories",
            Endpoint::Announcements => "announcements",
            Endpoint::News => "news",
            Endpoint::Events => "events",
            Endpoint::ScheduleSubsections => "schedule-subsections",
            Endpoint::Conferences => "conferences",
            Endpoint::Achievements => "achievements",
            Endpoint::Statistics => "statistics",
            Endpoint::Management => "management",
            Endpoint::Partners => "partners",
            Endpoint::Councils => "councils",
            Endpoint::Accreditations => "accreditations",
            Endpoint::AboutSections => "about-sections",
        }
    }

    /// Path relative to the API base URL.
    pub fn default_path(self) -> &'static str {
        match self {
            Endpoint::AcademicBuildings => "/api/infrastructure/academic-buildings/",
            Endpoint::Dormitories => "/api/infrastructure/dormitories/",
            Endpoint::Hospitals => "/api/infrastructure/hospitals/",
            Endpoint::Laboratories => "/api/infrastructure/laboratories/",
            Endpoint::Announcements => "/api/announcements/",
            Endpoint::News => "/api/news/",
            Endpoint::Events => "/api/events/",
            Endpoint::ScheduleSubsections => "/api/schedule/subsections/",
            Endpoint::Conferences => "/research/api/conferences/",
            Endpoint::Achievements => "/api/mission/api/achievements/",
            Endpoint::Statistics => "/api/infrastructure/overview/",
            Endpoint::Management => "/api/hsm/leadership/",
            Endpoint::Partners => "/api/about-section/partners/",
            Endpoint::Councils => "/api/about-section/councils/",
            Endpoint::Accreditations => "/api/about-section/accreditations/",
            Endpoint::AboutSections => "/api/about-section/about-sections/",
        }
    }

    /// Field that carries the record's category for filtering.
    pub fn category_key(self) -> &'static str {
        match self {
            Endpoint::Announcements | Endpoint::Dormitories | Endpoint::Partners => "type",
            Endpoint::Accreditations => "accreditation_type",
            Endpoint::Conferences => "status",
            Endpoint::Management => "department",
            _ => "category",
        }
    }

    /// Localized field families shown in listings.
    pub fn display_fields(self) -> &'static [&'static str] {
        match self {
            Endpoint::AcademicBuildings
            | Endpoint::Dormitories
            | Endpoint::Hospitals
            | Endpoint::Laboratories => {
                &["name", "address", "description"]
            }
            Endpoint::Announcements => &["title", "description"],
            Endpoint::News => &["title", "summary"],
            Endpoint::Events | Endpoint::Conferences => &["title", "location"],
            Endpoint::ScheduleSubsections => &["title", "description"],
            Endpoint::Achievements => &["title", "description"],
            Endpoint::Statistics => &["label", "value"],
            Endpoint::Management => &["full_name", "position"],
            Endpoint::Partners | Endpoint::Councils | Endpoint::Accreditations => {
                &["name", "description"]
            }
            Endpoint::AboutSections => &["title", "content"],
        }
    }

    /// Whether listings split pinned records from the rest.
    pub fn has_pinned(self) -> bool {
        matches!(self, Endpoint::Announcements | Endpoint::News)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for Endpoint {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|e| e.key() == key)
            .ok_or_else(|| AppError::UnknownEndpoint(s.to_string()))
    }
}
