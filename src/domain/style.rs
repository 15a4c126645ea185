//! Category tags and their presentation styles.

use serde::Serialize;
use std::fmt;

/// Closed set of subject categories. Each one picks an icon and an accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    BarChart,
    LineChart,
    Database,
    Users,
    Code,
    Brain,
}

/// Accent colour family used for a subject's card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Sky,
    Orange,
    Lime,
    Indigo,
    Fuchsia,
    Rose,
}

impl Accent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sky => "sky",
            Self::Orange => "orange",
            Self::Lime => "lime",
            Self::Indigo => "indigo",
            Self::Fuchsia => "fuchsia",
            Self::Rose => "rose",
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Presentation descriptor for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Style {
    pub icon: &'static str,
    pub accent: Accent,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::BarChart,
        Category::LineChart,
        Category::Database,
        Category::Users,
        Category::Code,
        Category::Brain,
    ];

    /// Returns the style for this category.
    pub const fn style(self) -> Style {
        match self {
            Category::BarChart => Style {
                icon: "bar-chart",
                accent: Accent::Sky,
            },
            Category::LineChart => Style {
                icon: "line-chart",
                accent: Accent::Orange,
            },
            Category::Database => Style {
                icon: "database",
                accent: Accent::Lime,
            },
            Category::Users => Style {
                icon: "users",
                accent: Accent::Indigo,
            },
            Category::Code => Style {
                icon: "code",
                accent: Accent::Fuchsia,
            },
            Category::Brain => Style {
                icon: "brain",
                accent: Accent::Rose,
            },
        }
    }
}
