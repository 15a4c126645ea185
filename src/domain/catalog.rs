//! Fixed curriculum catalog: subjects, stages, and the weeks of each stage.

use crate::domain::{Category, StageId, SubjectId, WeekId};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// A subject of the curriculum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subject {
    pub id: SubjectId,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
}

/// One of the sequential program phases.
///
/// Each stage runs for a fixed number of consecutive 7-day weeks from a
/// fixed calendar start date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub id: StageId,
    pub title: &'static str,
    #[serde(skip)]
    start: (i32, u32, u32),
    #[serde(skip)]
    week_count: u32,
}

impl Stage {
    const fn new(
        id: &'static str,
        title: &'static str,
        start: (i32, u32, u32),
        week_count: u32,
    ) -> Self {
        Self {
            id: StageId::from_static(id),
            title,
            start,
            week_count,
        }
    }

    /// First day of the stage's first week.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.start;
        NaiveDate::from_ymd_opt(y, m, d)
    }

    pub fn week_count(&self) -> u32 {
        self.week_count
    }

    /// Derives the stage's weeks. Pure: the same stage always yields the same weeks.
    pub fn weeks(&self) -> Vec<Week> {
        let Some(first) = self.start_date() else {
            return Vec::new();
        };

        (0..self.week_count)
            .map(|i| {
                let start = first + Duration::days(7 * i64::from(i));
                let number = i + 1;
                Week {
                    id: WeekId::from_owned(format!("week{number}")),
                    number,
                    title: format!("{number}. Hafta"),
                    start,
                    end: start + Duration::days(6),
                }
            })
            .collect()
    }
}

/// A 7-day span within a stage. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    pub id: WeekId,
    pub number: u32,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Week {
    /// Short tr-TR label of the first day, e.g. `8 Eki`.
    pub fn start_label(&self) -> String {
        short_date_tr(self.start)
    }

    /// Short tr-TR label of the last day, e.g. `14 Eki`.
    pub fn end_label(&self) -> String {
        short_date_tr(self.end)
    }
}

const MONTHS_TR: [&str; 12] = [
    "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];

fn short_date_tr(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS_TR[date.month0() as usize])
}

/// Read-only source of the curriculum hierarchy.
pub trait Catalog {
    /// All subjects, in display order.
    fn subjects(&self) -> &[Subject];

    /// The program stages, in order.
    fn stages(&self) -> &[Stage];

    /// The weeks of a stage, in order. Empty for an unknown stage.
    fn weeks_for(&self, stage: &StageId) -> Vec<Week> {
        self.stage(stage).map(Stage::weeks).unwrap_or_default()
    }

    fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects().iter().find(|s| &s.id == id)
    }

    fn stage(&self, id: &StageId) -> Option<&Stage> {
        self.stages().iter().find(|s| &s.id == id)
    }

    fn week(&self, stage: &StageId, week: &WeekId) -> Option<Week> {
        self.weeks_for(stage).into_iter().find(|w| &w.id == week)
    }
}

static SUBJECTS: [Subject; 6] = [
    Subject {
        id: SubjectId::from_static("stat"),
        title: "Temel İstatistik",
        description: "Veri analizi ve istatistiksel modellemenin temelleri.",
        category: Category::BarChart,
    },
    Subject {
        id: SubjectId::from_static("psych"),
        title: "Psikometri",
        description: "Ölçüm teorisi ve ölçek geliştirme teknikleri.",
        category: Category::LineChart,
    },
    Subject {
        id: SubjectId::from_static("panel"),
        title: "Panel Veri",
        description: "Zaman serileri ve kesitsel veri analizleri.",
        category: Category::Database,
    },
    Subject {
        id: SubjectId::from_static("social"),
        title: "Hesaplamalı Sosyal Bilimler",
        description: "Büyük veri ile sosyal olguların incelenmesi.",
        category: Category::Users,
    },
    Subject {
        id: SubjectId::from_static("digital"),
        title: "Dijital Beşeri Bilimler",
        description: "Metin madenciliği ve kültürel analitik.",
        category: Category::Code,
    },
    Subject {
        id: SubjectId::from_static("ai"),
        title: "Yapay Zeka",
        description: "Makine öğrenimi ve derin öğrenme uygulamaları.",
        category: Category::Brain,
    },
];

static STAGES: [Stage; 3] = [
    Stage::new("stage1", "1. Aşama: İstatistiğe Giriş", (2025, 10, 8), 8),
    Stage::new("stage2", "2. Aşama: Kodlamaya Giriş", (2025, 12, 3), 5),
    Stage::new("stage3", "3. Aşama: Modül Dersleri", (2026, 2, 4), 14),
];

/// The built-in curriculum.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCatalog;

impl Catalog for StandardCatalog {
    fn subjects(&self) -> &[Subject] {
        &SUBJECTS
    }

    fn stages(&self) -> &[Stage] {
        &STAGES
    }
}
