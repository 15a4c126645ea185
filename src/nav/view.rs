//! Maps navigation state to the screen to render.

use crate::domain::Catalog;
use crate::nav::{NavigationState, View};
use serde::Serialize;

pub const APP_TITLE: &str = "Veri Analizi Okulu";
const SUBJECTS_TITLE: &str = "Ders Programı";
const STAGES_FALLBACK: &str = "Aşama Seçimi";
const WEEKS_FALLBACK: &str = "Hafta Seçimi";
const NOTES_FALLBACK: &str = "Notlar";
const DETAIL_TITLE: &str = "Not Detayı";
const SEARCH_TITLE: &str = "Arama ve Filtreleme";
const SEARCH_SUBTITLE: &str = "Tüm notlar içerisinde ara";

/// Which screen the rendering layer should paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenTag {
    Landing,
    Subjects,
    Stages,
    Weeks,
    Notes,
    NoteDetail,
    SearchResults,
}

/// Screen plus the header contents that go with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub tag: ScreenTag,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub can_go_back: bool,
}

/// Selects the screen for a navigation state.
///
/// A note opened from search results is shown over the results; otherwise
/// an active search hides the hierarchy. Titles fall back to generic text
/// when a selected id is missing or unknown to the catalog.
pub fn select_screen<C: Catalog + ?Sized>(
    state: &NavigationState,
    search_active: bool,
    catalog: &C,
) -> Screen {
    let can_go_back = search_active || state.view() != View::Landing;

    if search_active && !state.is_detail_over_search() {
        return Screen {
            tag: ScreenTag::SearchResults,
            title: SEARCH_TITLE.to_string(),
            subtitle: Some(SEARCH_SUBTITLE.to_string()),
            can_go_back,
        };
    }

    let subject = state.subject().and_then(|id| catalog.subject(id));
    let stage = state.subject().and(state.stage()).and_then(|id| catalog.stage(id));

    let (tag, title) = match state.view() {
        View::Landing => (ScreenTag::Landing, APP_TITLE.to_string()),
        View::Subjects => (ScreenTag::Subjects, SUBJECTS_TITLE.to_string()),
        View::Stages => (
            ScreenTag::Stages,
            subject.map_or(STAGES_FALLBACK, |s| s.title).to_string(),
        ),
        View::Weeks => (
            ScreenTag::Weeks,
            stage.map_or(WEEKS_FALLBACK, |s| s.title).to_string(),
        ),
        View::Notes => {
            let week = match (stage, state.week()) {
                (Some(stage), Some(week)) => catalog.week(&stage.id, week),
                _ => None,
            };
            (
                ScreenTag::Notes,
                week.map_or_else(|| NOTES_FALLBACK.to_string(), |w| w.title),
            )
        }
        View::NoteDetail => (ScreenTag::NoteDetail, DETAIL_TITLE.to_string()),
    };

    let subtitle = match (tag, subject, stage) {
        (ScreenTag::Notes | ScreenTag::NoteDetail, Some(subject), Some(stage)) => {
            Some(format!("{} • {}", subject.title, stage.title))
        }
        _ => None,
    };

    Screen {
        tag,
        title,
        subtitle,
        can_go_back,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NoteId, StageId, StandardCatalog, SubjectId, WeekId};
    use crate::nav::{Drill, Navigator, UserMode};
    use pretty_assertions::assert_eq;

    fn screen(nav: &Navigator) -> Screen {
        select_screen(nav.state(), nav.search_active(), &StandardCatalog)
    }

    fn drilled(depth: usize) -> Navigator {
        let mut nav = Navigator::new();
        nav.select_mode(UserMode::Viewer);
        let steps = [
            Drill::Subject(SubjectId::new("stat").unwrap()),
            Drill::Stage(StageId::new("stage2").unwrap()),
            Drill::Week(WeekId::new("week3").unwrap()),
            Drill::Note(NoteId::new()),
        ];
        for step in steps.into_iter().take(depth) {
            nav.drill_into(step).unwrap();
        }
        nav
    }

    #[test]
    fn landing_has_no_back() {
        let s = screen(&Navigator::new());
        assert_eq!(s.tag, ScreenTag::Landing);
        assert_eq!(s.title, APP_TITLE);
        assert!(!s.can_go_back);
    }

    #[test]
    fn subjects_still_offers_back() {
        let s = screen(&drilled(0));
        assert_eq!(s.tag, ScreenTag::Subjects);
        assert_eq!(s.title, "Ders Programı");
        assert!(s.can_go_back);
        assert_eq!(s.subtitle, None);
    }

    #[test]
    fn titles_follow_selected_ids() {
        assert_eq!(screen(&drilled(1)).title, "Temel İstatistik");
        assert_eq!(screen(&drilled(2)).title, "2. Aşama: Kodlamaya Giriş");
        assert_eq!(screen(&drilled(3)).title, "3. Hafta");
        assert_eq!(screen(&drilled(4)).title, "Not Detayı");
    }

    #[test]
    fn notes_and_detail_compose_subtitle() {
        let expected = Some("Temel İstatistik • 2. Aşama: Kodlamaya Giriş".to_string());
        assert_eq!(screen(&drilled(3)).subtitle, expected);
        assert_eq!(screen(&drilled(4)).subtitle, expected);
        assert_eq!(screen(&drilled(2)).subtitle, None);
    }

    #[test]
    fn unknown_ids_fall_back_to_generic_titles() {
        let mut nav = Navigator::new();
        nav.select_mode(UserMode::Viewer);
        nav.drill_into(Drill::Subject(SubjectId::new("chem").unwrap()))
            .unwrap();
        assert_eq!(screen(&nav).title, "Aşama Seçimi");
        nav.drill_into(Drill::Stage(StageId::new("stage7").unwrap()))
            .unwrap();
        assert_eq!(screen(&nav).title, "Hafta Seçimi");
        nav.drill_into(Drill::Week(WeekId::new("week1").unwrap()))
            .unwrap();
        let s = screen(&nav);
        assert_eq!(s.title, "Notlar");
        assert_eq!(s.subtitle, None);
    }

    #[test]
    fn search_overrides_hierarchy_screen() {
        let mut nav = drilled(3);
        nav.toggle_search();
        let s = screen(&nav);
        assert_eq!(s.tag, ScreenTag::SearchResults);
        assert_eq!(s.title, "Arama ve Filtreleme");
        assert_eq!(s.subtitle.as_deref(), Some("Tüm notlar içerisinde ara"));
        assert!(s.can_go_back);
    }

    #[test]
    fn result_detail_shows_over_search() {
        let mut nav = drilled(0);
        nav.toggle_search();
        nav.open_note_detail(NoteId::new()).unwrap();
        let s = screen(&nav);
        assert_eq!(s.tag, ScreenTag::NoteDetail);
        assert_eq!(s.subtitle, None, "no hierarchy selection to describe");
        assert!(s.can_go_back);
    }
}
