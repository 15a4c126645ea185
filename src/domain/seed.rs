//! Built-in sample notes, written on first run and used when storage is unreadable.

use crate::domain::{Location, Note, NoteId, StageId, SubjectId, WeekId};
use chrono::{DateTime, Duration, Utc};

struct SeedNote {
    author: &'static str,
    content: &'static str,
    age_days: i64,
    subject: &'static str,
    stage: &'static str,
    week: &'static str,
}

const SEED_NOTES: [SeedNote; 3] = [
    SeedNote {
        author: "Ali Yılmaz",
        content: "Temel istatistikte p-value değerinin yanlış yorumlanması üzerine konuştuk. H0 hipotezini reddetmek için %5 sınırının kesin bir doğru olmadığını anladım.",
        age_days: 0,
        subject: "stat",
        stage: "stage1",
        week: "week1",
    },
    SeedNote {
        author: "Ayşe Demir",
        content: "Python Pandas kütüphanesinde groupby fonksiyonu ile pivot table oluşturmak Excel'den çok daha hızlı. Özellikle büyük verisetlerinde loc ve iloc farkını iyi kavramak lazım.",
        age_days: 1,
        subject: "stat",
        stage: "stage2",
        week: "week1",
    },
    SeedNote {
        author: "Mehmet Can",
        content: "Yapay sinir ağlarında backpropagation algoritmasının matematiksel türevini inceledik. Zincir kuralının (chain rule) burada nasıl işlediği kritik.",
        age_days: 2,
        subject: "ai",
        stage: "stage3",
        week: "week1",
    },
];

/// Returns the sample notes, newest first, dated relative to `now`.
pub fn seed_notes(now: DateTime<Utc>) -> Vec<Note> {
    SEED_NOTES
        .iter()
        .filter_map(|seed| {
            let created = now - Duration::days(seed.age_days);
            let location = Location::new(
                SubjectId::from_static(seed.subject),
                StageId::from_static(seed.stage),
                WeekId::from_static(seed.week),
            );
            Note::builder(NoteId::at(created), seed.author, seed.content, created, location)
                .build()
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, StandardCatalog};

    #[test]
    fn three_notes_newest_first() {
        let notes = seed_notes(Utc::now());
        assert_eq!(notes.len(), 3);
        assert!(notes.windows(2).all(|w| w[0].created() > w[1].created()));
        assert!(notes.windows(2).all(|w| w[0].id() > w[1].id()));
    }

    #[test]
    fn seed_locations_exist_in_catalog() {
        let catalog = StandardCatalog;
        for note in seed_notes(Utc::now()) {
            let loc = note.location();
            assert!(catalog.subject(&loc.subject).is_some());
            assert!(catalog.week(&loc.stage, &loc.week).is_some());
        }
    }
}
