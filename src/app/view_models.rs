use super::*;
use crate::model::SortBy;

impl StudyApp {
    /// Filas de la biblioteca ya ordenadas según el criterio activo:
    /// fecha de creación descendente o título ascendente.
    pub fn library_rows(&self) -> Vec<SetRow> {
        let mut rows: Vec<SetRow> = self
            .store
            .list()
            .iter()
            .map(|set| SetRow {
                id: set.id.clone(),
                title: set.title.clone(),
                description: set.description.clone(),
                card_count: set.flashcards.len(),
                created_at: set.created_at,
            })
            .collect();

        match self.sort_by {
            SortBy::Date => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Name => rows.sort_by(|a, b| a.title.cmp(&b.title)),
        }

        rows
    }
}
