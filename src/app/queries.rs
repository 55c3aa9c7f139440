use super::*;
use crate::model::{Flashcard, FlashcardSet};

impl StudyApp {
    /// Set abierto en la vista de estudio, si sigue existiendo en el store.
    pub fn current_set(&self) -> Option<&FlashcardSet> {
        self.open_set_id.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn current_set_len(&self) -> usize {
        self.current_set().map_or(0, |s| s.flashcards.len())
    }

    /// Tarjeta bajo el cursor de la sesión.
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.current_set()?
            .flashcards
            .get(self.session.current_index)
    }
}
