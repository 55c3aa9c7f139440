use super::*;
use crate::model::AppState;

impl StudyApp {
    pub fn ir_a_inicio(&mut self) {
        self.state = AppState::Home;
        self.message.clear();
    }

    pub fn ir_a_biblioteca(&mut self) {
        self.state = AppState::Library;
        self.open_set_id = None;
        self.message.clear();
    }

    /// Abre un set para estudiarlo, con sesión y quiz recién estrenados.
    ///
    /// Si el id no existe no es un fallo duro: se redirige a la biblioteca
    /// con un aviso (el set pudo borrarse en otra pestaña, por ejemplo).
    pub fn abrir_set(&mut self, id: &str) {
        if self.store.get(id).is_none() {
            self.message = "Set de flashcards no encontrado".to_string();
            self.state = AppState::Library;
            self.open_set_id = None;
            return;
        }

        self.open_set_id = Some(id.to_string());
        self.session = StudySession::new();
        self.quiz = QuizState::new();
        self.study_mode = StudyMode::default();
        self.state = AppState::Study;
        self.message.clear();
    }

    pub fn set_study_mode(&mut self, mode: StudyMode) {
        self.study_mode = mode;
    }

    pub fn next_card(&mut self) {
        let len = self.current_set_len();
        if len > 0 {
            self.session.next(len);
        }
    }

    pub fn previous_card(&mut self) {
        let len = self.current_set_len();
        if len > 0 {
            self.session.previous(len);
        }
    }

    pub fn flip_card(&mut self) {
        self.session.flip();
    }

    pub fn jump_to_card(&mut self, index: usize) {
        let len = self.current_set_len();
        if let Err(e) = self.session.jump_to(index, len) {
            // Contrato de programación violado por la UI; se deja rastro.
            log::error!("jump_to_card: {e}");
        }
    }

    // --- Navegación de la previsualización (tarjetas recién generadas) ---

    pub fn preview_next(&mut self) {
        let len = self.draft.as_ref().map_or(0, |d| d.cards.len());
        if len > 0 {
            self.preview.next(len);
        }
    }

    pub fn preview_previous(&mut self) {
        let len = self.draft.as_ref().map_or(0, |d| d.cards.len());
        if len > 0 {
            self.preview.previous(len);
        }
    }

    pub fn preview_flip(&mut self) {
        self.preview.flip();
    }
}
