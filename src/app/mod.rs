use std::sync::mpsc::Receiver;

use crate::model::{AppState, SortBy, StudyMode, SummaryMode};
use crate::pipeline::{GeneratedDraft, PipelineError};
use crate::quiz::QuizState;
use crate::session::StudySession;
use crate::store::{SetStore, StorageBackend, SummaryStore, default_backend};

// Submódulos
pub mod actions;
pub mod navigation;
pub mod queries;
pub mod resets;
pub mod view_models;

// Re-export de view models
pub use crate::view_models::SetRow;

/// Pestaña activa de la previsualización tras procesar un documento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTab {
    Summary,
    Cards,
}

/// Archivo elegido para el pipeline, con su origen.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub source: FileSource,
}

#[derive(Clone)]
pub enum FileSource {
    /// Ruta en disco (nativo); se lee justo antes de subir.
    Path(std::path::PathBuf),
    /// Contenido ya en memoria (drag & drop, web).
    Bytes(Vec<u8>),
}

pub struct StudyApp {
    // Estado persistido (dueños únicos de sus datos)
    pub store: SetStore,
    pub summaries: SummaryStore,

    // Estado global de la UI
    pub state: AppState,
    pub message: String,

    // Inicio: subida y pipeline
    pub selected_file: Option<SelectedFile>,
    pub file_path_input: String,
    pub summary_mode: SummaryMode,
    pub processing: bool,
    pub draft: Option<GeneratedDraft>,
    pub draft_saved: bool,
    pub preview_tab: PreviewTab,
    pub preview: StudySession,
    pipeline_rx: Option<Receiver<Result<GeneratedDraft, PipelineError>>>,

    // Biblioteca
    pub sort_by: SortBy,
    pub confirm_delete: Option<String>, // id del set pendiente de confirmar

    // Estudio (transitorio, se reconstruye al abrir un set)
    pub open_set_id: Option<String>,
    pub study_mode: StudyMode,
    pub session: StudySession,
    pub quiz: QuizState,
}

impl StudyApp {
    pub fn new() -> Self {
        Self::with_backends(default_backend(), default_backend())
    }

    /// Construye la app con backends inyectados (memoria en tests, durable
    /// en producción).
    pub fn with_backends(
        sets_backend: Box<dyn StorageBackend>,
        summaries_backend: Box<dyn StorageBackend>,
    ) -> Self {
        Self {
            store: SetStore::new(sets_backend),
            summaries: SummaryStore::new(summaries_backend),
            state: AppState::default(),
            message: String::new(),
            selected_file: None,
            file_path_input: String::new(),
            summary_mode: SummaryMode::default(),
            processing: false,
            draft: None,
            draft_saved: false,
            preview_tab: PreviewTab::Summary,
            preview: StudySession::new(),
            pipeline_rx: None,
            sort_by: SortBy::default(),
            confirm_delete: None,
            open_set_id: None,
            study_mode: StudyMode::default(),
            session: StudySession::new(),
            quiz: QuizState::new(),
        }
    }
}

impl Default for StudyApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppState;
    use crate::pipeline::QaPair;
    use crate::store::MemoryBackend;

    fn test_app() -> StudyApp {
        StudyApp::with_backends(Box::new(MemoryBackend::new()), Box::new(MemoryBackend::new()))
    }

    #[test]
    fn txt_upload_is_rejected_locally() {
        let mut app = test_app();
        app.attach_file_bytes("notas.txt", b"hola".to_vec());
        app.procesar_documento();

        // Falla antes de tocar la red: sin pipeline en vuelo y con mensaje
        assert!(!app.processing);
        assert!(app.message.contains("no soportado"));
    }

    #[test]
    fn processing_guard_blocks_reentry() {
        let mut app = test_app();
        app.processing = true;
        app.attach_file_bytes("apuntes.pdf", b"%PDF".to_vec());
        app.procesar_documento();
        assert!(app.message.contains("procesándose"));
    }

    #[test]
    fn opening_unknown_set_redirects_to_library() {
        let mut app = test_app();
        app.abrir_set("no-existe");
        assert_eq!(app.state, AppState::Library);
        assert_eq!(app.open_set_id, None);
    }

    #[test]
    fn saving_a_draft_materializes_a_persisted_set() {
        let mut app = test_app();
        app.draft = Some(GeneratedDraft {
            file_name: "apuntes.pdf".to_string(),
            mode: SummaryMode::Brief,
            summary: "S".to_string(),
            explanation: None,
            cards: vec![QaPair {
                question: "Q1".to_string(),
                answer: "A1".to_string(),
            }],
        });

        app.guardar_set();

        let id = app.open_set_id.clone().expect("debería abrir el set nuevo");
        let set = app.store.get(&id).expect("el set debería estar persistido");
        assert_eq!(set.title, "apuntes");
        assert_eq!(set.flashcards.len(), 1);

        let options = set.flashcards[0].mcq_options.as_deref().unwrap();
        assert_eq!(options[0].text, "A1");
        assert!(options[0].is_correct);
        assert_eq!(app.state, AppState::Study);
        assert!(app.draft_saved);
    }

    #[test]
    fn quiz_flow_scores_and_resets_through_the_app() {
        let mut app = test_app();
        app.abrir_set("demo");
        assert_eq!(app.state, AppState::Study);

        let set = app.current_set().unwrap().clone();
        assert_eq!(set.flashcards.len(), 5);

        // Tres bien, una mal, una sin contestar
        for (i, card) in set.flashcards.iter().take(3).enumerate() {
            let correct = card.correct_option().unwrap().id.clone();
            app.quiz_select(&set.flashcards[i].id, &correct);
        }
        let wrong = set.flashcards[3]
            .mcq_options
            .as_deref()
            .unwrap()
            .iter()
            .find(|o| !o.is_correct)
            .unwrap()
            .id
            .clone();
        app.quiz_select(&set.flashcards[3].id, &wrong);

        app.check_answers();
        let score = app.quiz.score.unwrap();
        assert_eq!((score.correct, score.total), (3, 5));

        // Tras el reset, una corrección sin selecciones puntúa 0 de N
        app.reset_quiz();
        assert_eq!(app.session.current_index, 0);
        app.check_answers();
        let score = app.quiz.score.unwrap();
        assert_eq!((score.correct, score.total), (0, 5));
    }

    #[test]
    fn deleting_the_open_set_returns_to_library() {
        let mut app = test_app();
        app.abrir_set("demo");
        app.request_delete_set("demo");
        app.delete_set_confirmed();

        assert!(app.store.get("demo").is_none());
        assert_eq!(app.state, AppState::Library);
        assert_eq!(app.open_set_id, None);
        // ir_a_biblioteca limpia el mensaje; la confirmación llega después
        assert_eq!(app.message, "✅ Set borrado.");
    }
}
