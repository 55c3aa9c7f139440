use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Una opción de multiple-choice. Exactamente una opción por tarjeta
/// debe llevar `is_correct = true`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McqOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub question: String, // Pregunta
    pub answer: String,   // Respuesta
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcq_options: Option<Vec<McqOption>>,
}

impl Flashcard {
    /// Devuelve la opción correcta, si la tarjeta tiene opciones.
    pub fn correct_option(&self) -> Option<&McqOption> {
        self.mcq_options
            .as_deref()?
            .iter()
            .find(|opt| opt.is_correct)
    }

    pub fn has_options(&self) -> bool {
        self.mcq_options
            .as_deref()
            .is_some_and(|opts| !opts.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSet {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub flashcards: Vec<Flashcard>,
}

/// Datos de un set nuevo: el store asigna `id` y `created_at` al crearlo.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewFlashcardSet {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub flashcards: Vec<Flashcard>,
}

/// Resumen guardado aparte de los sets (segunda clave de almacenamiento).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedSummary {
    pub id: String,
    pub file_name: String,
    pub summary: String,
    pub mode: SummaryMode,
    pub date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    Brief,
    Detailed,
}

impl SummaryMode {
    /// Valor que espera el endpoint de procesado.
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryMode::Brief => "brief",
            SummaryMode::Detailed => "detailed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SummaryMode::Brief => "Resumen breve",
            SummaryMode::Detailed => "Resumen detallado",
        }
    }
}

impl Default for SummaryMode {
    fn default() -> Self {
        SummaryMode::Brief
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Library,
    Study,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Home
    }
}

/// Pestaña activa dentro de la vista de estudio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    Flashcards,
    Quiz,
}

impl Default for StudyMode {
    fn default() -> Self {
        StudyMode::Flashcards
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Date,
    Name,
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Date
    }
}
