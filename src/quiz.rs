//! Evaluación de respuestas y puntuación del quiz de set completo.

use std::collections::HashMap;

use crate::model::Flashcard;

/// ¿Es `option_id` la opción correcta de la tarjeta?
///
/// La tarjeta debe tener opciones y exactamente una con `is_correct = true`;
/// para tarjetas solo de flip el resultado es siempre `false` y la UI no debe
/// llegar a llamar aquí.
pub fn evaluate(card: &Flashcard, option_id: &str) -> bool {
    card.correct_option().is_some_and(|key| key.id == option_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

/// Selecciones acumuladas durante un quiz sobre el set completo.
///
/// Mientras no se hayan mostrado los resultados se puede cambiar cualquier
/// selección; tras `check_all` quedan bloqueadas hasta `reset`.
#[derive(Debug, Clone, Default)]
pub struct QuizState {
    pub selections: HashMap<String, String>, // tarjeta -> opción elegida
    pub results_shown: bool,
    pub score: Option<Score>,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra o sobreescribe la selección para una tarjeta. Ignorado una
    /// vez mostrados los resultados.
    pub fn select(&mut self, card_id: &str, option_id: &str) {
        if self.results_shown {
            return;
        }
        self.selections
            .insert(card_id.to_string(), option_id.to_string());
    }

    pub fn selection_for(&self, card_id: &str) -> Option<&str> {
        self.selections.get(card_id).map(String::as_str)
    }

    /// Corrige todo el set y bloquea las selecciones.
    ///
    /// Una tarjeta sin selección cuenta como incorrecta, nunca falla. OJO:
    /// `total` cuenta TODAS las tarjetas del set, también las que no tienen
    /// opciones y por tanto no son corregibles; es el comportamiento del
    /// cliente original y está documentado en DESIGN.md.
    pub fn check_all(&mut self, cards: &[Flashcard]) -> Score {
        let correct = cards
            .iter()
            .filter(|card| card.has_options())
            .filter(|card| {
                self.selection_for(&card.id)
                    .is_some_and(|opt| evaluate(card, opt))
            })
            .count();

        let score = Score {
            correct,
            total: cards.len(),
        };
        self.score = Some(score);
        self.results_shown = true;
        score
    }

    /// Borra selecciones y resultados; quien llama devuelve además la
    /// navegación a la primera tarjeta.
    pub fn reset(&mut self) {
        self.selections.clear();
        self.results_shown = false;
        self.score = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::McqOption;

    fn mcq_card(id: &str, correct: &str) -> Flashcard {
        let options = (1..=4)
            .map(|n| McqOption {
                id: format!("opt-{n}"),
                text: format!("opción {n}"),
                is_correct: format!("opt-{n}") == correct,
            })
            .collect();
        Flashcard {
            id: id.to_string(),
            question: format!("¿{id}?"),
            answer: "respuesta".to_string(),
            mcq_options: Some(options),
        }
    }

    fn flip_only_card(id: &str) -> Flashcard {
        Flashcard {
            id: id.to_string(),
            question: format!("¿{id}?"),
            answer: "respuesta".to_string(),
            mcq_options: None,
        }
    }

    #[test]
    fn evaluate_matches_only_the_correct_option() {
        let card = mcq_card("card-1", "opt-1");
        assert!(evaluate(&card, "opt-1"));
        assert!(!evaluate(&card, "opt-2"));
        assert!(!evaluate(&card, "opt-3"));
        assert!(!evaluate(&card, "opt-4"));
    }

    #[test]
    fn evaluate_is_false_without_options() {
        let card = flip_only_card("card-1");
        assert!(!evaluate(&card, "opt-1"));
    }

    #[test]
    fn check_all_counts_correct_answers_over_all_cards() {
        let cards = vec![
            mcq_card("card-1", "opt-1"),
            mcq_card("card-2", "opt-3"),
            mcq_card("card-3", "opt-2"),
            mcq_card("card-4", "opt-4"),
            mcq_card("card-5", "opt-1"),
        ];

        let mut quiz = QuizState::new();
        quiz.select("card-1", "opt-1"); // bien
        quiz.select("card-2", "opt-3"); // bien
        quiz.select("card-3", "opt-2"); // bien
        quiz.select("card-4", "opt-1"); // mal
        // card-5 sin seleccionar -> incorrecta

        let score = quiz.check_all(&cards);
        assert_eq!(score, Score { correct: 3, total: 5 });
        assert!(quiz.results_shown);
    }

    #[test]
    fn total_includes_flip_only_cards() {
        let cards = vec![
            mcq_card("card-1", "opt-2"),
            flip_only_card("card-2"),
            flip_only_card("card-3"),
        ];

        let mut quiz = QuizState::new();
        quiz.select("card-1", "opt-2");

        let score = quiz.check_all(&cards);
        assert_eq!(score, Score { correct: 1, total: 3 });
    }

    #[test]
    fn selections_are_locked_after_results() {
        let cards = vec![mcq_card("card-1", "opt-1")];
        let mut quiz = QuizState::new();
        quiz.select("card-1", "opt-2");
        quiz.check_all(&cards);

        quiz.select("card-1", "opt-1");
        assert_eq!(quiz.selection_for("card-1"), Some("opt-2"));
    }

    #[test]
    fn reselection_overwrites_before_results() {
        let mut quiz = QuizState::new();
        quiz.select("card-1", "opt-2");
        quiz.select("card-1", "opt-4");
        assert_eq!(quiz.selection_for("card-1"), Some("opt-4"));
    }

    #[test]
    fn reset_clears_everything_and_allows_rechecking() {
        let cards = vec![mcq_card("card-1", "opt-1"), mcq_card("card-2", "opt-2")];
        let mut quiz = QuizState::new();
        quiz.select("card-1", "opt-1");
        quiz.check_all(&cards);

        quiz.reset();
        assert!(!quiz.results_shown);
        assert!(quiz.selections.is_empty());
        assert_eq!(quiz.score, None);

        let score = quiz.check_all(&cards);
        assert_eq!(score, Score { correct: 0, total: 2 });
    }
}
