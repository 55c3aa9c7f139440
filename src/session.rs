//! Estado transitorio de una sesión de estudio sobre un set abierto.
//!
//! Es una máquina de estados explícita, sin nada de egui: la UI solo lee los
//! campos y llama a las transiciones. Se descarta al cerrar el set y se puede
//! reconstruir en cualquier momento partiendo del estado por defecto.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::OutOfRange { index, len } => {
                write!(f, "índice {index} fuera de rango (el set tiene {len} tarjetas)")
            }
        }
    }
}

/// Cursor sobre la secuencia de tarjetas de un set, con wrap en los bordes.
///
/// Invariante: cualquier cambio de `current_index` resetea `show_answer` y
/// borra la selección de la tarjeta anterior; el feedback es siempre local a
/// la tarjeta visible. Un set con cero tarjetas no es navegable: quien llama
/// debe comprobarlo y mostrar un estado vacío en su lugar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudySession {
    pub current_index: usize,
    pub show_answer: bool,
    /// Opción elegida en la tarjeta visible (modo estudio de una tarjeta).
    pub selection: Option<String>,
}

impl StudySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, len: usize) {
        debug_assert!(len > 0, "un set vacío no es navegable");
        self.current_index = (self.current_index + 1) % len;
        self.clear_card_state();
    }

    pub fn previous(&mut self, len: usize) {
        debug_assert!(len > 0, "un set vacío no es navegable");
        self.current_index = (self.current_index + len - 1) % len;
        self.clear_card_state();
    }

    /// Alterna entre pregunta y respuesta. No mueve el cursor ni toca la
    /// selección.
    pub fn flip(&mut self) {
        self.show_answer = !self.show_answer;
    }

    pub fn jump_to(&mut self, index: usize, len: usize) -> Result<(), NavError> {
        if index >= len {
            return Err(NavError::OutOfRange { index, len });
        }
        self.current_index = index;
        self.clear_card_state();
        Ok(())
    }

    /// Registra (o sobreescribe) la opción elegida en la tarjeta visible.
    pub fn select(&mut self, option_id: &str) {
        self.selection = Some(option_id.to_string());
    }

    fn clear_card_state(&mut self) {
        self.show_answer = false;
        self.selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_indices_and_wraps() {
        for len in 1..=7 {
            let mut session = StudySession::new();
            for expected in 1..len {
                session.next(len);
                assert_eq!(session.current_index, expected);
            }
            session.next(len);
            assert_eq!(session.current_index, 0, "tras {len} next() vuelve a 0");
        }
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        for len in 1..=7 {
            let mut session = StudySession::new();
            session.previous(len);
            assert_eq!(session.current_index, len - 1);
        }
    }

    #[test]
    fn flip_is_idempotent_under_double_toggle() {
        let mut session = StudySession::new();
        assert!(!session.show_answer);
        session.flip();
        assert!(session.show_answer);
        session.flip();
        assert!(!session.show_answer);
    }

    #[test]
    fn index_changes_reset_flip_and_selection() {
        let mut session = StudySession::new();
        session.flip();
        session.select("opt-2");
        session.next(3);
        assert!(!session.show_answer);
        assert_eq!(session.selection, None);

        session.flip();
        session.select("opt-1");
        session.previous(3);
        assert!(!session.show_answer);
        assert_eq!(session.selection, None);

        session.flip();
        session.select("opt-3");
        session.jump_to(2, 3).unwrap();
        assert!(!session.show_answer);
        assert_eq!(session.selection, None);
    }

    #[test]
    fn flip_does_not_touch_index_or_selection() {
        let mut session = StudySession::new();
        session.jump_to(1, 3).unwrap();
        session.select("opt-4");
        session.flip();
        assert_eq!(session.current_index, 1);
        assert_eq!(session.selection.as_deref(), Some("opt-4"));
    }

    #[test]
    fn jump_to_out_of_range_fails() {
        let mut session = StudySession::new();
        let err = session.jump_to(3, 3).unwrap_err();
        assert_eq!(err, NavError::OutOfRange { index: 3, len: 3 });
        assert_eq!(session.current_index, 0);
    }
}
