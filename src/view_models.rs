// src/view_models.rs

use chrono::{DateTime, Utc};

/// Fila de la biblioteca: lo justo para pintar la tarjeta de un set.
#[derive(Clone, Debug)]
pub struct SetRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub card_count: usize,
    pub created_at: DateTime<Utc>,
}

impl SetRow {
    pub fn count_label(&self) -> String {
        format!("📖 {} flashcards", self.card_count)
    }

    pub fn created_label(&self) -> String {
        format!("Creado el {}", self.created_at.format("%d/%m/%Y"))
    }
}
