// src/data.rs

use chrono::Utc;

use crate::model::{FlashcardSet, NewFlashcardSet};

/// Carga los sets por defecto desde el YAML embebido.
///
/// Se usan cuando el almacenamiento durable está vacío o ausente. El YAML no
/// lleva `id` ni `created_at`: el primero se fija aquí ("demo", "demo-2", …)
/// y la fecha se estampa al cargar.
pub fn default_flashcard_sets() -> Vec<FlashcardSet> {
    let file_content = include_str!("data/default_sets.yaml");
    let seeds: Vec<NewFlashcardSet> =
        serde_yaml::from_str(file_content).expect("No se pudo parsear el YAML de sets por defecto");

    seeds
        .into_iter()
        .enumerate()
        .map(|(i, seed)| FlashcardSet {
            id: if i == 0 {
                "demo".to_string()
            } else {
                format!("demo-{}", i + 1)
            },
            title: seed.title,
            description: seed.description,
            created_at: Utc::now(),
            summary: seed.summary,
            flashcards: seed.flashcards,
        })
        .collect()
}
