use chrono::Utc;

use crate::data::default_flashcard_sets;
use crate::model::{FlashcardSet, NewFlashcardSet, SavedSummary, SummaryMode};

/// Clave bajo la que se guarda el array completo de sets.
pub const SETS_KEY: &str = "flashcard-sets";
/// Clave para los resúmenes guardados.
pub const SUMMARIES_KEY: &str = "studyme-summaries";

/// Backend de almacenamiento inyectable: un valor serializado por clave.
///
/// La ausencia de la clave significa "usa el contenido por defecto", nunca es
/// un error. En producción es un fichero JSON (nativo) o localStorage (web);
/// en tests, un mapa en memoria.
pub trait StorageBackend {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// Backend en memoria, para tests.
#[derive(Default)]
pub struct MemoryBackend {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backend nativo: un fichero JSON por clave en el directorio de trabajo.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileBackend {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileBackend {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), String> {
        std::fs::write(self.path_for(key), value).map_err(|e| e.to_string())
    }
}

/// Backend web: localStorage del navegador.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageBackend;

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorageBackend {
    fn load(&self, key: &str) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(key).ok()?
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), String> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage no disponible".to_string())?;
        storage
            .set_item(key, value)
            .map_err(|_| "no se pudo escribir en localStorage".to_string())
    }
}

/// Backend durable por defecto para la plataforma actual.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_backend() -> Box<dyn StorageBackend> {
    Box::new(FileBackend::new("."))
}

#[cfg(target_arch = "wasm32")]
pub fn default_backend() -> Box<dyn StorageBackend> {
    Box::new(LocalStorageBackend)
}

/// Dueño único de los sets persistidos.
///
/// Cada mutación reescribe la colección completa en el backend antes de
/// devolver el control, así una lectura posterior siempre ve el nuevo estado.
pub struct SetStore {
    backend: Box<dyn StorageBackend>,
    sets: Vec<FlashcardSet>,
}

impl SetStore {
    /// Carga los sets del backend; si la clave no existe o no parsea,
    /// arranca con el contenido por defecto.
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let sets = backend
            .load(SETS_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(sets) => Some(sets),
                Err(e) => {
                    log::warn!("Sets guardados ilegibles, se usa el contenido por defecto: {e}");
                    None
                }
            })
            .unwrap_or_else(default_flashcard_sets);

        Self { backend, sets }
    }

    pub fn list(&self) -> &[FlashcardSet] {
        &self.sets
    }

    pub fn get(&self, id: &str) -> Option<&FlashcardSet> {
        self.sets.iter().find(|s| s.id == id)
    }

    /// Crea un set con id nuevo basado en la hora y `created_at = now`,
    /// lo añade al final y persiste. Devuelve el set creado.
    pub fn create(&mut self, new_set: NewFlashcardSet) -> FlashcardSet {
        let mut millis = Utc::now().timestamp_millis();
        // Los ids van con marca de tiempo; si dos creaciones caen en el
        // mismo milisegundo, avanza hasta encontrar uno libre.
        let mut id = format!("set-{millis}");
        while self.sets.iter().any(|s| s.id == id) {
            millis += 1;
            id = format!("set-{millis}");
        }

        let set = FlashcardSet {
            id,
            title: new_set.title,
            description: new_set.description,
            created_at: Utc::now(),
            summary: new_set.summary,
            flashcards: new_set.flashcards,
        };

        self.sets.push(set.clone());
        self.persist();
        set
    }

    /// Reemplaza el set cuyo `id` coincide. Si no existe, no hace nada
    /// (se deja constancia en el log).
    pub fn update(&mut self, updated: FlashcardSet) {
        match self.sets.iter_mut().find(|s| s.id == updated.id) {
            Some(slot) => {
                // `created_at` es inmutable tras la creación.
                let created_at = slot.created_at;
                *slot = updated;
                slot.created_at = created_at;
                self.persist();
            }
            None => log::warn!("update ignorado: no existe el set '{}'", updated.id),
        }
    }

    /// Borra el set con ese id. Borrar un id inexistente es un no-op.
    pub fn delete(&mut self, id: &str) {
        let before = self.sets.len();
        self.sets.retain(|s| s.id != id);
        if self.sets.len() != before {
            self.persist();
        }
    }

    /// Vuelca la colección completa al backend.
    pub fn flush(&mut self) {
        self.persist();
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.sets) {
            Ok(json) => {
                if let Err(e) = self.backend.save(SETS_KEY, &json) {
                    log::error!("No se pudieron persistir los sets: {e}");
                }
            }
            Err(e) => log::error!("No se pudieron serializar los sets: {e}"),
        }
    }
}

/// Resúmenes guardados, el más reciente primero.
pub struct SummaryStore {
    backend: Box<dyn StorageBackend>,
    summaries: Vec<SavedSummary>,
}

impl SummaryStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let summaries = backend
            .load(SUMMARIES_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self { backend, summaries }
    }

    pub fn list(&self) -> &[SavedSummary] {
        &self.summaries
    }

    pub fn save(&mut self, file_name: &str, summary: &str, mode: SummaryMode) -> SavedSummary {
        let mut millis = Utc::now().timestamp_millis();
        while self.summaries.iter().any(|s| s.id == millis.to_string()) {
            millis += 1;
        }

        let entry = SavedSummary {
            id: millis.to_string(),
            file_name: file_name.to_string(),
            summary: summary.to_string(),
            mode,
            date: Utc::now(),
        };
        self.summaries.insert(0, entry.clone());
        self.persist();
        entry
    }

    pub fn delete(&mut self, id: &str) {
        let before = self.summaries.len();
        self.summaries.retain(|s| s.id != id);
        if self.summaries.len() != before {
            self.persist();
        }
    }

    pub fn flush(&mut self) {
        self.persist();
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.summaries) {
            Ok(json) => {
                if let Err(e) = self.backend.save(SUMMARIES_KEY, &json) {
                    log::error!("No se pudieron persistir los resúmenes: {e}");
                }
            }
            Err(e) => log::error!("No se pudieron serializar los resúmenes: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Flashcard;

    fn new_set(title: &str) -> NewFlashcardSet {
        NewFlashcardSet {
            title: title.to_string(),
            description: "desc".to_string(),
            summary: None,
            flashcards: vec![Flashcard {
                id: "card-1".to_string(),
                question: "¿Q?".to_string(),
                answer: "A".to_string(),
                mcq_options: None,
            }],
        }
    }

    #[test]
    fn empty_backend_falls_back_to_default_content() {
        let store = SetStore::new(Box::new(MemoryBackend::new()));
        assert_eq!(store.list().len(), 1);
        assert!(store.get("demo").is_some());
    }

    #[test]
    fn create_assigns_unique_ids() {
        let mut store = SetStore::new(Box::new(MemoryBackend::new()));
        let a = store.create(new_set("uno"));
        let b = store.create(new_set("dos"));
        let c = store.create(new_set("tres"));

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
        assert_eq!(store.list().len(), 4); // demo + 3
    }

    #[test]
    fn delete_removes_and_is_idempotent() {
        let mut store = SetStore::new(Box::new(MemoryBackend::new()));
        let created = store.create(new_set("uno"));
        let len_after_create = store.list().len();

        store.delete(&created.id);
        assert!(store.get(&created.id).is_none());
        assert_eq!(store.list().len(), len_after_create - 1);

        // Borrar un id desconocido no falla ni cambia nada
        store.delete("no-existe");
        assert_eq!(store.list().len(), len_after_create - 1);
    }

    #[test]
    fn update_replaces_matching_set_and_keeps_created_at() {
        let mut store = SetStore::new(Box::new(MemoryBackend::new()));
        let mut created = store.create(new_set("uno"));
        let original_created_at = created.created_at;

        created.title = "renombrado".to_string();
        created.created_at = Utc::now(); // el store debe ignorar esto
        store.update(created.clone());

        let stored = store.get(&created.id).unwrap();
        assert_eq!(stored.title, "renombrado");
        assert_eq!(stored.created_at, original_created_at);
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let mut store = SetStore::new(Box::new(MemoryBackend::new()));
        let len = store.list().len();

        let mut ghost = store.get("demo").unwrap().clone();
        ghost.id = "fantasma".to_string();
        store.update(ghost);

        assert_eq!(store.list().len(), len);
        assert!(store.get("fantasma").is_none());
    }

    #[test]
    fn persisted_collection_round_trips() {
        let mut backend = MemoryBackend::new();
        let snapshot;
        {
            let mut store = SetStore::new(Box::new(MemoryBackend::new()));
            store.create(new_set("uno"));
            store.create(new_set("dos"));
            snapshot = store.list().to_vec();

            let json = serde_json::to_string(store.list()).unwrap();
            backend.save(SETS_KEY, &json).unwrap();
        }

        let reloaded = SetStore::new(Box::new(backend));
        assert_eq!(reloaded.list(), snapshot.as_slice());
    }

    #[test]
    fn summaries_save_newest_first_and_delete() {
        let mut store = SummaryStore::new(Box::new(MemoryBackend::new()));
        store.save("a.pdf", "resumen A", SummaryMode::Brief);
        let b = store.save("b.docx", "resumen B", SummaryMode::Detailed);

        assert_eq!(store.list().len(), 2);
        assert_eq!(store.list()[0].file_name, "b.docx");

        store.delete(&b.id);
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].file_name, "a.pdf");
    }
}
