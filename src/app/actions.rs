use super::*;
use crate::pipeline;
use crate::quiz::evaluate;

impl StudyApp {
    // --- Selección de archivo ---

    pub fn attach_file_path(&mut self, path: std::path::PathBuf) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.is_empty() {
            self.message = "Esa ruta no apunta a ningún archivo.".into();
            return;
        }
        self.selected_file = Some(SelectedFile {
            name,
            source: FileSource::Path(path),
        });
        self.draft = None;
        self.draft_saved = false;
        self.message.clear();
    }

    pub fn attach_file_bytes(&mut self, name: &str, bytes: Vec<u8>) {
        self.selected_file = Some(SelectedFile {
            name: name.to_string(),
            source: FileSource::Bytes(bytes),
        });
        self.draft = None;
        self.draft_saved = false;
        self.message.clear();
    }

    pub fn clear_file(&mut self) {
        self.selected_file = None;
        self.file_path_input.clear();
    }

    // --- Pipeline documento → set ---

    /// Lanza el pipeline en segundo plano. Mientras haya uno en vuelo no se
    /// admite otro; el resultado llega por canal y lo recoge
    /// [`StudyApp::poll_pipeline_result`].
    pub fn procesar_documento(&mut self) {
        if self.processing {
            self.message = "⏳ Ya hay un documento procesándose. Espera el resultado.".into();
            return;
        }

        let Some(file) = self.selected_file.clone() else {
            self.message = "Sube primero un documento.".into();
            return;
        };

        // Comprobación local de la extensión: sin red y sin leer el archivo
        if let Err(e) = pipeline::endpoint_path_for(&file.name) {
            self.message = format!("❌ {e}");
            return;
        }

        let bytes = match file.source {
            FileSource::Bytes(bytes) => bytes,
            FileSource::Path(path) => match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.message = format!("❌ No se pudo leer {}: {e}", path.display());
                    return;
                }
            },
        };

        let (tx, rx) = std::sync::mpsc::channel();
        self.pipeline_rx = Some(rx);
        self.processing = true;
        self.draft = None;
        self.draft_saved = false;
        self.message = "⏳ Procesando documento...".into();

        let name = file.name;
        let mode = self.summary_mode;

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let _ = tx.send(pipeline::run_pipeline(&name, bytes, mode));
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let _ = tx.send(pipeline::run_pipeline(&name, bytes, mode).await);
        });
    }

    /// Drena el canal del pipeline; se llama una vez por frame.
    pub fn poll_pipeline_result(&mut self) {
        let maybe_result = self
            .pipeline_rx
            .as_ref()
            .and_then(|rx| rx.try_recv().ok());

        if let Some(result) = maybe_result {
            self.pipeline_rx = None;
            self.processing = false;
            match result {
                Ok(draft) => {
                    self.preview = StudySession::new();
                    self.preview_tab = PreviewTab::Summary;
                    self.message = "✅ Documento procesado.".into();
                    self.draft = Some(draft);
                }
                Err(e) => {
                    // El fallo se muestra y se permite reintentar; el store
                    // no ha llegado a tocarse.
                    self.message = format!("❌ {e}");
                }
            }
        }
    }

    /// Materializa el borrador como set nuevo, lo persiste y lo abre.
    pub fn guardar_set(&mut self) {
        let Some(draft) = &self.draft else {
            return;
        };
        if draft.summary.trim().is_empty() && draft.cards.is_empty() {
            self.message = "No hay nada que guardar todavía.".into();
            return;
        }

        let created = self.store.create(pipeline::materialize_set(draft));
        self.draft_saved = true;
        self.message = format!("✅ Set \"{}\" guardado.", created.title);
        let id = created.id;
        self.abrir_set(&id);
    }

    pub fn guardar_resumen(&mut self) {
        let Some(draft) = &self.draft else {
            return;
        };
        if draft.summary.trim().is_empty() {
            self.message = "El documento no produjo resumen.".into();
            return;
        }
        self.summaries
            .save(&draft.file_name, &draft.summary, draft.mode);
        self.message = "✅ Resumen guardado.".into();
    }

    pub fn delete_summary(&mut self, id: &str) {
        self.summaries.delete(id);
    }

    // --- Modo estudio de una tarjeta ---

    /// Registra la opción elegida en la tarjeta visible y da feedback
    /// inmediato. Se puede cambiar de opción las veces que haga falta.
    pub fn select_study_option(&mut self, option_id: &str) {
        let Some(card) = self.current_card() else {
            return;
        };
        let correcta = evaluate(card, option_id);
        self.session.select(option_id);
        self.message = if correcta {
            "✅ ¡Correcto!".into()
        } else {
            "❌ Incorrecto. Intenta de nuevo.".into()
        };
    }

    // --- Quiz de set completo ---

    pub fn quiz_select(&mut self, card_id: &str, option_id: &str) {
        self.quiz.select(card_id, option_id);
    }

    pub fn check_answers(&mut self) {
        let Some(set) = self.current_set() else {
            return;
        };
        let cards = set.flashcards.clone();
        let score = self.quiz.check_all(&cards);
        self.message = format!("Has acertado {} de {}", score.correct, score.total);
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
        self.session = StudySession::new(); // vuelve a la primera tarjeta
        self.message.clear();
    }

    // --- Borrado de sets ---

    pub fn request_delete_set(&mut self, id: &str) {
        self.confirm_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    pub fn delete_set_confirmed(&mut self) {
        let Some(id) = self.confirm_delete.take() else {
            return;
        };
        self.store.delete(&id);
        if self.open_set_id.as_deref() == Some(id.as_str()) {
            self.ir_a_biblioteca();
        }
        // Después de la navegación, que limpia el mensaje
        self.message = "✅ Set borrado.".into();
    }
}
