use super::*;
use eframe::egui;

impl StudyApp {
    /// Diálogo de confirmación antes de borrar un set.
    pub fn confirm_delete_window(&mut self, ctx: &egui::Context) {
        let Some(id) = self.confirm_delete.clone() else {
            return;
        };
        let title = self
            .store
            .get(&id)
            .map(|s| s.title.clone())
            .unwrap_or_else(|| id.clone());

        egui::Window::new("Confirmar borrado")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "¿Seguro que quieres borrar \"{title}\"? ¡Esta acción no se puede deshacer!"
                ));
                ui.horizontal(|ui| {
                    if ui.button("Sí, borrar").clicked() {
                        self.delete_set_confirmed();
                    }
                    if ui.button("No").clicked() {
                        self.cancel_delete();
                    }
                });
            });
    }

    /// Descarta el borrador y deja la pantalla de inicio limpia.
    pub fn reset_home(&mut self) {
        self.selected_file = None;
        self.file_path_input.clear();
        self.draft = None;
        self.draft_saved = false;
        self.preview = StudySession::new();
        self.message.clear();
    }
}
