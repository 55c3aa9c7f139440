use crate::StudyApp;
use crate::model::AppState;
use egui::{Context, Visuals};

pub fn top_panel(app: &mut StudyApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            ui.label("📖 StudyMe");
            ui.separator();

            if ui
                .selectable_label(app.state == AppState::Home, "🏠 Inicio")
                .clicked()
            {
                app.ir_a_inicio();
            }
            if ui
                .selectable_label(app.state == AppState::Library, "📚 Mis flashcards")
                .clicked()
            {
                app.ir_a_biblioteca();
            }
        });
    });
}

pub fn bottom_panel(ctx: &Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        // ----------- BOTONES DE TEMA -----------
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🌙 Modo oscuro").clicked() {
                ctx.set_visuals(Visuals::dark());
            }
            if ui.button("☀Modo claro").clicked() {
                ctx.set_visuals(Visuals::light());
            }
        });
    });
}
