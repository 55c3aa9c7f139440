use crate::StudyApp;
use crate::model::SortBy;
use crate::ui::helpers::big_list_button;
use egui::{CentralPanel, Context, RichText, ScrollArea};

pub fn ui_library(app: &mut StudyApp, ctx: &Context) {
    let rows = app.library_rows();

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 640.0;
        let content_width = ui.available_width().min(max_width);

        ui.vertical_centered(|ui| {
            ui.set_width(content_width);
            ui.add_space(12.0);
            ui.heading("Mis sets de flashcards");
            ui.label(
                RichText::new("Repasa y gestiona tu material de estudio")
                    .color(ui.visuals().weak_text_color()),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Ordenar por:");
                if ui
                    .selectable_label(app.sort_by == SortBy::Date, "🕘 Fecha")
                    .clicked()
                {
                    app.sort_by = SortBy::Date;
                }
                if ui
                    .selectable_label(app.sort_by == SortBy::Name, "🔤 Nombre")
                    .clicked()
                {
                    app.sort_by = SortBy::Name;
                }
            });
            ui.add_space(8.0);

            if !app.message.is_empty() {
                ui.label(app.message.clone());
                ui.add_space(8.0);
            }

            if rows.is_empty() {
                ui.add_space(24.0);
                ui.label("No tienes sets guardados todavía.");
                ui.add_space(8.0);
                if big_list_button(
                    ui,
                    "➕ Crear uno nuevo".to_string(),
                    content_width * 0.6,
                    36.0,
                    true,
                ) {
                    app.ir_a_inicio();
                }
                return;
            }

            ScrollArea::vertical().show(ui, |ui| {
                for row in &rows {
                    egui::Frame::default()
                        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                        .inner_margin(egui::Margin::symmetric(12, 10))
                        .show(ui, |ui| {
                            ui.set_width(content_width * 0.95);
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    if ui
                                        .link(RichText::new(row.title.clone()).strong().size(16.0))
                                        .clicked()
                                    {
                                        app.abrir_set(&row.id);
                                    }
                                    if !row.description.is_empty() {
                                        ui.label(row.description.clone());
                                    }
                                    ui.label(
                                        RichText::new(format!(
                                            "{} · {}",
                                            row.count_label(),
                                            row.created_label()
                                        ))
                                        .color(ui.visuals().weak_text_color()),
                                    );
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Min),
                                    |ui| {
                                        if ui.button("🗑").on_hover_text("Borrar set").clicked() {
                                            app.request_delete_set(&row.id);
                                        }
                                    },
                                );
                            });
                        });
                    ui.add_space(6.0);
                }

                ui.add_space(8.0);
                if big_list_button(
                    ui,
                    "➕ Crear un set nuevo".to_string(),
                    content_width * 0.6,
                    36.0,
                    true,
                ) {
                    app.ir_a_inicio();
                }
            });
        });
    });
}
