use crate::StudyApp;
use crate::app::PreviewTab;
use crate::model::SummaryMode;
use crate::ui::helpers::tab_bar;
use egui::{CentralPanel, Context, RichText, ScrollArea};

pub fn ui_home(app: &mut StudyApp, ctx: &Context) {
    // Archivos arrastrados sobre la ventana
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    if let Some(file) = dropped.into_iter().next() {
        if let Some(path) = file.path {
            app.attach_file_path(path);
        } else if let Some(bytes) = file.bytes {
            app.attach_file_bytes(&file.name, bytes.to_vec());
        }
    }

    // Copias para pintar sin pelearse con el borrow checker
    let selected_name = app.selected_file.as_ref().map(|f| f.name.clone());
    let draft_view = app
        .draft
        .as_ref()
        .map(|d| (d.summary.clone(), d.explanation.clone(), d.cards.clone()));
    let saved_rows: Vec<(String, String, String)> = app
        .summaries
        .list()
        .iter()
        .map(|s| {
            (
                s.id.clone(),
                format!("{} · {}", s.file_name, s.date.format("%d/%m/%Y")),
                s.summary.clone(),
            )
        })
        .collect();

    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().show(ui, |ui| {
            let max_width = 640.0;
            let content_width = ui.available_width().min(max_width);

            ui.vertical_centered(|ui| {
                ui.set_width(content_width);
                ui.add_space(12.0);
                ui.heading("Convierte tus documentos en resúmenes y flashcards");
                ui.label(
                    RichText::new("Sube un PDF, Word o PowerPoint y estudia con tarjetas generadas por IA")
                        .color(ui.visuals().weak_text_color()),
                );
                ui.add_space(16.0);

                // ---------- Selección de archivo ----------
                match &selected_name {
                    None => {
                        ui.label("Arrastra un documento a la ventana, o escribe su ruta:");
                        ui.horizontal(|ui| {
                            ui.text_edit_singleline(&mut app.file_path_input);
                            if ui.button("Cargar archivo").clicked()
                                && !app.file_path_input.trim().is_empty()
                            {
                                let path =
                                    std::path::PathBuf::from(app.file_path_input.trim());
                                app.attach_file_path(path);
                            }
                        });
                    }
                    Some(name) => {
                        ui.horizontal(|ui| {
                            ui.label(format!("📄 {name}"));
                            if ui.button("✖ Quitar").clicked() {
                                app.clear_file();
                            }
                        });

                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            ui.label("Modo de resumen:");
                            ui.radio_value(
                                &mut app.summary_mode,
                                SummaryMode::Brief,
                                SummaryMode::Brief.label(),
                            );
                            ui.radio_value(
                                &mut app.summary_mode,
                                SummaryMode::Detailed,
                                SummaryMode::Detailed.label(),
                            );
                        });

                        ui.add_space(8.0);
                        let btn_label = if app.processing {
                            "⏳ Procesando..."
                        } else {
                            "✨ Generar resumen y flashcards"
                        };
                        // Guardia de reentrada: con un pipeline en vuelo el
                        // botón queda deshabilitado
                        let btn = ui.add_enabled(
                            !app.processing,
                            egui::Button::new(btn_label)
                                .min_size(egui::vec2(content_width * 0.8, 36.0)),
                        );
                        if btn.clicked() {
                            app.procesar_documento();
                        }
                        if app.processing {
                            ui.add(egui::Spinner::new());
                        }
                    }
                }

                if !app.message.is_empty() {
                    ui.add_space(8.0);
                    ui.label(app.message.clone());
                }

                // ---------- Resultado del pipeline ----------
                if let Some((summary, explanation, cards)) = &draft_view {
                    ui.add_space(16.0);
                    ui.separator();

                    let tabs = [
                        ("📝 Resumen", app.preview_tab == PreviewTab::Summary),
                        ("🃏 Flashcards", app.preview_tab == PreviewTab::Cards),
                    ];
                    match tab_bar(ui, &tabs) {
                        Some(0) => app.preview_tab = PreviewTab::Summary,
                        Some(1) => app.preview_tab = PreviewTab::Cards,
                        _ => {}
                    }
                    ui.add_space(8.0);

                    match app.preview_tab {
                        PreviewTab::Summary => {
                            ScrollArea::vertical()
                                .id_salt("summary_scroll")
                                .max_height(220.0)
                                .show(ui, |ui| {
                                    ui.label(summary.clone());
                                    if let Some(explanation) = explanation {
                                        ui.add_space(8.0);
                                        ui.separator();
                                        ui.label(explanation.clone());
                                    }
                                });
                            ui.add_space(8.0);
                            if ui.button("💾 Guardar resumen").clicked() {
                                app.guardar_resumen();
                            }
                        }
                        PreviewTab::Cards => {
                            preview_cards(app, ui, cards, content_width);
                        }
                    }

                    ui.add_space(12.0);
                    let can_save =
                        !app.draft_saved && (!summary.trim().is_empty() || !cards.is_empty());
                    let save_label = if app.draft_saved {
                        "✔ Set guardado"
                    } else {
                        "📖 Guardar como set de flashcards"
                    };
                    let save_btn = ui.add_enabled(
                        can_save,
                        egui::Button::new(save_label)
                            .min_size(egui::vec2(content_width * 0.8, 36.0)),
                    );
                    if save_btn.clicked() {
                        app.guardar_set();
                    }
                    if ui.button("✖ Descartar resultado").clicked() {
                        app.reset_home();
                    }
                }

                // ---------- Resúmenes guardados ----------
                if !saved_rows.is_empty() {
                    ui.add_space(16.0);
                    egui::CollapsingHeader::new(format!(
                        "Resúmenes guardados ({})",
                        saved_rows.len()
                    ))
                    .show(ui, |ui| {
                        for (id, label, summary) in &saved_rows {
                            ui.horizontal(|ui| {
                                ui.label(label.clone()).on_hover_text(summary.clone());
                                if ui.button("🗑").clicked() {
                                    app.delete_summary(id);
                                }
                            });
                        }
                    });
                }

                ui.add_space(12.0);
            });
        });
    });
}

fn preview_cards(
    app: &mut StudyApp,
    ui: &mut egui::Ui,
    cards: &[crate::pipeline::QaPair],
    content_width: f32,
) {
    if cards.is_empty() {
        ui.label("El documento no produjo flashcards.");
        return;
    }

    let idx = app.preview.current_index.min(cards.len() - 1);
    let card = &cards[idx];

    egui::Frame::default()
        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
        .inner_margin(egui::Margin::symmetric(16, 16))
        .show(ui, |ui| {
            ui.set_width(content_width * 0.9);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!("{} / {}", idx + 1, cards.len()))
                        .color(ui.visuals().weak_text_color()),
                );
                ui.add_space(6.0);
                if app.preview.show_answer {
                    ui.label(RichText::new("Respuesta").strong());
                    ui.label(card.answer.clone());
                } else {
                    ui.label(RichText::new("Pregunta").strong());
                    ui.label(card.question.clone());
                }
            });
        });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui.button("⬅").clicked() {
            app.preview_previous();
        }
        if ui.button("🔄 Girar").clicked() {
            app.preview_flip();
        }
        if ui.button("➡").clicked() {
            app.preview_next();
        }
    });
}
