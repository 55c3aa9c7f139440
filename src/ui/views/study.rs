use crate::StudyApp;
use crate::model::{FlashcardSet, StudyMode};
use crate::ui::helpers::{big_list_button, tab_bar};
use egui::{CentralPanel, Context, RichText, ScrollArea};

pub fn ui_study(app: &mut StudyApp, ctx: &Context) {
    // Copia del set abierto; si ya no existe, estado vacío con vuelta a la
    // biblioteca en lugar de un fallo
    let set = match app.current_set() {
        Some(set) => set.clone(),
        None => {
            CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading("Set de flashcards no encontrado");
                    ui.add_space(12.0);
                    if big_list_button(ui, "📚 Ir a la biblioteca".to_string(), 240.0, 36.0, true) {
                        app.ir_a_biblioteca();
                    }
                });
            });
            return;
        }
    };

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 680.0;
        let content_width = ui.available_width().min(max_width);

        ui.vertical_centered(|ui| {
            ui.set_width(content_width);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("⬅ Biblioteca").clicked() {
                    app.ir_a_biblioteca();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("🗑").on_hover_text("Borrar set").clicked() {
                        app.request_delete_set(&set.id);
                    }
                });
            });

            ui.add_space(4.0);
            ui.heading(set.title.clone());
            if !set.description.is_empty() {
                ui.label(
                    RichText::new(set.description.clone())
                        .color(ui.visuals().weak_text_color()),
                );
            }
            ui.add_space(10.0);

            let tabs = [
                ("🃏 Modo flashcard", app.study_mode == StudyMode::Flashcards),
                ("☑ Quiz de opción múltiple", app.study_mode == StudyMode::Quiz),
            ];
            match tab_bar(ui, &tabs) {
                Some(0) => app.set_study_mode(StudyMode::Flashcards),
                Some(1) => app.set_study_mode(StudyMode::Quiz),
                _ => {}
            }
            ui.add_space(10.0);

            if !app.message.is_empty() {
                ui.label(app.message.clone());
                ui.add_space(6.0);
            }

            match app.study_mode {
                StudyMode::Flashcards => flashcard_mode(app, ui, &set, content_width),
                StudyMode::Quiz => quiz_mode(app, ui, &set),
            }
        });
    });
}

fn flashcard_mode(app: &mut StudyApp, ui: &mut egui::Ui, set: &FlashcardSet, content_width: f32) {
    if set.flashcards.is_empty() {
        ui.label("Este set no tiene tarjetas.");
        return;
    }

    let idx = app.session.current_index.min(set.flashcards.len() - 1);
    let card = &set.flashcards[idx];

    egui::Frame::default()
        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
        .inner_margin(egui::Margin::symmetric(20, 20))
        .show(ui, |ui| {
            ui.set_width(content_width * 0.92);
            ui.set_min_height(160.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!("{} / {}", idx + 1, set.flashcards.len()))
                        .color(ui.visuals().weak_text_color()),
                );
                ui.add_space(10.0);
                if app.session.show_answer {
                    ui.label(RichText::new("Respuesta").strong().size(15.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(card.answer.clone()).size(16.0));
                } else {
                    ui.label(RichText::new("Pregunta").strong().size(15.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(card.question.clone()).size(16.0));
                }
            });
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.button("⬅").clicked() {
            app.previous_card();
        }
        if ui.button("🔄 Girar").clicked() {
            app.flip_card();
        }
        if ui.button("➡").clicked() {
            app.next_card();
        }

        // Salto directo a cualquier tarjeta
        ui.separator();
        for i in 0..set.flashcards.len() {
            if ui
                .selectable_label(i == idx, format!("{}", i + 1))
                .clicked()
            {
                app.jump_to_card(i);
            }
        }
    });

    // Opciones de la tarjeta visible: se puede cambiar de opción y se
    // recalcula el acierto cada vez
    if let Some(options) = card.mcq_options.clone().filter(|o| !o.is_empty()) {
        if !app.session.show_answer {
            ui.add_space(10.0);
            ui.separator();
            ui.label(RichText::new("¿Cuál es la respuesta correcta?").strong());
            for option in &options {
                let selected = app.session.selection.as_deref() == Some(option.id.as_str());
                if ui.selectable_label(selected, option.text.clone()).clicked() {
                    app.select_study_option(&option.id);
                }
            }
        }
    }
}

fn quiz_mode(app: &mut StudyApp, ui: &mut egui::Ui, set: &FlashcardSet) {
    if set.flashcards.is_empty() {
        ui.label("Este set no tiene tarjetas.");
        return;
    }

    let results_shown = app.quiz.results_shown;

    ScrollArea::vertical().id_salt("quiz_scroll").show(ui, |ui| {
        for (i, card) in set.flashcards.iter().enumerate() {
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("{}. {}", i + 1, card.question))
                    .strong()
                    .size(15.0),
            );

            match card.mcq_options.as_deref() {
                Some(options) if !options.is_empty() => {
                    for option in options {
                        let selected =
                            app.quiz.selection_for(&card.id) == Some(option.id.as_str());
                        let mut label = option.text.clone();
                        if results_shown {
                            if option.is_correct {
                                label = format!("✅ {label}");
                            } else if selected {
                                label = format!("❌ {label}");
                            }
                        }
                        // Tras corregir, las selecciones quedan bloqueadas
                        // (quiz_select las ignora)
                        if ui.selectable_label(selected, label).clicked() && !results_shown {
                            app.quiz_select(&card.id, &option.id);
                        }
                    }

                    if results_shown {
                        egui::CollapsingHeader::new("Ver respuesta")
                            .id_salt(format!("answer-{}", card.id))
                            .show(ui, |ui| {
                                ui.label(card.answer.clone());
                            });
                    }
                }
                _ => {
                    // Tarjeta solo de flip: no se corrige, pero cuenta en el
                    // total (comportamiento heredado del cliente original)
                    ui.label(
                        RichText::new("(tarjeta sin opciones, solo repaso)")
                            .color(ui.visuals().weak_text_color()),
                    );
                }
            }
            ui.separator();
        }

        ui.add_space(8.0);
        if !results_shown {
            if big_list_button(ui, "Corregir respuestas".to_string(), 260.0, 36.0, true) {
                app.check_answers();
            }
        } else if let Some(score) = app.quiz.score {
            ui.label(
                RichText::new(format!("Puntuación: {} / {}", score.correct, score.total))
                    .strong()
                    .size(16.0),
            );
            ui.label(if score.correct == score.total {
                "¡Puntuación perfecta!"
            } else {
                "Sigue practicando para mejorar."
            });
            ui.add_space(6.0);
            if big_list_button(ui, "🔄 Reintentar quiz".to_string(), 260.0, 36.0, true) {
                app.reset_quiz();
            }
        }
        ui.add_space(12.0);
    });
}
