// src/ui/helpers.rs
use egui::{Button, Ui, Vec2};

pub fn big_list_button(ui: &mut Ui, label: String, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height)))
        .clicked()
}

/// Barra de pestañas sencilla; devuelve el índice de la pestaña pulsada.
pub fn tab_bar(ui: &mut Ui, tabs: &[(&str, bool)]) -> Option<usize> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        for (i, (label, active)) in tabs.iter().enumerate() {
            if ui.selectable_label(*active, *label).clicked() {
                clicked = Some(i);
            }
        }
    });
    clicked
}
