mod helpers;
pub mod layout;
pub mod views;

use crate::app::StudyApp;
use crate::model::AppState;
use eframe::{App, Frame};
use egui::Context;
use layout::{bottom_panel, top_panel};

impl App for StudyApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Recoge el resultado del pipeline si ya ha llegado
        self.poll_pipeline_result();
        if self.processing {
            // Mientras hay trabajo en vuelo conviene repintar para drenar
            // el canal aunque el usuario no mueva el ratón
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        top_panel(self, ctx);
        bottom_panel(ctx);

        // Dispatch por estado a las vistas
        match self.state {
            AppState::Home => views::home::ui_home(self, ctx),
            AppState::Library => views::library::ui_library(self, ctx),
            AppState::Study => views::study::ui_study(self, ctx),
        }

        if self.confirm_delete.is_some() {
            self.confirm_delete_window(ctx);
        }
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        // Los stores ya persisten tras cada mutación; esto solo asegura el
        // volcado al cerrar.
        self.store.flush();
        self.summaries.flush();
    }
}
