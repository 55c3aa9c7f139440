pub mod app;
pub mod data;
pub mod model;
pub mod pipeline;
pub mod quiz;
pub mod session;
pub mod store;
pub mod ui;
pub mod view_models;

pub use app::StudyApp;
