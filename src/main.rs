use study_me::StudyApp;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "StudyMe",
        options,
        Box::new(|_cc| Ok(Box::new(StudyApp::new()))),
    )
}
