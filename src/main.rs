mod app;
mod log;

use app::{APP_NAME, RandomizerApp};

fn main() -> anyhow::Result<()> {
    if let Err(e) = log::init_logger() {
        eprintln!("Failed to init logger: {e}");
    }
    let rt = tokio::runtime::Runtime::new()?;
    eframe::run_native(
        APP_NAME,
        eframe::NativeOptions::default(),
        Box::new(move |cc| Ok(Box::new(RandomizerApp::new(cc, rt)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))?;
    Ok(())
}
