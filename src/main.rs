use eframe::egui;
use gaku::{
    gui::GakuApp,
    logging,
    persistence::{
        get_app_data_dir,
        SettingsData,
    },
    GakuClient,
};

fn main() -> eframe::Result {
    let _guard = logging::init();

    let settings = SettingsData::load(&get_app_data_dir());
    tracing::info!(?settings, "settings loaded");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gaku")
            .with_inner_size([1200.0, 850.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Gaku",
        options,
        Box::new(move |cc| {
            let client = GakuClient::new(settings.api_url.clone(), settings.request_timeout())?;
            Ok(Box::new(GakuApp::new(cc, settings, client)?))
        }),
    );

    if let Err(e) = &result {
        tracing::error!("Gaku exited with an error: {e}");
    }
    result
}
