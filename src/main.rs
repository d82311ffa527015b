use leaderboard::app::App;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "desktop")]
fn main() {
    init_tracing();

    let webview_data_dir = match leaderboard::config::default_webview_data_dir() {
        Ok(dir) => Some(dir),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "using the default webview data directory");
            None
        }
    };

    let mut cfg = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Leaderboard"));
    if let Some(dir) = webview_data_dir {
        cfg = cfg.with_data_directory(dir);
    }

    dioxus::LaunchBuilder::desktop().with_cfg(cfg).launch(App);
}

#[cfg(not(feature = "desktop"))]
fn main() {
    init_tracing();
    dioxus::launch(App);
}
