use stride_app::config::CliArgs;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    let cli = match CliArgs::from_env() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: stride-compare [--config <file>] [--data-dir <dir>] [--verbose]");
            std::process::exit(2);
        }
    };

    let default_filter = if cli.verbose {
        "info,stride_app=debug,stride_state=debug,stride_media=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = cli.resolve_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 950.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Running Pose Comparison"),
        vsync: true,
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Running Pose Comparison",
        options,
        Box::new(move |cc| Ok(Box::new(stride_app::ComparisonApp::new(cc, config)))),
    )
}
