use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use sysgauge::app::{RefreshLoop, startup_message};
use sysgauge::config::{self, load_config, load_config_from_path};
use sysgauge::event::{
    Redraw, Shutdown, redraw_channel, shutdown_channel, spawn_key_listener, spawn_signal_listener,
};
use sysgauge::frame::LayoutProfile;
use sysgauge::frame::builder::FrameBuilder;
use sysgauge::logging;
use sysgauge::system::aggregator::{Aggregator, SamplePlan};
use sysgauge::system::provider::{MetricsProvider, SysinfoProvider};
use sysgauge::system::temperature::TemperatureResolver;
use sysgauge::ui::Renderer;
use sysgauge::ui::terminal::TerminalRenderer;
use sysgauge::ui::text::TextRenderer;
use sysgauge::ui::theme::{Theme, resolve_color_support};

#[derive(Parser)]
#[command(
    name = "sysgauge",
    about = "Live terminal dashboard for CPU, memory, disk, network, battery and temperature"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout profile: plain, bars, control
    #[arg(long)]
    profile: Option<String>,

    /// Mount point whose disk usage is shown
    #[arg(long)]
    mount_point: Option<PathBuf>,

    /// Renderer: auto, tui, text
    #[arg(long)]
    renderer: Option<String>,

    /// Color support: auto, color, mono
    #[arg(long)]
    color: Option<String>,

    /// Append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RendererKind {
    Tui,
    Text,
}

impl RendererKind {
    /// `auto` keeps the plain profile on a scrolling text screen.
    fn resolve(setting: &str, profile: LayoutProfile) -> Self {
        match setting.to_lowercase().as_str() {
            "tui" => RendererKind::Tui,
            "text" => RendererKind::Text,
            _ if profile == LayoutProfile::Plain => RendererKind::Text,
            _ => RendererKind::Tui,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init(config.logging.file.as_deref(), &config.logging.level)?;

    let profile = LayoutProfile::from_config_str(&config.general.profile);
    let kind = RendererKind::resolve(&config.general.renderer, profile);
    println!("{}", startup_message(profile));

    let resolver = TemperatureResolver::detect(
        config.temperature.helper_command.clone(),
        config.temperature.helper_timeout(),
    );
    tracing::info!(
        profile = profile.label(),
        renderer = ?kind,
        sensors = ?resolver.backend(),
        "starting"
    );
    let plan = SamplePlan {
        per_core: profile.needs_per_core(),
        mount_point: config.general.mount_point.clone(),
    };
    let aggregator = Aggregator::new(SysinfoProvider::new(), resolver, plan);
    let builder = FrameBuilder::new(profile);

    let (handle, shutdown) = shutdown_channel();
    let signal_task = spawn_signal_listener(handle.clone());

    let result = match kind {
        RendererKind::Text => {
            let renderer = TextRenderer::new(std::io::stdout());
            drive(aggregator, builder, renderer, shutdown, None).await
        }
        RendererKind::Tui => {
            let theme = Theme::for_support(resolve_color_support(&config.general.color));

            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |panic_info| {
                ratatui::restore();
                original_hook(panic_info);
            }));

            let renderer = TerminalRenderer::init(theme);
            let (redraw_handle, redraw) = redraw_channel();
            let key_task = spawn_key_listener(handle, redraw_handle, shutdown.clone());
            let result = drive(aggregator, builder, renderer, shutdown, Some(redraw)).await;
            key_task.abort();
            result
        }
    };

    signal_task.abort();
    result
}

async fn drive<P, R>(
    aggregator: Aggregator<P>,
    builder: FrameBuilder,
    renderer: R,
    shutdown: Shutdown,
    redraw: Option<Redraw>,
) -> Result<()>
where
    P: MetricsProvider,
    R: Renderer,
{
    let mut refresh = RefreshLoop::new(aggregator, builder, renderer);
    if let Some(redraw) = redraw {
        refresh = refresh.with_redraw(redraw);
    }
    refresh.run(shutdown).await
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref profile) = cli.profile {
        config.general.profile = profile.clone();
    }
    if let Some(ref mount_point) = cli.mount_point {
        config.general.mount_point = mount_point.clone();
    }
    if let Some(ref renderer) = cli.renderer {
        config.general.renderer = renderer.clone();
    }
    if let Some(ref color) = cli.color {
        config.general.color = color.clone();
    }
    if let Some(ref log_file) = cli.log_file {
        config.logging.file = Some(log_file.clone());
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_renderer_follows_profile() {
        assert_eq!(
            RendererKind::resolve("auto", LayoutProfile::Plain),
            RendererKind::Text
        );
        assert_eq!(
            RendererKind::resolve("auto", LayoutProfile::ControlPanel),
            RendererKind::Tui
        );
        assert_eq!(
            RendererKind::resolve("TEXT", LayoutProfile::Bars),
            RendererKind::Text
        );
        assert_eq!(
            RendererKind::resolve("tui", LayoutProfile::Plain),
            RendererKind::Tui
        );
    }

    #[test]
    fn cli_overrides_config_file() {
        let cli = Cli::parse_from([
            "sysgauge",
            "--config",
            "/nonexistent/sysgauge.toml",
            "--profile",
            "bars",
            "--mount-point",
            "/home",
            "--log-file",
            "/tmp/sysgauge.log",
        ]);
        let config = load_config_for_cli(&cli);
        assert_eq!(config.general.profile, "bars");
        assert_eq!(config.general.mount_point, PathBuf::from("/home"));
        assert_eq!(config.general.renderer, "auto");
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/tmp/sysgauge.log"))
        );
    }
}
