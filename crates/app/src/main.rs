use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lingua_core::model::ProfileId;
use services::{
    AppServices, Clock, DailyPlanService, GoalsService, ProfileService, RadarService,
    ResourceService, SettingsService, TrackerService,
};
use storage::Storage;
use tracing::info;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    data_dir: PathBuf,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut data_dir = default_data_dir();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = args
                        .next()
                        .ok_or(ArgsError::MissingValue { flag: "--data-dir" })?;
                    data_dir = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { data_dir })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--data-dir <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir  $LINGUA_DATA_DIR, else the platform data dir, else ./lingua_data");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LINGUA_DATA_DIR, LINGUA_LOG (tracing filter)");
}

/// Data root resolution: explicit env var, else the platform's per-user
/// data directory, else a directory next to the working directory.
fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LINGUA_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .map(|base| base.join("lingua"))
        .unwrap_or_else(|| PathBuf::from("lingua_data"))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("LINGUA_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

struct DesktopApp {
    services: AppServices,
    show_plan_on_launch: bool,
    clock: Clock,
}

impl UiApp for DesktopApp {
    fn active_profile(&self) -> ProfileId {
        self.services.active_profile().clone()
    }

    fn show_plan_on_launch(&self) -> bool {
        self.show_plan_on_launch
    }

    fn clock(&self) -> Clock {
        self.clock
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }

    fn tracker(&self) -> Arc<TrackerService> {
        self.services.tracker()
    }

    fn goals(&self) -> Arc<GoalsService> {
        self.services.goals()
    }

    fn resources(&self) -> Arc<ResourceService> {
        self.services.resources()
    }

    fn radar(&self) -> Arc<RadarService> {
        self.services.radar()
    }

    fn daily_plan(&self) -> Arc<DailyPlanService> {
        self.services.daily_plan()
    }

    fn settings(&self) -> Arc<SettingsService> {
        self.services.settings()
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    // Open storage and run the startup routine in the binary glue so the
    // core and service crates stay pure.
    let storage = Storage::json(&args.data_dir)?;
    let clock = Clock::default_clock();
    let services = AppServices::new(&storage, clock)?;
    let show_plan_on_launch = services.startup_open_requested()?;

    info!(
        data_dir = %args.data_dir.display(),
        profile = %services.active_profile(),
        "starting"
    );

    let app = DesktopApp {
        services,
        show_plan_on_launch,
        clock,
    };
    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Lingua")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer, printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
