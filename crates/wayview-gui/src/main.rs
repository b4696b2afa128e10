use clap::Parser;
use wayview::types::Coordinate;

use crate::app::{Options, WayviewApp};

mod app;
mod event_handler;
mod map;
mod types;
mod widgets;

#[derive(Parser)]
#[command(version, about = "Interactive street network and route viewer")]
struct Args {
    /// Base URL of the routing backend.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server: String,

    /// City whose network to query.
    #[arg(long, default_value = "Hoboken, New Jersey, USA")]
    city: String,

    /// Initial view center latitude.
    #[arg(long, default_value_t = 40.745)]
    lat: f64,

    /// Initial view center longitude.
    #[arg(long, default_value_t = -74.03)]
    lon: f64,
}

fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).unwrap();

    tracing_log::LogTracer::init().unwrap();

    let args = Args::parse();
    let options = Options {
        server: args.server,
        city: args.city,
        view_center: Coordinate::new(args.lat, args.lon),
    };

    let native_options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };
    eframe::run_native(
        "Wayview",
        native_options,
        Box::new(|cc| Ok(Box::new(WayviewApp::new(options, cc)))),
    )
    .unwrap();
}
