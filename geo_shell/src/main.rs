use amap::{
    config::AmapConfig,
    constant_sdk::ConstantAmapLoader,
    geolocation::GeolocationAdapter,
    loader::SdkLoader,
    sdk::PageContext,
};
use clap::{CommandFactory, Parser};
use common::position::Position;
use router::{Router, View, history::Navigator};
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod views;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Location to open, e.g. `/gps`.
    #[arg(default_value = "/")]
    location: String,
    #[arg(short, long)]
    gps_fake: bool,
    #[arg(long, default_value_t = 30.2, allow_negative_numbers = true)]
    latitude: f64,
    #[arg(long, default_value_t = 120.1, allow_negative_numbers = true)]
    longitude: f64,
    #[arg(long)]
    accuracy: Option<f64>,
    /// AMap web API key, falls back to `AMAP_KEY`.
    #[arg(long)]
    amap_key: Option<String>,
    /// AMap security js code, falls back to `AMAP_SECURITY_JS_CODE`.
    #[arg(long)]
    amap_security_code: Option<String>,
}

fn create_geolocation(cli: &Cli) -> Result<GeolocationAdapter, ()> {
    if !cli.gps_fake {
        error!("No geolocation source available. Use --gps-fake");
        Cli::command().print_help().map_err(|e| error!("{e}"))?;
        return Err(());
    }
    let env = AmapConfig::from_env();
    let config = AmapConfig {
        key: cli.amap_key.clone().or(env.key),
        security_js_code: cli.amap_security_code.clone().or(env.security_js_code),
    };
    let sdk = ConstantAmapLoader::new(Position::new(&cli.latitude, &cli.longitude), cli.accuracy);
    let loader = SdkLoader::new(Arc::new(PageContext::new()), Arc::new(sdk), config);
    Ok(GeolocationAdapter::new(Arc::new(loader)))
}

#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let navigator = Navigator::new(Router::default(), &cli.location);
    let Some(route) = navigator.current_route() else {
        error!("No page registered for location {}", cli.location);
        return Err(());
    };
    info!("Opening page {} ({})", route.name, route.path);

    let page = match route.view {
        View::Home => views::home(navigator.router()),
        View::Gyroscope => views::gyroscope(),
        View::Gps => {
            let geolocation = create_geolocation(&cli)?;
            let position = geolocation.get_current_position().await.map_err(|e| {
                error!("Failed to get the current position. Error: {e}");
            })?;
            debug!("Current position {:?}", position);
            views::gps(&position).map_err(|e| error!("Failed to render position. Error: {e}"))?
        }
    };
    println!("{page}");
    Ok(())
}
