//! Simulated drive with console HUD output.
//!
//! Usage: hud-drive <origin lng,lat> <destination lng,lat> [config.yaml]
//!
//! Uses the Tmap routing service when `TMAP_APP_KEY` (or `tmap.app_key`) is
//! set, otherwise a straight-line route.

use std::error::Error;

use hud_route::config::Config;
use hud_route::format::{HudText, format_heading, format_speed};
use hud_route::haversine::HaversineRoute;
use hud_route::polyline::LngLat;
use hud_route::session::NavigationSession;
use hud_route::simulate::SimulatedDrive;
use hud_route::tmap::TmapClient;
use hud_route::traits::{PositionFeed, Presenter, RouteSource};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Simulated ground speed, m/s (~54 km/h).
const DRIVE_SPEED_MS: f64 = 15.0;
const TICK_MS: u64 = 1000;

struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn present(&mut self, hud: &HudText) {
        info!(
            next_turn = hud.next_turn.as_deref().unwrap_or("-"),
            remaining = hud.remaining_distance.as_deref().unwrap_or("-"),
            eta = hud.remaining_time.as_deref().unwrap_or("-"),
            off_route = hud.off_route,
            "hud"
        );
    }
}

fn parse_lng_lat(arg: &str) -> Result<LngLat, Box<dyn Error>> {
    let (lng, lat) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected lng,lat but got {:?}", arg))?;
    Ok(LngLat::new(lng.trim().parse()?, lat.trim().parse()?))
}

fn drive<S: RouteSource>(source: S, config: &Config, origin: LngLat, destination: LngLat) -> Result<(), Box<dyn Error>> {
    let mut session = NavigationSession::new(source, ConsolePresenter, config.tracker);
    session.start(origin, destination)?;

    let polyline = session
        .tracker()
        .route()
        .map(|route| route.polyline.clone())
        .unwrap_or_default();
    let mut feed = SimulatedDrive::new(&polyline, DRIVE_SPEED_MS, TICK_MS);

    let mut count = 0;
    while let Some(fix) = feed.next_fix() {
        info!(speed = %format_speed(fix.speed), heading = %format_heading(fix.heading), "fix");
        session.on_fix(&fix);
        count += 1;
    }
    info!(fixes = count, "drive finished");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        return Err("usage: hud-drive <origin lng,lat> <destination lng,lat> [config.yaml]".into());
    }
    let origin = parse_lng_lat(&args[0])?;
    let destination = parse_lng_lat(&args[1])?;

    let config = match args.get(2) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_env_overrides();

    if config.tmap.app_key.is_some() {
        drive(TmapClient::new(config.tmap.clone())?, &config, origin, destination)
    } else {
        info!("no Tmap app key, using straight-line route");
        let source = HaversineRoute::new(config.fallback_speed_kmh)
            .with_spacing(config.tracker.deviation_threshold_m / 2.0);
        drive(source, &config, origin, destination)
    }
}
