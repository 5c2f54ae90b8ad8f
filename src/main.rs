use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gios::{Cache, Config, Coordinator, Event, Fetcher, Gateway, Location, Period, Station};
use log::LevelFilter;
use tokio::sync::mpsc::UnboundedReceiver;

const BAR_WIDTH: f64 = 40.0;

#[derive(Parser, Debug)]
#[command(name = "gios")]
#[command(about = "Browse air quality stations, sensors and measurements from the GIOŚ API")]
struct Cli {
    /// Path to a gios.toml configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read lists from the local cache instead of the API
    #[arg(long, global = true, conflicts_with = "save")]
    offline: bool,

    /// Write fetched lists to the local cache
    #[arg(long, global = true)]
    save: bool,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stations, optionally filtered by name or by distance
    Stations {
        /// Keep stations whose name contains this text (case-insensitive)
        #[arg(long, conflicts_with_all = ["near", "lat"])]
        name: Option<String>,

        #[command(flatten)]
        center: Center,

        /// Search radius in kilometres
        #[arg(long, default_value = "10")]
        radius: f64,
    },

    /// Show the station nearest to an address or coordinates
    Closest {
        #[command(flatten)]
        center: Center,
    },

    /// List the sensors of a station
    Sensors { station_id: u32 },

    /// Chart and analyse the readings of a sensor
    Measurements {
        sensor_id: u32,

        /// Chart period: all, 24h, 3d or 7d
        #[arg(long)]
        period: Option<Period>,
    },

    /// Chart and analyse the readings served under a station id
    StationData {
        station_id: u32,

        /// Chart period: all, 24h, 3d or 7d
        #[arg(long)]
        period: Option<Period>,
    },
}

#[derive(Args, Debug)]
struct Center {
    /// Free-text address resolved through the geocoder
    #[arg(long, conflicts_with = "lat")]
    near: Option<String>,

    /// Latitude of the search center
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the search center
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        gios::logging::level_from_str(&config.logging.level)?
    };
    gios::logging::init(level)?;

    let gateway = Gateway::new(&config)?;
    let (fetcher, mut events) = Fetcher::new(gateway.clone());
    let cache = Cache::new(&config.cache.dir);
    let mut coordinator = Coordinator::new(config.chart.period);
    let (offline, save) = (cli.offline, cli.save);

    match cli.command {
        Command::Stations {
            name,
            center,
            radius,
        } => {
            load_stations(offline, &fetcher, &cache, &mut events, &mut coordinator).await?;

            let center = resolve(&gateway, &center).await?;
            if let Some(text) = &name {
                coordinator.filter_by_name(text);
            } else if let Some(center) = &center {
                if radius < 0.0 {
                    bail!("radius must not be negative");
                }
                coordinator.filter_by_distance(center, radius);
            }

            print_stations(coordinator.filtered_stations(), center.as_ref());
            if save {
                let path = cache.save_stations(coordinator.stations())?;
                println!("Saved stations to {}", path.display());
            }
        }
        Command::Closest { center } => {
            let center = resolve(&gateway, &center)
                .await?
                .ok_or_else(|| anyhow!("pass --near or --lat/--lon"))?;
            load_stations(offline, &fetcher, &cache, &mut events, &mut coordinator).await?;

            let (station, distance) = coordinator
                .closest_station(&center)
                .ok_or_else(|| anyhow!("no stations available"))?;
            println!(
                "{}\t{}\t{:.2} km ({:.4}, {:.4})",
                station.id, station.name, distance, station.latitude, station.longitude
            );
        }
        Command::Sensors { station_id } => {
            coordinator.select_station(station_id);
            if offline {
                coordinator.handle(Event::SensorsReady(cache.load_sensors()?));
            } else {
                fetcher.fetch_sensors(station_id);
                drain(&mut events, &mut coordinator, 1).await;
            }

            for sensor in coordinator.sensors() {
                println!("{}\t{}", sensor.id, sensor.parameter);
            }
            if save {
                let path = cache.save_sensors(coordinator.sensors())?;
                println!("Saved sensors to {}", path.display());
            }
        }
        Command::Measurements { sensor_id, period } => {
            coordinator.select_sensor(sensor_id);
            if offline {
                coordinator.handle(Event::MeasurementsReady(cache.load_measurements()?));
            } else {
                fetcher.fetch_sensor_data(sensor_id);
                drain(&mut events, &mut coordinator, 1).await;
            }
            show_measurements(save, &cache, &mut coordinator, period)?;
        }
        Command::StationData { station_id, period } => {
            coordinator.select_station(station_id);
            if offline {
                coordinator.handle(Event::MeasurementsReady(cache.load_measurements()?));
            } else {
                fetcher.fetch_measurements(station_id);
                drain(&mut events, &mut coordinator, 1).await;
            }
            show_measurements(save, &cache, &mut coordinator, period)?;
        }
    }

    Ok(())
}

async fn load_stations(
    offline: bool,
    fetcher: &Fetcher,
    cache: &Cache,
    events: &mut UnboundedReceiver<Event>,
    coordinator: &mut Coordinator,
) -> Result<()> {
    if offline {
        let stations = cache
            .load_stations()
            .with_context(|| format!("no cached stations in {}", cache.dir().display()))?;
        coordinator.handle(Event::StationsReady(stations));
        return Ok(());
    }
    fetcher.fetch_stations();
    drain(events, coordinator, 1).await;
    Ok(())
}

/// Feeds events to the coordinator until `pending` requests have reported.
/// A failed request has already been logged by the coordinator; the process
/// then exits with status 1.
async fn drain(
    events: &mut UnboundedReceiver<Event>,
    coordinator: &mut Coordinator,
    mut pending: usize,
) {
    while pending > 0 {
        match events.recv().await {
            Some(event) => {
                coordinator.handle(event);
                pending -= 1;
            }
            None => break,
        }
    }
    if coordinator.take_error().is_some() {
        std::process::exit(1);
    }
}

async fn resolve(gateway: &Gateway, center: &Center) -> Result<Option<Location>> {
    if let (Some(lat), Some(lon)) = (center.lat, center.lon) {
        return Ok(Some(Location::new(lat, lon)));
    }
    match &center.near {
        Some(address) => {
            let location = gateway
                .geocode(address)
                .await
                .with_context(|| format!("could not locate \"{}\"", address))?;
            Ok(Some(location))
        }
        None => Ok(None),
    }
}

fn print_stations(stations: &[Station], center: Option<&Location>) {
    for station in stations {
        match center {
            Some(center) => println!(
                "{}\t{}\t{:.2} km",
                station.id,
                station.name,
                station.location().distance_km(center)
            ),
            None => println!(
                "{}\t{}\t({:.4}, {:.4})",
                station.id, station.name, station.latitude, station.longitude
            ),
        }
    }
    println!("{} stations", stations.len());
}

fn show_measurements(
    save: bool,
    cache: &Cache,
    coordinator: &mut Coordinator,
    period: Option<Period>,
) -> Result<()> {
    if let Some(period) = period {
        coordinator.set_period(period);
    }

    let series = coordinator.chart_series();
    let top = series
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);
    for (timestamp, value) in &series {
        let width = if top > 0.0 {
            (value.max(0.0) / top * BAR_WIDTH).round() as usize
        } else {
            0
        };
        println!(
            "{}\t{:>8.2}\t{}",
            timestamp.format("%Y-%m-%d %H:%M"),
            value,
            "#".repeat(width)
        );
    }

    match coordinator.analysis() {
        Some(analysis) => println!("\n{}", analysis.summary()),
        None => println!("No readings."),
    }

    if save {
        let path = cache.save_measurements(coordinator.measurements())?;
        println!("Saved measurements to {}", path.display());
    }
    Ok(())
}
