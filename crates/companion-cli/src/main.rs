//! `companion` — command-line host for the vehicle companion services.
//!
//! Wires one SQLite store and one discovery client into the POI and garage
//! services, then runs a single command against them.
//!
//! # Usage
//!
//! ```
//! companion places
//! companion toggle 12345
//! companion favorites --follow
//! companion garage add --name "Daily" --make Honda --model Civic --year 2015
//! ```

mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use companion_client::{ClientConfig, RoadtrippersClient};
use companion_core::{
  garage::GarageService,
  places::PoiService,
  poi::Poi,
  vehicle::{Vehicle, VehicleForm},
};
use companion_store_sqlite::SqliteStore;
use tokio_stream::StreamExt as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Garage and nearby places for vehicle owners")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "companion.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Discover places in the configured bounding box.
  Places,
  /// Show saved favorite places, newest first.
  Favorites {
    /// Keep printing the list whenever it changes.
    #[arg(long)]
    follow: bool,
  },
  /// Favorite a discovered place, or un-favorite it if already saved.
  Toggle {
    /// Id of a place returned by `places`.
    id: i64,
  },
  /// Manage vehicles.
  #[command(subcommand)]
  Garage(GarageCommand),
}

#[derive(Subcommand, Debug)]
enum GarageCommand {
  /// List vehicles, newest first.
  List,
  /// Add a vehicle.
  Add {
    #[arg(long)]
    name:  String,
    #[arg(long)]
    make:  String,
    #[arg(long)]
    model: String,
    #[arg(long)]
    year:  String,
  },
  /// Change fields of an existing vehicle.
  Edit {
    id:    i64,
    #[arg(long)]
    name:  Option<String>,
    #[arg(long)]
    make:  Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    year:  Option<String>,
  },
  /// Delete a vehicle.
  Delete { id: i64 },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  let db_path = cfg.database_path();
  if let Some(parent) = db_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let store = Arc::new(
    SqliteStore::open(&db_path)
      .await
      .with_context(|| format!("failed to open store at {db_path:?}"))?,
  );

  match cli.command {
    Command::Garage(cmd) => run_garage(GarageService::new(store), cmd).await?,
    Command::Places => {
      let places = poi_service(&cfg, store)?;
      let pois = discover(&places, &cfg).await?;
      tracing::info!(count = pois.len(), "discovered places");
      for poi in &pois {
        println!("{}", format_poi(poi));
      }
    }
    Command::Favorites { follow } => {
      let places = poi_service(&cfg, store)?;
      let mut stream = Box::pin(places.favorites_stream());
      while let Some(favorites) = stream.next().await {
        if favorites.is_empty() {
          println!("no favorites yet");
        }
        for poi in &favorites {
          println!("{}", format_poi(poi));
        }
        if !follow {
          break;
        }
        println!("---");
      }
    }
    Command::Toggle { id } => {
      let places = poi_service(&cfg, store)?;
      let pois = discover(&places, &cfg).await?;
      let Some(poi) = pois.iter().find(|p| p.id == id) else {
        bail!("place {id} is not in the current discovery results");
      };
      let now_favorite = places.toggle_favorite(poi).await?;
      println!("{}", format_poi(&poi.with_favorite(now_favorite)));
    }
  }
  Ok(())
}

// ─── Places ───────────────────────────────────────────────────────────────────

type Places = PoiService<RoadtrippersClient, SqliteStore>;

fn poi_service(cfg: &AppConfig, store: Arc<SqliteStore>) -> Result<Places> {
  let client = RoadtrippersClient::new(ClientConfig {
    base_url: cfg.api_base_url.clone(),
    timeout:  cfg.request_timeout(),
  })
  .context("failed to build HTTP client")?;
  Ok(PoiService::new(Arc::new(client), store))
}

async fn discover(places: &Places, cfg: &AppConfig) -> Result<Vec<Poi>> {
  places
    .discover_pois(&cfg.sw_corner, &cfg.ne_corner, cfg.page_size)
    .await
    .context("discovery failed")
}

fn format_poi(poi: &Poi) -> String {
  let star = if poi.is_favorite { "★" } else { " " };
  let rating = poi.rating.map(|r| format!("{r}/5")).unwrap_or_else(|| "-".into());
  let location = match (poi.latitude, poi.longitude) {
    (Some(lat), Some(lon)) => format!("{lat:.4},{lon:.4}"),
    _ => "unknown location".into(),
  };
  format!(
    "{star} {:>10}  {}  [{}]  {rating}  {location}",
    poi.id,
    poi.name,
    poi.category.as_deref().unwrap_or("uncategorised"),
  )
}

// ─── Garage ───────────────────────────────────────────────────────────────────

async fn run_garage(garage: GarageService<SqliteStore>, cmd: GarageCommand) -> Result<()> {
  match cmd {
    GarageCommand::List => {
      let vehicles = garage.list_vehicles();
      if vehicles.is_empty() {
        println!("garage is empty");
      }
      for vehicle in &vehicles {
        println!("{}", format_vehicle(vehicle));
      }
    }
    GarageCommand::Add { name, make, model, year } => {
      let id = garage
        .save_form(None, VehicleForm { name, make, model, year })
        .await?;
      println!("added vehicle {id}");
    }
    GarageCommand::Edit { id, name, make, model, year } => {
      let Some(existing) = garage.get_vehicle(id).await? else {
        bail!("vehicle {id} not found");
      };
      let mut form = VehicleForm::from(&existing);
      form.name = name.unwrap_or(form.name);
      form.make = make.unwrap_or(form.make);
      form.model = model.unwrap_or(form.model);
      form.year = year.unwrap_or(form.year);
      garage.save_form(Some(id), form).await?;
      println!("updated vehicle {id}");
    }
    GarageCommand::Delete { id } => {
      let Some(existing) = garage.get_vehicle(id).await? else {
        bail!("vehicle {id} not found");
      };
      garage.delete_vehicle(&existing).await?;
      println!("deleted vehicle {id}");
    }
  }
  Ok(())
}

fn format_vehicle(v: &Vehicle) -> String {
  format!(
    "{:>5}  {}  {} {} ({})  added {}",
    v.id,
    v.name,
    v.make,
    v.model,
    v.year,
    v.created_at.format("%Y-%m-%d %H:%M"),
  )
}
