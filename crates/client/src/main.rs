use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use domain::models::{AlertStatus, NearbyShelter, ShelterStatus};
use domain::services::ShelterStats;
use serde::Serialize;
use tracing::info;

use disasterwatch_client::ai::{
    AdminContext, AreaQuery, CurrentRisk, RecommendationService, RouteCheck, RouteQuery,
    SafetyAdvisor, SafetyQuery, TipContext, UserLocation,
};
use disasterwatch_client::config::Config;
use disasterwatch_client::logging::init_logging;
use disasterwatch_client::{AdminClient, DataSource, MockBackend, PublicClient, Session};

#[derive(Parser)]
#[command(name = "disasterwatch")]
#[command(about = "DisasterWatch operator and citizen client")]
#[command(version)]
struct Cli {
    /// Serve data commands from the in-process mock backend
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long, short = 'u')]
        username: String,
        #[arg(long, short = 'p', env = "DW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// List shelters
    Shelters {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        status: Option<ShelterStatus>,
        #[arg(long)]
        region: Option<i64>,
        /// Shelters whose address mentions this city
        #[arg(long, conflicts_with_all = ["status", "region"])]
        city: Option<String>,
    },
    /// List earthquakes
    Earthquakes {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Only the most recent events
        #[arg(long)]
        recent: bool,
        /// Only events near this point; needs --longitude
        #[arg(long, requires = "longitude", allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long, requires = "latitude", allow_hyphen_values = true)]
        longitude: Option<f64>,
        /// Search radius in kilometres (default 50)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// List alerts
    Alerts {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        status: Option<AlertStatus>,
        /// Regenerate the mock backend's alerts first; ignored without --mock
        #[arg(long)]
        refresh: bool,
    },
    /// Acknowledge an alert
    Acknowledge { id: i64 },
    /// Operator situation analysis, or a single-area risk check with --area
    Recommend {
        #[arg(long, requires_all = ["latitude", "longitude"])]
        area: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,
    },
    /// Location-specific safety recommendations
    Safety {
        #[command(flatten)]
        location: LocationArgs,
        #[arg(long)]
        risk_level: Option<String>,
    },
    /// Evacuation routes, or a single route check with --from and --to
    Routes {
        #[command(flatten)]
        location: LocationArgs,
        #[arg(long, requires = "to")]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        conditions: Option<String>,
    },
    /// One-sentence safety tip
    Tip {
        /// Situation for the operator tip; omit for the citizen tip
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        risk_level: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(clap::Args)]
struct LocationArgs {
    #[arg(long)]
    province: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    barangay: Option<String>,
}

impl From<LocationArgs> for UserLocation {
    fn from(args: LocationArgs) -> Self {
        Self {
            province: args.province,
            city: args.city,
            barangay: args.barangay,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn nearby_shelters(source: &dyn DataSource, limit: usize) -> Result<Vec<NearbyShelter>> {
    let page = source.shelters(1).await?;
    Ok(page
        .results
        .iter()
        .filter(|s| s.status != ShelterStatus::Inactive)
        .take(limit)
        .map(NearbyShelter::from)
        .collect())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting DisasterWatch client v{}", env!("CARGO_PKG_VERSION"));

    let session = Session::from_path(config.session.path.as_deref());
    let admin = AdminClient::new(&config.backend, session)?;
    let mock = cli.mock.then(|| {
        info!(latency_ms = config.mock.latency_ms, "Using mock backend");
        Arc::new(MockBackend::from_config(&config.mock))
    });
    let source: Arc<dyn DataSource> = match &mock {
        Some(mock) => mock.clone(),
        None => Arc::new(admin.clone()),
    };

    match cli.command {
        Command::Login { username, password } => {
            let login = admin.login(&username, &password).await?;
            print_json(&login.user)?;
        }
        Command::Logout => {
            admin.logout()?;
            info!("Logged out");
        }
        Command::Shelters {
            page,
            status,
            region,
            city,
        } => match (status, region, city) {
            (_, _, Some(city)) => {
                let shelters = match &mock {
                    Some(mock) => mock.shelters_by_location(&city).await?,
                    None => PublicClient::new(&config.backend)?
                        .shelters_by_location(&city)
                        .await?,
                };
                print_json(&shelters)?
            }
            (Some(status), _, None) => print_json(&source.shelters_by_status(status).await?)?,
            (None, Some(region), None) => print_json(&source.shelters_by_region(region).await?)?,
            (None, None, None) => print_json(&source.shelters(page).await?)?,
        },
        Command::Earthquakes {
            page,
            recent,
            latitude,
            longitude,
            radius,
        } => {
            if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
                let nearby = match &mock {
                    Some(mock) => {
                        mock.earthquakes_by_location(latitude, longitude, radius)
                            .await?
                    }
                    None => {
                        PublicClient::new(&config.backend)?
                            .earthquakes_by_location(latitude, longitude, radius)
                            .await?
                    }
                };
                print_json(&nearby)?;
            } else if recent {
                print_json(&source.recent_earthquakes().await?)?;
            } else {
                print_json(&source.earthquakes(page).await?)?;
            }
        }
        Command::Alerts {
            page,
            status,
            refresh,
        } => {
            if let Some(mock) = mock.as_ref().filter(|_| refresh) {
                let alerts = mock.refresh_alerts().await;
                info!(count = alerts.len(), "Mock alerts regenerated");
            }
            match status {
                Some(status) => print_json(&source.alerts_by_status(status).await?)?,
                None => print_json(&source.alerts(page).await?)?,
            }
        }
        Command::Acknowledge { id } => {
            print_json(&source.acknowledge_alert(id).await?)?;
        }
        Command::Recommend {
            area,
            latitude,
            longitude,
        } => {
            let service = RecommendationService::new(&config.ai)?;
            let shelters = source.shelters(1).await?.results;
            let earthquakes = source.recent_earthquakes().await?;

            if let (Some(name), Some(latitude), Some(longitude)) = (area, latitude, longitude) {
                let query = AreaQuery {
                    name,
                    latitude,
                    longitude,
                    recent_earthquakes: earthquakes.len(),
                    shelters_nearby: shelters.len(),
                };
                print_json(&service.analyze_area_risk(&query).await?)?;
            } else {
                let alerts = source.alerts(1).await?.results;
                let ctx = AdminContext {
                    shelters: &shelters,
                    earthquakes: &earthquakes,
                    alerts: &alerts,
                    stats: Some(ShelterStats::compute(&shelters, &alerts)),
                };
                print_json(&service.generate_recommendations(&ctx).await?)?;
            }
        }
        Command::Safety {
            location,
            risk_level,
        } => {
            let advisor = SafetyAdvisor::new(&config.ai)?;
            let query = SafetyQuery {
                location: location.into(),
                shelters: nearby_shelters(source.as_ref(), config.ai.public_limits.shelters)
                    .await?,
                earthquakes: source.recent_earthquakes().await?,
                current_risk: CurrentRisk {
                    level: risk_level,
                    ..Default::default()
                },
            };
            print_json(&advisor.generate_safety_recommendations(&query).await?)?;
        }
        Command::Routes {
            location,
            from,
            to,
            conditions,
        } => {
            let advisor = SafetyAdvisor::new(&config.ai)?;
            if let (Some(from_location), Some(to_shelter)) = (from, to) {
                let check = RouteCheck {
                    from_location,
                    to_shelter,
                    current_conditions: conditions,
                };
                print_json(&advisor.analyze_evacuation_route(&check).await)?;
            } else {
                let query = RouteQuery {
                    location: location.into(),
                    shelters: nearby_shelters(source.as_ref(), config.ai.public_limits.shelters)
                        .await?,
                    current_risk: CurrentRisk::default(),
                };
                print_json(&advisor.generate_safety_routes(&query).await?)?;
            }
        }
        Command::Tip {
            context,
            risk_level,
            location,
        } => {
            let tip = match context {
                Some(context) => {
                    RecommendationService::new(&config.ai)?
                        .quick_safety_tip(&context)
                        .await?
                }
                None => {
                    SafetyAdvisor::new(&config.ai)?
                        .quick_safety_tip(&TipContext {
                            risk_level,
                            location,
                        })
                        .await
                }
            };
            println!("{}", tip);
        }
    }

    Ok(())
}
