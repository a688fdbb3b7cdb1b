use clap::Parser;
use quake_map::config::cli::CliArgs;
use quake_map::core::layers::LayerCollection;
use quake_map::domain::ports::ConfigProvider;
use quake_map::utils::{logger, validation::Validate};
use quake_map::{Dashboard, HttpFeedClient, LayerId, MapPresenter, RecordingSurface, SeverityBand};
use serde::Serialize;

#[derive(Serialize)]
struct LayerSummary {
    id: String,
    visible: bool,
    features: usize,
}

#[derive(Serialize)]
struct Summary<'a> {
    legend: Option<&'a quake_map::core::legend::Legend>,
    layers: Vec<LayerSummary>,
    errors: Vec<String>,
}

fn layer_summaries(presenter: &MapPresenter<RecordingSurface>) -> Vec<LayerSummary> {
    let quakes = presenter.earthquake_layers();
    let mut layers: Vec<LayerSummary> = SeverityBand::ALL
        .into_iter()
        .map(|band| LayerSummary {
            id: LayerId::Earthquakes(band).to_string(),
            visible: presenter.is_visible(LayerId::Earthquakes(band)),
            features: quakes.map_or(0, |q: &LayerCollection| q.bands[band].markers.len()),
        })
        .collect();

    layers.push(LayerSummary {
        id: LayerId::PlateBoundaries.to_string(),
        visible: presenter.is_visible(LayerId::PlateBoundaries),
        features: presenter.boundary_layer().map_or(0, |b| b.lines.len()),
    });
    layers
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let (config, file) = match args.load() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if file.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || file.verbose());
    }

    tracing::info!("Starting quake-map");
    tracing::debug!("Dashboard config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let hidden = args
        .hide
        .iter()
        .map(|name| name.parse::<LayerId>())
        .collect::<Result<Vec<_>, _>>()?;

    let view = config.map_view().clone();
    let feeds = HttpFeedClient::new(config);
    let mut dashboard = Dashboard::new(feeds, RecordingSurface::new(), &view);

    let report = dashboard.load().await;

    let presenter = dashboard.presenter_mut();
    for id in hidden {
        presenter.set_visible(id, false);
    }

    let errors: Vec<String> = [
        report.earthquakes.as_ref().err(),
        report.plate_boundaries.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    .map(|e| e.user_friendly_message())
    .collect();

    if args.json {
        let summary = Summary {
            legend: presenter.legend(),
            layers: layer_summaries(presenter),
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        if let Some(legend) = presenter.legend() {
            println!("Legend:");
            for entry in &legend.entries {
                println!("  {:<14} {:<8} {}", entry.text(), entry.range, entry.color);
            }
        }
        println!("Layers:");
        for layer in layer_summaries(presenter) {
            let state = if layer.visible { "shown" } else { "hidden" };
            println!("  {:<22} {:>6} features  {}", layer.id, layer.features, state);
        }
        for error in &errors {
            eprintln!("⚠️  {}", error);
        }
    }

    if report.earthquakes.is_err() && report.plate_boundaries.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
