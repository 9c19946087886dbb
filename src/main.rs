use clap::Parser;
use nearby_eats::utils::error::ErrorSeverity;
use nearby_eats::utils::{logger, validation::Validate};
use nearby_eats::{CliConfig, DomainNode, GooglePlacesClient, MarkerCollector, SearchPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.logging.json {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }
    tracing::info!("🚀 Starting nearby-eats");
    tracing::debug!("Resolved config: {:?}", config.search);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let provider = GooglePlacesClient::new(config.provider_settings()?)?;
    let pipeline = SearchPipeline::new(provider, config);
    let mut markers = MarkerCollector::new();

    match pipeline.search_nearby_place(&cli.address, &mut markers).await {
        Ok(nodes) => {
            tracing::info!("✅ Found {} places near '{}'", nodes.len(), cli.address);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&nodes)?);
            } else {
                print_ranking(&cli.address, &nodes);
                if let Some(center) = markers.center() {
                    println!("📍 {} markers, map centered at {}", markers.markers().len(), center);
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Search failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_ranking(address: &str, nodes: &[DomainNode]) {
    if nodes.is_empty() {
        println!("No eateries found near '{}'", address);
        return;
    }

    println!("Eateries near '{}':", address);
    for (index, node) in nodes.iter().enumerate() {
        let stars = "★".repeat(node.star_rating() as usize);
        println!(
            "{:>3}. {:<5} {} ({} reviews) {}",
            index + 1,
            stars,
            node.name,
            node.score.len(),
            node.location
        );
        if !node.photo_url.is_empty() {
            println!("      {}", node.photo_url);
        }
    }
}
