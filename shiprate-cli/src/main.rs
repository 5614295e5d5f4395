use anyhow::{Context, Result};
use clap::Parser;
use shiprate_quote::Estimate;
use shiprate_shared::{ContainerType, GoodsCategory, Route, ShipmentRequest};
use shiprate_store::app_config::LoggingSettings;
use shiprate_store::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "shiprate")]
#[command(author, version, about = "Quote every shipping method offered on a route")]
struct Args {
    /// Route document (JSON)
    #[arg(short, long, value_name = "FILE")]
    route: PathBuf,

    /// Consignment weight in kg
    #[arg(short, long, default_value_t = 0.0)]
    weight: f64,

    /// Consignment volume in CBM
    #[arg(long, default_value_t = 0.0)]
    volume: f64,

    /// Sea container, repeat for several (20ft, 40ft, 40ftHighCube, 45ftHighCube, LCL)
    #[arg(long = "container", value_name = "TYPE")]
    containers: Vec<ContainerType>,

    /// Goods category tag, e.g. "Has Battery" or "ContainFood"
    #[arg(long, value_name = "TAG")]
    goods_category: Option<String>,

    /// Extra configuration file layered over config/
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print estimates as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing(logging: &LoggingSettings) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_route(path: &Path) -> Result<Route> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read route file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse route file: {}", path.display()))
}

fn render_table(estimates: &[Estimate]) -> String {
    let mut out = String::new();
    for estimate in estimates {
        let marker = if estimate.is_priced() { "" } else { "  [unavailable]" };
        out.push_str(&format!(
            "{:<12}{:>16.2}  {:>3} days{}\n",
            estimate.method_label, estimate.amount, estimate.eta_days, marker
        ));
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load_with(args.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config.logging);

    let route = load_route(&args.route)?;
    info!(route_id = %route.id, route = %route.name, "loaded route");

    let request = ShipmentRequest {
        weight_kg: args.weight,
        volume_cbm: args.volume,
        containers: args.containers,
        goods_category: args.goods_category.map(GoodsCategory::from),
    };

    let generator = config.generator()?;
    let estimates = generator.quote_all(&route, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimates)?);
    } else {
        print!("{}", render_table(&estimates));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shiprate_shared::ShippingMethod;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_repeated_containers() {
        let args = Args::try_parse_from([
            "shiprate",
            "--route",
            "route.json",
            "--container",
            "20ft",
            "--container",
            "LCL",
            "--volume",
            "2.5",
        ])
        .unwrap();

        assert_eq!(args.containers, vec![ContainerType::Ft20, ContainerType::Lcl]);
        assert_eq!(args.volume, 2.5);
        assert_eq!(args.weight, 0.0);
        assert!(Args::try_parse_from(["shiprate", "--route", "r.json", "--container", "53ft"]).is_err());
    }

    #[test]
    fn test_render_table_marks_unavailable() {
        let table = render_table(&[
            Estimate::priced(ShippingMethod::Express, 23.31, 3),
            Estimate::unavailable(ShippingMethod::Sea, 40),
        ]);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Express"));
        assert!(lines[0].contains("23.31"));
        assert!(lines[1].ends_with("[unavailable]"));
    }
}
