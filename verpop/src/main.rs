use clap::Parser;
use tracing_subscriber::EnvFilter;

use verpop::client::NpmRegistry;
use verpop::config::Config;
use verpop::table::{SortDirection, SortField, clamp_page};
use verpop::{PackageSnapshot, SearchController, aggregate, bucketize, format_count, sort_and_page};

/// verpop - Version popularity for npm packages
#[derive(Parser, Debug)]
#[command(name = "verpop")]
#[command(version, about, long_about = None)]
struct Args {
    /// Package to look up, e.g. `react` or `@types/node`
    package: String,

    /// Semver range to filter versions by, e.g. `^18.0.0`
    #[arg(short, long, default_value = "")]
    filter: String,

    /// Column to sort the versions table by
    #[arg(long, default_value_t = SortField::Date)]
    sort: SortField,

    /// Sort ascending instead of descending
    #[arg(long, default_value_t = false)]
    asc: bool,

    /// Page of the versions table to show
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Rows per page (defaults to VERPOP_PAGE_SIZE or 15)
    #[arg(long)]
    page_size: Option<usize>,

    /// Individual chart slices before the rest is grouped as "Others"
    #[arg(long)]
    slices: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let client = reqwest::Client::builder().user_agent("verpop").build()?;
    let registry = NpmRegistry::new(client, config.clone());
    let controller = SearchController::new(registry);

    let snapshot = match controller.search(&args.package).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    print_report(&snapshot, &args, &config);
    Ok(())
}

fn print_report(snapshot: &PackageSnapshot, args: &Args, config: &Config) {
    let aggregation = aggregate(&snapshot.versions, snapshot.total_downloads, &args.filter);

    println!("{}", snapshot.name);
    if let Some(description) = &snapshot.description {
        println!("{}", description);
    }
    println!("{}", snapshot.npm_url());
    println!();

    let heading = if aggregation.filter_active { "Filtered" } else { "Total" };
    print!(
        "{} Downloads (Last Week): {}",
        heading,
        format_count(aggregation.filtered_total)
    );
    if aggregation.filter_active {
        print!(" across {} versions matching {}", aggregation.len(), args.filter.trim());
    }
    println!();
    println!();

    let direction = if args.asc { SortDirection::Asc } else { SortDirection::Desc };
    let page_size = args.page_size.unwrap_or(config.page_size).max(1);
    let total = verpop::table::total_pages(aggregation.len(), page_size);
    let page_number = clamp_page(args.page, total);
    let page = sort_and_page(&aggregation.records, args.sort, direction, page_number, page_size);

    println!("{:<20} {:<12} {:>14} {:>9}", "Version", "Released", "Downloads", "Percent");
    for record in &page.items {
        let released = record
            .published_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "{:<20} {:<12} {:>14} {:>8.2}%",
            record.version,
            released,
            format_count(record.downloads),
            record.percentage
        );
    }
    if page.items.is_empty() {
        println!("No versions with downloads");
    }
    println!("Page {} of {} ({} versions)", page_number, page.total_pages, page.total_items);
    println!();

    println!("Version Distribution");
    for slice in bucketize(&aggregation.records, args.slices.unwrap_or(config.max_slices)) {
        let bar = "#".repeat((slice.percentage / 2.0).round() as usize);
        println!("{:<20} {:>7.2}% {}", slice.label, slice.percentage, bar);
    }
}
