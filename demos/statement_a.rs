use clap::Parser;

use bdd_closure::bdd::{Bdd, BddConfig};
use bdd_closure::closure::ClosureConfig;
use bdd_closure::graph::Graph;
use bdd_closure::statement::{verdict_line, StatementConfig};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// BDD size (in bits, so the actual size is `2^size` nodes).
    #[arg(long, value_name = "INT", default_value = "20")]
    storage_bits: usize,

    /// Computed table size (in bits).
    #[arg(long, value_name = "INT", default_value = "16")]
    cache_bits: usize,

    /// Maximum number of squarings before giving up.
    #[arg(long, value_name = "INT", default_value = "2048")]
    max_iterations: usize,

    /// Compute the closure once instead of once per prime source.
    #[arg(long)]
    shared_base: bool,

    /// Increase logging verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        _ => simplelog::LevelFilter::Debug,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    log::debug!("args = {:?}", args);

    let time_total = std::time::Instant::now();

    let bdd = Bdd::new(
        BddConfig::default()
            .with_storage_bits(args.storage_bits)
            .with_cache_bits(args.cache_bits),
    );
    let config = StatementConfig {
        closure: ClosureConfig::default().with_max_iterations(args.max_iterations),
        recompute_base_per_source: !args.shared_base,
    };

    let result = bdd.evaluate_statement_a(&Graph::standard(), &config)?;
    println!("{}", verdict_line(result));

    log::info!("bdd = {:?}", bdd);
    log::info!(
        "cache: hits = {}, misses = {}",
        bdd.cache().hits(),
        bdd.cache().misses()
    );
    log::info!("Total time: {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}
