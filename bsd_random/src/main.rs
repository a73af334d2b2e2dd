// CLI entry point: print draws from a BSD `random()` generator.
//
// Installs a fresh state buffer of the requested size, seeds it, and prints
// one value per line. Useful for checking output against a C library built
// on the same generator.
//
// Usage:
//   bsdrand [OPTIONS]
//     --seed <N>          Seed (default: 1)
//     --state-size <B>    State buffer size in bytes (default: 128)
//     --count <N>         Number of draws (default: 10)
//     --config <PATH>     JSON DrawConfig file; flags override it
//     --dump-state        Print the final state buffer as JSON
//
// Set RUST_LOG=bsd_random=debug to see state installation on stderr.

use std::path::PathBuf;

use bsd_random::DrawConfig;
use tracing_subscriber::EnvFilter;

/// Flags given on the command line. `None` means "use the config value".
#[derive(Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    seed: Option<u32>,
    state_size: Option<usize>,
    count: Option<usize>,
    dump_state: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();
    let config = resolve_config(args);

    let (values, rng) = match config.draw() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Failed to set up generator: {e}");
            std::process::exit(1);
        }
    };

    for value in values {
        println!("{value}");
    }

    if config.dump_state {
        match serde_json::to_string(&rng.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize state: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Load the config file (if any) and apply command-line overrides.
fn resolve_config(args: CliArgs) -> DrawConfig {
    let mut config = match &args.config_path {
        Some(path) => DrawConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => DrawConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(state_size) = args.state_size {
        config.state_size = state_size;
    }
    if let Some(count) = args.count {
        config.count = count;
    }
    config.dump_state |= args.dump_state;
    config
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> CliArgs {
    let mut parsed = CliArgs::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                parsed.seed = Some(parse_value(args.get(i), "--seed requires a u32 value"));
            }
            "--state-size" => {
                i += 1;
                parsed.state_size = Some(parse_value(
                    args.get(i),
                    "--state-size requires a byte count",
                ));
            }
            "--count" => {
                i += 1;
                parsed.count = Some(parse_value(args.get(i), "--count requires a number"));
            }
            "--config" => {
                i += 1;
                parsed.config_path = Some(args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--config requires a path");
                    std::process::exit(1);
                }));
            }
            "--dump-state" => {
                parsed.dump_state = true;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    parsed
}

fn parse_value<T: std::str::FromStr>(arg: Option<&String>, message: &str) -> T {
    arg.and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("{message}");
        std::process::exit(1);
    })
}

fn print_usage() {
    println!("Usage: bsdrand [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --seed <N>          Seed (default: 1)");
    println!("  --state-size <B>    State buffer size in bytes (default: 128)");
    println!("  --count <N>         Number of draws (default: 10)");
    println!("  --config <PATH>     JSON config file; flags override it");
    println!("  --dump-state        Print the final state buffer as JSON");
    println!("  --help, -h          Show this help");
}
