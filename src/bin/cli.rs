//! tracecluster CLI - Debug tool for activity clustering and route patterns
//!
//! Usage:
//!   tracecluster-cli activities <activities.json> [--features distance,average_speed]
//!   tracecluster-cli routes <folder> [--eps 0.25] [--min-samples 2]
//!
//! This tool runs the clustering pipelines on local files and prints verbose
//! debug output (score curves, centroids, similarity tables), helping to
//! understand why activities were grouped and routes were matched.

use clap::{Parser, Subcommand, ValueEnum};
use gpx::{Gpx, read};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracecluster::{
    ActivityRecord, ClusterConfig, ColorPalette, GpsPoint, KMeansConfig, PatternConfig,
    RouteSignature, UnitSystem, cluster_activities, find_route_patterns, parse_feature_keys,
};

#[derive(Parser)]
#[command(name = "tracecluster-cli")]
#[command(about = "Debug tool for activity clustering and route patterns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Units {
    Imperial,
    Metric,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Imperial => UnitSystem::Imperial,
            Units::Metric => UnitSystem::Metric,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster activities by their attributes (K-Means + silhouette)
    Activities {
        /// JSON file containing an array of activity records
        file: PathBuf,

        /// Comma-separated feature keys, in display order
        #[arg(short, long, default_value = "distance,average_speed,elevation_gain")]
        features: String,

        /// Unit system for feature values
        #[arg(short, long, value_enum, default_value = "imperial")]
        units: Units,

        /// Candidate cluster counts
        #[arg(short, long, value_delimiter = ',', default_value = "2,3,4,5,6")]
        k: Vec<usize>,

        /// Seed for k-means++ initialization
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Maximum K-Means iterations
        #[arg(long, default_value = "100")]
        max_iterations: usize,

        /// Write the result as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect repeated routes in a folder of GPX files (signatures + DBSCAN)
    Routes {
        /// Folder containing GPX files
        folder: PathBuf,

        /// Maximum dissimilarity for two routes to be neighbors
        #[arg(long, default_value = "0.25")]
        eps: f64,

        /// Minimum neighborhood size for a core route
        #[arg(long, default_value = "2")]
        min_samples: usize,

        /// Write the result as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Activities {
            file,
            features,
            units,
            k,
            seed,
            max_iterations,
            output,
        } => run_activities(
            &file,
            &features,
            units.into(),
            ClusterConfig {
                k_range: k,
                kmeans: KMeansConfig {
                    max_iterations,
                    seed,
                },
            },
            output.as_deref(),
            cli.verbose,
        ),
        Commands::Routes {
            folder,
            eps,
            min_samples,
            output,
        } => run_routes(
            &folder,
            PatternConfig {
                eps,
                min_samples,
                include_matrix: cli.verbose,
                ..PatternConfig::default()
            },
            output.as_deref(),
            cli.verbose,
        ),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run activity clustering
fn run_activities(
    file: &Path,
    features: &str,
    units: UnitSystem,
    config: ClusterConfig,
    output: Option<&Path>,
    verbose: bool,
) -> Result<(), String> {
    let keys = parse_feature_keys(features).map_err(|e| e.to_string())?;
    let content = fs::read_to_string(file).map_err(|e| e.to_string())?;
    let activities: Vec<ActivityRecord> =
        serde_json::from_str(&content).map_err(|e| e.to_string())?;

    println!("\n{}", "=".repeat(60));
    println!("ACTIVITY CLUSTERING ({} activities)", activities.len());
    println!("{}", "=".repeat(60));

    let result =
        cluster_activities(&activities, &keys, units, &config).map_err(|e| e.to_string())?;

    println!("\n[Score curve]");
    for entry in &result.silhouette_scores_by_k {
        let marker = if entry.k == result.best_k { " <- best" } else { "" };
        println!("  k={:<3} silhouette={:.4}{}", entry.k, entry.score, marker);
    }

    let palette = ColorPalette::default();
    println!("\n[Clusters]");
    for summary in result.summaries() {
        let values: Vec<String> = keys
            .iter()
            .zip(&summary.centroid)
            .map(|(key, value)| format!("{}={:.2}{}", key, value, key.unit(units)))
            .collect();
        println!(
            "  #{} {} ({} activities): {}",
            summary.cluster,
            palette.color_for_cluster(summary.cluster),
            summary.size,
            values.join(", ")
        );
        if verbose {
            for &i in &summary.members {
                println!("      - {}", activities[i].id);
            }
        }
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())?;
        println!("\nWrote {}", path.display());
    }

    Ok(())
}

/// Run route pattern detection
fn run_routes(
    folder: &Path,
    config: PatternConfig,
    output: Option<&Path>,
    verbose: bool,
) -> Result<(), String> {
    let routes = load_gpx_files(folder, verbose)?;
    if routes.is_empty() {
        println!("No routes to process");
        return Ok(());
    }

    println!("\n{}", "=".repeat(60));
    println!("ROUTE PATTERNS");
    println!("{}", "=".repeat(60));

    if verbose {
        for route in &routes {
            let sig = RouteSignature::from_points(&route.points, &config.signature);
            println!(
                "  {} - {} bearings, {:.2}km",
                route.name,
                sig.bearings.len(),
                sig.total_distance / 1000.0
            );
        }
    }

    let tracks: Vec<Vec<GpsPoint>> = routes.iter().map(|r| r.points.clone()).collect();
    let result = find_route_patterns(&tracks, &config);

    let palette = ColorPalette::default();
    println!(
        "\nFound {} patterns, {} unique routes",
        result.pattern_count, result.unique_route_count
    );
    for pattern in result.patterns() {
        println!(
            "\n  Pattern #{} {} ({} routes)",
            pattern.id,
            palette.color_for_label(pattern.id as i32),
            pattern.route_indices.len()
        );
        for &i in &pattern.route_indices {
            println!("    - {}", routes[i].name);
        }
    }
    if result.unique_route_count > 0 {
        println!("\n  Unique ({})", palette.noise_color);
        for i in result.unique_routes() {
            println!("    - {}", routes[i].name);
        }
    }

    if let (true, Some(matrix)) = (verbose, &result.similarity_matrix) {
        println!("\n[Similarity matrix]");
        for i in 0..matrix.len() {
            let row: Vec<String> = matrix.row(i).iter().map(|v| format!("{:.2}", v)).collect();
            println!("  {:>3}: {}", i, row.join(" "));
        }
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())?;
        println!("\nWrote {}", path.display());
    }

    Ok(())
}

/// Route loaded from a GPX file
struct GpxRoute {
    name: String,
    points: Vec<GpsPoint>,
}

/// Load GPX files from a folder, sorted by file name for stable labels
fn load_gpx_files(folder: &Path, verbose: bool) -> Result<Vec<GpxRoute>, String> {
    println!("\n{}", "=".repeat(60));
    println!("Loading GPX files from: {}", folder.display());
    println!("{}", "=".repeat(60));

    let mut paths: Vec<PathBuf> = fs::read_dir(folder)
        .map_err(|e| format!("reading folder: {}", e))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "gpx"))
        .collect();
    paths.sort();

    let mut routes = Vec::with_capacity(paths.len());
    for path in paths {
        match parse_gpx_file(&path) {
            Ok(route) => {
                if verbose {
                    println!("  [OK] {} - {} points", route.name, route.points.len());
                }
                routes.push(route);
            }
            Err(e) => eprintln!("  [ERR] Failed to parse {}: {}", path.display(), e),
        }
    }

    println!("\nLoaded {} routes", routes.len());
    Ok(routes)
}

/// Parse a single GPX file
fn parse_gpx_file(path: &Path) -> Result<GpxRoute, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader = BufReader::new(file);
    let gpx: Gpx = read(reader).map_err(|e| e.to_string())?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();

    let points: Vec<GpsPoint> = gpx
        .tracks
        .iter()
        .flat_map(|track| &track.segments)
        .flat_map(|segment| &segment.points)
        .map(|pt| {
            let p = pt.point();
            GpsPoint::new(p.y(), p.x())
        })
        .collect();

    if points.is_empty() {
        return Err("No track points found".to_string());
    }

    Ok(GpxRoute { name, points })
}
