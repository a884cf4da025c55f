//! CLI tool for building and inspecting a distance field.
//!
//! Loads a ROS map_server map, builds the field, prints statistics and
//! answers point queries.
//!
//! # Usage
//!
//! ```bash
//! dura_field office.yaml
//! dura_field -c field.toml office.yaml 1.0 2.5 -3.2 0.4
//! dura_field --export office_distance.png office.yaml
//! ```

use std::env;

use dura_field::{FieldConfig, LikelihoodField, load_map, save_distance_image};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct Config {
    map_path: String,
    config_path: Option<String>,
    export_path: Option<String>,
    points: Vec<(f32, f32)>,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut map_path = None;
    let mut config_path = None;
    let mut export_path = None;
    let mut coords = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                config_path = Some(args.get(i).ok_or("Missing value for --config")?.clone());
            }
            "--export" | "-e" => {
                i += 1;
                export_path = Some(args.get(i).ok_or("Missing value for --export")?.clone());
            }
            "--help" | "-h" => {
                return Err("Help requested".to_string());
            }
            arg if map_path.is_none() && !arg.starts_with('-') => {
                map_path = Some(arg.to_string());
            }
            arg if map_path.is_some() => {
                let value: f32 = arg
                    .parse()
                    .map_err(|_| format!("Invalid coordinate: {}", arg))?;
                coords.push(value);
            }
            _ => {
                return Err(format!("Unknown argument: {}", args[i]));
            }
        }
        i += 1;
    }

    let map_path = map_path.ok_or("Missing map YAML argument")?;
    if coords.len() % 2 != 0 {
        return Err("Coordinates must come in X Y pairs".to_string());
    }
    let points = coords.chunks(2).map(|c| (c[0], c[1])).collect();

    Ok(Config {
        map_path,
        config_path,
        export_path,
        points,
    })
}

fn print_usage(program: &str) {
    eprintln!(
        r#"
Usage: {} [OPTIONS] <MAP.yaml> [X Y]...

Build an obstacle distance field for a ROS map and query it.

Options:
  -c, --config <FILE>   Field configuration (TOML)
  -e, --export <FILE>   Write the distance field as an image (.png, .pgm)
  -h, --help            Show this help message

Each X Y pair is queried for its obstacle distance; the batch likelihood
over all pairs is printed last.
"#,
        program
    );
}

fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let field_config = match &config.config_path {
        Some(path) => match FieldConfig::load(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config {}: {}", path, e);
                FieldConfig::default()
            }
        },
        None => FieldConfig::default(),
    };

    let grid = load_map(&config.map_path)?;
    let field = LikelihoodField::from_grid(&grid, field_config)?;

    let stats = field.field().stats();
    println!("Map:            {}", config.map_path);
    println!(
        "Grid:           {}x{} @ {}",
        field.field().width(),
        field.field().height(),
        field.field().resolution()
    );
    println!(
        "Obstacles:      {} of {} cells",
        stats.occupied_cells, stats.total_cells
    );
    println!("Max distance:   {:.3}", stats.max_distance);
    println!("Mean distance:  {:.3}", stats.mean_distance);

    if let Some(path) = &config.export_path {
        save_distance_image(field.field(), path)?;
    }

    if config.points.is_empty() {
        return Ok(());
    }

    println!();
    for &(x, y) in &config.points {
        let d = field.closest_obstacle_distance(x, y);
        if d.is_nan() {
            println!("({:>8.3}, {:>8.3})  out of bounds", x, y);
        } else {
            println!("({:>8.3}, {:>8.3})  {:.4}", x, y, d);
        }
    }

    let (xs, ys): (Vec<f32>, Vec<f32>) = config.points.iter().copied().unzip();
    let error = field.batch_error(&xs, &ys)?;
    let likelihood = field.batch_likelihood(&xs, &ys)?;
    println!();
    println!(
        "Batch error:    {:.4} ({} in bounds, {} out of bounds)",
        error.total, error.in_bounds, error.out_of_bounds
    );
    println!("Likelihood:     {:.6e}", likelihood);

    Ok(())
}
