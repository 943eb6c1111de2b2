use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use knap_algorithms::knapsack::{solve, SolverConfig, Strategy};
use knap_challenges::knapsack::*;
use knap_utils::{compress_obj, jsonify, load_json_arg};
use std::{fs, io::Read, path::PathBuf};

fn cli() -> Command {
    Command::new("knap")
        .about("Solves, verifies or generates 0/1 knapsack instances")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Computes the optimal value and item selection")
                .arg(
                    arg!(<INPUT> "Path to an instance file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--strategy [STRATEGY] "Which table layout to solve with")
                        .default_value("auto")
                        .value_parser(["full", "rolling", "auto"]),
                )
                .arg(
                    arg!(--config [CONFIG] "Solver config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path as json")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress "If output file is set, the solution will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a solution against an instance")
                .arg(
                    arg!(<INPUT> "Path to an instance file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random instance")
                .arg(arg!(<SEED> "Seed value").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(--"num-items" [NUM_ITEMS] "Number of items")
                        .default_value("20")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"max-item-weight" [MAX_ITEM_WEIGHT] "Largest item weight")
                        .default_value("50")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--"max-item-value" [MAX_ITEM_VALUE] "Largest item value")
                        .default_value("100")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(--"capacity-percent" [CAPACITY_PERCENT] "Capacity as a percentage of the total item weight")
                        .default_value("50")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve_instance(
            sub_m.get_one::<String>("INPUT").unwrap().clone(),
            sub_m.get_one::<String>("strategy").unwrap().clone(),
            sub_m.get_one::<String>("config").cloned(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            *sub_m.get_one::<bool>("compress").unwrap(),
        ),
        Some(("verify", sub_m)) => verify_solution(
            sub_m.get_one::<String>("INPUT").unwrap().clone(),
            sub_m.get_one::<String>("SOLUTION").unwrap().clone(),
        ),
        Some(("generate", sub_m)) => generate_instance(
            *sub_m.get_one::<u64>("SEED").unwrap(),
            GeneratorSettings {
                num_items: *sub_m.get_one::<usize>("num-items").unwrap(),
                max_item_weight: *sub_m.get_one::<u32>("max-item-weight").unwrap(),
                max_item_value: *sub_m.get_one::<u32>("max-item-value").unwrap(),
                capacity_percent: *sub_m.get_one::<u32>("capacity-percent").unwrap(),
            },
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn solve_instance(
    input: String,
    strategy: String,
    config: Option<String>,
    output_file: Option<PathBuf>,
    compress: bool,
) -> Result<()> {
    let instance = load_instance(&input)?;
    let strategy = strategy.parse::<Strategy>()?;
    let config = match config {
        Some(config) => load_json_arg::<SolverConfig>(&config)?,
        None => SolverConfig::default(),
    };

    let solution = solve(&instance, strategy, &config)?;
    log::info!(
        "optimal value {} with {} items selected",
        solution.value,
        solution.selected_indices().len()
    );

    match output_file {
        Some(path) => {
            if compress {
                fs::write(&path, compress_obj(&solution)?)?;
            } else {
                fs::write(&path, jsonify(&solution)?)?;
            }
            log::info!("solution written to {}", path.display());
        }
        None => println!("{}", format_solution(&solution)),
    }
    Ok(())
}

pub fn verify_solution(input: String, solution: String) -> Result<()> {
    if input == "-" && solution == "-" {
        return Err(anyhow!("Only one of INPUT and SOLUTION can be read from stdin"));
    }
    let instance = load_instance(&input)?;
    let solution = load_json_arg::<Solution>(&solution)?;
    let total_weight = instance
        .verify_solution(&solution)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    log::info!(
        "selection weighs {} of capacity {}",
        total_weight,
        instance.capacity
    );
    println!("Solution is valid");
    Ok(())
}

pub fn generate_instance(seed: u64, settings: GeneratorSettings) -> Result<()> {
    let instance = Instance::generate_instance(&expand_seed(seed), &settings)?;
    print!("{}", instance.to_text());
    Ok(())
}

fn expand_seed(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for chunk in bytes.chunks_exact_mut(8) {
        chunk.copy_from_slice(&seed.to_le_bytes());
    }
    bytes
}

fn load_instance(input: &str) -> Result<Instance> {
    let text = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read instance from stdin: {}", e))?;
        buffer
    } else {
        fs::read_to_string(input)
            .map_err(|e| anyhow!("Failed to read instance file {}: {}", input, e))?
    };
    Ok(parse_instance(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_solve_args() {
        let matches = cli()
            .try_get_matches_from(["knap", "solve", "ks_4_0", "--strategy", "rolling"])
            .unwrap();
        let (name, sub_m) = matches.subcommand().unwrap();
        assert_eq!(name, "solve");
        assert_eq!(sub_m.get_one::<String>("strategy").unwrap(), "rolling");
        assert!(!*sub_m.get_one::<bool>("compress").unwrap());

        assert!(cli()
            .try_get_matches_from(["knap", "solve", "ks_4_0", "--strategy", "greedy"])
            .is_err());
    }

    #[test]
    fn test_generate_defaults() {
        let matches = cli()
            .try_get_matches_from(["knap", "generate", "7"])
            .unwrap();
        let (_, sub_m) = matches.subcommand().unwrap();
        assert_eq!(*sub_m.get_one::<u64>("SEED").unwrap(), 7);
        assert_eq!(*sub_m.get_one::<usize>("num-items").unwrap(), 20);
        assert_eq!(*sub_m.get_one::<u32>("capacity-percent").unwrap(), 50);
    }

    #[test]
    fn test_expand_seed() {
        let seed = expand_seed(1);
        assert_eq!(seed[0], 1);
        assert_eq!(seed[8], 1);
        assert_eq!(seed.iter().filter(|&&b| b != 0).count(), 4);
    }

    #[test]
    fn test_solve_and_verify_files() {
        let dir = std::env::temp_dir();
        let instance_path = dir.join(format!("knap-runtime-{}.txt", std::process::id()));
        let solution_path = dir.join(format!("knap-runtime-{}.json", std::process::id()));
        fs::write(&instance_path, "3 9\n5 4\n6 5\n3 2\n").unwrap();

        solve_instance(
            instance_path.to_str().unwrap().to_string(),
            "full".to_string(),
            Some(r#"{"max_table_cells": 1000}"#.to_string()),
            Some(solution_path.clone()),
            false,
        )
        .unwrap();
        let written: Solution =
            serde_json::from_str(&fs::read_to_string(&solution_path).unwrap()).unwrap();
        assert_eq!(written, Solution::new(11, Some(vec![true, true, false])));

        verify_solution(
            instance_path.to_str().unwrap().to_string(),
            solution_path.to_str().unwrap().to_string(),
        )
        .unwrap();
        assert!(verify_solution(
            instance_path.to_str().unwrap().to_string(),
            r#"{"value": 12, "selection": [true, true, false]}"#.to_string(),
        )
        .is_err());

        fs::remove_file(&instance_path).unwrap();
        fs::remove_file(&solution_path).unwrap();
    }
}
