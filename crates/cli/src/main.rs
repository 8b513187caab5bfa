mod config;
mod error;
mod graph_io;
mod report;
mod run;
mod trace;

use std::fs;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sssp::generator::{assign_weights, clamp_edge_count, random_graph};

use crate::config::{ConfigKind, read_config};
use crate::error::HarnessError;
use crate::run::Backend;

/// Interactive shell for timing priority-queue backends on operation
/// traces and single-source shortest-path runs.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Directory holding generated test data files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Directory holding generation config files.
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,
    /// Seed for the generation RNG; drawn from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("\n=====================");
    println!("=  heap benchmark   =");
    println!("=====================");
    print_help(None);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let lowered = line.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        match words.first().copied() {
            Some("gen") => gen_command(&args, &words, &mut rng),
            Some("run") => run_command(&args, &words),
            Some("help") => print_help(words.get(1).copied()),
            Some("exit") => break,
            Some(_) => println!("Invalid command. Type 'help' to display all commands."),
            None => {}
        }
    }
    println!("bye");
    Ok(())
}

fn gen_command(args: &Args, words: &[&str], rng: &mut StdRng) {
    let Some(config_name) = words.get(1) else {
        println!("Invalid option. Type 'help gen' for usage.");
        return;
    };
    let config_path = args.config_dir.join(config_name);
    if !config_path.is_file() {
        println!("File not found: {}", config_path.display());
        return;
    }
    if let Err(err) = generate(args, &config_path, rng) {
        println!("Unable to generate test data: {err}");
    }
}

fn generate(args: &Args, config_path: &std::path::Path, rng: &mut StdRng) -> Result<(), HarnessError> {
    let config = read_config(config_path)?;
    fs::create_dir_all(&args.data_dir)?;
    let data_path = args.data_dir.join(&config.name);
    println!("generating...");
    match config.kind {
        ConfigKind::Heap => {
            let stats = trace::generate_trace(&data_path, &config, rng)?;
            report::trace_composition(&config.name, &stats);
        }
        ConfigKind::Graph => {
            let vertices = config.vertices.max(1);
            let edges = clamp_edge_count(vertices, config.edges);
            let topology = random_graph(vertices, edges, rng);
            let min_weight = config.minweight.min(config.maxweight);
            let graph = assign_weights(&topology, min_weight, config.maxweight, rng);
            graph_io::write_graph(&data_path, &graph)?;
            report::graph_composition(&config.name, vertices, edges, min_weight);
        }
        ConfigKind::None => {
            return Err(HarnessError::Malformed(
                "config has no usable `type` (expected heap or graph)".to_string(),
            ));
        }
    }
    Ok(())
}

fn run_command(args: &Args, words: &[&str]) {
    let (Some(test), Some(data_name)) = (words.get(1), words.get(2)) else {
        println!("Invalid options. Type 'help run' for usage.");
        return;
    };
    let data_path = args.data_dir.join(data_name);
    if !data_path.is_file() {
        println!("Test data not found. Use the gen command if you haven't already.");
        return;
    }

    let (backend, dijkstra) = match *test {
        "ph" => (Backend::Pairing, false),
        "fh" => (Backend::Fibonacci, false),
        "bh" => (Backend::LazyBinary, false),
        "nh" => (Backend::LinearScan, false),
        "pd" => (Backend::Pairing, true),
        "fd" => (Backend::Fibonacci, true),
        "bd" => (Backend::LazyBinary, true),
        "ld" => (Backend::LinearScan, true),
        "nd" => (Backend::NoQueue, true),
        _ => {
            println!("Invalid option. Type 'help run' for usage.");
            return;
        }
    };

    println!("running...");
    let timed = if dijkstra {
        run::time_dijkstra(&data_path, backend)
    } else {
        run::time_trace(&data_path, backend)
    };
    match timed {
        Ok(elapsed) => report::runtime(backend, data_name, elapsed),
        Err(err) => println!("Error running test: {err}"),
    }
}

fn print_help(topic: Option<&str>) {
    match topic {
        None | Some("help") => println!(
            "\nCommands\n  \
             gen   Generate test data\n  \
             run   Run a test\n  \
             help  Display this help message\n  \
             exit  Stop this app\n\
             Type 'help <command>' to show more details.\n"
        ),
        Some("gen") => println!(
            "\nGenerate test data\n  \
             usage: gen [config]\n  \
             Where [config] is the name of the config file,\n  \
             located in the config directory.\n"
        ),
        Some("run") => println!(
            "\nMeasure runtime\n  \
             usage: run <test> <data>\n  \
             Where <test> is one of the following:\n    \
             Heap Operation Tests\n      \
             ph -> pairing heap\n      \
             fh -> Fibonacci heap\n      \
             bh -> lazy binary heap\n      \
             nh -> linear scan, no heap structure\n    \
             Dijkstra Graph Tests (single source shortest path)\n      \
             pd -> use a pairing heap\n      \
             fd -> use a Fibonacci heap\n      \
             bd -> use a lazy binary heap\n      \
             ld -> use a linear scan queue\n      \
             nd -> do not use a queue\n  \
             And <data> is the name of the test data file,\n  \
             located in the data directory. Be sure to use the\n  \
             correct data for a test.\n"
        ),
        Some("exit") => println!("\nExit this application\n  usage: exit\n"),
        Some(_) => println!("Unrecognized command. Type 'help' to show all commands."),
    }
}
