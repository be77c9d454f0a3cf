//! # collabc
//!
//! Runs randomized differential workloads: every authored container is
//! driven by the same seeded operations as a host collection, and the two
//! are compared after each round.

use std::process::ExitCode;

use clap::Parser;
use collabc_core::registry::Registry;
use collabc_core::ListSet;
use collabc_types::{Dict, List, SharedDict};
use colored::*;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tracing_subscriber::EnvFilter;
use workload::{
    capability_report, frozen_hash_workload, mapping_workload, progression_workload,
    sequence_workload, set_workload, WorkloadConfig, WorkloadStats,
};

pub mod workload;

#[derive(Parser)]
#[command(name = "collabc")]
#[command(about = "Differential workloads for derived container capabilities")]
#[command(version)]
struct Cli {
    /// Seed for the operation generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Operations applied per round
    #[arg(long, default_value_t = 500)]
    ops: usize,
    /// Fresh containers per workload
    #[arg(long, default_value_t = 20)]
    rounds: usize,
    /// Distinct keys and values drawn by the generator
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
    key_space: u32,
    /// Log each verified round
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "collabc=debug,collabc_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = WorkloadConfig {
        seed: cli.seed,
        ops_per_round: cli.ops,
        rounds: cli.rounds,
        key_space: cli.key_space,
    };

    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║            RECOGNIZED CAPABILITIES                         ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    for (name, capabilities) in capability_report(Registry::global()) {
        println!("  {:<12} {}", name.bold(), capabilities);
    }

    println!("\n\n╔════════════════════════════════════════════════════════════╗");
    println!("║            DIFFERENTIAL WORKLOADS                          ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    let runs: Vec<WorkloadStats> = vec![
        mapping_workload::<Dict<u32, u64>>("Dict vs BTreeMap", &config),
        mapping_workload::<SharedDict<u32, u64>>("SharedDict vs BTreeMap", &config),
        mapping_workload::<HashMap<u32, u64>>("HashMap vs BTreeMap", &config),
        sequence_workload::<List<i64>>("List vs Vec", &config),
        sequence_workload::<VecDeque<i64>>("VecDeque vs Vec", &config),
        set_workload::<ListSet<u32>>("ListSet vs BTreeSet", &config),
        set_workload::<HashSet<u32>>("HashSet vs BTreeSet", &config),
        set_workload::<BTreeSet<u32>>("BTreeSet capabilities vs BTreeSet", &config),
        frozen_hash_workload(&config),
        progression_workload(&config),
    ];

    for stats in &runs {
        stats.print();
    }

    println!();
    let mut failed = 0;
    for stats in &runs {
        if stats.passed() {
            println!("  {} {}", "✓".green(), stats.name);
        } else {
            failed += 1;
            println!("  {} {} ({} mismatches)", "✗".red(), stats.name, stats.mismatches);
        }
    }

    if failed == 0 {
        println!("\n{}", "✓ All workloads agree with their models".green().bold());
        ExitCode::SUCCESS
    } else {
        println!("\n{}", format!("✗ {} workload(s) diverged", failed).red().bold());
        ExitCode::FAILURE
    }
}
