use clap::{Parser, Subcommand};
use querybench_eval::{model, render, source, Result};

#[derive(Parser)]
#[command(name = "querybench-eval")]
#[command(about = "Benchmark result evaluator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize per-experiment timings and compare two engines per query.
    Evaluate {
        /// Benchmark result document (JSON).
        #[arg(long)]
        results: String,

        /// Baseline engine for the comparison tables.
        #[arg(long, default_value = "opossum")]
        engine_a: String,

        /// Engine compared against the baseline.
        #[arg(long, default_value = "jit")]
        engine_b: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Evaluate {
            results,
            engine_a,
            engine_b,
        } => {
            let doc = source::load_document(&results)?;
            let engines = model::EnginePair { engine_a, engine_b };

            // 1) Aggregate every "run" experiment, print its summary, and
            //    index it for the comparison pass.
            let mut index = model::ExperimentIndex::new();
            for entry in &doc.results {
                if entry.experiment.task != source::RUN_TASK {
                    continue;
                }
                let key = model::ExperimentKey {
                    query_id: entry.experiment.query_id.clone(),
                    engine: entry.experiment.engine.clone(),
                };
                let aggregate = model::combine_trials(&key, &entry.results)?;
                let shared = model::compute_shares(&key, aggregate)?;
                print!("{}", render::render_summary(&key, &shared));
                index.insert(key, shared);
            }

            if index.is_empty() {
                eprintln!("WARN: no experiments with task \"run\" in {}", results);
            }

            // 2) Compare the two engines for every query with both sides.
            for comparison in model::compare_engines(&index, &engines) {
                print!("{}", render::render_comparison(&comparison, &engines));
            }
        }
    }

    Ok(())
}
