use clothsim::visualization::geometry::write_cloth_obj;
use clothsim::{bench_cloth_step, bench_eval_f};
use clothsim::{Scenario, ScenarioConfig, System};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, relative paths resolve against the `scenarios` directory
    #[arg(short, long, default_value = "cloth.yaml")]
    file_name: PathBuf,

    /// Write particle positions of every reported frame as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Export the final cloth surface as OBJ
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &PathBuf) -> Result<ScenarioConfig> {
    let config_path = if file_name.is_absolute() || file_name.exists() {
        file_name.clone()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let file = File::open(&config_path).with_context(|| format!("failed to open {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("failed to parse {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_eval_f();
        bench_cloth_step();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(&scenario_cfg).context("failed to build scenario")?;

    let mut csv = match &args.csv {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            let mut w = BufWriter::new(file);
            writeln!(w, "t,particle,x,y,z")?;
            Some(w)
        }
        None => None,
    };

    scenario.run(|t, state| {
        if let Some(w) = csv.as_mut() {
            for (i, p) in state.iter().step_by(2).enumerate() {
                writeln!(w, "{},{},{},{},{}", t, i, p.x, p.y, p.z)?;
            }
        }
        Ok(())
    })?;

    if let Some(mut w) = csv {
        w.flush()?;
    }

    if let Some(path) = &args.obj {
        match &scenario.system {
            System::Cloth(cloth) => {
                let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
                let mut w = BufWriter::new(file);
                write_cloth_obj(&mut w, cloth, cloth.state())?;
                w.flush()?;
                tracing::info!(path = %path.display(), "cloth exported");
            }
            other => tracing::warn!(system = other.name(), "OBJ export needs a cloth scenario, skipped"),
        }
    }

    Ok(())
}
