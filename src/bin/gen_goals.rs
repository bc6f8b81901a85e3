use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use cr7_terminal::logging;
use cr7_terminal::synthetic;

const DEFAULT_ROWS: usize = 800;
const DEFAULT_SEED: u64 = 7;
const DEFAULT_OUT: &str = "data.csv";

struct Args {
    rows: usize,
    seed: u64,
    out: PathBuf,
}

fn main() -> Result<()> {
    logging::init_stderr();
    let args = parse_args()?;
    let records = synthetic::generate(args.rows, args.seed);

    let mut writer = csv::Writer::from_path(&args.out)
        .with_context(|| format!("create {}", args.out.display()))?;
    for record in &records {
        writer.serialize(record).context("write goal record")?;
    }
    writer.flush().context("flush csv")?;

    info!(rows = records.len(), seed = args.seed, out = %args.out.display(), "goals generated");
    println!("Wrote {} goals to {}", records.len(), args.out.display());
    Ok(())
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        rows: DEFAULT_ROWS,
        seed: DEFAULT_SEED,
        out: PathBuf::from(DEFAULT_OUT),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--rows" => {
                let value = iter.next().context("missing value for --rows")?;
                args.rows = value
                    .parse()
                    .with_context(|| format!("invalid --rows {value:?}"))?;
            }
            "--seed" => {
                let value = iter.next().context("missing value for --seed")?;
                args.seed = value
                    .parse()
                    .with_context(|| format!("invalid --seed {value:?}"))?;
            }
            "--out" => {
                let value = iter.next().context("missing value for --out")?;
                args.out = PathBuf::from(value);
            }
            "-h" | "--help" => {
                eprintln!("Usage: gen_goals [--rows N] [--seed S] [--out PATH]");
                std::process::exit(0);
            }
            other => bail!("unknown arg: {other}"),
        }
    }
    Ok(args)
}
