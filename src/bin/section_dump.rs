use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use rayon::prelude::*;
use tracing::info;

use cr7_terminal::config::Config;
use cr7_terminal::dataset::GoalTable;
use cr7_terminal::logging;
use cr7_terminal::sections::{self, Section};
use cr7_terminal::view::RenderedView;

struct Args {
    data: Option<PathBuf>,
    section: Option<Section>,
    all: bool,
    json: bool,
}

fn main() -> Result<()> {
    logging::init_stderr();
    let args = parse_args()?;
    let config = Config::load();
    let data_path = args.data.unwrap_or(config.data_path);

    let table = Arc::new(
        GoalTable::load(&data_path)
            .with_context(|| format!("load dataset {}", data_path.display()))?,
    );
    info!(rows = table.len(), path = %data_path.display(), "dataset loaded");

    let targets: Vec<Section> = if args.all {
        Section::ALL.to_vec()
    } else {
        vec![args.section.context("missing --section")?]
    };

    // every worker reads the same table; nothing is written back
    let rendered: Vec<(Section, Result<RenderedView>)> = targets
        .par_iter()
        .map(|section| (*section, sections::render(*section, &table)))
        .collect();

    let mut failures = 0usize;
    if args.json {
        let mut out = Vec::new();
        for (section, result) in &rendered {
            match result {
                Ok(view) => out.push(serde_json::to_value(view)?),
                Err(err) => {
                    failures += 1;
                    out.push(serde_json::json!({
                        "section": section.key(),
                        "error": format!("{err:#}"),
                    }));
                }
            }
        }
        let payload = if args.all {
            serde_json::Value::Array(out)
        } else {
            out.into_iter()
                .next()
                .ok_or_else(|| anyhow!("nothing rendered"))?
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for (section, result) in &rendered {
            match result {
                Ok(view) => println!("{view}"),
                Err(err) => {
                    failures += 1;
                    println!("== {} [{}]\nerror: {err:#}\n", section.label(), section.key());
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} section(s) failed to render");
    }
    Ok(())
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        data: None,
        section: None,
        all: false,
        json: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--all" => args.all = true,
            "--json" => args.json = true,
            "--data" => {
                let value = iter.next().context("missing value for --data")?;
                args.data = Some(PathBuf::from(value));
            }
            "--section" => {
                let value = iter.next().context("missing value for --section")?;
                args.section = Some(Section::from_key(&value).ok_or_else(|| {
                    anyhow!("unknown section {value:?}; expected one of: {}", section_keys())
                })?);
            }
            "-h" | "--help" => {
                eprintln!(
                    "Usage: section_dump [--data PATH] (--section KEY | --all) [--json]\nSections: {}",
                    section_keys()
                );
                std::process::exit(0);
            }
            other => bail!("unknown arg: {other}"),
        }
    }
    if !args.all && args.section.is_none() {
        bail!("specify --section KEY or --all");
    }
    Ok(args)
}

fn section_keys() -> String {
    Section::ALL
        .iter()
        .map(|s| s.key())
        .collect::<Vec<_>>()
        .join(", ")
}
