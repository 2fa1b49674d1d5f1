//! Extract command implementation.
//!
//! Splits a text dump holding many statblocks and writes one file per
//! creature, named after it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::convert::Converter;
use crate::error::Result;
use crate::format::TextFormat;
use crate::output::{display_path, plural, Printer};

use super::convert::Plan;
use super::{ensure_dir, read_file, slug, write_file};

/// Split a text file holding many statblocks into one file per creature
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Text file holding one or more statblocks
    pub file: PathBuf,

    /// Writer to use; repeat for several outputs
    #[arg(long)]
    pub to: Vec<String>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Skip the schema check on converted output
    #[arg(long)]
    pub no_validate: bool,
}

pub fn run(args: ExtractArgs, printer: &Printer) -> Result<()> {
    let config = Config::discover(Path::new("."))?;
    let plan = Plan::new(
        &config,
        Some(TextFormat::NAME.to_string()),
        args.to,
        args.output,
        args.no_validate,
    );
    let converter = plan.converter()?;
    let output_dir = plan.output.clone().unwrap_or_else(|| config.output.clone());

    printer.status("Extracting", &display_path(&args.file));
    let text = read_file(&args.file)?;
    let written = extract_to(&converter, &plan.targets, &text, &output_dir, printer)?;

    printer.status(
        "Finished",
        &format!(
            "{} to {}",
            plural(written.len(), "file", "files"),
            display_path(&output_dir)
        ),
    );
    Ok(())
}

/// Write every statblock found in `text`. Returns the paths written.
pub(crate) fn extract_to(
    converter: &Converter,
    targets: &[String],
    text: &str,
    output_dir: &Path,
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    let statblocks = converter.registry().extract(text);
    if statblocks.is_empty() {
        printer.warning("Warning", "no statblocks found");
        return Ok(Vec::new());
    }
    printer.info(
        "Found",
        &plural(statblocks.len(), "statblock", "statblocks"),
    );

    ensure_dir(output_dir)?;
    let mut used = HashSet::new();
    let mut written = Vec::new();

    for statblock in &statblocks {
        let base = slug(&statblock.name);
        let mut stem = base.clone();
        let mut n = 2;
        while !used.insert(stem.clone()) {
            stem = format!("{}-{}", base, n);
            n += 1;
        }

        for target in targets {
            let conversion = converter.convert_statblock(statblock, target)?;
            if let Some(report) = conversion.report.as_ref().filter(|r| r.has_errors()) {
                printer.warning(
                    "Checked",
                    &format!(
                        "{} ({})",
                        statblock.name,
                        plural(report.error_count(), "schema error", "schema errors")
                    ),
                );
            }

            let extension = converter.registry().get(target)?.extension();
            let path = output_dir.join(format!("{}.{}", stem, extension));
            write_file(&path, &conversion.output)?;
            written.push(path);
        }
    }

    Ok(written)
}
