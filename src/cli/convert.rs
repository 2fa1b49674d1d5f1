//! Convert command implementation.
//!
//! Reads each input with the source reader and writes it with every target
//! writer. A single input converted to a single target goes to stdout unless
//! `--output` is given; otherwise files land in the output directory as
//! `<stem>.<ext>`.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::convert::{Conversion, Converter};
use crate::error::{Result, StatblockError};
use crate::format::FormatRegistry;
use crate::output::{display_path, plural, Printer};
use crate::validation::print_diagnostics;

use super::{ensure_dir, read_file, write_file};

/// Convert statblocks between formats
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Reader to use (default from statblock.yaml, else Automagic)
    #[arg(long)]
    pub from: Option<String>,

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

/// Settings after merging flags over statblock.yaml.
#[derive(Debug)]
pub(crate) struct Plan {
    pub source: String,
    pub targets: Vec<String>,
    pub output: Option<PathBuf>,
    pub validate: bool,
}

impl Plan {
    pub fn new(
        config: &Config,
        from: Option<String>,
        to: Vec<String>,
        output: Option<PathBuf>,
        no_validate: bool,
    ) -> Self {
        Self {
            source: from.unwrap_or_else(|| config.source.clone()),
            targets: if to.is_empty() { config.targets.clone() } else { to },
            output,
            validate: config.validate && !no_validate,
        }
    }

    pub fn converter(&self) -> Result<Converter> {
        if self.targets.is_empty() {
            return Err(StatblockError::Command {
                message: "No target format given".to_string(),
                help: Some("Pass --to JSON or list targets in statblock.yaml".to_string()),
            });
        }

        let converter = if self.validate {
            Converter::with_defaults()?
        } else {
            Converter::without_validation(FormatRegistry::with_defaults())
        };

        converter.registry().get(&self.source)?;
        for target in &self.targets {
            converter.registry().get(target)?;
        }

        Ok(converter)
    }
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let config = Config::discover(Path::new("."))?;
    let files = config.collect_inputs(&args.inputs)?;
    let plan = Plan::new(&config, args.from, args.to, args.output, args.no_validate);
    let converter = plan.converter()?;

    if files.is_empty() {
        printer.warning("Warning", "no input files found");
        return Ok(());
    }

    // One document, one format, no directory: print it.
    if plan.output.is_none() && files.len() == 1 && plan.targets.len() == 1 {
        let text = read_file(&files[0])?;
        let conversion = converter.convert_with_report(&text, &plan.source, &plan.targets[0])?;
        report(&conversion, &files[0], printer);
        println!("{}", conversion.output);
        return Ok(());
    }

    let output_dir = plan.output.clone().unwrap_or_else(|| config.output.clone());
    let written = convert_files(&converter, &plan, &files, &output_dir, printer)?;

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

/// Convert every file to every target under `output_dir`. Returns the paths written.
pub(crate) fn convert_files(
    converter: &Converter,
    plan: &Plan,
    files: &[PathBuf],
    output_dir: &Path,
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    ensure_dir(output_dir)?;
    let mut written = Vec::new();

    for file in files {
        printer.status("Converting", &display_path(file));
        let text = read_file(file)?;
        let statblock = converter.read(&text, &plan.source)?;
        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("statblock");

        for target in &plan.targets {
            let conversion = converter.convert_statblock(&statblock, target)?;
            report(&conversion, file, printer);

            let extension = converter.registry().get(target)?.extension();
            let path = output_dir.join(format!("{}.{}", stem, extension));
            write_file(&path, &conversion.output)?;
            written.push(path);
        }
    }

    Ok(written)
}

fn report(conversion: &Conversion, file: &Path, printer: &Printer) {
    let Some(report) = &conversion.report else {
        return;
    };
    if report.is_ok() {
        return;
    }
    printer.warning(
        "Checked",
        &format!(
            "{} ({})",
            display_path(file),
            plural(report.len(), "issue", "issues")
        ),
    );
    print_diagnostics(report, printer);
}
