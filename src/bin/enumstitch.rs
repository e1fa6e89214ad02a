// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use enumstitch::{PatchConfig, PatchReport, run};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Compiler debug dump containing the symbol table
    #[clap(long, default_value = "dsyminitial.log")]
    dump: PathBuf,

    /// Module description document to patch
    #[clap(long, default_value = "bluespec.json")]
    document: PathBuf,

    /// Write the patched document here instead of over --document
    #[clap(long)]
    output: Option<PathBuf>,

    /// Report what would change without writing anything
    #[clap(long)]
    dry_run: bool,

    /// Spaces per indentation level in the written document
    #[clap(long, default_value_t = 4)]
    indent: usize,

    /// Only log warnings and errors
    #[clap(long, short)]
    quiet: bool,
}

impl From<Args> for PatchConfig {
    fn from(args: Args) -> Self {
        PatchConfig {
            dump_path: args.dump,
            document_path: args.document,
            output_path: args.output,
            dry_run: args.dry_run,
            indent: args.indent,
        }
    }
}

fn print_summary(report: &PatchReport) {
    println!(
        "{} enum type(s) declared, {} recovered with {} member(s)",
        report.enum_types,
        report.catalog.len(),
        report.catalog.member_count()
    );
    for (module, merge) in &report.merge.modules {
        println!(
            "  {module}: {} inserted, {} replaced, {} unchanged",
            merge.inserted.len(),
            merge.replaced.len(),
            merge.unchanged.len()
        );
    }
    println!(
        "{} enum definition(s) inserted, {} replaced, {} placeholder field(s) rewritten",
        report.merge.total_inserted(),
        report.merge.total_replaced(),
        report.normalize.total_rewritten()
    );
}

fn main() -> ExitCode {
    let args = Args::parse();
    let default_filter = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&PatchConfig::from(args)) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
