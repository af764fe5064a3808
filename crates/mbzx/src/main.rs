use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console::style;

use crate::app::App;
use crate::job::{ExtractJob, JobError};

mod app;
mod job;
mod paths;

fn main() -> ExitCode {
    let app = App::parse();
    match run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::from(1)
        }
    }
}

fn run(app: App) -> anyhow::Result<()> {
    let root = paths::install_root().context("failed to resolve the install root")?;
    let source_dir = root.join(paths::SOURCE_DIR);

    let Some(filename) = app.filename else {
        println!(
            "{} Please specify an MBZ file to extract.",
            style("Error:").red().bold()
        );
        println!();
        print_usage(&source_dir);
        std::process::exit(1);
    };

    let job = ExtractJob::new(filename, source_dir, root.join(paths::DEST_DIR));
    match job.run() {
        Ok(_) => Ok(()),
        // recovery aid: show what could have been named instead
        Err(err @ JobError::FileNotFound { .. }) => {
            report_error(&err.into());
            println!();
            job::print_available(job.source_dir());
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn print_usage(source_dir: &Path) {
    println!("Usage:");
    println!("  mbzx <filename.mbz>");
    println!();
    println!("Example:");
    println!("  mbzx backup-moodle2-course-571-real_numbers-20260218-1335-nu.mbz");
    if source_dir.is_dir() {
        println!();
        job::print_available(source_dir);
    }
}

fn report_error(err: &anyhow::Error) {
    println!("{} {err}", style("Error:").red().bold());
}
