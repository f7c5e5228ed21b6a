use commenter_core::{
    CliArgs, Command as CoreCommand, discover_config, find_files, process_files, resolve_options,
};
mod interaction;
mod report;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let started = Instant::now();
    let cli: CliArgs = CliArgs::parse();

    if let Some(command_enum_val) = cli.command {
        match command_enum_val {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let args = cli.main_opts;
    init_tracing(args.verbose);

    let config = discover_config(args.config.as_deref());
    let opts = resolve_options(&args, config.as_ref());
    debug!(?opts, "resolved options");
    if opts.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let files = match find_files(&args.path, &opts.find_options()) {
        Ok(files) => files,
        Err(e) => {
            report::print_error(format!("{:#}", e));
            return Ok(ExitCode::FAILURE);
        }
    };

    if files.is_empty() {
        report::print_error(format!("No supported files found in '{}'", args.path));
        return Ok(ExitCode::FAILURE);
    }

    if opts.write {
        match interaction::confirm_write(files.len(), args.no_confirm) {
            Ok(true) => {}
            Ok(false) => return Ok(ExitCode::SUCCESS),
            Err(e) => {
                report::print_error(format!("Error during confirmation: {}", e));
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    let file_count = files.len();
    let batch = process_files(files, &opts.process, opts.write);
    let elapsed = started.elapsed();

    if let [file] = batch.files.as_slice() {
        report::print_file_result(file, !opts.no_warn_large, elapsed);
        if file.error.is_none() {
            if opts.write {
                report::print_success("File updated successfully!");
            } else {
                report::print_write_hint(file_count);
            }
        }
    } else {
        if !opts.no_warn_large {
            report::print_large_files(&batch.files);
        }
        report::print_batch_summary(&batch.stats, opts.write);
        if !opts.write {
            report::print_write_hint(file_count);
        }
        report::print_execution_time(elapsed);
    }
    report::print_errors(&batch.stats);

    if batch.stats.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
