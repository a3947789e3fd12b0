use std::io::Write;
use std::process::ExitCode;

use imgpress::catalog::Catalog;
use imgpress::settings::Settings;
use imgpress::{args, export, help, paths};

fn main() -> ExitCode {
    help::maybe_print_help_and_exit("imgpress");
    init_logging();

    let invocation = match args::parse_args(std::env::args_os().collect()) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut settings = Settings::load();
    if let Some(dir) = invocation.output_dir {
        settings.set_export_path(dir);
    }

    let mut catalog = Catalog::new();
    let loaded = catalog.import(&invocation.files);
    println!("{loaded} image(s) loaded");

    let result = export::run(&mut catalog, &invocation.options, settings.export_path());
    catalog.reset();

    match result {
        Ok(report) => {
            println!("{} image(s) exported", report.success_count);
            print!("{}", report.stats);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Routes the `log` facade into an append-only, timestamped file next to
/// the settings, falling back to stderr when the file cannot be opened.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    builder.format(|buf, record| writeln!(buf, "{} - {}", buf.timestamp_seconds(), record.args()));

    let log_path = paths::writable_path("logs/imgpress.log");
    if let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
}
