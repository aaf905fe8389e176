mod cli;

use anyhow::Context;
use sandgen::config::{Overrides, SystemConfig};
use sandgen::report::{self, ReportFormat};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("SANDGEN_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err,);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    let command_result = match cli.command {
        cli::Command::Generate(generate_cli) => generate(generate_cli),
        cli::Command::Flatten(flatten_cli) => flatten(flatten_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn generate(cli: cli::GenerateCommand) -> anyhow::Result<()> {
    let config = SystemConfig::load_or_default(cli.config.as_deref())?;
    let settings = config.resolve(Overrides {
        mode: cli.mode,
        template_folder: cli.folders.template_folder,
        component_folder: cli.folders.component_folder,
        output_folder: cli.folders.output_folder,
    })?;

    let files = sandgen::documents::discover(&settings.template_folder, &settings.extension)?;
    let batch = sandgen::batch::run(&files, &settings.filter);

    if !batch.skipped.is_empty() {
        tracing::warn!(
            skipped = batch.skipped.len(),
            total = files.len(),
            "some files were skipped"
        );
    }
    anyhow::ensure!(!batch.documents.is_empty(), "No file could be flattened");

    let rendered = report::render(&batch.documents, cli.output.format)?;

    std::fs::create_dir_all(&settings.output_folder).with_context(|| {
        format!(
            "Failed to create output folder {}",
            settings.output_folder.display()
        )
    })?;
    let now = chrono::Local::now().naive_local();
    let file_name = report::report_file_name(&now, cli.output.format);
    let output_path = settings.output_folder.join(file_name);
    std::fs::write(&output_path, rendered)
        .with_context(|| format!("Failed to write report {}", output_path.display()))?;

    tracing::info!(path=%output_path.display(), documents=batch.documents.len(), "report written");
    println!("{}", output_path.display());
    Ok(())
}

pub fn flatten(cli: cli::FlattenCommand) -> anyhow::Result<()> {
    let config = SystemConfig::load_or_default(cli.config.as_deref())?;
    let batch = sandgen::batch::run(&cli.files, &config.filter);

    if batch.documents.is_empty() {
        if let Some((path, error)) = batch.skipped.into_iter().next() {
            return Err(anyhow::Error::new(error)
                .context(format!("Failed to flatten {}", path.display())));
        }
    }

    output(cli.format, &batch.documents)
}

fn output(
    format: ReportFormat,
    documents: &[sandgen::flatten::FlattenedDocument],
) -> anyhow::Result<()> {
    let rendered = report::render(documents, format)?;
    print!("{rendered}");
    Ok(())
}
