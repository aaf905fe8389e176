//! sandgen cli interface

use clap::{Parser, Subcommand};
use sandgen::report::ReportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    ///
    /// This is equivalent to running { cd <directory>; sandgen ... }
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a report for every configuration file in the template folder
    ///
    /// Folders are taken from the configuration file's profile for the selected
    /// mode unless given on the command line.
    #[command(alias = "gen")]
    Generate(GenerateCommand),

    /// Flatten the given files and print the result
    Flatten(FlattenCommand),
}

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Configuration file
    ///
    /// Defaults to config/system.toml when it exists
    #[clap(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Run mode, selects the profile to read
    #[clap(short = 'm', long = "mode")]
    pub mode: Option<String>,

    #[clap(flatten)]
    pub folders: FolderArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct FolderArgs {
    /// Folder searched for configuration files
    #[clap(short = 't', long = "template-folder")]
    pub template_folder: Option<PathBuf>,

    /// Folder holding shared components
    #[clap(long = "component-folder")]
    pub component_folder: Option<PathBuf>,

    /// Folder the report is written to
    #[clap(short = 'o', long = "output-folder")]
    pub output_folder: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct FlattenCommand {
    /// Configuration file, only its filter section is used
    #[clap(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Files to flatten
    #[clap(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(short = 'F', long = "output-format", default_value_t = ReportFormat::Yaml)]
    pub format: ReportFormat,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: ReportFormat,
}
