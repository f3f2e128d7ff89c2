use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "vidhi",
    version,
    about = "Hierarchical chunking of Nepali legal act texts for retrieval indexing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Parse(ParseArgs),
    Inspect(InspectArgs),
    Export(ExportArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(long, default_value = "data/ocr_texts")]
    pub input_dir: PathBuf,

    #[arg(long, default_value = "data/parsed_json")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = "txt")]
    pub extension: String,

    #[arg(long, default_value = "legal_chunks.json")]
    pub chunks_file: String,

    #[arg(long, default_value = "acts_metadata.json")]
    pub metadata_file: String,

    #[arg(long, default_value = "parsing_report.json")]
    pub report_file: String,

    #[arg(long)]
    pub jobs: Option<usize>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ListFormat {
    Joined,
    List,
}

impl ListFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joined => "joined",
            Self::List => "list",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long, default_value = "data/parsed_json/legal_chunks.json")]
    pub chunks_path: PathBuf,

    #[arg(long)]
    pub output_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ListFormat::Joined)]
    pub list_format: ListFormat,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "data/parsed_json")]
    pub output_dir: PathBuf,

    #[arg(long, default_value = "parsing_report.json")]
    pub report_file: String,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}
