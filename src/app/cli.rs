use clap::Parser;
use std::path::PathBuf;

const USAGE_EXAMPLES: &str = "\
Usage examples:
  1. Simple:        md_extract frontend js
  2. Extended:      md_extract -d frontend -e js -o code_export
  3. All files:     md_extract -d frontend -e all
  4. Exclude files: md_extract -d frontend -e js --exclude-files \"*.test.js\" \"*.spec.js\"";

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Extract and concatenate files into a markdown document",
    after_help = USAGE_EXAMPLES
)]
pub struct Cli {
    /// Directory to scan (simple mode)
    #[arg(value_name = "DIRECTORY")]
    pub simple_dir: Option<PathBuf>,

    /// File extension to process (simple mode)
    #[arg(value_name = "EXTENSION")]
    pub simple_ext: Option<String>,

    /// Source directory to scan (extended mode)
    #[arg(short = 'd', long = "directory")]
    pub directory: Option<PathBuf>,

    /// File extensions to process (use "all" for all supported types)
    #[arg(short = 'e', long = "extensions", num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Output directory
    #[arg(short = 'o', long, default_value = "export")]
    pub output_dir: PathBuf,

    /// Additional directory names to exclude (substring match)
    #[arg(long, num_args = 1..)]
    pub exclude_dirs: Option<Vec<String>>,

    /// File patterns to exclude (e.g., "*.test.js" "*.spec.js")
    #[arg(long, num_args = 1..)]
    pub exclude_files: Option<Vec<String>>,

    /// Merge a named preset from ~/.config/md_extract/presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Honour .gitignore rules while scanning
    #[arg(long)]
    pub gitignore: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}
