use clap::Parser;
use std::path::PathBuf;

use polyglot_eol::WriteMode;
use polyglot_eol::core::params::DEFAULT_MANIFEST;

#[derive(Parser, Debug)]
#[command(
    name = "adjust-line-endings",
    version,
    about = "Ensure CRLF before a delimiter and LF after in a polyglot (batch/bash) script"
)]
pub struct CliArgs {
    /// Path to the polyglot script that requires adjusted line endings.
    /// With --pre-commit, a single positional is taken as the delimiter.
    #[arg(required_unless_present = "pre_commit")]
    pub polyglot_file: Option<PathBuf>,

    /// Delimiter that separates the batch portion of a script from the bash portion (default: END_WIN)
    pub delimiter: Option<String>,

    /// Run in pre-commit mode, processing all files marked with -text in .gitattributes
    #[arg(long, default_value_t = false)]
    pub pre_commit: bool,

    /// Project root used to resolve the manifest and marked files (pre-commit mode)
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Attribute manifest, relative to --root (pre-commit mode)
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// How to store the result (in-place, atomic or check)
    #[arg(long, value_enum, default_value_t = WriteMode::InPlace)]
    pub mode: WriteMode,

    /// Print the report as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
