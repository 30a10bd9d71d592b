//! Shared types and enums used across the crate.
//! Includes `LineEnding`, `Region`, `LineClass` and `WriteMode`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Terminator found at the end of a raw line.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LineEnding {
    Lf,
    CrLf,
    Cr,
    /// Last line of a file that does not end in a terminator.
    None,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
            LineEnding::Cr => b"\r",
            LineEnding::None => b"",
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LineEnding::Lf => "LF",
            LineEnding::CrLf => "CRLF",
            LineEnding::Cr => "CR",
            LineEnding::None => "none",
        };
        write!(f, "{}", s)
    }
}

/// Which part of a polyglot script a line belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Region {
    /// Batch section for cmd.exe, up to and including the delimiter line. CRLF.
    Prefix,
    /// Shell section after the delimiter line. LF.
    Suffix,
}

impl Region {
    pub fn ending(self) -> LineEnding {
        match self {
            Region::Prefix => LineEnding::CrLf,
            Region::Suffix => LineEnding::Lf,
        }
    }
}

/// How a line relates to the delimiter.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LineClass {
    Plain,
    /// Contains the delimiter somewhere but does not start with it.
    MentionsDelimiter,
    /// Starts with the delimiter; ends the prefix region.
    Delimiter,
}

/// What to do with the rewritten bytes.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Truncate and overwrite the target file
    #[default]
    InPlace,
    /// Write a temporary sibling file and rename it over the target
    Atomic,
    /// Compute the result and report whether the file would change; never write
    Check,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WriteMode::InPlace => "in-place",
            WriteMode::Atomic => "atomic",
            WriteMode::Check => "check",
        };
        write!(f, "{}", s)
    }
}
