#![doc = r#"
polyglot-eol — line-ending fixer for polyglot cmd.exe/bash scripts.

A polyglot script is one file that runs under both cmd.exe and bash. Bash skips
the batch section through a heredoc that ends at a delimiter line:

```text
: << END_WIN
ECHO I'm being executed by cmd.exe!
EXIT /B 0
END_WIN

echo "I'm being executed by bash!"
exit 0
```

Batch labels are unreliable with LF-only files and bash rejects CR, so every
line up to and including the delimiter line must end in CRLF and every line
after it in LF. This crate rewrites only the terminator bytes and leaves all
content bytes alone. Rewriting an already adjusted file is a no-op.

Quick start: fix one script
---------------------------
```rust,no_run
use std::path::Path;

fn main() -> polyglot_eol::Result<()> {
    let report = polyglot_eol::rewrite_file(Path::new("scripts/build.cmd"), "END_WIN")?;
    println!("delimiter on line {:?}, changed={}", report.stats.delimiter_line, report.changed);
    Ok(())
}
```

Pre-commit batch
----------------
Files whose `.gitattributes` entry carries `-text` (git must not normalize
their endings) are discovered under a project root and fixed one by one. A
failing file is recorded in the report and the others are still processed.

```rust,no_run
use std::path::Path;
use polyglot_eol::{run_batch, RewriteParams, SelectParams, WriteMode};

fn main() -> polyglot_eol::Result<()> {
    let params = RewriteParams::new("END_WIN").with_mode(WriteMode::Atomic);
    let report = run_batch(Path::new("."), &SelectParams::default(), &params)?;
    println!("changed={} unchanged={} errors={}", report.changed, report.unchanged, report.errors);
    Ok(())
}
```

Error handling
--------------
All public functions return `polyglot_eol::Result<T>`; per-file failures are
tagged so callers decide what to do with each.

```rust,no_run
use std::path::Path;
use polyglot_eol::{rewrite_file, Error};

fn main() {
    match rewrite_file(Path::new("missing.cmd"), "END_WIN") {
        Ok(_) => {}
        Err(Error::NotFound { path }) => eprintln!("no such file: {}", path.display()),
        Err(Error::ReadDenied { .. } | Error::WriteDenied { .. }) => eprintln!("permission denied"),
        Err(other) => eprintln!("{other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — line splitting, the rewrite pass, manifest parsing and file selection.
- [`io`] — access checks and output writers.
- [`types`] — shared enums (`LineEnding`, `Region`, `LineClass`, `WriteMode`).
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{RewriteParams, SelectParams};
pub use crate::core::rewrite::{RewriteOutput, RewriteStats};
pub use error::{Error, Result};
pub use types::{LineClass, LineEnding, Region, WriteMode};

// Pure pass
pub use crate::core::rewrite::rewrite_line_endings;

// High-level API re-exports
pub use api::{
    BatchReport, FileFailure, RewriteReport, rewrite_file, rewrite_file_with_params, run_batch,
    select_marked_files,
};
