use log::{error, info};
use ned::{
    error::{Errors, RootError},
    Error, ParseOptions, Parsed, SourceMap,
};
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};
use structopt::StructOpt;

mod logger;

use logger::StandardLogger;

/// Parser and formatter for NED network descriptions.
#[derive(Debug, StructOpt)]
#[structopt(name = "ned")]
struct Opt {
    /// Raises the log level, may be given more than once.
    #[structopt(short, long, parse(from_occurrences), global = true)]
    verbose: u8,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Parses and validates files, reporting all diagnostics.
    Check {
        /// Keeps parsing after errors.
        #[structopt(long)]
        tolerant: bool,

        /// Gives up after this many errors in tolerant mode.
        #[structopt(long, default_value = "64")]
        max_errors: usize,

        #[structopt(parse(from_os_str), required = true)]
        files: Vec<PathBuf>,
    },
    /// Prints files in canonical layout.
    Fmt {
        /// Rewrites the files in place instead of printing them.
        #[structopt(short, long)]
        write: bool,

        #[structopt(parse(from_os_str), required = true)]
        files: Vec<PathBuf>,
    },
    /// Prints the syntax tree of files as JSON.
    Json {
        #[structopt(long)]
        tolerant: bool,

        #[structopt(parse(from_os_str), required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let opt = Opt::from_args();
    if let Err(e) = StandardLogger::setup(opt.verbose) {
        eprintln!("failed to install logger: {}", e);
    }

    let ok = match opt.cmd {
        Command::Check {
            tolerant,
            max_errors,
            files,
        } => {
            let opts = ParseOptions {
                max_errors,
                ..options(tolerant)
            };
            files.iter().fold(true, |ok, path| check(path, &opts) && ok)
        }
        Command::Fmt { write, files } => files.iter().fold(true, |ok, path| fmt(path, write) && ok),
        Command::Json { tolerant, files } => {
            let opts = options(tolerant);
            files.iter().fold(true, |ok, path| json(path, &opts) && ok)
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn options(tolerant: bool) -> ParseOptions {
    if tolerant {
        ParseOptions::tolerant()
    } else {
        ParseOptions::default()
    }
}

///
/// Loads and parses a single file. Diagnostics are rendered to stderr,
/// the tree is returned unless the parse failed outright.
///
fn load(path: &Path, opts: &ParseOptions) -> Option<Parsed> {
    let mut smap = SourceMap::new();
    let result = match smap.load_file(path.to_path_buf()) {
        Ok(asset) => ned::parse(asset, opts),
        Err(e) => Err(Error::from_io(e, &path.to_string_lossy())),
    };

    match result {
        Ok(mut parsed) => {
            let diagnostics = std::mem::take(&mut parsed.diagnostics);
            let errors = diagnostics.iter().filter(|e| !e.is_warning()).count();
            info!(
                "{}: {} errors, {} warnings",
                path.display(),
                errors,
                diagnostics.len() - errors
            );
            if !diagnostics.is_empty() {
                eprint!("{}", RootError::new(Errors::from(diagnostics.clone()), smap));
            }
            parsed.diagnostics = diagnostics;
            Some(parsed)
        }
        Err(e) => {
            eprint!("{}", RootError::single(e, smap));
            None
        }
    }
}

fn check(path: &Path, opts: &ParseOptions) -> bool {
    match load(path, opts) {
        Some(parsed) => !parsed.has_errors(),
        None => false,
    }
}

fn fmt(path: &Path, write: bool) -> bool {
    let parsed = match load(path, &ParseOptions::default()) {
        Some(parsed) => parsed,
        None => return false,
    };

    let text = parsed.file.to_string();
    if write {
        if let Err(e) = fs::write(path, text) {
            error!("failed to write '{}': {}", path.display(), e);
            return false;
        }
    } else {
        print!("{}", text);
    }
    true
}

fn json(path: &Path, opts: &ParseOptions) -> bool {
    let parsed = match load(path, opts) {
        Some(parsed) => parsed,
        None => return false,
    };

    match serde_json::to_string_pretty(&parsed.file) {
        Ok(text) => {
            println!("{}", text);
            !parsed.has_errors()
        }
        Err(e) => {
            error!("failed to serialize '{}': {}", path.display(), e);
            false
        }
    }
}
