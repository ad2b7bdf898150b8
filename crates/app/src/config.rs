//! Configuration for the huffcode command-line tool.
//!
//! Parses command-line arguments into a `Config`. The tool works with zero
//! arguments: it then runs the demo with a time-based seed, and prints the
//! seed so the run can be repeated.

use std::path::PathBuf;

/// Default sample size for the demo, in characters
pub const DEFAULT_SAMPLE_CHARS: usize = 64 * 1024;

/// What to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Count characters of a text file and save the resulting code table
    Build { input: PathBuf, table: PathBuf },

    /// Encode a text file with a saved table
    Encode {
        table: PathBuf,
        input: PathBuf,
        output: PathBuf,
    },

    /// Decode a packed file with a saved table
    Decode {
        table: PathBuf,
        input: PathBuf,
        output: PathBuf,
    },

    /// Generate sample text, then build, encode, decode and verify in memory
    Demo {
        seed: u64,
        size: usize,
        table: Option<PathBuf>,
    },
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    // === Behavior ===
    /// Log at debug level
    pub verbose: bool,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the statistics summary
    pub print_stats: bool,
}

/// Flags shared by every command, plus the per-command options.
#[derive(Default)]
struct Parsed {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    table: Option<PathBuf>,
    seed: Option<u64>,
    size: Option<usize>,
    verbose: bool,
    print_config: bool,
    quiet: bool,
    help: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// Returns `Ok(None)` when help was requested and printed.
    pub fn from_args(args: &[String]) -> Result<Option<Self>, String> {
        let (name, rest) = match args.split_first() {
            Some((first, rest)) if !first.starts_with('-') => (first.as_str(), rest),
            _ => ("demo", args),
        };

        let parsed = parse_flags(rest)?;
        if parsed.help {
            print_help();
            return Ok(None);
        }

        let command = match name {
            "build" => Command::Build {
                input: require(parsed.input.clone(), "build", "--in")?,
                table: require(parsed.table.clone(), "build", "--table")?,
            },
            "encode" => Command::Encode {
                table: require(parsed.table.clone(), "encode", "--table")?,
                input: require(parsed.input.clone(), "encode", "--in")?,
                output: require(parsed.output.clone(), "encode", "--out")?,
            },
            "decode" => Command::Decode {
                table: require(parsed.table.clone(), "decode", "--table")?,
                input: require(parsed.input.clone(), "decode", "--in")?,
                output: require(parsed.output.clone(), "decode", "--out")?,
            },
            "demo" => Command::Demo {
                seed: parsed.seed.unwrap_or_else(time_seed),
                size: parsed.size.unwrap_or(DEFAULT_SAMPLE_CHARS),
                table: parsed.table.clone(),
            },
            "help" => {
                print_help();
                return Ok(None);
            }
            other => return Err(format!("unknown command: {other}")),
        };

        Ok(Some(Config {
            command,
            verbose: parsed.verbose,
            print_config: parsed.print_config,
            print_stats: !parsed.quiet,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.command {
            Command::Build { input, table } => {
                println!("Command: build");
                println!("Input file:  {}", input.display());
                println!("Table file:  {}", table.display());
            }
            Command::Encode {
                table,
                input,
                output,
            }
            | Command::Decode {
                table,
                input,
                output,
            } => {
                let name = if matches!(self.command, Command::Encode { .. }) {
                    "encode"
                } else {
                    "decode"
                };
                println!("Command: {name}");
                println!("Table file:  {}", table.display());
                println!("Input file:  {}", input.display());
                println!("Output file: {}", output.display());
            }
            Command::Demo { seed, size, table } => {
                println!("Command: demo");
                println!("Seed: {seed}");
                println!("Sample size: {size} chars");
                match table {
                    Some(path) => println!("Table file:  {}", path.display()),
                    None => println!("Table file:  (not saved)"),
                }
            }
        }
        println!("Verbose: {}", self.verbose);
        println!();
    }
}

fn parse_flags(args: &[String]) -> Result<Parsed, String> {
    let mut parsed = Parsed::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--in" => {
                parsed.input = Some(PathBuf::from(value(args, &mut i, "--in requires a path")?));
            }
            "--out" => {
                parsed.output = Some(PathBuf::from(value(args, &mut i, "--out requires a path")?));
            }
            "--table" => {
                parsed.table = Some(PathBuf::from(value(args, &mut i, "--table requires a path")?));
            }
            "--seed" => {
                let raw = value(args, &mut i, "--seed requires a number")?;
                parsed.seed = Some(raw.parse().map_err(|_| "invalid seed")?);
            }
            "--size" => {
                let raw = value(args, &mut i, "--size requires a number")?;
                parsed.size = Some(raw.parse().map_err(|_| "invalid size")?);
            }
            "--verbose" | "-v" => parsed.verbose = true,
            "--print-config" => parsed.print_config = true,
            "--quiet" | "-q" => parsed.quiet = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Advance past a flag and return its value.
fn value<'a>(args: &'a [String], i: &mut usize, missing: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i).map(String::as_str).ok_or_else(|| missing.to_string())
}

fn require(path: Option<PathBuf>, command: &str, flag: &str) -> Result<PathBuf, String> {
    path.ok_or_else(|| format!("{command} requires {flag} <PATH>"))
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn print_help() {
    println!("huffcode: Huffman prefix-code compressor for text");
    println!();
    println!("USAGE:");
    println!("    huffcode [COMMAND] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    build    --in <TEXT> --table <PATH>              Build a code table from a text file");
    println!("    encode   --table <PATH> --in <TEXT> --out <PATH> Encode a text file");
    println!("    decode   --table <PATH> --in <PATH> --out <TEXT> Decode a packed file");
    println!("    demo     [--seed <N>] [--size <N>] [--table <PATH>]");
    println!("                                                     Round-trip generated text (default)");
    println!();
    println!("OPTIONS:");
    println!("    --seed <N>              Random seed for the demo sample (default: time-based)");
    println!("    --size <N>              Demo sample size in chars (default: {DEFAULT_SAMPLE_CHARS})");
    println!("    --verbose, -v           Debug logging on stderr");
    println!("    --print-config          Print resolved configuration");
    println!("    --quiet, -q             Don't print the statistics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffcode                                         # Demo with a random seed");
    println!("    huffcode demo --seed 42                          # Deterministic demo");
    println!("    huffcode build --in hamlet.txt --table hamlet.hfct");
    println!("    huffcode encode --table hamlet.hfct --in hamlet.txt --out hamlet.bin");
    println!("    huffcode decode --table hamlet.hfct --in hamlet.bin --out hamlet.out.txt");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_runs_demo() {
        let config = Config::from_args(&[]).unwrap().unwrap();
        assert!(matches!(
            config.command,
            Command::Demo {
                size: DEFAULT_SAMPLE_CHARS,
                table: None,
                ..
            }
        ));
        assert!(config.print_stats);
        assert!(!config.verbose);
    }

    #[test]
    fn test_flags_without_command_run_demo() {
        let config = Config::from_args(&args(&["--seed", "42", "-q"])).unwrap().unwrap();
        assert_eq!(
            config.command,
            Command::Demo {
                seed: 42,
                size: DEFAULT_SAMPLE_CHARS,
                table: None
            }
        );
        assert!(!config.print_stats);
    }

    #[test]
    fn test_encode_command() {
        let config = Config::from_args(&args(&[
            "encode", "--table", "t.hfct", "--in", "a.txt", "--out", "a.bin", "--verbose",
        ]))
        .unwrap()
        .unwrap();

        assert_eq!(
            config.command,
            Command::Encode {
                table: PathBuf::from("t.hfct"),
                input: PathBuf::from("a.txt"),
                output: PathBuf::from("a.bin"),
            }
        );
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_required_path() {
        let err = Config::from_args(&args(&["build", "--in", "a.txt"])).unwrap_err();
        assert_eq!(err, "build requires --table <PATH>");
    }

    #[test]
    fn test_missing_flag_value() {
        let err = Config::from_args(&args(&["demo", "--seed"])).unwrap_err();
        assert_eq!(err, "--seed requires a number");
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_args(&args(&["demo", "--size", "lots"])).unwrap_err();
        assert_eq!(err, "invalid size");
    }

    #[test]
    fn test_unknown_command_and_flag() {
        assert!(Config::from_args(&args(&["compress"])).is_err());
        assert!(Config::from_args(&args(&["demo", "--fast"])).is_err());
    }

    #[test]
    fn test_help() {
        assert!(Config::from_args(&args(&["--help"])).unwrap().is_none());
        assert!(Config::from_args(&args(&["help"])).unwrap().is_none());
    }
}
