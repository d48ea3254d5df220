//! Command-line interface definition for combo-editor
//!
//! Provides argument parsing and validation for the combo list tools.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::presets::DEFAULT_PRESETS_FILE;

/// Split, merge and deduplicate email:password combo lists
#[derive(Parser, Debug, Clone)]
#[command(
    name = "combo-editor",
    version,
    about = "Split, merge and deduplicate email:password combo lists",
    long_about = r#"
╔═══════════════════════════════════════╗
║          COMBO EDITOR v1.0.0          ║
╚═══════════════════════════════════════╝

Line-based editing of combo lists. Lines are kept byte-for-byte, including
blank lines and line endings.

Output names get a .txt extension if they lack one. A bare output name is
placed next to the (first) input file.

EXAMPLES:
    # Move the first 1000 lines of combo.txt into part1.txt
    combo-editor extract combo.txt -n 1000 -o part1

    # Extract using a saved preset
    combo-editor preset add 10k 10000
    combo-editor extract combo.txt --preset 10k -o part1

    # Merge several lists in order
    combo-editor merge a.txt b.txt c.txt -o merged

    # Remove repeated email:password pairs (email compared case-insensitively)
    combo-editor dedup merged.txt -o clean
"#
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Presets file
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_PRESETS_FILE)]
    pub presets: PathBuf,

    /// Print the result record as JSON instead of a summary
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Move the first N lines of a file into a new file
    Extract {
        /// Source file; rewritten with the remaining lines
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Number of lines to extract
        #[arg(short = 'n', long, value_name = "COUNT", conflicts_with = "preset")]
        lines: Option<usize>,

        /// Use a saved preset for the line count
        #[arg(short, long, value_name = "NAME")]
        preset: Option<String>,

        /// Output file name
        #[arg(short, long, value_name = "NAME")]
        output: String,
    },

    /// Concatenate files in the given order
    Merge {
        /// Files to merge (at least 2)
        #[arg(value_name = "INPUT", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output file name
        #[arg(short, long, value_name = "NAME")]
        output: String,
    },

    /// Remove duplicate email:password lines
    Dedup {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file name (only written if duplicates are found)
        #[arg(short, long, value_name = "NAME")]
        output: String,
    },

    /// Manage extraction presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PresetAction {
    /// List saved presets
    List,

    /// Add or replace a preset
    Add {
        name: String,
        #[arg(value_name = "COUNT")]
        lines: usize,
    },

    /// Delete a preset
    Remove { name: String },
}

impl Args {
    /// Default log filter for the selected verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet || self.json {
            "warn"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("combo-editor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_extract() {
        let args = parse(&["extract", "combo.txt", "-n", "1000", "-o", "part1"]);

        match args.command {
            Command::Extract {
                input,
                lines,
                preset,
                output,
            } => {
                assert_eq!(input, PathBuf::from("combo.txt"));
                assert_eq!(lines, Some(1000));
                assert_eq!(preset, None);
                assert_eq!(output, "part1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(args.presets, PathBuf::from(DEFAULT_PRESETS_FILE));
    }

    #[test]
    fn test_extract_count_conflicts_with_preset() {
        let result = Args::try_parse_from([
            "combo-editor", "extract", "combo.txt", "-n", "5", "--preset", "small", "-o", "x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_merge_keeps_order() {
        let args = parse(&["merge", "b.txt", "a.txt", "c.txt", "-o", "all", "--json"]);

        assert!(args.json);
        match args.command {
            Command::Merge { inputs, output } => {
                assert_eq!(
                    inputs,
                    vec![
                        PathBuf::from("b.txt"),
                        PathBuf::from("a.txt"),
                        PathBuf::from("c.txt")
                    ]
                );
                assert_eq!(output, "all");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_preset_add() {
        let args = parse(&["--presets", "my.json", "preset", "add", "10k", "10000"]);

        assert_eq!(args.presets, PathBuf::from("my.json"));
        assert!(matches!(
            args.command,
            Command::Preset {
                action: PresetAction::Add { ref name, lines: 10000 }
            } if name == "10k"
        ));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&["-v", "dedup", "x.txt", "-o", "y"]).log_level(), "debug");
        assert_eq!(parse(&["-q", "dedup", "x.txt", "-o", "y"]).log_level(), "warn");
        assert_eq!(parse(&["dedup", "x.txt", "-o", "y"]).log_level(), "info");
    }
}
