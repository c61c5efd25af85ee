use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use motd_core::config::{parse_codepoint, parse_delimiter};
use motd_core::{CachePaths, MotdConfig, TextEncoding, DEFAULT_DELIMITER};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "motd")]
#[command(about = "Randomly pick motto of the day from an indexed plain text file")]
#[command(after_help = "Missing or outdated index files are automatically (re)generated.")]
#[command(version)]
pub struct Args {
    /// Record delimiter used in the text file, as a single character [default: '÷']
    #[arg(
        short = 'd',
        value_name = "C",
        value_parser = parse_delimiter,
        conflicts_with = "codepoint"
    )]
    pub delimiter: Option<char>,

    /// Same as -d, but given as a code point number (decimal, 0x hex or 0 octal)
    #[arg(short = 'D', value_name = "N", value_parser = parse_codepoint)]
    pub codepoint: Option<char>,

    /// Motto text file [default: $HOME/.local/share/motd/motd.txt,
    /// falling back to /usr/share/motd/motd.txt]
    #[arg(short = 't', long = "text", value_name = "PATH")]
    pub text: Option<PathBuf>,

    /// Motto index file [default: $HOME/.cache/motd/motd.idx]
    #[arg(short = 'i', long = "index", value_name = "PATH")]
    pub index: Option<PathBuf>,

    /// PRNG state cache file [default: $HOME/.cache/motd/motd.rng]
    #[arg(short = 's', long = "state", value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Character encoding of the text file
    #[arg(short = 'e', long, value_enum, default_value_t = EncodingArg::Utf8)]
    pub encoding: EncodingArg,

    /// Force the index file to be rebuilt
    #[arg(short = 'r', long = "rebuild")]
    pub rebuild: bool,

    /// Remove index and PRNG cache dir and exit
    #[arg(short = 'c', long = "clear-cache")]
    pub clear_cache: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Text encodings selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingArg {
    #[value(name = "utf-8", alias = "utf8")]
    Utf8,
    #[value(name = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl From<EncodingArg> for TextEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Utf8 => TextEncoding::Utf8,
            EncodingArg::Latin1 => TextEncoding::Latin1,
        }
    }
}

impl Args {
    /// Fill in everything not given on the command line from `paths`.
    pub fn to_config(&self, paths: &CachePaths) -> MotdConfig {
        MotdConfig {
            text_path: self.text.clone().unwrap_or_else(|| paths.text_path()),
            index_path: self.index.clone().unwrap_or_else(|| paths.index_path.clone()),
            state_path: self.state.clone().unwrap_or_else(|| paths.state_path.clone()),
            delimiter: self.delimiter.or(self.codepoint).unwrap_or(DEFAULT_DELIMITER),
            encoding: self.encoding.into(),
            force_rebuild: self.rebuild,
        }
    }
}
