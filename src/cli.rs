//! Command line arguments and parameters management/parsing.
use std::{path::PathBuf, str::FromStr};

use structopt::StructOpt;

use lemmer::filtering::RowFilter;

#[derive(Debug, StructOpt)]
#[structopt(name = "lemmer", about = "chunked lemmatization of tabular text corpora.")]
/// Holds every command that is callable by the `lemmer` command.
pub enum Lemmer {
    #[structopt(about = "Lemmatize the text column of a csv file")]
    Lemmatize(Lemmatize),
    #[structopt(about = "Build a lemma frequency table from a lemmatized file")]
    Freq(Freq),
}

/// Normalizers available from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizerChoice {
    Mystem,
    Words,
}

impl FromStr for NormalizerChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mystem" => Ok(Self::Mystem),
            "words" => Ok(Self::Words),
            other => Err(format!("unknown normalizer {:?}", other)),
        }
    }
}

/// Row selection options, shared by subcommands.
#[derive(Debug, StructOpt)]
pub struct Rows {
    #[structopt(
        long = "type-column",
        help = "index of the row type column",
        default_value = "2"
    )]
    pub type_column: usize,
    #[structopt(
        long = "row-type",
        help = "row type whose text is lemmatized",
        default_value = "chat"
    )]
    pub row_type: String,
    #[structopt(long = "all-rows", help = "lemmatize every row, regardless of its type")]
    pub all_rows: bool,
}

impl Rows {
    pub fn row_filter(&self) -> RowFilter {
        if self.all_rows {
            RowFilter::All
        } else {
            RowFilter::kind(self.type_column, &self.row_type)
        }
    }
}

#[derive(Debug, StructOpt)]
/// Lemmatization command and parameters.
///
/// ```sh
/// USAGE:
///     lemmer lemmatize [FLAGS] [OPTIONS] <src>
/// ```
pub struct Lemmatize {
    #[structopt(parse(from_os_str), help = "source csv file")]
    pub src: PathBuf,
    #[structopt(
        short = "s",
        long = "chunk-size",
        help = "number of rows processed at once",
        default_value = "20000"
    )]
    pub chunk_size: usize,
    #[structopt(
        short = "o",
        long = "offset",
        help = "number of source rows to skip",
        default_value = "0"
    )]
    pub offset: u64,
    #[structopt(
        long = "text-column",
        help = "index of the text column",
        default_value = "5"
    )]
    pub text_column: usize,
    #[structopt(flatten)]
    pub rows: Rows,
    #[structopt(
        parse(from_os_str),
        short = "d",
        long = "dst",
        help = "destination folder",
        default_value = "output"
    )]
    pub dst: PathBuf,
    #[structopt(
        long = "sentinel",
        help = "row separator token",
        default_value = " ix3uzumgm9jtf6pq "
    )]
    pub sentinel: String,
    #[structopt(
        parse(from_os_str),
        long = "stopwords",
        help = "stopword list (one word per line). Default is a built-in russian list."
    )]
    pub stopwords: Option<PathBuf>,
    #[structopt(
        long = "normalizer",
        help = "normalizer to use",
        possible_values = &["mystem", "words"],
        default_value = "mystem"
    )]
    pub normalizer: NormalizerChoice,
    #[structopt(
        parse(from_os_str),
        long = "mystem-path",
        help = "path to the mystem executable",
        default_value = "mystem"
    )]
    pub mystem_path: PathBuf,
    #[structopt(parse(from_os_str), long = "report", help = "write a JSON run report")]
    pub report: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
/// Frequency command and parameters.
pub struct Freq {
    #[structopt(parse(from_os_str), help = "lemmatized csv file")]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        short = "d",
        long = "dst",
        help = "destination folder",
        default_value = "output"
    )]
    pub dst: PathBuf,
    #[structopt(
        short = "s",
        long = "chunk-size",
        help = "number of rows read at once",
        default_value = "20000"
    )]
    pub chunk_size: usize,
    #[structopt(flatten)]
    pub rows: Rows,
}
