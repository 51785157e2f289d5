//! # Lemmer
//!
//! Chunked, alignment-preserving lemmatization of text corpora stored as csv files.
//!
//! ## Getting started
//!
//! ```sh
//! lemmer 0.1.0
//! chunked lemmatization of tabular text corpora.
//!
//! USAGE:
//!     lemmer <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     freq         Build a lemma frequency table from a lemmatized file
//!     help         Prints this message or the help of the given subcommand(s)
//!     lemmatize    Lemmatize the text column of a csv file
//! ```
//!
//! Set `RUST_LOG` to change verbosity (default is `info`).
use structopt::StructOpt;

use lemmer::error::Error;
use lemmer::filtering::{Stopwords, TokenFilter};
use lemmer::normalizers::{MystemBuilder, Normalizer, NormalizerKind, WordBounds};
use lemmer::pipelines::{Lemmatization, LemmatizeConfig, Pipeline};
use lemmer::processing::freq;

#[macro_use]
extern crate log;

mod cli;

fn normalizer(l: &cli::Lemmatize) -> Result<NormalizerKind, Error> {
    let stopwords = match &l.stopwords {
        Some(path) => Stopwords::from_path(path)?,
        None => Stopwords::default(),
    };
    let filter = TokenFilter::new(stopwords);

    Ok(match l.normalizer {
        cli::NormalizerChoice::Mystem => {
            let mystem = MystemBuilder::default().path(&l.mystem_path).build()?;
            NormalizerKind::Mystem(Normalizer::new(mystem, filter))
        }
        cli::NormalizerChoice::Words => NormalizerKind::Words(Normalizer::new(WordBounds, filter)),
    })
}

fn run(opt: cli::Lemmer) -> Result<(), Error> {
    match opt {
        cli::Lemmer::Lemmatize(l) => {
            let config = LemmatizeConfig {
                src: l.src.clone(),
                dst: l.dst.clone(),
                offset: l.offset,
                chunk_size: l.chunk_size,
                text_column: l.text_column,
                row_filter: l.rows.row_filter(),
                sentinel: l.sentinel.clone(),
                report: l.report.clone(),
            };
            // fail on bad parameters before spawning anything
            config.validate()?;

            let p = Lemmatization::new(config, normalizer(&l)?);
            let report = p.run()?;
            info!(
                "done: {} rows written to {:?}",
                report.output_rows, report.dst
            );
        }
        cli::Lemmer::Freq(f) => {
            freq::freq(&f.src, &f.dst, &f.rows.row_filter(), f.chunk_size)?;
        }
    };
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = cli::Lemmer::from_args();
    debug!("cli args\n{:#?}", opt);

    if let Err(e) = run(opt) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}
