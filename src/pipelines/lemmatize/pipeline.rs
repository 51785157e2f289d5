//! Chunked lemmatization pipeline
//!
//! Augments a tabular file with the normalized text of a designated column,
//! without loading the whole file in memory and without ever misaligning rows.
//!
//! # Processing
//! 1. Source rows are counted once, giving the number of chunks to process.
//! 1. For each chunk, subject rows are selected by the row filter.
//! 1. Subject fields are joined with a sentinel, normalized in one call, then split back
//!    into one segment per subject row (see [crate::processing::AlignmentSplitter]).
//! 1. Each segment is appended to its row, and the chunk is appended to `<dst>/<name>_lemm.csv`.
//! 1. Once everything is written, output rows are counted and compared with the source.
//!
//! Any error aborts the run. A segment count mismatch is never recovered from, since reattaching
//! segments to the wrong rows would silently corrupt the output.
use std::cell::Cell;
use std::fs::File;

use log::{debug, error, info, warn};

use crate::error::Error;
use crate::io::reader::{count_rows, derived_path, Chunk, Record};
use crate::io::{ChunkReader, ChunkWriter, WriterTrait};
use crate::normalizers::Normalize;
use crate::pipelines::pipeline::Pipeline;
use crate::processing::{attach, AlignmentSplitter, BatchJoiner, SubjectRows};

use super::types::{LemmatizeConfig, RunReport, State, Verification};

/// Lemmatization driver, generic over the normalization step.
pub struct Lemmatization<N: Normalize> {
    config: LemmatizeConfig,
    normalizer: N,
    state: Cell<State>,
}

impl<N: Normalize> Lemmatization<N> {
    pub fn new(config: LemmatizeConfig, normalizer: N) -> Self {
        Self {
            config,
            normalizer,
            state: Cell::new(State::Idle),
        }
    }

    pub fn config(&self) -> &LemmatizeConfig {
        &self.config
    }

    /// Current (or last) state of the run.
    pub fn state(&self) -> State {
        self.state.get()
    }

    fn set_state(&self, state: State) {
        debug!("{} -> {}", self.state.get(), state);
        self.state.set(state);
    }

    /// Number of chunks needed to cover `rows - offset` rows.
    fn nb_chunks(&self, rows: u64) -> u64 {
        let remaining = rows.saturating_sub(self.config.offset);
        let size = self.config.chunk_size as u64;
        remaining / size + u64::from(remaining % size != 0)
    }

    /// Join, normalize, split and reattach a single chunk.
    ///
    /// Returns the augmented rows and the number of subject rows.
    fn process_chunk(
        &self,
        idx: usize,
        chunk: Chunk,
        joiner: &BatchJoiner,
        splitter: &AlignmentSplitter,
    ) -> Result<(Vec<Record>, usize), Error> {
        let subjects = SubjectRows::select(&chunk, &self.config.row_filter);
        if subjects.is_empty() {
            info!(
                "chunk {}: {} rows, no subject rows, writing through",
                idx,
                chunk.len()
            );
            return Ok((chunk.into_records(), 0));
        }

        let joined = joiner.join(&chunk, &subjects)?;
        let joined_len = joined.len();
        let tokens = self.normalizer.normalize(&joined)?;
        drop(joined);

        let segments = match splitter.split(&tokens, subjects.len()) {
            Ok(segments) => segments,
            Err(e) => {
                let originals = joiner.subject_texts(&chunk, &subjects)?;
                let e = e.with_originals(&originals);
                error!("chunk {} (rows {:?}): {}", idx, chunk.span(), e);
                error!("first original row: {:?}", e.first_original);
                error!("last original row: {:?}", e.last_original);
                error!("first produced segment: {:?}", e.first_produced);
                error!("last produced segment: {:?}", e.last_produced);
                return Err(e.into());
            }
        };

        info!(
            "chunk {}: {} rows, {} subject rows, {} bytes joined, {} segments",
            idx,
            chunk.len(),
            subjects.len(),
            joined_len,
            segments.len()
        );

        let nb_subjects = subjects.len();
        let records = attach(chunk, &subjects, segments)?;
        Ok((records, nb_subjects))
    }

    fn drive(&self) -> Result<RunReport, Error> {
        let (stem, sentinel) = self.config.validate()?;
        let src = &self.config.src;
        let dst = &self.config.dst;

        self.set_state(State::Counting);
        let source_rows = count_rows(src)?;
        let nb_chunks = self.nb_chunks(source_rows);
        info!(
            "{:?}: {} rows, {} chunks of {} rows starting at row {}",
            src, source_rows, nb_chunks, self.config.chunk_size, self.config.offset
        );
        if self.config.offset > source_rows {
            warn!(
                "offset {} is past the end of the source ({} rows)",
                self.config.offset, source_rows
            );
        }

        if !dst.exists() {
            warn!("Destination folder does not exist. Creating {:?}", dst);
            std::fs::create_dir_all(dst)?;
        }
        if !dst.is_dir() {
            return Err(Error::Configuration(format!(
                "destination has to be a directory: {:?}",
                dst
            )));
        }

        let out_path = derived_path(dst, &stem, "_lemm");
        let mut writer = ChunkWriter::new(&out_path)?;
        let joiner = BatchJoiner::new(sentinel.clone(), self.config.text_column);
        let splitter = AlignmentSplitter::new(sentinel);

        let reader = ChunkReader::from_path(src, self.config.offset, self.config.chunk_size)?;
        let mut subject_rows = 0;
        for (idx, chunk) in reader.enumerate() {
            self.set_state(State::Processing(idx));
            let (records, nb_subjects) = self.process_chunk(idx, chunk?, &joiner, &splitter)?;
            writer.append(&records)?;
            subject_rows += nb_subjects as u64;
            debug!("{} rows written to {:?}", writer.nb_written(), writer.path());
        }
        writer.flush()?;

        self.set_state(State::Verifying);
        let processed_rows = source_rows.saturating_sub(self.config.offset);
        let output_rows = if out_path.exists() {
            count_rows(&out_path)?
        } else {
            0
        };
        let verification = Verification::new(processed_rows, output_rows);
        info!(
            "original rows: {}, output rows: {}, delta: {}",
            verification.expected(),
            verification.produced(),
            verification.delta()
        );
        if !verification.is_ok() {
            warn!(
                "{:?} has {} rows where {} were expected",
                out_path,
                verification.produced(),
                verification.expected()
            );
        }

        let report = RunReport {
            src: src.clone(),
            dst: out_path,
            offset: self.config.offset,
            chunk_size: self.config.chunk_size,
            nb_chunks,
            source_rows,
            subject_rows,
            filtered_rows: 0,
            output_rows,
            delta: verification.delta(),
        };

        if let Some(report_path) = &self.config.report {
            info!("writing run report to {:?}", report_path);
            let f = File::create(report_path)?;
            serde_json::to_writer_pretty(f, &report)?;
        }

        Ok(report)
    }
}

impl<N: Normalize> Pipeline<RunReport> for Lemmatization<N> {
    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn run(&self) -> Result<RunReport, Error> {
        match self.drive() {
            Ok(report) => {
                self.set_state(State::Done);
                Ok(report)
            }
            Err(e) => {
                error!("lemmatization failed while {}: {}", self.state(), e);
                self.set_state(State::Failed);
                Err(e)
            }
        }
    }
}
