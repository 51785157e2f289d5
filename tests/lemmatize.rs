use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use lemmer::error::Error;
use lemmer::filtering::{RowFilter, TokenFilter};
use lemmer::io::{ChunkReader, Record};
use lemmer::normalizers::{Normalizer, WordBounds};
use lemmer::pipelines::{Lemmatization, LemmatizeConfig, Pipeline, State};

const SENTINEL: &str = "ix3uzumgm9jtf6pq";

/// WhatsApp-like export: chat name, date, type, phone, author, text.
fn chats() -> Vec<Vec<&'static str>> {
    vec![
        vec!["Семья", "01/01/2021 10:00", "chat", "+7900", "Мама", "Мама мыла раму."],
        vec!["Семья", "01/01/2021 10:01", "image", "+7901", "Папа", "<media>"],
        vec!["Семья", "01/01/2021 10:02", "chat", "+7901", "Папа", "И я, и он!"],
        vec!["Семья", "01/01/2021 10:03", "chat", "+7902", "Сын", "Кот спит"],
        vec!["Работа", "02/01/2021 09:00", "chat", "+7903", "Шеф", "Отчет, пожалуйста"],
        vec!["Работа", "02/01/2021 09:05", "call", "+7904", "Шеф", ""],
        vec!["Работа", "02/01/2021 09:06", "chat", "+7904", "Коллега", "Да"],
    ]
}

fn write_source(dir: &Path, rows: &[Vec<&str>]) -> PathBuf {
    let src = dir.join("chats.csv");
    let mut wtr = csv::Writer::from_path(&src).unwrap();
    for row in rows {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();
    src
}

fn read_output(path: &Path) -> Vec<Record> {
    ChunkReader::from_path(path, 0, 1000)
        .unwrap()
        .flat_map(|chunk| chunk.unwrap().into_records())
        .collect()
}

fn config(src: &Path, dst: &Path, chunk_size: usize) -> LemmatizeConfig {
    LemmatizeConfig {
        dst: dst.to_path_buf(),
        chunk_size,
        ..LemmatizeConfig::new(src)
    }
}

/// Lowercases, and drops a few words.
fn fake_normalizer(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.to_lowercase())
        .filter(|t| !["и", "я", "он", "да"].contains(&t.as_str()))
        .collect()
}

#[test_log::test]
fn end_to_end_with_word_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), &chats());
    let dst = dir.path().join("output");

    let normalizer = Normalizer::new(WordBounds, TokenFilter::default());
    let p = Lemmatization::new(config(&src, &dst, 3), normalizer);
    let report = p.run().unwrap();

    assert_eq!(p.state(), State::Done);
    assert_eq!(report.source_rows, 7);
    assert_eq!(report.nb_chunks, 3);
    assert_eq!(report.subject_rows, 5);
    assert_eq!(report.output_rows, 7);
    assert_eq!(report.delta, 0);

    let out = read_output(&dst.join("chats_lemm.csv"));
    let trailing: Vec<Option<&str>> = out.iter().map(|r| r.field(6)).collect();
    assert_eq!(
        trailing,
        vec![
            Some("мама мыла раму"),
            None,
            Some(""),
            Some("кот спит"),
            Some("отчет пожалуйста"),
            None,
            Some(""),
        ]
    );

    // original fields are kept as is
    for (original, augmented) in chats().iter().zip(out.iter()) {
        let kept: Vec<&str> = augmented.iter().take(original.len()).collect();
        assert_eq!(&kept, original);
    }
}

#[test_log::test]
fn all_rows_are_quoted() {
    let dir = tempfile::tempdir().unwrap();
    let rows = vec![vec!["a", "b", "chat", "d", "e", "Да и нет"]];
    let src = write_source(dir.path(), &rows);
    let dst = dir.path().join("output");

    Lemmatization::new(config(&src, &dst, 10), fake_normalizer)
        .run()
        .unwrap();

    let out = fs::read_to_string(dst.join("chats_lemm.csv")).unwrap();
    assert_eq!(
        out,
        "\"a\",\"b\",\"chat\",\"d\",\"e\",\"Да и нет\",\"нет\"\r\n"
    );
}

#[test_log::test]
fn every_row_with_predicate() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), &chats());
    let dst = dir.path().join("output");

    let mut c = config(&src, &dst, 4);
    c.row_filter = RowFilter::predicate(|r: &Record| r.field(0) == Some("Работа"));
    let report = Lemmatization::new(c, fake_normalizer).run().unwrap();
    assert_eq!(report.subject_rows, 3);

    let out = read_output(&dst.join("chats_lemm.csv"));
    let lens: Vec<usize> = out.iter().map(|r| r.len()).collect();
    assert_eq!(lens, vec![6, 6, 6, 6, 7, 7, 7]);
    assert_eq!(out[4].field(6), Some("отчет, пожалуйста"));
    assert_eq!(out[5].field(6), Some(""));
    assert_eq!(out[6].field(6), Some(""));
}

#[test_log::test]
fn offset_skips_rows() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), &chats());
    let dst = dir.path().join("output");

    let mut c = config(&src, &dst, 2);
    c.offset = 4;
    let report = Lemmatization::new(c, fake_normalizer).run().unwrap();
    assert_eq!(report.nb_chunks, 2);
    assert_eq!(report.output_rows, 3);
    assert_eq!(report.delta, 0);

    let out = read_output(&dst.join("chats_lemm.csv"));
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].field(5), Some("Отчет, пожалуйста"));
}

#[test_log::test]
fn alignment_failure_then_resume() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), &chats());
    let dst = dir.path().join("output");
    let out_path = dst.join("chats_lemm.csv");

    // merges rows as soon as it sees the cat
    let merging = |text: &str| -> Vec<String> {
        let tokens = fake_normalizer(text);
        if tokens.iter().any(|t| t == "кот") {
            tokens.into_iter().filter(|t| t != SENTINEL).collect()
        } else {
            tokens
        }
    };

    let p = Lemmatization::new(config(&src, &dst, 2), merging);
    let err = p.run().unwrap_err();
    assert_eq!(p.state(), State::Failed);
    assert_eq!(err.exit_code(), 2);
    match &err {
        Error::Alignment(e) => {
            assert_eq!(e.expected, 2);
            assert_eq!(e.produced, 1);
            assert_eq!(e.first_original.as_deref(), Some("И я, и он!"));
            assert_eq!(e.last_original.as_deref(), Some("Кот спит"));
        }
        other => panic!("unexpected error {:?}", other),
    }

    // first chunk was written, the failing one was not
    assert_eq!(read_output(&out_path).len(), 2);

    // resume from the failing chunk with a well behaved normalizer
    let mut c = config(&src, &dst, 2);
    c.offset = 2;
    let report = Lemmatization::new(c, fake_normalizer).run().unwrap();
    assert_eq!(report.output_rows, 7);
    // earlier rows are in the output too
    assert_eq!(report.delta, 2);

    let out = read_output(&out_path);
    assert_eq!(out.len(), 7);
    assert_eq!(out[0].field(6), Some("мама мыла раму."));
    assert_eq!(out[2].field(6), Some("я, он!"));
    assert_eq!(out[3].field(6), Some("кот спит"));
}

#[test_log::test]
fn chunks_bound_normalizer_input() {
    let dir = tempfile::tempdir().unwrap();
    let rows: Vec<Vec<String>> = (0..95)
        .map(|i| {
            vec![
                "c".to_string(),
                "d".to_string(),
                "chat".to_string(),
                "p".to_string(),
                "a".to_string(),
                format!("message {}", i),
            ]
        })
        .collect();
    let src = dir.path().join("many.csv");
    let mut wtr = csv::Writer::from_path(&src).unwrap();
    for row in &rows {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();

    let calls = Cell::new(0);
    let max_rows = Cell::new(0);
    let counting = |text: &str| -> Vec<String> {
        let tokens = fake_normalizer(text);
        let nb_rows = tokens.iter().filter(|t| *t == SENTINEL).count() + 1;
        calls.set(calls.get() + 1);
        max_rows.set(max_rows.get().max(nb_rows));
        tokens
    };

    let dst = dir.path().join("output");
    let report = Lemmatization::new(config(&src, &dst, 10), counting)
        .run()
        .unwrap();

    assert_eq!(report.nb_chunks, 10);
    assert_eq!(calls.get(), 10);
    assert_eq!(max_rows.get(), 10);
    assert_eq!(report.output_rows, 95);

    let out = read_output(&dst.join("many_lemm.csv"));
    assert_eq!(out[94].field(6), Some("message 94"));
}

#[test]
fn bad_input_path() {
    let dir = tempfile::tempdir().unwrap();
    let c = config(&dir.path().join("chats.txt"), dir.path(), 10);
    let err = Lemmatization::new(c, fake_normalizer).run().unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert_eq!(err.exit_code(), 1);

    let c = config(&dir.path().join("missing.csv"), dir.path(), 10);
    let err = Lemmatization::new(c, fake_normalizer).run().unwrap_err();
    assert!(matches!(err, Error::Csv(_) | Error::Io(_)));
}
