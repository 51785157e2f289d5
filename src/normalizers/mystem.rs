/*! Mystem lemmatizer

Runs the external [mystem](https://yandex.ru/dev/mystem/) executable as a blocking child process.
The text is written on stdin, and the output is parsed back into tokens.

With the default arguments (`-c -l -d -e utf-8`) mystem copies the whole input, replacing each word
by its disambiguated lemma in braces:

```text
input : Мама мыла раму.
output: {мама} {мыть} {рама}.
```

Words become tokens (the first alternative is kept when mystem lists several, and `?` unknown-word
markers are removed). Everything outside braces is segmented on Unicode word boundaries.
!*/
use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread,
};

use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Error;

use super::Lemmatize;

#[derive(Debug, Clone)]
pub struct Mystem {
    path: PathBuf,
    args: Vec<String>,
}

impl Mystem {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Parse mystem output into tokens.
pub fn parse_output(output: &str) -> Vec<String> {
    fn push_plain(tokens: &mut Vec<String>, plain: &str) {
        tokens.extend(plain.split_word_bounds().map(String::from));
    }

    let mut tokens = Vec::new();
    let mut rest = output;

    while let Some(open) = rest.find('{') {
        push_plain(&mut tokens, &rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let group = &after[..close];
                let lemma = group.split('|').next().unwrap_or("").trim_end_matches('?');
                if !lemma.is_empty() {
                    tokens.push(lemma.to_string());
                }
                rest = &after[close + 1..];
            }
            None => {
                // unbalanced brace: keep as plain text
                push_plain(&mut tokens, &rest[open..]);
                rest = "";
            }
        }
    }
    push_plain(&mut tokens, rest);

    tokens
}

impl Lemmatize for Mystem {
    fn lemmatize(&self, text: &str) -> Result<Vec<String>, Error> {
        debug!("running {:?} on {} bytes", self.path, text.len());

        let mut child = Command::new(&self.path)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Normalizer(format!("could not spawn {:?}: {}", self.path, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Normalizer("could not open mystem stdin".to_string()))?;

        // feed stdin from another thread so that a full stdout pipe can't block us
        let (output, written) = thread::scope(|s| {
            let writer = s.spawn(move || {
                stdin.write_all(text.as_bytes())?;
                stdin.write_all(b"\n")
            });
            let output = child.wait_with_output();
            (output, writer.join())
        });

        let output = output?;
        if !output.status.success() {
            return Err(Error::Normalizer(format!(
                "{:?} exited with {}: {}",
                self.path,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        match written {
            Ok(Ok(())) => (),
            Ok(Err(e)) => return Err(Error::Io(e)),
            Err(_) => {
                return Err(Error::Normalizer(
                    "stdin writer thread panicked".to_string(),
                ))
            }
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::Normalizer(format!("non UTF-8 output: {}", e)))?;

        Ok(parse_output(&stdout))
    }
}

/// Builds a [Mystem], defaulting to the `mystem` found in `PATH`.
pub struct MystemBuilder {
    path: Option<PathBuf>,
    args: Option<Vec<String>>,
}

impl MystemBuilder {
    pub fn path(&mut self, path: &Path) -> &mut MystemBuilder {
        self.path = Some(path.to_path_buf());
        self
    }

    pub fn args(&mut self, args: Vec<String>) -> &mut MystemBuilder {
        self.args = Some(args);
        self
    }

    pub fn build(&self) -> Result<Mystem, Error> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| Error::Configuration("No mystem path provided".to_string()))?;
        let args = self
            .args
            .clone()
            .ok_or_else(|| Error::Configuration("No mystem arguments provided".to_string()))?;

        Ok(Mystem { path, args })
    }
}

impl Default for MystemBuilder {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from("mystem")),
            args: Some(
                ["-c", "-l", "-d", "-e", "utf-8"]
                    .iter()
                    .map(|a| a.to_string())
                    .collect(),
            ),
        }
    }
}
