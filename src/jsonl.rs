// src/jsonl.rs
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::marker::PhantomData;
use std::path::Path;

/// Lazily parses one JSON value per non-blank line. A malformed line yields an
/// error carrying its 1-based line number.
pub struct JsonlReader<R, T> {
    lines: Lines<R>,
    line_no: usize,
    _item: PhantomData<T>,
}

impl<R: BufRead, T: DeserializeOwned> JsonlReader<R, T> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_no: 0, _item: PhantomData }
    }
}

impl<R: BufRead, T: DeserializeOwned> Iterator for JsonlReader<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_no += 1;
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    return Some(Err(e).with_context(|| format!("reading line {}", self.line_no)))
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = self.line_no;
            return Some(
                serde_json::from_str(line).with_context(|| format!("invalid JSON on line {line_no}")),
            );
        }
    }
}

pub fn open_reader<T: DeserializeOwned>(path: &Path) -> Result<JsonlReader<BufReader<File>, T>> {
    let f = File::open(path).with_context(|| format!("opening input {}", path.display()))?;
    Ok(JsonlReader::new(BufReader::new(f)))
}

pub struct JsonlWriter<W: Write> {
    inner: W,
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.inner, value)?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

pub fn create_writer(path: &Path) -> Result<JsonlWriter<BufWriter<File>>> {
    let f = File::create(path).with_context(|| format!("creating output {}", path.display()))?;
    Ok(JsonlWriter::new(BufWriter::new(f)))
}
