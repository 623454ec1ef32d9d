use crate::error_handling::Error::{IOError, UnsupportedInputFile};
use crate::error_handling::Result;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

const SUPPORTED_EXTENSION: &str = "txt";

/// Reads a `.txt` file one line at a time. Each line is one input to the
/// automaton, so line terminators (`\n` or `\r\n`) are stripped.
pub struct LineStream {
    buf_reader: BufReader<std::fs::File>,
    buffer: String,
}

impl LineStream {
    pub fn new(path: &str) -> Result<Self> {
        let extension = Path::new(path).extension().and_then(|ext| ext.to_str());
        if extension != Some(SUPPORTED_EXTENSION) {
            return Err(UnsupportedInputFile(path.to_string()));
        }

        info!(path, "Reading input file");
        match std::fs::File::open(path) {
            Ok(file) => Ok(Self {
                buf_reader: BufReader::new(file),
                buffer: String::new(),
            }),
            Err(e) => Err(IOError(e)),
        }
    }

    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        match self.buf_reader.read_line(&mut self.buffer) {
            Ok(0) => Ok(None),
            Ok(_) => {
                let line = self.buffer.strip_suffix('\n').unwrap_or(&self.buffer);
                let line = line.strip_suffix('\r').unwrap_or(line);
                Ok(Some(line.to_string()))
            }
            Err(e) => Err(IOError(e)),
        }
    }
}

impl Iterator for LineStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

pub fn read_lines(path: &str) -> Result<Vec<String>> {
    LineStream::new(path)?.collect()
}
