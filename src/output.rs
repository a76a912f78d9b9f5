// Output emission
//
// One JSON document per line. List projections are expanded so every item
// gets its own line; pages are written as they arrive.

use serde_json::Value;
use std::io::{self, Write};

pub struct Emitter<W: Write> {
    out: W,
    expand_lists: bool,
    pretty: bool,
    documents: usize,
    failed: Option<io::Error>,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, expand_lists: bool, pretty: bool) -> Self {
        Self {
            out,
            expand_lists,
            pretty,
            documents: 0,
            failed: None,
        }
    }

    /// Write one projected page
    ///
    /// A write failure is kept and reported by [`Emitter::finish`]; later
    /// pages are dropped.
    pub fn emit(&mut self, value: &Value) {
        if self.failed.is_some() {
            return;
        }
        if let Err(e) = self.write_page(value) {
            self.failed = Some(e);
        }
    }

    /// Flush and return the number of documents written
    pub fn finish(mut self) -> io::Result<usize> {
        if let Some(e) = self.failed.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.documents)
    }

    fn write_page(&mut self, value: &Value) -> io::Result<()> {
        match value {
            Value::Array(items) if self.expand_lists => {
                for item in items {
                    self.write_document(item)?;
                }
            }
            other => self.write_document(other)?,
        }
        self.out.flush()
    }

    fn write_document(&mut self, value: &Value) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, value)?;
        } else {
            serde_json::to_writer(&mut self.out, value)?;
        }
        writeln!(self.out)?;
        self.documents += 1;
        Ok(())
    }
}
