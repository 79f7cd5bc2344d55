use std::io::{self, Write};

use base64::Engine;

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// Copies through the terminal's OSC 52 escape sequence. Terminals without
/// OSC 52 support ignore it silently.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{encoded}\x07")?;
        self.out.flush()
    }
}
