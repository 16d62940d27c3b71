use crate::ais::Message;
use std::io::{self, Write};

/// Writes the transcript: a header, one `role: text` line per message, then a blank line.
pub fn render(out: &mut impl Write, messages: &[Message]) -> io::Result<()> {
    writeln!(out, "# Messages")?;
    for m in messages {
        writeln!(out, "{}: {}", m.role, m.text)?;
    }
    writeln!(out)?;
    out.flush()
}
