//! Text output: bar graphs, the assembled frame, and writing it over the
//! previous one.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

pub mod bar;
pub mod frame;

pub use frame::Frame;

pub const EXIT_NOTICE: &str = "\nExiting...\n";

/// Home the cursor, clear the screen below it and print `frame`, as a
/// single flush.
pub fn draw<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::FromCursorDown), Print(frame))?;
    out.flush()
}

/// Print `frame` as plain lines, for output that is not a live terminal.
pub fn print<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    writeln!(out, "{}", frame)?;
    out.flush()
}

pub fn exit_notice<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(EXIT_NOTICE.as_bytes())?;
    out.flush()
}
