//! A block of terminal output that can be redrawn in place
use ::console::{measure_text_width, Term};
use std::io;

const TAB_WIDTH: usize = 8;

pub trait RenderSurface {
    /// Adds text to the pending content; nothing is shown until `redraw`
    fn append(&mut self, text: &str);

    /// Erases whatever was last drawn and draws the pending content
    fn redraw(&mut self) -> io::Result<()>;

    /// Erases whatever was last drawn and drops the pending content
    fn clear(&mut self) -> io::Result<()>;

    /// Leaves the last drawing on screen for good and starts a fresh block
    fn reset(&mut self) -> io::Result<()>;
}

/// Rows of the terminal taken up by the last drawing. `partial` is set when
/// the drawing didn't end in a newline, leaving the cursor mid-row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Drawn {
    rows: usize,
    partial: bool,
}

/// The handful of terminal operations an in-place block needs
pub trait Screen {
    fn write_str(&mut self, s: &str) -> io::Result<()>;
    fn clear_line(&mut self) -> io::Result<()>;
    fn clear_last_lines(&mut self, n: usize) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    fn width(&self) -> usize;
}

impl Screen for Term {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        Term::write_str(self, s)
    }

    fn clear_line(&mut self) -> io::Result<()> {
        Term::clear_line(self)
    }

    fn clear_last_lines(&mut self, n: usize) -> io::Result<()> {
        Term::clear_last_lines(self, n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Term::flush(self)
    }

    fn width(&self) -> usize {
        self.size().1 as usize
    }
}

/// Redraws on stdout using cursor movement. Output that isn't going to a
/// terminal can't be erased, so there only the final frame of each block is
/// written, once the block is reset or the surface is dropped.
pub struct TermSurface<T: Screen = Term> {
    screen: T,
    interactive: bool,
    content: String,
    frame: String,
    drawn: Drawn,
}

impl TermSurface {
    pub fn stdout() -> Self {
        let term = Term::stdout();
        let interactive = term.is_term();
        Self::new(term, interactive)
    }
}

impl<T: Screen> TermSurface<T> {
    pub fn new(screen: T, interactive: bool) -> Self {
        Self {
            screen,
            interactive,
            content: String::new(),
            frame: String::new(),
            drawn: Drawn::default(),
        }
    }

    fn erase(&mut self) -> io::Result<()> {
        if self.drawn.partial {
            self.screen.clear_line()?;
        }
        if self.drawn.rows > 0 {
            self.screen.clear_last_lines(self.drawn.rows)?;
        }
        self.drawn = Drawn::default();
        Ok(())
    }

    fn write_frame(&mut self) -> io::Result<()> {
        if self.frame.is_empty() {
            return Ok(());
        }
        let frame = std::mem::take(&mut self.frame);
        self.screen.write_str(&frame)?;
        self.screen.flush()
    }
}

impl<T: Screen> RenderSurface for TermSurface<T> {
    fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }

    fn redraw(&mut self) -> io::Result<()> {
        if !self.interactive {
            self.frame.clone_from(&self.content);
            return Ok(());
        }
        self.erase()?;
        self.screen.write_str(&self.content)?;
        self.screen.flush()?;
        self.drawn = measure(&self.content, self.screen.width());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.content.clear();
        if self.interactive {
            self.erase()
        } else {
            self.frame.clear();
            Ok(())
        }
    }

    fn reset(&mut self) -> io::Result<()> {
        self.content.clear();
        self.drawn = Drawn::default();
        self.write_frame()
    }
}

impl<T: Screen> Drop for TermSurface<T> {
    fn drop(&mut self) {
        if let Err(err) = self.write_frame() {
            tracing::warn!("Could not write the last frame: {}", err);
        }
    }
}

fn measure(text: &str, width: usize) -> Drawn {
    let width = width.max(1);
    let mut lines: Vec<&str> = text.split('\n').collect();
    let tail = lines.pop().unwrap_or("");
    let rows = lines.iter().map(|line| row_span(line, width)).sum();

    if tail.is_empty() {
        Drawn { rows, partial: false }
    } else {
        Drawn { rows: rows + row_span(tail, width) - 1, partial: true }
    }
}

/// Terminal rows a single line wraps onto
fn row_span(line: &str, width: usize) -> usize {
    let columns = measure_text_width(&line.replace('\t', &" ".repeat(TAB_WIDTH)));
    columns.div_ceil(width).max(1)
}
