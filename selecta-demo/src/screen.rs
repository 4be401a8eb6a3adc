//! Terminal setup, teardown and drawing.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use crate::view::{Emphasis, Frame};

/// Owns the terminal while the demo runs and restores it on drop.
pub struct Screen {
    stdout: Stdout,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        // Restore the terminal before the default hook prints the panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;
        Ok(Self { stdout })
    }

    /// Redraw the whole frame plus the status lines below it.
    pub fn draw(&mut self, frame: &Frame, status: &[String]) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        queue!(self.stdout, Clear(ClearType::All))?;

        for (y, row) in frame.rows().iter().enumerate().take(height as usize) {
            let attribute = match row.emphasis {
                Emphasis::Plain => Attribute::Reset,
                Emphasis::Title | Emphasis::Label => Attribute::Bold,
                Emphasis::Trigger { focused: true } => Attribute::Underlined,
                Emphasis::Trigger { focused: false } => Attribute::Reset,
                Emphasis::Option { highlighted: true, .. } => Attribute::Reverse,
                Emphasis::Option { disabled: true, .. } => Attribute::Dim,
                Emphasis::Option { .. } => Attribute::Reset,
            };
            let text: String = row.text.chars().take(width as usize).collect();
            queue!(
                self.stdout,
                cursor::MoveTo(row.indent, y as u16),
                SetAttribute(attribute),
                Print(text),
                SetAttribute(Attribute::Reset)
            )?;
        }

        let first = height.saturating_sub(status.len() as u16);
        for (i, line) in status.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, first + i as u16),
                SetAttribute(Attribute::Dim),
                Print(line),
                SetAttribute(Attribute::Reset)
            )?;
        }

        self.stdout.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show, DisableMouseCapture)?;
    Ok(())
}
