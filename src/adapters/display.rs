//! Log-backed 16×2 character display.
//!
//! The board has no LCD fitted, so the two display lines are rendered
//! to the serial log instead. Layout rules still match a 16×2 module:
//! text after the first `\n` goes on line two, anything past a second
//! `\n` is dropped, and each line is cut at 16 characters.

use heapless::String;
use log::info;

use crate::app::ports::DisplayPort;

pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: usize = 2;

/// One rendered line. Sized in bytes for 16 multi-byte characters.
pub type LcdLine = String<{ LCD_COLS * 4 }>;

/// Split and truncate `text` into display lines.
pub fn layout(text: &str) -> [LcdLine; LCD_ROWS] {
    let mut lines: [LcdLine; LCD_ROWS] = Default::default();
    for (line, src) in lines.iter_mut().zip(text.split('\n')) {
        for ch in src.chars().take(LCD_COLS) {
            // Capacity covers 16 chars of up to 4 bytes each.
            let _ = line.push(ch);
        }
    }
    lines
}

/// [`DisplayPort`] that writes each frame of text as one log record.
#[derive(Debug, Default)]
pub struct LogDisplay {
    lines: [LcdLine; LCD_ROWS],
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the display currently shows.
    pub fn lines(&self) -> &[LcdLine; LCD_ROWS] {
        &self.lines
    }
}

impl DisplayPort for LogDisplay {
    fn show(&mut self, text: &str) {
        self.lines = layout(text);
        info!("LCD | {:<16} | {:<16}", self.lines[0], self.lines[1]);
    }
}
