//! Terminal renderer using crossterm
//!
//! Owns the scrollback (an append-only list of styled lines) and draws it
//! together with the prompt row into the alternate screen. Scrolling to the
//! bottom is eased over a few frames to mimic the original smooth scroll.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::commands::{LineStyle, OutputLine};
use crate::config::Theme;
use crate::session::Session;

/// Terminal renderer
pub struct Renderer {
    /// Rendered output lines, oldest first
    scrollback: Vec<OutputLine>,
    /// First visible scrollback row
    scroll_offset: usize,
    /// Row the viewport is easing toward, if a scroll is in flight
    scroll_target: Option<usize>,
    /// Resolved style colors
    theme: Theme,
    /// Current terminal size (cols, rows)
    size: (u16, u16),
    /// Whether the terminal has been initialized
    initialized: bool,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            scrollback: Vec::new(),
            scroll_offset: 0,
            scroll_target: None,
            theme,
            size: (80, 24),
            initialized: false,
        }
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self, title: &str) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            SetTitle(title),
            DisableLineWrap,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Hide
        )?;
        stdout.flush()?;

        self.size = terminal::size()?;
        self.initialized = true;
        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, Show, EnableLineWrap, LeaveAlternateScreen);
        let _ = stdout.flush();
        terminal::disable_raw_mode()
    }

    /// Track a terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.size = (cols, rows);
        self.clamp_scroll();
    }

    /// Append output lines to the scrollback
    pub fn append(&mut self, lines: &[OutputLine]) {
        self.scrollback.extend_from_slice(lines);
    }

    /// Wipe the scrollback and reset the viewport
    pub fn clear(&mut self) {
        self.scrollback.clear();
        self.scroll_offset = 0;
        self.scroll_target = None;
    }

    /// Rows available for scrollback (the last row is the prompt row)
    fn viewport_rows(&self) -> usize {
        self.size.1.saturating_sub(1) as usize
    }

    /// Lowest valid scroll offset that still shows the newest line
    fn bottom_offset(&self) -> usize {
        self.scrollback.len().saturating_sub(self.viewport_rows())
    }

    fn clamp_scroll(&mut self) {
        let bottom = self.bottom_offset();
        if self.scroll_offset > bottom {
            self.scroll_offset = bottom;
        }
    }

    /// Request an eased scroll to the newest output
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_target = Some(self.bottom_offset());
    }

    /// Advance the scroll easing by one frame. Returns true if the viewport moved.
    pub fn tick_scroll(&mut self) -> bool {
        let Some(target) = self.scroll_target else {
            return false;
        };
        if self.scroll_offset == target {
            self.scroll_target = None;
            return false;
        }
        // Cover half the remaining distance each frame, at least one row
        if self.scroll_offset < target {
            let step = ((target - self.scroll_offset) / 2).max(1);
            self.scroll_offset += step;
        } else {
            let step = ((self.scroll_offset - target) / 2).max(1);
            self.scroll_offset -= step;
        }
        if self.scroll_offset == target {
            self.scroll_target = None;
        }
        true
    }

    fn style_color(&self, style: LineStyle) -> crossterm::style::Color {
        match style {
            LineStyle::Plain => self.theme.text,
            LineStyle::Error => self.theme.error,
            LineStyle::Info => self.theme.info,
            LineStyle::Ascii => self.theme.ascii,
            LineStyle::Prompt => self.theme.prompt,
            LineStyle::Item => self.theme.item,
        }
    }

    /// Draw the scrollback and the prompt row
    pub fn render(&mut self, session: &Session) -> io::Result<()> {
        let (cols, rows) = self.size;
        if rows == 0 {
            return Ok(());
        }

        let mut stdout = io::stdout();
        let width = cols as usize;
        let viewport = self.viewport_rows();

        for row in 0..viewport {
            queue!(stdout, MoveTo(0, row as u16), Clear(ClearType::CurrentLine))?;
            if let Some(line) = self.scrollback.get(self.scroll_offset + row) {
                queue!(
                    stdout,
                    SetForegroundColor(self.style_color(line.style)),
                    Print(truncate_to_width(&line.text, width))
                )?;
            }
        }

        // Prompt row: label plus the live input (masked while locked)
        let label = session.prompt_label();
        let input = if session.is_locked() {
            "*".repeat(session.input().chars().count())
        } else {
            session.input().to_string()
        };
        let prompt_row = rows - 1;
        queue!(
            stdout,
            MoveTo(0, prompt_row),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(self.theme.prompt),
            Print(truncate_to_width(&format!("{}{}_", label, input), width)),
            ResetColor
        )?;

        stdout.flush()
    }

    #[cfg(test)]
    fn scrollback_len(&self) -> usize {
        self.scrollback.len()
    }
}

/// Truncate a string to a display width, respecting wide characters
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut result = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        result.push(ch);
    }
    result
}
