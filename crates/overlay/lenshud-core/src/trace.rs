//! Diagnostic trace sink.
//!
//! A scrolling, most-recent-first text log bounded by the rendered height of
//! its display area: once the host reports the ceiling reached, the whole
//! accumulated buffer is written out in one piece and cleared. The sink is
//! inert while no display surface is attached.

/// Display seam the host implements (a translucent text view, a DOM node…).
pub trait TraceSurface {
    fn set_text(&mut self, text: &str);
    fn rendered_height(&self) -> u32;
}

pub struct TraceSink {
    surface: Option<Box<dyn TraceSurface>>,
    buffer: String,
    shown: String,
    height_ceiling: u32,
}

impl TraceSink {
    pub fn new(height_ceiling: u32) -> Self {
        Self {
            surface: None,
            buffer: String::new(),
            shown: String::new(),
            height_ceiling,
        }
    }

    /// Attach the display surface and start the log.
    pub fn attach(&mut self, surface: Box<dyn TraceSurface>) {
        self.surface = Some(surface);
        self.append("starting trace");
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Currently displayed text, most recent line first.
    pub fn shown(&self) -> &str {
        &self.shown
    }

    /// Add one line. Below the ceiling the line is prepended to the
    /// displayed text; at or above it the whole buffer is flushed to the
    /// surface and cleared.
    pub fn append(&mut self, line: &str) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let mut msg = String::with_capacity(line.len() + 1);
        msg.push_str(line);
        msg.push('\n');
        self.buffer.push_str(&msg);
        if surface.rendered_height() >= self.height_ceiling {
            self.shown.clear();
            self.shown.push_str(&self.buffer);
            self.buffer.clear();
        } else {
            self.shown.insert_str(0, &msg);
        }
        surface.set_text(&self.shown);
    }
}
