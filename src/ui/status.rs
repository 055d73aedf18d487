use crate::consts;
use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

/// The top row of the screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StatusBar {
    pub(crate) sound: bool,
    pub(crate) wrap: bool,
    pub(crate) score: u32,
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, consts::STATUS_BAR_STYLE);
        let mut left = format!(
            " {} ver. {} Sound: {}",
            consts::APP_NAME,
            consts::APP_VERSION,
            if self.sound { "ON" } else { "OFF" }
        );
        if self.wrap {
            left.push_str(" (Eli mode)");
        }
        Line::from(left).render(area, buf);
        Line::from(format!(" Score: {} ", self.score))
            .right_aligned()
            .render(area, buf);
    }
}
