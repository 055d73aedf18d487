use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
    style::Style,
    text::Line,
    widgets::{Block, Clear, Padding, Widget},
};

/// A pop-up window showing lines of text in the middle of the screen
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TextWindow {
    lines: Vec<Line<'static>>,
    style: Style,
}

impl TextWindow {
    const PADDING: Padding = Padding::new(2, 2, 1, 1);

    pub(crate) fn new(lines: Vec<Line<'static>>, style: Style) -> TextWindow {
        TextWindow { lines, style }
    }

    fn size(&self) -> Size {
        let text_width = self.lines.iter().map(Line::width).max().unwrap_or(0);
        let width = u16::try_from(text_width)
            .unwrap_or(u16::MAX)
            .saturating_add(Self::PADDING.left + Self::PADDING.right + 2);
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(Self::PADDING.top + Self::PADDING.bottom + 2);
        Size { width, height }
    }

    fn block(&self) -> Block<'static> {
        Block::bordered().padding(Self::PADDING).style(self.style)
    }

    /// Return the screen position of the start of line `index` when the
    /// window is centered in `area`
    pub(crate) fn line_start(&self, area: Rect, index: u16) -> Position {
        let inner = self.block().inner(center_rect(area, self.size()));
        Position::new(inner.x, inner.y.saturating_add(index))
    }
}

impl Widget for &TextWindow {
    // `area` is the area of the entire screen, not just the window.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let outer = center_rect(area, self.size());
        let block = self.block();
        let inner = block.inner(outer);
        Clear.render(outer, buf);
        block.render(outer, buf);
        for (line, row) in self.lines.iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
