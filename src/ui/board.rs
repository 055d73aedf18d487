use crate::consts;
use crate::game::{Phase, Round};
use crate::geometry::Coord;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
};

/// The playing field.  Each board cell is drawn as two terminal columns.
#[derive(Debug)]
pub(crate) struct BoardView<'a, R> {
    pub(crate) round: &'a Round<R>,
}

impl<R> Widget for BoardView<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.round.phase() == Phase::NotStarted {
            return;
        }
        let mut canvas = Canvas { area, buf };
        for &seg in self.round.snake().segments() {
            canvas.paint(seg, consts::SNAKE_STYLE);
        }
        if let Some(fruit) = self.round.fruit() {
            let style = if fruit.special {
                consts::SPECIAL_FRUIT_STYLE
            } else {
                consts::FRUIT_STYLE
            };
            canvas.paint(fruit.pos, style);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn paint(&mut self, c: Coord, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(c.x), u16::try_from(c.y)) else {
            return;
        };
        let Some(x) = x.checked_mul(2).and_then(|x| x.checked_add(self.area.x)) else {
            return;
        };
        let Some(y) = y.checked_add(self.area.y) else {
            return;
        };
        for x in [x, x.saturating_add(1)] {
            let pos = Position::new(x, y);
            if !self.area.contains(pos) {
                continue;
            }
            if let Some(cell) = self.buf.cell_mut(pos) {
                cell.set_char(' ');
                cell.set_style(style);
            }
        }
    }
}
