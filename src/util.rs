use ratatui::layout::{Flex, Layout, Rect, Size};
use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Top,
    Right,
}

pub(crate) trait RectExt: Sized {
    fn shave(self, side: Side) -> Self;
}

impl RectExt for Rect {
    fn shave(mut self, side: Side) -> Self {
        match side {
            Side::Top => {
                self.y = self.y.saturating_add(1);
                self.height = self.height.saturating_sub(1);
            }
            Side::Right => {
                self.width = self.width.saturating_sub(1);
            }
        }
        if self.is_empty() {
            Rect::ZERO
        } else {
            self
        }
    }
}

/// Return a `Rect` of the given size centered within `area`.  The result is
/// clipped to `area` if it doesn't fit.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [r] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [r] = Layout::vertical([size.height]).flex(Flex::Center).areas(r);
    r
}

/// Directory in which the profile and log files are stored by default
pub(crate) fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("snakolek"))
}

/// Display an error together with its chain of sources, separated by colons
#[derive(Clone, Copy, Debug)]
pub(crate) struct ErrorChain<'a>(pub(crate) &'a (dyn std::error::Error + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(src) = source {
            write!(f, ": {src}")?;
            source = src.source();
        }
        Ok(())
    }
}
