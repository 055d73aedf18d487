//! Drawing the game on the terminal
mod board;
mod status;
mod window;
use self::board::BoardView;
use self::status::StatusBar;
use self::window::TextWindow;
use crate::app::Screen;
use crate::consts;
use crate::environment::Environment;
use crate::game::{Phase, Round};
use crate::remote::{OnlineHighScore, OnlineMessage, RequestKind};
use crate::util::{RectExt, Side};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Width at which news messages are wrapped
const NEWS_WIDTH: usize = 60;

/// Index of the name field among the lines of the game-over window
const NAME_LINE: u16 = 5;

pub(crate) fn draw<R>(frame: &mut Frame<'_>, round: &Round<R>, env: &Environment, screen: &Screen) {
    let view = View { round, env, screen };
    let area = frame.area();
    frame.render_widget(&view, area);
    if let Some(pos) = view.cursor(area) {
        frame.set_cursor_position(pos);
    }
}

/// Everything on screen at a given moment
#[derive(Debug)]
struct View<'a, R> {
    round: &'a Round<R>,
    env: &'a Environment,
    screen: &'a Screen,
}

impl<R> View<'_, R> {
    /// Where to show the text cursor, if anywhere
    fn cursor(&self, area: Rect) -> Option<Position> {
        let Screen::NameEntry(entry) = self.screen else {
            return None;
        };
        let window = self.window()?;
        let start = window.line_start(area, NAME_LINE);
        let offset = u16::try_from(entry.name().width()).unwrap_or(u16::MAX);
        Some(Position::new(start.x.saturating_add(offset), start.y))
    }

    fn window(&self) -> Option<TextWindow> {
        match self.screen {
            Screen::Intro => Some(self.intro()),
            Screen::Playing => (self.round.phase() == Phase::Paused).then(paused),
            Screen::Summary => Some(self.summary(None)),
            Screen::NameEntry(entry) => Some(self.summary(Some(entry.name()))),
            Screen::Posting => Some(self.summary(Some(&self.env.player_name))),
            Screen::PostResult(ok) => Some(post_result(*ok)),
            Screen::HighScores(scores) => Some(self.high_scores(scores.as_deref())),
            Screen::News(msgs) => Some(news(msgs)),
        }
    }

    /// A space and the current spinner frame if the player is waiting on a
    /// request of the given kind
    fn spinner(&self, kind: RequestKind) -> String {
        if self.env.busy == Some(kind) {
            format!(" {}", self.env.spinner.glyph())
        } else {
            String::new()
        }
    }

    fn intro(&self) -> TextWindow {
        TextWindow::new(
            vec![
                Line::from(format!("{} ver. {}", consts::APP_NAME, consts::APP_VERSION)),
                Line::default(),
                Line::from("Press Ctrl + R to start normal mode."),
                Line::from("Press Ctrl + E to start in Eli mode (go through walls)."),
                Line::from(format!(
                    "Press Ctrl + H to see highscores.{}",
                    self.spinner(RequestKind::HighScores)
                )),
                Line::default(),
                Line::from("During game:"),
                Line::from("- press Ctrl + P to pause"),
                Line::from("- press Ctrl + S to toggle sound ON/OFF"),
                Line::from("- press Ctrl + Q to quit"),
                Line::default(),
                Line::from(format!("Find out more at {}", self.env.homepage)),
            ],
            consts::INFO_WINDOW_STYLE,
        )
    }

    /// The game-over window.  `name` is the content of the name field, which
    /// is only shown for rounds that scored.
    fn summary(&self, name: Option<&str>) -> TextWindow {
        let mut lines = vec![
            Line::from(format!("Game over! Your score: {}", self.round.score())),
            Line::default(),
        ];
        if let Some(name) = name {
            lines.push(Line::from("Enter your name and press enter to continue."));
            lines.push(Line::from(
                "Or press Esc if you are too shy to post your score...",
            ));
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{name:<width$}", width = consts::MAX_NAME_LEN),
                    consts::INPUT_FIELD_STYLE,
                ),
                Span::raw(self.spinner(RequestKind::PostScore)),
            ]));
            debug_assert_eq!(lines.len(), usize::from(NAME_LINE) + 1);
        } else {
            lines.push(Line::from("Press space to continue."));
        }
        TextWindow::new(lines, consts::ALERT_WINDOW_STYLE)
    }

    fn high_scores(&self, scores: Option<&[OnlineHighScore]>) -> TextWindow {
        let more = Line::from(format!("More at {}/high-scores", self.env.homepage));
        let Some(scores) = scores else {
            return TextWindow::new(
                vec![
                    Line::from("Error while fetching highscores from server :("),
                    Line::default(),
                    more,
                    Line::default(),
                    Line::from("Press space to continue."),
                ],
                consts::ALERT_WINDOW_STYLE,
            );
        };
        let mut lines = vec![
            Line::from(format!("{} highscores:", consts::APP_NAME)),
            Line::default(),
            Line::from(format!(
                "{:>25}{:>12}{:>5}{:>12}{:>18}",
                "Player name", "Score", "Eli", "Duration", "Date"
            )),
            Line::from("-".repeat(72)),
        ];
        lines.extend(
            scores
                .iter()
                .zip(1..)
                .map(|(hs, rank)| Line::from(high_score_row(rank, hs))),
        );
        lines.extend([
            Line::default(),
            more,
            Line::default(),
            Line::from("Press space to continue."),
        ]);
        TextWindow::new(lines, consts::INFO_WINDOW_STYLE)
    }
}

impl<R> Widget for &View<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        StatusBar {
            sound: self.env.sound,
            wrap: self.round.wrap(),
            score: self.round.score(),
        }
        .render(Rect { height: area.height.min(1), ..area }, buf);
        let mut below = area.shave(Side::Top);
        if area.width % 2 == 1 {
            let filler = Rect {
                x: below.right().saturating_sub(1),
                width: below.width.min(1),
                ..below
            };
            buf.set_style(filler, consts::FILLER_STYLE);
            below = below.shave(Side::Right);
        }
        let board = self.env.board;
        let board_area = Rect {
            width: u16::try_from(board.width.saturating_mul(2))
                .unwrap_or(0)
                .min(below.width),
            height: u16::try_from(board.height).unwrap_or(0).min(below.height),
            ..below
        };
        BoardView { round: self.round }.render(board_area, buf);
        if let Some(window) = self.window() {
            window.render(area, buf);
        }
    }
}

fn paused() -> TextWindow {
    TextWindow::new(
        vec![Line::from("Game paused. Press arrow key to resume.")],
        consts::INFO_WINDOW_STYLE,
    )
}

fn post_result(ok: bool) -> TextWindow {
    let (msg, style) = if ok {
        ("Your highscore has been posted.", consts::INFO_WINDOW_STYLE)
    } else {
        (
            "Error while posting your highscore :(",
            consts::ALERT_WINDOW_STYLE,
        )
    };
    TextWindow::new(
        vec![
            Line::from(msg),
            Line::default(),
            Line::from("Press space to continue."),
        ],
        style,
    )
}

/// Format a row of the high-score table.  Entries with an unreadable date
/// are shown as a blank row.
fn high_score_row(rank: usize, hs: &OnlineHighScore) -> String {
    let Some(date) = hs.created_at() else {
        return String::new();
    };
    format!(
        "{rank:>2}.  {:>20}  {:>10}  {:>3}  {:>10}  {}",
        hs.player_name,
        hs.score,
        if hs.eli_mode { "YES" } else { "NO" },
        hs.duration,
        date.format(consts::DATE_FORMAT),
    )
}

fn news(msgs: &[OnlineMessage]) -> TextWindow {
    let mut lines = vec![Line::from(format!("News from {}:", consts::APP_NAME))];
    for msg in msgs {
        let Some(date) = msg.created_at() else {
            continue;
        };
        let text = format!("{}  {}", date.format(consts::DATE_FORMAT), msg.content);
        lines.push(Line::default());
        lines.extend(
            textwrap::wrap(&text, NEWS_WIDTH)
                .into_iter()
                .map(|s| Line::from(s.into_owned())),
        );
    }
    lines.extend([
        Line::default(),
        Line::from("Press space to continue."),
    ]);
    TextWindow::new(lines, consts::INFO_WINDOW_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoardSize;
    use crate::name_entry::NameEntry;
    use crate::profile::Profile;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::{backend::TestBackend, Terminal};

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn env(board: BoardSize) -> Environment {
        Environment::new(
            board,
            Profile {
                player_name: String::from("Bob-1"),
                sound: false,
            },
            "http://scores.example.com",
        )
    }

    fn high_score(name: &str, created_at: &str) -> OnlineHighScore {
        OnlineHighScore {
            player_name: String::from(name),
            score: 1230,
            eli_mode: true,
            board_width: 40,
            board_height: 23,
            fruits: 12,
            special_fruits: 1,
            duration: 95,
            created_at: String::from(created_at),
        }
    }

    #[test]
    fn high_score_rows() {
        assert_eq!(
            high_score_row(1, &high_score("Bob-1", "2024-05-01T12:30:00Z")),
            " 1.                 Bob-1        1230  YES          95  2024-05-01 12:30"
        );
        assert_eq!(
            high_score_row(10, &high_score("Bob-1", "2024-05-01T12:30:00+02:00")),
            "10.                 Bob-1        1230  YES          95  2024-05-01 12:30"
        );
        assert_eq!(high_score_row(2, &high_score("Bob-1", "May 1st")), "");
    }

    #[test]
    fn high_score_header_lines_up() {
        let header = format!(
            "{:>25}{:>12}{:>5}{:>12}{:>18}",
            "Player name", "Score", "Eli", "Duration", "Date"
        );
        let row = high_score_row(1, &high_score("Bob-1", "2024-05-01T12:30:00Z"));
        assert_eq!(header.len(), row.len());
        assert_eq!(header.find("Score").map(|i| i + 5), row.find("1230").map(|i| i + 4));
    }

    #[test]
    fn news_wraps_long_messages() {
        let window = news(&[OnlineMessage {
            content: String::from(
                "The server moved to a new home and all scores were carried over",
            ),
            created_at: String::from("2024-05-01T12:30:00Z"),
        }]);
        assert_eq!(
            window,
            TextWindow::new(
                vec![
                    Line::from("News from Snakolek:"),
                    Line::default(),
                    Line::from("2024-05-01 12:30  The server moved to a new home and all"),
                    Line::from("scores were carried over"),
                    Line::default(),
                    Line::from("Press space to continue."),
                ],
                consts::INFO_WINDOW_STYLE,
            )
        );
    }

    #[test]
    fn draw_paused() {
        let board = BoardSize::new(24, 8);
        let mut round = Round::new_with_rng(board, ChaCha12Rng::seed_from_u64(RNG_SEED));
        round.start(false);
        round.pause();
        assert_eq!(round.phase(), Phase::Paused);
        let env = env(board);
        let mut terminal = Terminal::new(TestBackend::new(49, 9)).unwrap();
        terminal
            .draw(|frame| draw(frame, &round, &env, &Screen::Playing))
            .unwrap();
        let left = format!(" Snakolek ver. {} Sound: OFF", consts::APP_VERSION);
        let mut expected = Buffer::with_lines([
            format!("{left:<39} Score: 0 "),
            String::new(),
            String::from("  ┌───────────────────────────────────────────┐"),
            String::from("  │                                           │"),
            String::from("  │  Game paused. Press arrow key to resume.  │"),
            String::from("  │                                           │"),
            String::from("  └───────────────────────────────────────────┘"),
            String::new(),
            String::new(),
        ]);
        expected.set_style(Rect::new(0, 0, 49, 1), consts::STATUS_BAR_STYLE);
        expected.set_style(Rect::new(48, 1, 1, 8), consts::FILLER_STYLE);
        // The snake starts in the middle of the board, under the window.
        expected.set_style(Rect::new(2, 2, 45, 5), consts::INFO_WINDOW_STYLE);
        terminal.backend().assert_buffer(&expected);
    }

    #[test]
    fn cursor_follows_name() {
        let board = BoardSize::new(40, 23);
        let round = Round::new_with_rng(board, ChaCha12Rng::seed_from_u64(RNG_SEED));
        let env = env(board);
        let screen = Screen::NameEntry(NameEntry::new("Bob-1"));
        let view = View {
            round: &round,
            env: &env,
            screen: &screen,
        };
        let area = Rect::new(0, 0, 80, 24);
        let window = view.window().unwrap();
        let start = window.line_start(area, NAME_LINE);
        assert_eq!(view.cursor(area), Some(Position::new(start.x + 5, start.y)));
        let screen = Screen::Summary;
        let view = View {
            round: &round,
            env: &env,
            screen: &screen,
        };
        assert_eq!(view.cursor(area), None);
    }

    #[test]
    fn spinner_shown_while_posting() {
        let board = BoardSize::new(40, 23);
        let round = Round::new_with_rng(board, ChaCha12Rng::seed_from_u64(RNG_SEED));
        let mut env = env(board);
        env.wait_for(RequestKind::PostScore);
        let view = View {
            round: &round,
            env: &env,
            screen: &Screen::Posting,
        };
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&view).render(area, &mut buffer);
        let start = view.window().unwrap().line_start(area, NAME_LINE);
        let row = (0..area.width)
            .map(|x| buffer[(x, start.y)].symbol())
            .collect::<String>();
        assert!(row.contains(&format!("{:<20} ▘", "Bob-1")), "{row:?}");
    }
}
