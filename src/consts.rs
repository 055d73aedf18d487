//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Style};
use std::time::Duration;

/// Name shown in the status bar and window titles
pub(crate) const APP_NAME: &str = "Snakolek";

/// Version reported to the high-score server
pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Platform tag reported to the high-score server
pub(crate) const APP_PLATFORM: &str = std::env::consts::OS;

/// Time between movements of the snake at the start of a round, in
/// milliseconds
pub(crate) const BASE_TICK_MILLIS: f64 = 100.0;

/// Factor by which the time between movements is multiplied each time a
/// fruit is eaten
pub(crate) const TICK_DECAY: f64 = 0.995;

/// Shortest period the tick timer will be set to.  Only the timer is
/// clamped; the recorded tick interval keeps decaying.
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// After eating a special fruit the snake moves this many times faster until
/// the next fruit is eaten
pub(crate) const SPECIAL_SPEEDUP: f64 = 2.0;

/// Base number of points for a fruit eaten by the most direct route
pub(crate) const FRUIT_POINTS: u32 = 10;

/// Points multiplier for special fruits
pub(crate) const SPECIAL_MULTIPLIER: u32 = 10;

/// Chance, in percent, that a new fruit is special
pub(crate) const SPECIAL_FRUIT_PERCENT: u32 = 15;

/// A special fruit disappears once it has been on the board for more than
/// its spawn distance plus this many steps
pub(crate) const SPECIAL_FRUIT_GRACE: u32 = 10;

/// Number of random draws made when placing a fruit before falling back to
/// scanning the board for free cells
pub(crate) const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Skip random draws entirely once more than `1/OCCUPANCY_SCAN_DIVISOR` of
/// the board is occupied
pub(crate) const OCCUPANCY_SCAN_DIVISOR: usize = 2;

/// Maximum length of a player name
pub(crate) const MAX_NAME_LEN: usize = 20;

/// Number of entries requested from the high-score table
pub(crate) const HIGH_SCORE_LIMIT: u32 = 10;

/// Time between frames of the busy spinner
pub(crate) const SPINNER_PERIOD: Duration = Duration::from_millis(100);

/// Frames of the busy spinner
pub(crate) const SPINNER_FRAMES: [char; 4] = ['▘', '▝', '▗', '▖'];

/// Format used for dates in the high-score table and the news window
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Style for snake segments
pub(crate) const SNAKE_STYLE: Style = Style::new().bg(Color::White);

/// Style for ordinary fruits
pub(crate) const FRUIT_STYLE: Style = Style::new().bg(Color::Yellow);

/// Style for special fruits
pub(crate) const SPECIAL_FRUIT_STYLE: Style = Style::new().bg(Color::Red);

/// Style for the status bar at the top of the screen
pub(crate) const STATUS_BAR_STYLE: Style = Style::new().fg(Color::Yellow).bg(Color::Blue);

/// Style for the blank column at the right edge when the terminal width is
/// odd
pub(crate) const FILLER_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);

/// Style for informational pop-up windows
pub(crate) const INFO_WINDOW_STYLE: Style = Style::new().fg(Color::Yellow).bg(Color::Blue);

/// Style for pop-up windows reporting game over or a failure
pub(crate) const ALERT_WINDOW_STYLE: Style = Style::new().fg(Color::Yellow).bg(Color::Red);

/// Style for the player-name input field
pub(crate) const INPUT_FIELD_STYLE: Style = Style::new().fg(Color::Reset).bg(Color::Reset);
