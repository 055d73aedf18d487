use crate::command::Command;
use crate::consts;
use crate::environment::Environment;
use crate::game::{Direction, Phase, Round, TickOutcome};
use crate::name_entry::{NameEntry, NameOutcome};
use crate::remote::{HighScoreRecord, OnlineHighScore, OnlineMessage, RemoteClient, Reply, Request, RequestKind};
use crate::scheduler::{AppEvent, Scheduler};
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io::{self, Write};
use tokio::runtime::Runtime;
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    round: Round<R>,
    env: Environment,
    screen: Screen,
    quitting: bool,
}

/// What is shown on top of the board
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Screen {
    /// The introduction window with the list of keys
    Intro,
    /// A round is running or paused
    Playing,
    /// The round ended without scoring
    Summary,
    /// The round ended with a score and the player is typing their name
    NameEntry(NameEntry),
    /// The score is being sent to the server
    Posting,
    /// Whether the score was accepted by the server
    PostResult(bool),
    /// The online high-score table, or `None` if it couldn't be fetched
    HighScores(Option<Vec<OnlineHighScore>>),
    News(Vec<OnlineMessage>),
}

impl Screen {
    /// Is content from the server on display?
    fn server_content(&self) -> bool {
        matches!(self, Screen::HighScores(_) | Screen::News(_))
    }
}

/// Something the control loop must do on behalf of the game state
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
    /// Replace the tick timer with one of the given period in milliseconds
    RestartTicker(f64),
    /// Start the tick timer's current period over
    ResumeTicker,
    /// Ring the terminal bell
    Beep,
    Send(Request),
}

impl App<rand::rngs::ThreadRng> {
    pub(crate) fn new(env: Environment) -> Self {
        App::new_with_rng(env, rand::rng())
    }
}

impl<R: Rng> App<R> {
    pub(crate) fn new_with_rng(env: Environment, rng: R) -> App<R> {
        App {
            round: Round::new_with_rng(env.board, rng),
            env,
            screen: Screen::Intro,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        runtime: &Runtime,
        client: RemoteClient,
    ) -> io::Result<()> {
        let _guard = runtime.enter();
        let mut scheduler = Scheduler::new(client);
        scheduler.send(Request::Messages);
        while !self.quitting {
            terminal.draw(|frame| ui::draw(frame, &self.round, &self.env, &self.screen))?;
            let ticking = self.round.running();
            let spinning = self.env.is_busy();
            let Some(event) = runtime.block_on(scheduler.next(ticking, spinning))? else {
                info!("Terminal input stream ended");
                break;
            };
            for effect in self.handle_event(event) {
                match effect {
                    Effect::RestartTicker(millis) => scheduler.restart_ticker(millis),
                    Effect::ResumeTicker => scheduler.resume_ticker(),
                    Effect::Beep => beep()?,
                    Effect::Send(req) => scheduler.send(req),
                }
            }
        }
        Ok(())
    }

    pub(crate) fn handle_event(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::Input(ev) => match ev.as_key_press_event() {
                Some(ev) => self.handle_key(ev),
                None => Vec::new(),
            },
            AppEvent::Tick => self.handle_tick(),
            AppEvent::Spin => {
                self.env.spinner.advance();
                Vec::new()
            }
            AppEvent::Remote(reply) => {
                self.handle_reply(reply);
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, ev: KeyEvent) -> Vec<Effect> {
        if let Screen::NameEntry(ref mut entry) = self.screen {
            // Plain letters are part of the name, so only the Ctrl bindings
            // are commands here.
            if ev.modifiers == KeyModifiers::CONTROL {
                match ev.code {
                    KeyCode::Char('c' | 'q') => {
                        self.quitting = true;
                        return Vec::new();
                    }
                    KeyCode::Char('s') => return self.toggle_sound(),
                    _ => (),
                }
            }
            return match entry.handle_key(ev) {
                Some(NameOutcome::Submit(name)) => self.post_score(name),
                Some(NameOutcome::Cancel) => {
                    debug!("Player declined to post their score");
                    self.round.forfeit_score();
                    self.round.acknowledge();
                    self.screen = Screen::Intro;
                    Vec::new()
                }
                None => Vec::new(),
            };
        }
        let Some(cmd) = Command::from_key_event(ev) else {
            return Vec::new();
        };
        match cmd {
            Command::Quit => {
                self.quitting = true;
                return Vec::new();
            }
            Command::Sound => return self.toggle_sound(),
            _ if self.env.is_busy() => return Vec::new(),
            Command::Up => return self.steer(Direction::North),
            Command::Down => return self.steer(Direction::South),
            Command::Left => return self.steer(Direction::West),
            Command::Right => return self.steer(Direction::East),
            Command::Pause => self.round.pause(),
            Command::Continue => self.continue_to_intro(),
            Command::StartNormal => return self.start(false),
            Command::StartWrap => return self.start(true),
            Command::HighScores => return self.show_high_scores(),
        }
        Vec::new()
    }

    fn toggle_sound(&mut self) -> Vec<Effect> {
        if self.env.toggle_sound() {
            vec![Effect::Beep]
        } else {
            Vec::new()
        }
    }

    /// Steer the snake.  Resuming a paused round starts the current tick
    /// period over.
    fn steer(&mut self, direction: Direction) -> Vec<Effect> {
        let resuming = self.round.phase() == Phase::Paused;
        self.round.steer(direction);
        if resuming {
            vec![Effect::ResumeTicker]
        } else {
            Vec::new()
        }
    }

    fn continue_to_intro(&mut self) {
        match self.screen {
            Screen::Summary | Screen::PostResult(_) => {
                self.round.acknowledge();
                self.screen = Screen::Intro;
            }
            Screen::HighScores(_) | Screen::News(_) => self.screen = Screen::Intro,
            _ => (),
        }
    }

    fn start(&mut self, wrap: bool) -> Vec<Effect> {
        if self.round.phase() != Phase::NotStarted || self.screen != Screen::Intro {
            return Vec::new();
        }
        self.round.start(wrap);
        self.screen = Screen::Playing;
        vec![Effect::RestartTicker(self.round.tick_millis())]
    }

    fn show_high_scores(&mut self) -> Vec<Effect> {
        if self.round.phase() != Phase::NotStarted
            || !(self.screen == Screen::Intro || self.screen.server_content())
        {
            return Vec::new();
        }
        self.screen = Screen::Intro;
        self.env.wait_for(RequestKind::HighScores);
        vec![Effect::Send(Request::HighScores)]
    }

    fn post_score(&mut self, name: String) -> Vec<Effect> {
        info!(player_name = %name, score = self.round.score(), "Posting high score");
        let record = HighScoreRecord::from_round(&name, &self.round);
        self.env.player_name = name;
        self.env.wait_for(RequestKind::PostScore);
        self.screen = Screen::Posting;
        vec![Effect::Send(Request::PostScore(record))]
    }

    fn handle_tick(&mut self) -> Vec<Effect> {
        match self.round.tick() {
            TickOutcome::Idle | TickOutcome::Moved => Vec::new(),
            TickOutcome::Ate { special, .. } => {
                let mut millis = self.round.tick_millis();
                if special {
                    millis /= consts::SPECIAL_SPEEDUP;
                }
                let mut effects = vec![Effect::RestartTicker(millis)];
                if self.env.sound {
                    effects.push(Effect::Beep);
                }
                effects
            }
            TickOutcome::GameOver => {
                self.screen = if self.round.score() > 0 {
                    Screen::NameEntry(NameEntry::new(&self.env.player_name))
                } else {
                    Screen::Summary
                };
                Vec::new()
            }
        }
    }

    fn handle_reply(&mut self, reply: Reply) {
        let awaited = self.env.resolve(reply.kind());
        match reply {
            Reply::Posted(ok) => {
                if awaited && self.screen == Screen::Posting {
                    self.screen = Screen::PostResult(ok);
                }
            }
            Reply::HighScores(scores) => {
                if awaited && self.round.phase() == Phase::NotStarted {
                    self.screen = Screen::HighScores(scores);
                }
            }
            Reply::Messages(msgs) => {
                if !msgs.is_empty()
                    && msgs.iter().all(|m| m.created_at().is_some())
                    && self.screen == Screen::Intro
                    && self.round.phase() == Phase::NotStarted
                    && !self.env.is_busy()
                {
                    self.screen = Screen::News(msgs);
                }
            }
        }
    }
}

impl<R> App<R> {
    pub(crate) fn env(&self) -> &Environment {
        &self.env
    }
}

fn beep() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(b"\x07")?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoardSize;
    use crate::profile::Profile;
    use crossterm::event::{Event, KeyEventKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn app() -> App<ChaCha12Rng> {
        let env = Environment::new(
            BoardSize::new(40, 23),
            Profile {
                player_name: String::from("Bob-1"),
                sound: false,
            },
            "http://scores.example.com",
        );
        App::new_with_rng(env, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(ch: char) -> AppEvent {
        AppEvent::Input(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
    }

    /// Tick without steering until the snake hits a wall
    fn play_until_over(app: &mut App<ChaCha12Rng>) {
        for _ in 0..100 {
            let _ = app.handle_event(AppEvent::Tick);
            if app.round.phase() == Phase::Over {
                return;
            }
        }
        panic!("Round did not end");
    }

    fn message(created_at: &str) -> OnlineMessage {
        OnlineMessage {
            content: String::from("Hello"),
            created_at: String::from(created_at),
        }
    }

    #[test]
    fn start_normal() {
        let mut app = app();
        let effects = app.handle_event(ctrl('r'));
        assert_eq!(effects, [Effect::RestartTicker(consts::BASE_TICK_MILLIS)]);
        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(app.round.phase(), Phase::Running);
        assert!(!app.round.wrap());
    }

    #[test]
    fn start_wrap() {
        let mut app = app();
        let _ = app.handle_event(ctrl('e'));
        assert_eq!(app.round.phase(), Phase::Running);
        assert!(app.round.wrap());
    }

    #[test]
    fn start_ignored_while_running() {
        let mut app = app();
        let _ = app.handle_event(ctrl('r'));
        assert!(app.handle_event(ctrl('e')).is_empty());
        assert!(!app.round.wrap());
    }

    #[test]
    fn start_ignored_over_server_content() {
        let mut app = app();
        app.screen = Screen::HighScores(None);
        assert!(app.handle_event(ctrl('r')).is_empty());
        assert_eq!(app.round.phase(), Phase::NotStarted);
        let _ = app.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(app.screen, Screen::Intro);
        let _ = app.handle_event(ctrl('r'));
        assert_eq!(app.round.phase(), Phase::Running);
    }

    #[test]
    fn quit() {
        let mut app = app();
        let _ = app.handle_event(ctrl('q'));
        assert!(app.quitting);
    }

    #[test]
    fn quit_while_busy() {
        let mut app = app();
        let _ = app.handle_event(ctrl('h'));
        assert!(app.env.is_busy());
        let _ = app.handle_event(ctrl('c'));
        assert!(app.quitting);
    }

    #[test]
    fn pause_and_resume() {
        let mut app = app();
        let _ = app.handle_event(ctrl('p'));
        assert_eq!(app.round.phase(), Phase::NotStarted);
        let _ = app.handle_event(ctrl('r'));
        let _ = app.handle_event(ctrl('p'));
        assert_eq!(app.round.phase(), Phase::Paused);
        let before = app.round.snake().head();
        assert!(app.handle_event(AppEvent::Tick).is_empty());
        assert_eq!(app.round.snake().head(), before);
        assert_eq!(app.handle_event(key(KeyCode::Up)), [Effect::ResumeTicker]);
        assert_eq!(app.round.phase(), Phase::Running);
        // Steering a running round leaves the timer alone
        assert!(app.handle_event(key(KeyCode::Left)).is_empty());
    }

    #[test]
    fn sound_toggle_beeps_when_turned_on() {
        let mut app = app();
        assert_eq!(app.handle_event(ctrl('s')), [Effect::Beep]);
        assert!(app.env.sound);
        assert!(app.handle_event(ctrl('s')).is_empty());
        assert!(!app.env.sound);
    }

    #[test]
    fn sound_toggle_while_busy() {
        let mut app = app();
        let _ = app.handle_event(ctrl('h'));
        assert!(app.env.is_busy());
        assert_eq!(app.handle_event(ctrl('s')), [Effect::Beep]);
        assert!(app.env.sound);
        assert!(app.handle_event(key(KeyCode::Char('s'))).is_empty());
        assert!(!app.env.sound);
        assert_eq!(app.env.busy, Some(RequestKind::HighScores));
    }

    #[test]
    fn sound_toggle_in_name_entry() {
        let mut app = app();
        app.screen = Screen::NameEntry(NameEntry::new("Bob"));
        assert_eq!(app.handle_event(ctrl('s')), [Effect::Beep]);
        assert!(app.env.sound);
        assert!(app.handle_event(ctrl('s')).is_empty());
        assert!(!app.env.sound);
        // A plain "s" is part of the name
        assert!(app.handle_event(key(KeyCode::Char('s'))).is_empty());
        assert!(!app.env.sound);
        let Screen::NameEntry(ref entry) = app.screen else {
            panic!("Left name entry: {:?}", app.screen);
        };
        assert_eq!(entry.name(), "Bobs");
    }

    #[test]
    fn unknown_keys_ignored() {
        let mut app = app();
        let env = app.env.clone();
        assert!(app.handle_event(key(KeyCode::Tab)).is_empty());
        assert!(app.handle_event(key(KeyCode::Char('x'))).is_empty());
        assert_eq!(app.screen, Screen::Intro);
        assert_eq!(app.round.phase(), Phase::NotStarted);
        assert_eq!(app.env, env);
    }

    #[test]
    fn key_release_ignored() {
        let mut app = app();
        let mut ev = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        ev.kind = KeyEventKind::Release;
        assert!(app.handle_event(AppEvent::Input(Event::Key(ev))).is_empty());
        assert_eq!(app.round.phase(), Phase::NotStarted);
    }

    #[test]
    fn game_over_without_score() {
        let mut app = app();
        let _ = app.handle_event(ctrl('r'));
        play_until_over(&mut app);
        if app.round.score() == 0 {
            assert_eq!(app.screen, Screen::Summary);
            assert!(app.handle_event(ctrl('h')).is_empty());
            let _ = app.handle_event(key(KeyCode::Char(' ')));
            assert_eq!(app.screen, Screen::Intro);
            assert_eq!(app.round.phase(), Phase::NotStarted);
        } else {
            assert!(matches!(app.screen, Screen::NameEntry(_)));
        }
    }

    #[test]
    fn name_entry_submit_posts_score() {
        let mut app = app();
        let _ = app.handle_event(ctrl('r'));
        play_until_over(&mut app);
        app.round.set_score(40);
        app.screen = Screen::NameEntry(NameEntry::new(&app.env.player_name));
        // Plain letters are typed rather than treated as commands.
        for ch in ['q', 'x'] {
            assert!(app.handle_event(key(KeyCode::Char(ch))).is_empty());
        }
        assert!(!app.quitting);
        let _ = app.handle_event(key(KeyCode::Backspace));
        let effects = app.handle_event(key(KeyCode::Enter));
        let [Effect::Send(Request::PostScore(ref record))] = effects[..] else {
            panic!("Unexpected effects: {effects:?}");
        };
        assert_eq!(record.player_name, "Bob-1q");
        assert_eq!(record.score, 40);
        assert_eq!(app.env.player_name, "Bob-1q");
        assert_eq!(app.screen, Screen::Posting);
        assert_eq!(app.env.busy, Some(RequestKind::PostScore));
        assert!(app.handle_event(key(KeyCode::Char(' '))).is_empty());
        assert_eq!(app.screen, Screen::Posting);
        let _ = app.handle_event(AppEvent::Remote(Reply::Posted(true)));
        assert_eq!(app.screen, Screen::PostResult(true));
        assert!(!app.env.is_busy());
        let _ = app.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(app.screen, Screen::Intro);
        assert_eq!(app.round.phase(), Phase::NotStarted);
    }

    #[test]
    fn name_entry_cancel_forfeits_score() {
        let mut app = app();
        let _ = app.handle_event(ctrl('r'));
        play_until_over(&mut app);
        app.round.set_score(40);
        app.screen = Screen::NameEntry(NameEntry::new(&app.env.player_name));
        assert!(app.handle_event(key(KeyCode::Esc)).is_empty());
        assert_eq!(app.round.score(), 0);
        assert_eq!(app.round.phase(), Phase::NotStarted);
        assert_eq!(app.screen, Screen::Intro);
        assert_eq!(app.env.player_name, "Bob-1");
    }

    #[test]
    fn name_entry_ctrl_quit() {
        let mut app = app();
        app.screen = Screen::NameEntry(NameEntry::new(""));
        let _ = app.handle_event(ctrl('q'));
        assert!(app.quitting);
    }

    #[test]
    fn high_scores_flow() {
        let mut app = app();
        assert_eq!(
            app.handle_event(ctrl('h')),
            [Effect::Send(Request::HighScores)]
        );
        assert_eq!(app.env.busy, Some(RequestKind::HighScores));
        assert!(app.handle_event(AppEvent::Spin).is_empty());
        assert_eq!(app.env.spinner.glyph(), '▝');
        // Other input is ignored while waiting.
        assert!(app.handle_event(ctrl('r')).is_empty());
        assert_eq!(app.round.phase(), Phase::NotStarted);
        let _ = app.handle_event(AppEvent::Remote(Reply::HighScores(None)));
        assert_eq!(app.screen, Screen::HighScores(None));
        assert!(!app.env.is_busy());
        let _ = app.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(app.screen, Screen::Intro);
    }

    #[test]
    fn high_scores_not_while_playing() {
        let mut app = app();
        let _ = app.handle_event(ctrl('r'));
        assert!(app.handle_event(ctrl('h')).is_empty());
        assert!(!app.env.is_busy());
    }

    #[test]
    fn unexpected_high_scores_ignored() {
        let mut app = app();
        let _ = app.handle_event(AppEvent::Remote(Reply::HighScores(Some(Vec::new()))));
        assert_eq!(app.screen, Screen::Intro);
    }

    #[test]
    fn news_shown_on_intro() {
        let mut app = app();
        let msgs = vec![message("2024-05-01T12:30:00Z")];
        let _ = app.handle_event(AppEvent::Remote(Reply::Messages(msgs.clone())));
        assert_eq!(app.screen, Screen::News(msgs));
        assert!(app.handle_event(ctrl('r')).is_empty());
        let _ = app.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(app.screen, Screen::Intro);
    }

    #[test]
    fn news_with_bad_date_suppressed() {
        let mut app = app();
        let msgs = vec![message("2024-05-01T12:30:00Z"), message("yesterday")];
        let _ = app.handle_event(AppEvent::Remote(Reply::Messages(msgs)));
        assert_eq!(app.screen, Screen::Intro);
    }

    #[test]
    fn empty_news_ignored() {
        let mut app = app();
        let _ = app.handle_event(AppEvent::Remote(Reply::Messages(Vec::new())));
        assert_eq!(app.screen, Screen::Intro);
    }

    #[test]
    fn late_news_not_shown_during_round() {
        let mut app = app();
        let _ = app.handle_event(ctrl('r'));
        let msgs = vec![message("2024-05-01T12:30:00Z")];
        let _ = app.handle_event(AppEvent::Remote(Reply::Messages(msgs)));
        assert_eq!(app.screen, Screen::Playing);
    }

    #[test]
    fn eating_restarts_ticker() {
        let mut app = app();
        app.env.sound = true;
        let _ = app.handle_event(ctrl('e'));
        for _ in 0..1000 {
            // Chase the fruit.  Turns along the current axis are rejected, so
            // at most one of each pair takes effect.
            if let Some(fruit) = app.round.fruit() {
                let head = app.round.snake().head();
                let horiz = match fruit.pos.x.cmp(&head.x) {
                    std::cmp::Ordering::Less => Some(KeyCode::Left),
                    std::cmp::Ordering::Greater => Some(KeyCode::Right),
                    std::cmp::Ordering::Equal => None,
                };
                let vert = match fruit.pos.y.cmp(&head.y) {
                    std::cmp::Ordering::Less => Some(KeyCode::Up),
                    std::cmp::Ordering::Greater => Some(KeyCode::Down),
                    std::cmp::Ordering::Equal => None,
                };
                for code in [horiz, vert].into_iter().flatten() {
                    assert!(app.handle_event(key(code)).is_empty());
                }
            }
            let effects = app.handle_event(AppEvent::Tick);
            if !effects.is_empty() {
                let mut millis = consts::BASE_TICK_MILLIS * consts::TICK_DECAY;
                if app.round.special_fruits() > 0 {
                    millis /= consts::SPECIAL_SPEEDUP;
                }
                assert_eq!(effects, [Effect::RestartTicker(millis), Effect::Beep]);
                assert_eq!(app.round.fruits() + app.round.special_fruits(), 1);
                return;
            }
            assert_eq!(app.round.phase(), Phase::Running);
        }
        panic!("Snake never ate anything");
    }
}
