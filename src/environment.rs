use crate::consts;
use crate::geometry::BoardSize;
use crate::profile::Profile;
use crate::remote::RequestKind;

/// State that outlives a single round: fixed once at startup or changed only
/// by the player's settings and by background requests
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Environment {
    /// Board extent, derived from the terminal size at startup
    pub(crate) board: BoardSize,
    pub(crate) sound: bool,
    /// Last name used to post a score; pre-fills the name field
    pub(crate) player_name: String,
    /// Base URL of the high-score server, shown to the player
    pub(crate) homepage: String,
    pub(crate) spinner: Spinner,
    /// The outstanding request the player is waiting on, if any
    pub(crate) busy: Option<RequestKind>,
}

impl Environment {
    pub(crate) fn new(board: BoardSize, profile: Profile, homepage: &str) -> Environment {
        Environment {
            board,
            sound: profile.sound,
            player_name: profile.player_name,
            homepage: homepage.trim_end_matches('/').to_owned(),
            spinner: Spinner::default(),
            busy: None,
        }
    }

    /// Flip the sound setting and return the new value
    pub(crate) fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// Mark the player as waiting on a request of the given kind
    pub(crate) fn wait_for(&mut self, kind: RequestKind) {
        self.busy = Some(kind);
        self.spinner = Spinner::default();
    }

    /// Record that a reply of the given kind arrived.  Returns `true` if the
    /// player was waiting on it.
    pub(crate) fn resolve(&mut self, kind: RequestKind) -> bool {
        if self.busy == Some(kind) {
            self.busy = None;
            true
        } else {
            false
        }
    }

    /// The settings to remember for the next run
    pub(crate) fn profile(&self) -> Profile {
        Profile {
            player_name: self.player_name.clone(),
            sound: self.sound,
        }
    }
}

/// Animation state of the busy indicator
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Spinner {
    frame: usize,
}

impl Spinner {
    pub(crate) fn advance(&mut self) {
        self.frame = (self.frame + 1) % consts::SPINNER_FRAMES.len();
    }

    pub(crate) fn glyph(self) -> char {
        consts::SPINNER_FRAMES[self.frame]
    }
}
