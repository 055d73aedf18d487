//! Merging terminal input, the game clock & server replies into one stream
use crate::consts;
use crate::remote::{RemoteClient, Reply, Request};
use crossterm::event::{Event, EventStream};
use futures_util::{Stream, StreamExt};
use std::fmt;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Something for the control loop to handle
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum AppEvent {
    Input(Event),
    /// The snake should move
    Tick,
    /// The busy spinner should advance
    Spin,
    Remote(Reply),
}

pub(crate) struct Scheduler<S = EventStream> {
    input: S,
    ticker: Interval,
    spinner: Interval,
    dispatcher: Dispatcher,
    replies: mpsc::Receiver<Reply>,
}

impl<S> fmt::Debug for Scheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("ticker", &self.ticker)
            .field("spinner", &self.spinner)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Read input from the terminal.  Must be called from within a Tokio
    /// runtime.
    pub(crate) fn new(client: RemoteClient) -> Scheduler {
        Scheduler::with_input(EventStream::new(), client)
    }
}

impl<S: Stream<Item = io::Result<Event>> + Unpin> Scheduler<S> {
    pub(crate) fn with_input(input: S, client: RemoteClient) -> Scheduler<S> {
        let (dispatcher, replies) = Dispatcher::new(client);
        Scheduler {
            input,
            ticker: periodic(tick_period(consts::BASE_TICK_MILLIS)),
            spinner: periodic(consts::SPINNER_PERIOD),
            dispatcher,
            replies,
        }
    }

    /// Replace the tick timer with one firing every `millis` milliseconds.
    /// The first tick of the new timer comes one full period from now.
    pub(crate) fn restart_ticker(&mut self, millis: f64) {
        let period = tick_period(millis);
        debug!(?period, "Restarting tick timer");
        self.ticker = periodic(period);
    }

    /// Keep the tick timer's period but make the next tick come one full
    /// period from now.  Ticks missed while the timer wasn't polled are
    /// dropped.
    pub(crate) fn resume_ticker(&mut self) {
        self.ticker.reset();
    }

    pub(crate) fn send(&self, req: Request) {
        self.dispatcher.send(req);
    }

    /// Wait for the next event.  The tick timer is only consulted if
    /// `ticking` is true and the spinner only if `spinning` is true.  Returns
    /// `None` if the terminal input stream has ended.
    pub(crate) async fn next(&mut self, ticking: bool, spinning: bool) -> io::Result<Option<AppEvent>> {
        tokio::select! {
            ev = self.input.next() => match ev {
                Some(Ok(ev)) => Ok(Some(AppEvent::Input(ev))),
                Some(Err(e)) => Err(e),
                None => Ok(None),
            },
            _ = self.ticker.tick(), if ticking => Ok(Some(AppEvent::Tick)),
            _ = self.spinner.tick(), if spinning => Ok(Some(AppEvent::Spin)),
            Some(reply) = self.replies.recv() => Ok(Some(AppEvent::Remote(reply))),
        }
    }
}

/// Runs requests to the server in the background, each on its own task, and
/// funnels the replies into a single channel
#[derive(Clone, Debug)]
pub(crate) struct Dispatcher {
    client: RemoteClient,
    sender: mpsc::Sender<Reply>,
}

impl Dispatcher {
    const CHANNEL_SIZE: usize = 8;

    pub(crate) fn new(client: RemoteClient) -> (Dispatcher, mpsc::Receiver<Reply>) {
        let (sender, receiver) = mpsc::channel(Self::CHANNEL_SIZE);
        (Dispatcher { client, sender }, receiver)
    }

    pub(crate) fn send(&self, req: Request) {
        let client = self.client.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let reply = client.perform(req).await;
            debug!(kind = ?reply.kind(), "Received reply from server");
            // The receiver only goes away when the program is exiting.
            let _ = sender.send(reply).await;
        });
    }
}

/// Convert a tick interval in milliseconds to a timer period, never shorter
/// than [`consts::MIN_TICK_PERIOD`]
pub(crate) fn tick_period(millis: f64) -> Duration {
    Duration::try_from_secs_f64(millis / 1000.0)
        .unwrap_or(consts::MIN_TICK_PERIOD)
        .max(consts::MIN_TICK_PERIOD)
}

fn periodic(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
