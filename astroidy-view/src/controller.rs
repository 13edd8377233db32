use std::sync::Arc;
use tokio::sync::mpsc;

use crate::client::FeedSource;
use crate::state::{Event, FetchRequest, Notice, ViewState};

/// Runs the fetch effect for a [`ViewState`].
///
/// Each [`FetchRequest`] the state hands back is spawned as its own task;
/// its completion comes back as an [`Event::FetchCompleted`] on the
/// receiver returned by [`ViewController::new`]. The owner feeds those
/// events back through [`ViewController::dispatch`] in arrival order and
/// the state's sequence guard drops anything stale.
pub struct ViewController {
    state: ViewState,
    source: Arc<dyn FeedSource>,
    completions: mpsc::UnboundedSender<Event>,
}

impl ViewController {
    pub fn new(
        state: ViewState,
        source: Arc<dyn FeedSource>,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (completions, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            state,
            source,
            completions,
        };
        (controller, receiver)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.state.take_notices()
    }

    /// Apply an event; returns the sequence number of a fetch it started
    pub fn dispatch(&mut self, event: Event) -> Option<u64> {
        let request = self.state.apply(event)?;
        let seq = request.seq;
        self.spawn_fetch(request);
        Some(seq)
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        tracing::info!(
            "Fetching asteroids #{} for {} (sort={})",
            request.seq,
            request.range,
            request.sort
        );

        let source = self.source.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let result = source.fetch(&request).await;
            // A closed receiver means the view is shutting down
            let _ = completions.send(Event::FetchCompleted {
                seq: request.seq,
                result,
            });
        });
    }
}
