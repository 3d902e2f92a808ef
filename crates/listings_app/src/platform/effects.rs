use std::io;
use std::sync::mpsc;

use feed_logging::{feed_info, feed_warn};
use listings_core::{Effect, LoadFailure, Msg};
use listings_engine::{EngineEvent, EngineHandle, EventSink, SourceError};

use super::app::LoopEvent;
use super::share::ShareService;
use super::ui::render::{apply_render, Presenter};

/// Feeds engine completions back into the controller loop as messages.
pub struct MsgSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl MsgSink {
    pub fn new(tx: mpsc::Sender<LoopEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::PageReady { ticket, result } => Msg::PageLoaded {
                ticket,
                result: result.map_err(|err| {
                    feed_warn!("{:?} page failed: {}", ticket.kind, err);
                    map_source_error(&err)
                }),
            },
        };
        let _ = self.tx.send(LoopEvent::Core(msg));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    share: ShareService,
    loop_tx: mpsc::Sender<LoopEvent>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, share: ShareService, loop_tx: mpsc::Sender<LoopEvent>) -> Self {
        Self {
            engine,
            share,
            loop_tx,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>, presenter: &mut dyn Presenter) -> io::Result<()> {
        for effect in effects {
            match effect {
                Effect::FetchPage { ticket, query } => {
                    feed_info!(
                        "FetchPage seq={} kind={:?} count={} generation={}",
                        ticket.seq,
                        ticket.kind,
                        ticket.count,
                        ticket.generation
                    );
                    self.engine.fetch(ticket, query);
                }
                Effect::Render(command) => apply_render(presenter, command)?,
                Effect::Notify(message) => presenter.notify(&message)?,
                Effect::Share(payload) => {
                    let outcome = self.share.share(&payload);
                    let _ = self.loop_tx.send(LoopEvent::Core(Msg::ShareFinished {
                        id: payload.listing_id,
                        outcome,
                    }));
                }
            }
        }
        Ok(())
    }
}

fn map_source_error(err: &SourceError) -> LoadFailure {
    match err {
        SourceError::Timeout { .. } => LoadFailure::TimedOut,
        SourceError::Unavailable(_) | SourceError::WrongCount { .. } | SourceError::Panicked => {
            LoadFailure::SourceUnavailable
        }
    }
}
