use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use feed_logging::{feed_info, feed_warn};
use listings_core::{LoadTicket, SearchQuery};

use crate::fetch::{fetch_page, EventSink, FetchSettings};
use crate::{EngineEvent, ListingSource, PageRequest, SourceError};

enum EngineCommand {
    Fetch {
        ticket: LoadTicket,
        request: PageRequest,
    },
}

/// Runs source calls on a background tokio runtime and reports results to a sink.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(
        source: Arc<dyn ListingSource>,
        settings: FetchSettings,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("listings-source")
            .enable_time()
            .build()?;

        let worker_sink = sink.clone();
        thread::Builder::new()
            .name("listings-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let source = source.clone();
                    let sink = worker_sink.clone();
                    let settings = settings.clone();
                    runtime.spawn(async move {
                        handle_command(source.as_ref(), &settings, command, sink.as_ref()).await;
                    });
                }
                feed_info!("Engine command channel closed; worker exiting");
            })?;

        Ok(Self::from_parts(cmd_tx, sink))
    }

    fn from_parts(cmd_tx: mpsc::Sender<EngineCommand>, sink: Arc<dyn EventSink>) -> Self {
        Self { cmd_tx, sink }
    }

    /// Starts the load for `ticket`. Exactly one `PageReady` event follows.
    pub fn fetch(&self, ticket: LoadTicket, query: Option<SearchQuery>) {
        let request = PageRequest::for_ticket(ticket, query);
        if self
            .cmd_tx
            .send(EngineCommand::Fetch { ticket, request })
            .is_err()
        {
            feed_warn!("Engine worker is gone; failing {:?} load", ticket.kind);
            self.sink.emit(EngineEvent::PageReady {
                ticket,
                result: Err(SourceError::Unavailable("engine stopped".to_string())),
            });
        }
    }
}

async fn handle_command(
    source: &dyn ListingSource,
    settings: &FetchSettings,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::Fetch { ticket, request } => {
            let result = fetch_page(source, &request, settings).await;
            sink.emit(EngineEvent::PageReady { ticket, result });
        }
    }
}

#[cfg(test)]
mod tests {
    use listings_core::LoadKind;

    use super::*;
    use crate::ChannelEventSink;

    #[test]
    fn fetch_after_worker_exit_fails_the_load() {
        let (event_tx, event_rx) = mpsc::channel();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let engine = EngineHandle::from_parts(cmd_tx, Arc::new(ChannelEventSink::new(event_tx)));
        let ticket = LoadTicket {
            seq: 4,
            generation: 1,
            kind: LoadKind::More,
            count: 6,
        };

        engine.fetch(ticket, None);

        let events: Vec<EngineEvent> = event_rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        let EngineEvent::PageReady {
            ticket: reported,
            result,
        } = &events[0];
        assert_eq!(*reported, ticket);
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}
