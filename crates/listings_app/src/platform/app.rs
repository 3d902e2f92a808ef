use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{Context, Result};
use feed_logging::{feed_error, feed_info, feed_trace, feed_warn, level_from_name};
use listings_core::{update, AppState, AppViewModel, Effect, Msg, RenderCommand, RenderMode};
use listings_engine::{EngineHandle, SyntheticSource};

use super::config::{load_config, AppConfig};
use super::effects::{EffectRunner, MsgSink};
use super::logging::{self, LogDestination};
use super::share::ShareService;
use super::ui::input::{parse_command, Command, InputError, Target, HELP_TEXT};
use super::ui::render::{ConsolePresenter, Presenter};
use super::ui::viewport::Viewport;

/// Everything the controller loop reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    Input(String),
    InputClosed,
    Core(Msg),
}

pub fn run_app(config_path: &Path, seed: Option<u64>, log: LogDestination) -> Result<()> {
    let (config, config_error) = match load_config(config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(log, level_from_name(&config.log_level));
    if let Some(err) = config_error {
        feed_warn!("Using default config instead of {:?}: {}", config_path, err);
    }
    feed_info!("Starting listings browser with {:?}", config);

    let (loop_tx, loop_rx) = mpsc::channel();
    let source = SyntheticSource::new(config.synthetic_settings(seed))
        .context("Failed to build the synthetic listing source")?;
    let engine = EngineHandle::new(
        Arc::new(source),
        config.fetch_settings(),
        Arc::new(MsgSink::new(loop_tx.clone())),
    )
    .context("Failed to start the listing engine")?;
    let runner = EffectRunner::new(engine, ShareService::detect(), loop_tx.clone());
    spawn_input_reader(loop_tx);

    let mut controller = Controller::new(
        AppState::with_settings(config.core_settings()),
        ConsolePresenter::new(io::stdout().lock()),
        Viewport::new(config.scroll_trigger()),
        runner,
    );
    if let Err(err) = run_loop(&mut controller, &loop_rx) {
        feed_error!("Console output failed: {}", err);
        return Err(err).context("Failed to write to the console");
    }

    feed_info!("Listings browser exiting");
    Ok(())
}

fn run_loop<W: Write>(
    controller: &mut Controller<W>,
    loop_rx: &mpsc::Receiver<LoopEvent>,
) -> io::Result<()> {
    controller.start()?;
    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Core(msg) => controller.dispatch(msg)?,
            LoopEvent::Input(line) => {
                if !controller.handle_line(&line)? {
                    break;
                }
            }
            LoopEvent::InputClosed => break,
        }
    }
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(LoopEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    feed_error!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(LoopEvent::InputClosed);
    });
}

/// Owns the session state and routes input, engine results and effects.
struct Controller<W: Write> {
    state: AppState,
    presenter: ConsolePresenter<W>,
    viewport: Viewport,
    runner: EffectRunner,
}

impl<W: Write> Controller<W> {
    fn new(
        state: AppState,
        presenter: ConsolePresenter<W>,
        viewport: Viewport,
        runner: EffectRunner,
    ) -> Self {
        Self {
            state,
            presenter,
            viewport,
            runner,
        }
    }

    fn start(&mut self) -> io::Result<()> {
        self.presenter.help(HELP_TEXT)?;
        self.presenter.render_recently_viewed(&[])?;
        self.dispatch(Msg::Started)
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        feed_trace!("Dispatch {}", msg_name(&msg));
        let is_page = matches!(msg, Msg::PageLoaded { .. });
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        if effects.iter().any(replaces_feed) {
            self.viewport.scroll_to_top();
        }
        self.runner.run(effects, &mut self.presenter)?;

        if self.state.consume_dirty() && is_page && !self.state.feed().loading() {
            self.presenter.status(&self.state.view())?;
        }
        Ok(())
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(InputError::Empty) => return Ok(true),
            Err(err) => {
                self.presenter.notify(&err.to_string())?;
                return Ok(true);
            }
        };

        let view = self.state.view();
        let names_listing = matches!(
            command,
            Command::View(_) | Command::Recent(_) | Command::Save(_) | Command::Share(_)
        );
        let msg = match command {
            Command::Quit => return Ok(false),
            Command::Help => {
                self.presenter.help(HELP_TEXT)?;
                return Ok(true);
            }
            Command::Status => {
                self.presenter.status(&view)?;
                return Ok(true);
            }
            Command::More => Some(Msg::NearBottom),
            Command::Scroll(delta) => self
                .viewport
                .scroll_by(delta, view.cards.len())
                .then_some(Msg::NearBottom),
            Command::View(target) => {
                resolve_target(&view, target).map(|id| Msg::ListingViewed { id })
            }
            Command::Recent(position) => view.recent_id(position).map(|id| Msg::ListingViewed {
                id: id.to_string(),
            }),
            Command::Save(target) => resolve_target(&view, target).map(|id| Msg::SaveToggled { id }),
            Command::Share(target) => {
                resolve_target(&view, target).map(|id| Msg::ShareRequested { id })
            }
            Command::Search { query, location } => Some(Msg::SearchSubmitted { query, location }),
            Command::Refresh => Some(Msg::RefreshClicked),
            Command::Post => Some(Msg::PostClicked),
        };

        match msg {
            Some(msg) => self.dispatch(msg)?,
            None if names_listing => {
                self.presenter.notify("No listing at that position")?;
            }
            None => {}
        }
        Ok(true)
    }
}

fn resolve_target(view: &AppViewModel, target: Target) -> Option<String> {
    match target {
        Target::Position(position) => view.card_id(position).map(ToOwned::to_owned),
        Target::Id(id) => Some(id),
    }
}

fn replaces_feed(effect: &Effect) -> bool {
    matches!(
        effect,
        Effect::Render(RenderCommand::Listings {
            mode: RenderMode::Replace,
            ..
        })
    )
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::Started => "Started",
        Msg::NearBottom => "NearBottom",
        Msg::ListingViewed { .. } => "ListingViewed",
        Msg::SaveToggled { .. } => "SaveToggled",
        Msg::ShareRequested { .. } => "ShareRequested",
        Msg::SearchSubmitted { .. } => "SearchSubmitted",
        Msg::RefreshClicked => "RefreshClicked",
        Msg::PostClicked => "PostClicked",
        Msg::PageLoaded { .. } => "PageLoaded",
        Msg::ShareFinished { .. } => "ShareFinished",
        Msg::NoOp => "NoOp",
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use listings_core::{CoreSettings, ScrollTrigger};
    use listings_engine::{FetchSettings, SyntheticSettings};

    use super::*;

    struct Harness {
        controller: Controller<Vec<u8>>,
        loop_tx: mpsc::Sender<LoopEvent>,
        loop_rx: mpsc::Receiver<LoopEvent>,
    }

    impl Harness {
        fn new() -> Self {
            feed_logging::initialize_for_tests();
            let (loop_tx, loop_rx) = mpsc::channel();
            let source = SyntheticSource::new(SyntheticSettings {
                initial_latency: Duration::ZERO,
                more_latency: Duration::ZERO,
                seed: Some(11),
            })
            .unwrap();
            let engine = EngineHandle::new(
                Arc::new(source),
                FetchSettings::default(),
                Arc::new(MsgSink::new(loop_tx.clone())),
            )
            .unwrap();
            let runner = EffectRunner::new(engine, ShareService::default(), loop_tx.clone());
            let controller = Controller::new(
                AppState::with_settings(CoreSettings::default()),
                ConsolePresenter::new(Vec::new()),
                Viewport::new(ScrollTrigger::default()),
                runner,
            );
            Self {
                controller,
                loop_tx,
                loop_rx,
            }
        }

        /// Feeds the next message from the engine or effect runner back in.
        fn pump(&mut self) {
            match self.loop_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                LoopEvent::Core(msg) => self.controller.dispatch(msg).unwrap(),
                other => panic!("unexpected event {other:?}"),
            }
        }

        fn output(self) -> String {
            String::from_utf8(self.controller.presenter.into_inner()).unwrap()
        }
    }

    #[test]
    fn start_renders_first_page() {
        let mut harness = Harness::new();
        harness.controller.start().unwrap();
        assert!(harness.controller.state.feed().loading());
        harness.pump();

        let view = harness.controller.state.view();
        assert_eq!(view.cards.len(), 12);
        assert!(!view.loading);

        let text = harness.output();
        assert!(text.contains("No recently viewed items"));
        assert!(text.contains("[12] "));
        assert!(text.contains("Page 1 | 12 listings | 0 saved"));
    }

    #[test]
    fn scrolling_to_the_bottom_appends_a_page() {
        let mut harness = Harness::new();
        harness.controller.start().unwrap();
        harness.pump();

        assert!(harness.controller.handle_line("scroll 100").unwrap());
        assert!(!harness.controller.state.feed().loading());
        assert!(harness.controller.handle_line("scroll 10000").unwrap());
        assert!(harness.controller.state.feed().loading());
        harness.pump();

        let view = harness.controller.state.view();
        assert_eq!(view.cards.len(), 18);
        assert_eq!(view.page, 2);
        assert!(harness.output().contains("[18] "));
    }

    #[test]
    fn viewing_by_position_fills_recent_panel() {
        let mut harness = Harness::new();
        harness.controller.start().unwrap();
        harness.pump();
        let first = harness.controller.state.view().cards[0].listing.id.clone();

        harness.controller.handle_line("view 1").unwrap();

        let view = harness.controller.state.view();
        assert_eq!(view.recently_viewed.len(), 1);
        assert_eq!(view.recently_viewed[0].id, first);
        assert!(harness.output().contains("  1. "));
    }

    #[test]
    fn share_without_targets_prints_the_link() {
        let mut harness = Harness::new();
        harness.controller.start().unwrap();
        harness.pump();
        let first = harness.controller.state.view().cards[0].listing.id.clone();

        harness.controller.handle_line("share 1").unwrap();
        harness.pump();

        let expected = format!(">> Share link: https://listings.example/listing/{first}");
        assert!(harness.output().contains(&expected));
    }

    #[test]
    fn unknown_position_is_reported() {
        let mut harness = Harness::new();
        harness.controller.start().unwrap();
        harness.pump();

        assert!(harness.controller.handle_line("save 99").unwrap());
        assert!(!harness.controller.handle_line("quit").unwrap());
        assert!(harness.output().contains(">> No listing at that position"));
    }

    #[test]
    fn loop_runs_until_quit() {
        let mut harness = Harness::new();
        harness
            .loop_tx
            .send(LoopEvent::Input("post".to_string()))
            .unwrap();
        harness
            .loop_tx
            .send(LoopEvent::Input("quit".to_string()))
            .unwrap();

        run_loop(&mut harness.controller, &harness.loop_rx).unwrap();

        let text = harness.output();
        assert!(text.starts_with("Commands:"));
        assert!(text.contains(">> Posting feature coming soon!"));
    }
}
