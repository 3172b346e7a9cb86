/// Main TUI application
///
/// Owns the terminal, the page state machine and the aggregate snapshot.
/// Network work runs on spawned tokio tasks that report back over
/// unbounded channels; the UI loop drains them between draws, so the
/// aggregate has a single writer. Every spawned task keeps its JoinHandle
/// here and is aborted on teardown: no state update can land after the
/// loop exits.

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::api::ApiClient;
use crate::core::fetch::{self, FooterUpdate, Page, StatsBatch};
use crate::core::stats::{Metric, ServerInfo, SystemStats};
use crate::screens::{dashboard, detail};
use crate::utils::app_config::Settings;
use crate::utils::constants::TICK_RATE_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Detail(Metric),
}

pub struct App {
    client: ApiClient,
    host: String,
    page: Page,
    stats: SystemStats,
    server_info: ServerInfo,
    view: View,
    selected_card: usize,
    should_quit: bool,
    last_updated: Option<DateTime<Local>>,
    // Background fetch channels
    probe_tx: mpsc::UnboundedSender<bool>,
    probe_rx: mpsc::UnboundedReceiver<bool>,
    stats_tx: mpsc::UnboundedSender<Option<StatsBatch>>,
    stats_rx: mpsc::UnboundedReceiver<Option<StatsBatch>>,
    footer_tx: mpsc::UnboundedSender<FooterUpdate>,
    footer_rx: mpsc::UnboundedReceiver<FooterUpdate>,
    // Outstanding request tasks, aborted on teardown
    tasks: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = ApiClient::new(&settings.backend_url)?;

        let (probe_tx, probe_rx) = mpsc::unbounded_channel();
        let (stats_tx, stats_rx) = mpsc::unbounded_channel();
        let (footer_tx, footer_rx) = mpsc::unbounded_channel();

        Ok(Self {
            client,
            host: settings.host,
            page: Page::new(),
            stats: SystemStats::placeholder(),
            server_info: ServerInfo::placeholder(),
            view: View::Dashboard,
            selected_card: 0,
            should_quit: false,
            last_updated: None,
            probe_tx,
            probe_rx,
            stats_tx,
            stats_rx,
            footer_tx,
            footer_rx,
            tasks: Vec::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.run_from(View::Dashboard).await
    }

    /// Open directly on a detail screen (`servmon stats <metric>`).
    pub async fn run_detail(&mut self, metric: Metric) -> Result<()> {
        self.run_from(View::Detail(metric)).await
    }

    async fn run_from(&mut self, view: View) -> Result<()> {
        self.view = view;

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Page mount: one probe, plus the gate-independent footer fetch
        self.spawn_probe();
        self.spawn_footer_fetch();

        let result = self.run_loop(&mut terminal).await;

        // Teardown: abort anything still in flight
        for task in self.tasks.drain(..) {
            task.abort();
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let tick_rate = Duration::from_millis(TICK_RATE_MS);

        loop {
            self.drain_updates();

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.on_key(key.code);
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Apply whatever the background tasks have delivered since the last
    /// draw. This is the only place the page state and the aggregate move.
    fn drain_updates(&mut self) {
        while let Ok(reachable) = self.probe_rx.try_recv() {
            if reachable {
                self.page.probe_succeeded();
            } else {
                self.page.probe_failed();
            }
            // the gate just opened: fire the batch exactly once
            if self.page.begin_fetch() {
                self.spawn_stats_fetch();
            }
        }

        while let Ok(batch) = self.stats_rx.try_recv() {
            match batch {
                Some(batch) => {
                    fetch::merge_batch(&mut self.stats, batch);
                    self.page.fetch_succeeded();
                    self.last_updated = Some(Local::now());
                }
                None => self.page.fetch_failed(),
            }
        }

        while let Ok(update) = self.footer_rx.try_recv() {
            fetch::apply_footer(&mut self.server_info, update);
        }
    }

    fn spawn_probe(&mut self) {
        if !self.page.begin_probe() {
            return;
        }

        let client = self.client.clone();
        let host = self.host.clone();
        let tx = self.probe_tx.clone();
        self.tasks.push(tokio::spawn(async move {
            let reachable = fetch::probe_host(&client, &host).await;
            let _ = tx.send(reachable);
        }));
    }

    fn spawn_stats_fetch(&mut self) {
        let client = self.client.clone();
        let tx = self.stats_tx.clone();
        self.tasks.push(tokio::spawn(async move {
            match fetch::fetch_stats(&client).await {
                Ok(batch) => {
                    let _ = tx.send(Some(batch));
                }
                Err(e) => {
                    error!("stats batch abandoned: {}", e);
                    let _ = tx.send(None);
                }
            }
        }));
    }

    fn spawn_footer_fetch(&mut self) {
        let client = self.client.clone();
        let tx = self.footer_tx.clone();
        self.tasks.push(tokio::spawn(async move {
            let update = fetch::fetch_server_info(&client).await;
            let _ = tx.send(update);
        }));
    }

    fn on_key(&mut self, code: KeyCode) {
        match self.view {
            View::Dashboard => match code {
                KeyCode::Char('q') => self.should_quit = true,
                // the manual re-ping is the only recovery affordance
                KeyCode::Char('p') => self.spawn_probe(),
                KeyCode::Left => {
                    if self.selected_card > 0 {
                        self.selected_card -= 1;
                    } else {
                        self.selected_card = Metric::all().len() - 1;
                    }
                }
                KeyCode::Right => {
                    self.selected_card = (self.selected_card + 1) % Metric::all().len();
                }
                KeyCode::Enter => {
                    self.view = View::Detail(Metric::all()[self.selected_card]);
                }
                KeyCode::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    self.selected_card = index;
                    self.view = View::Detail(Metric::all()[index]);
                }
                _ => {}
            },
            View::Detail(_) => match code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Esc | KeyCode::Backspace => self.view = View::Dashboard,
                _ => {}
            },
        }
    }

    fn render(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => dashboard::render(
                frame,
                &self.page,
                &self.stats,
                &self.server_info,
                self.client.base_url(),
                self.selected_card,
                self.last_updated,
            ),
            View::Detail(metric) => detail::render(frame, metric),
        }
    }
}
