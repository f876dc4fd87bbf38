use crate::{AppCommand, AppResult, HeadlessSink, HttpRuntime, RecordingsClient, config::Config};

use camview_core::{EngineMessage, SessionManager, SessionState};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, instrument, warn};

/// Main application state.
///
/// Everything runs on one task: operator commands from stdin and engine
/// messages are multiplexed in [`App::run`], so every session transition
/// happens in order on the driver.
pub struct App {
    pub(crate) manager: SessionManager<HttpRuntime, HeadlessSink>,
    pub(crate) recordings: RecordingsClient,
}

impl App {
    /// Wire the session manager and recordings client from configuration.
    #[track_caller]
    #[instrument(skip(config))]
    pub(crate) fn new(config: &Config) -> AppResult<Self> {
        let resolver = config.resolver()?;
        let runtime = HttpRuntime::new(config.request_timeout())?;
        let recordings = RecordingsClient::new(runtime.client().clone(), &resolver);

        let manager = SessionManager::new(
            resolver,
            runtime,
            HeadlessSink::default(),
            config.playback.clone(),
            config.recovery_policy(),
        )?;

        Ok(Self {
            manager,
            recordings,
        })
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(recordings_url = %self.recordings.url(), "CamView starting");
        println!("commands: list | select <name> | play | pause | close | status | quit");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("Stdin closed, shutting down");
                        break;
                    };

                    if line.trim().is_empty() {
                        continue;
                    }

                    match line.parse::<AppCommand>() {
                        Ok(AppCommand::Quit) => {
                            info!("Shutdown requested");
                            break;
                        }
                        Ok(cmd) => {
                            if let Err(e) = self.handle_command(cmd).await {
                                error!(error = ?e, "Command failed");
                                println!("error: {}", e);
                            }
                        }
                        Err(e) => {
                            warn!(error = ?e, "Rejected command");
                            println!("{}", e);
                        }
                    }
                }

                Some(message) = self.manager.next_message() => {
                    self.apply(message);
                }
            }
        }

        self.manager.dispose();
        info!("CamView shut down successfully");

        Ok(())
    }

    /// Execute one operator command.
    #[instrument(skip(self))]
    pub(crate) async fn handle_command(&mut self, cmd: AppCommand) -> AppResult<()> {
        match cmd {
            AppCommand::List => {
                let recordings = self.recordings.list().await?;
                if recordings.is_empty() {
                    println!("no recordings");
                }
                for recording in recordings {
                    println!("  {}", recording);
                }
            }
            AppCommand::Select { recording } => {
                let before = self.manager.state();
                let result = self.manager.select(recording);
                self.report_transition(before);
                result?;
            }
            AppCommand::Play => {
                self.manager.play()?;
                println!("playing");
            }
            AppCommand::Pause => {
                self.manager.pause();
                println!("paused");
            }
            AppCommand::Close => {
                let before = self.manager.state();
                self.manager.close();
                self.report_transition(before);
            }
            AppCommand::Status => {
                println!("{}", self.status_line());
            }
            AppCommand::Quit => {}
        }

        Ok(())
    }

    /// Apply an engine message and report any resulting transition.
    pub(crate) fn apply(&mut self, message: EngineMessage) {
        let before = self.manager.state();
        self.manager.handle(message);
        self.report_transition(before);
    }

    /// One-line summary of the session.
    pub(crate) fn status_line(&self) -> String {
        let mut line = format!("state: {}", self.manager.state());

        if let Some(recording) = self.manager.selection() {
            line.push_str(&format!(", recording: {}", recording));
        }
        if let Some(session_id) = self.manager.session_id() {
            line.push_str(&format!(", session: {}", session_id));
        }
        if self.manager.is_native() {
            line.push_str(", native");
        }
        if self.manager.recovery_attempts() > 0 {
            line.push_str(&format!(
                ", recovery attempts: {}",
                self.manager.recovery_attempts()
            ));
        }
        if let Some(fault) = self.manager.last_fault() {
            line.push_str(&format!(", last fault: {}", fault));
        }

        line
    }

    fn report_transition(&self, before: SessionState) {
        let after = self.manager.state();
        if after == before {
            return;
        }

        match (after, self.manager.last_fault()) {
            (SessionState::Closed, Some(fault)) => println!("playback stopped: {}", fault),
            (SessionState::Loading, _) | (SessionState::Playing, _) => {
                match self.manager.selection() {
                    Some(recording) => println!("{}: {}", after, recording),
                    None => println!("{}", after),
                }
            }
            _ => println!("{}", after),
        }
    }
}
