use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use counterview_core::{update, AppState, AppViewModel, Msg, Surface};
use counterview_engine::{AtomicFileWriter, EngineHandle};
use counterview_logging::{clear_submission, client_info, client_warn, set_submission};

use super::cli::{Args, Command};
use super::config::{config_path, load_config, resolve};
use super::effects::EffectRunner;
use super::logging;
use super::ui::html::render_document;
use super::ui::render::{render, TermCommand, TerminalWriter};

/// How the run ended, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// The last submission ended in a user-facing alert.
    pub alerted: bool,
}

impl RunOutcome {
    pub fn exit_code(self) -> ExitCode {
        if self.alerted {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

pub fn run_app() -> anyhow::Result<RunOutcome> {
    let args = Args::parse();

    let path = config_path(&args);
    let loaded = load_config(&path);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::initialize(args.log, config.log_file.as_deref());
    if let Err(err) = &loaded {
        client_warn!("{}; using defaults", err);
    }

    let surface = args.command.surface();
    let settings = resolve(&config, &args, surface)?;
    client_info!(
        "Starting {:?} against {}",
        surface,
        settings.transport.endpoint
    );

    let engine = EngineHandle::new(settings.transport).context("failed to start transport")?;
    let stdout = io::stdout();
    let rich = stdout.is_terminal();
    let mut session = Session::new(
        AppState::with_policy(surface, settings.stale_policy),
        EffectRunner::new(engine, io::stderr()),
        TerminalWriter::new(stdout, rich),
        settings.html_output,
    );

    match args.command {
        Command::Text { text } => {
            let text = match text {
                Some(text) => text,
                None => io::read_to_string(io::stdin()).context("failed to read stdin")?,
            };
            session.submit(text)?;
        }
        Command::Tab { url } => {
            session.submit(url.unwrap_or_default())?;
        }
        Command::Session { .. } => {
            let stdin = io::stdin();
            run_interactive(&mut session, stdin.lock(), io::stderr())?;
        }
    }

    Ok(RunOutcome {
        alerted: session.view().alert.is_some(),
    })
}

/// Drives one surface: owns the state and routes messages, effects and renders.
pub struct Session<O: Write, A: Write> {
    state: AppState,
    runner: EffectRunner<A>,
    terminal: TerminalWriter<O>,
    last_render: Vec<TermCommand>,
    html_output: Option<PathBuf>,
}

impl<O: Write, A: Write> Session<O, A> {
    pub fn new(
        state: AppState,
        runner: EffectRunner<A>,
        terminal: TerminalWriter<O>,
        html_output: Option<PathBuf>,
    ) -> Self {
        Self {
            state,
            runner,
            terminal,
            last_render: Vec::new(),
            html_output,
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.run(effects);

        if was_dirty {
            let cmds = render(&view);
            // Input edits do not change what is on screen.
            if cmds != self.last_render {
                self.terminal.apply(&cmds).context("failed to write output")?;
                self.last_render = cmds;
            }
        }
        Ok(())
    }

    /// Set the input, press submit and wait for the request to settle.
    pub fn submit(&mut self, input: String) -> anyhow::Result<()> {
        self.dispatch(Msg::InputChanged(input))?;
        self.dispatch(Msg::SubmitClicked)?;
        if let Some(submission_id) = self.state.in_flight() {
            set_submission(submission_id);
            let settled = self.await_settled();
            clear_submission();
            settled?;
        }
        Ok(())
    }

    fn await_settled(&mut self) -> anyhow::Result<()> {
        while let Some(submission_id) = self.state.in_flight() {
            let msg = self
                .runner
                .wait_for_completion()
                .unwrap_or_else(|| Msg::AnalysisFailed {
                    submission_id,
                    failure: "transport engine stopped".to_string(),
                });
            let succeeded = matches!(msg, Msg::AnalysisSucceeded { .. });
            self.dispatch(msg)?;
            if succeeded {
                self.export_html()?;
            }
        }
        Ok(())
    }

    fn export_html(&self) -> anyhow::Result<()> {
        let Some(path) = &self.html_output else {
            return Ok(());
        };
        let view = self.state.view();
        if view.summary.is_none() {
            return Ok(());
        }
        let writer = AtomicFileWriter::new(path);
        writer
            .write(&render_document(&view))
            .with_context(|| format!("failed to write {}", path.display()))?;
        client_info!("Wrote result page to {:?}", path);
        Ok(())
    }
}

/// Ends one pasted text in interactive mode.
const SUBMIT_LINE: &str = ".";

/// Read input from `input` until EOF.
///
/// Text form: lines accumulate, blank lines included, until a line holding
/// only `.` submits them. Blank lines before any text are skipped.
/// Active tab: every line is a page URL and submits immediately.
pub fn run_interactive<O: Write, A: Write>(
    session: &mut Session<O, A>,
    input: impl BufRead,
    mut prompt: impl Write,
) -> anyhow::Result<()> {
    let surface = session.view().surface;
    let hint = match surface {
        Surface::TextForm => "Paste article text, then a line with a single `.` to analyze.",
        Surface::ActiveTab => "Enter a page URL to analyze.",
    };
    writeln!(prompt, "{hint}")?;

    let mut buffer = String::new();
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if session.view().alert.is_some() {
            session.dispatch(Msg::AlertDismissed)?;
        }
        match surface {
            Surface::TextForm if line.trim() == SUBMIT_LINE => {
                session.submit(std::mem::take(&mut buffer))?;
                writeln!(prompt, "{hint}")?;
            }
            Surface::TextForm if buffer.is_empty() && line.trim().is_empty() => {}
            Surface::TextForm => {
                buffer.push_str(&line);
                buffer.push('\n');
            }
            Surface::ActiveTab => {
                session.submit(line)?;
                writeln!(prompt, "{hint}")?;
            }
        }
    }

    if !buffer.trim().is_empty() {
        session.submit(buffer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use counterview_core::{AnalysisRequest, AnalysisResponse, StaleResultPolicy};
    use counterview_engine::{FailureKind, Transport, TransportError};
    use tempfile::TempDir;

    use super::*;

    struct FakeTransport {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
        status: Option<u16>,
    }

    #[async_trait::async_trait]
    impl Transport for FakeTransport {
        async fn analyze(
            &self,
            request: &AnalysisRequest,
        ) -> Result<AnalysisResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.content().to_string());
            match self.status {
                Some(code) => Err(TransportError {
                    kind: FailureKind::HttpStatus(code),
                    message: "Internal Server Error".to_string(),
                }),
                None => Ok(AnalysisResponse {
                    summary: "S".to_string(),
                    articles: vec!["http://a".to_string(), "http://b".to_string()],
                }),
            }
        }
    }

    fn fake(status: Option<u16>) -> Arc<FakeTransport> {
        Arc::new(FakeTransport {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            status,
        })
    }

    fn session(
        surface: Surface,
        transport: Arc<FakeTransport>,
        html: Option<PathBuf>,
    ) -> Session<Vec<u8>, Vec<u8>> {
        let engine = EngineHandle::with_transport(transport).unwrap();
        Session::new(
            AppState::new(surface),
            EffectRunner::new(engine, Vec::new()),
            TerminalWriter::new(Vec::new(), false),
            html,
        )
    }

    fn output(session: Session<Vec<u8>, Vec<u8>>) -> (String, String) {
        let alerts = String::from_utf8(session.runner.alerts().clone()).unwrap();
        let out = String::from_utf8(session.terminal.into_inner()).unwrap();
        (out, alerts)
    }

    #[test]
    fn successful_submission_renders_result() {
        let transport = fake(None);
        let mut session = session(Surface::TextForm, transport.clone(), None);

        session.submit("An article".to_string()).unwrap();

        let view = session.view();
        assert!(!view.is_loading);
        assert_eq!(view.summary.as_deref(), Some("S"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);

        let (out, alerts) = output(session);
        assert!(out.contains("[Analyzing...] submit disabled"));
        assert!(out.contains("1. http://a\n2. http://b\n"));
        assert!(alerts.is_empty());
    }

    #[test]
    fn empty_text_alerts_and_sends_nothing() {
        let transport = fake(None);
        let mut session = session(Surface::TextForm, transport.clone(), None);

        session.submit("  ".to_string()).unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        assert!(session.view().alert.is_some());
        let (_out, alerts) = output(session);
        assert_eq!(alerts, "alert: Please enter some text to analyze.\n");
    }

    #[test]
    fn failed_request_alerts_and_returns_to_idle() {
        let transport = fake(Some(500));
        let mut session = session(Surface::ActiveTab, transport.clone(), None);

        session.submit("https://news.example/a".to_string()).unwrap();

        let view = session.view();
        assert!(!view.is_loading);
        assert!(view.submit_enabled);
        assert_eq!(view.summary, None);
        let (_out, alerts) = output(session);
        assert_eq!(
            alerts,
            "alert: Failed to analyze the current page. Please try again.\n"
        );
    }

    #[test]
    fn html_page_is_written_after_success() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out").join("result.html");
        let mut session = session(Surface::TextForm, fake(None), Some(target.clone()));

        session.submit("An article".to_string()).unwrap();

        let html = fs::read_to_string(&target).unwrap();
        assert!(html.contains("<a href=\"http://b\" target=\"_blank\""));
    }

    #[test]
    fn interactive_text_keeps_paragraphs_in_one_request() {
        let transport = fake(None);
        let mut session = session(Surface::TextForm, transport.clone(), None);
        let input = Cursor::new("P1\n\nP2\n.\n");

        run_interactive(&mut session, input, Vec::new()).unwrap();

        assert_eq!(*transport.seen.lock().unwrap(), vec!["P1\n\nP2\n".to_string()]);
        let (_out, alerts) = output(session);
        assert!(alerts.is_empty());
    }

    #[test]
    fn interactive_text_submits_leftover_at_eof() {
        let transport = fake(None);
        let mut session = session(Surface::TextForm, transport.clone(), None);
        let input = Cursor::new("first line\n.\n\nleftover\n\nmore\n");

        run_interactive(&mut session, input, Vec::new()).unwrap();

        assert_eq!(
            *transport.seen.lock().unwrap(),
            vec![
                "first line\n".to_string(),
                "leftover\n\nmore\n".to_string()
            ]
        );
    }

    #[test]
    fn interactive_text_skips_blank_lines_before_any_text() {
        let transport = fake(None);
        let mut session = session(Surface::TextForm, transport.clone(), None);

        run_interactive(&mut session, Cursor::new("\n\n  \n"), Vec::new()).unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        let (_out, alerts) = output(session);
        assert!(alerts.is_empty());
    }

    #[test]
    fn interactive_tab_submits_each_line_and_dismisses_alerts() {
        let transport = fake(None);
        let mut session = session(Surface::ActiveTab, transport.clone(), None);
        let input = Cursor::new("not a url\nhttps://news.example/a\n");

        run_interactive(&mut session, input, Vec::new()).unwrap();

        assert_eq!(
            *transport.seen.lock().unwrap(),
            vec!["https://news.example/a".to_string()]
        );
        assert_eq!(session.view().alert, None);
        let (_out, alerts) = output(session);
        assert_eq!(alerts.lines().count(), 1);
    }

    #[test]
    fn retained_result_stays_visible_until_replaced() {
        let transport = fake(None);
        let engine = EngineHandle::with_transport(transport).unwrap();
        let mut session = Session::new(
            AppState::with_policy(Surface::TextForm, StaleResultPolicy::Retain),
            EffectRunner::new(engine, Vec::new()),
            TerminalWriter::new(Vec::new(), false),
            None,
        );

        session.submit("one".to_string()).unwrap();
        session.submit("two".to_string()).unwrap();

        let (out, _alerts) = output(session);
        // The second loading render still shows the first result.
        let second_loading = &out[out.rfind("[Analyzing...]").unwrap()..];
        let end = second_loading.find("[Ready]").unwrap();
        assert!(second_loading[..end].contains("Summary"));
    }
}
