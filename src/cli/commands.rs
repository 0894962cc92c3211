//! CLI Command Implementations
//!
//! One-shot commands operate on the saved draft; with no subcommand an
//! interactive shell renders the active panel after every input.

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::DreamConfig;
use crate::error::Result;
use crate::remote::{MockClient, OpenAiClient, Services};
use crate::session::DreamSession;
use crate::state::{ActivePanel, RequestKind, RequestStatus};

/// Build the remote clients for this run.
pub fn build_services(config: &DreamConfig, offline: bool) -> Services {
    if offline {
        info!("Offline mode: using mock AI clients");
        return Services::from_client(MockClient::new());
    }
    if !config.has_credential() {
        warn!("No API key configured; AI actions will fail until one is set");
    }
    Services::from_client(OpenAiClient::with_config(config))
}

/// Print the saved draft.
pub fn show(config: &DreamConfig, services: Services) -> Result<()> {
    let session = DreamSession::from_config(config, services)?;
    let draft = session.draft();

    println!("{}", draft.text());
    println!("Word count: {}", draft.word_count());
    Ok(())
}

/// Replace the saved draft.
pub fn write(config: &DreamConfig, services: Services, text: &str) -> Result<()> {
    info!("Saving draft to: {}", config.store_path.display());

    let mut session = DreamSession::from_config(config, services)?;
    session.set_text(text);

    println!("Saved ({} words)", session.draft().word_count());
    Ok(())
}

/// Interpret the saved draft.
pub async fn analyze(config: &DreamConfig, services: Services) -> Result<()> {
    let mut session = DreamSession::from_config(config, services)?;
    session.analyze().await;
    print_outcome(&session, session.interpretation().status());
    Ok(())
}

/// Generate art for the saved draft.
pub async fn art(config: &DreamConfig, services: Services) -> Result<()> {
    let mut session = DreamSession::from_config(config, services)?;
    session.generate_art().await;
    print_outcome(&session, session.art().status());
    Ok(())
}

fn print_outcome(session: &DreamSession, status: &RequestStatus) {
    match status {
        RequestStatus::Ready(value) => println!("{}", value),
        RequestStatus::Failed(message) => eprintln!("{}", message),
        RequestStatus::Idle | RequestStatus::Pending => {}
    }
    if let Some(banner) = session.error_banner() {
        if !matches!(status, RequestStatus::Failed(m) if m == banner) {
            eprintln!("{}", banner);
        }
    }
}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Select(ActivePanel),
    Analyze,
    Art,
    Help,
    Quit,
    Unknown(String),
    /// Any line not starting with ':' replaces the draft. A leading "::"
    /// stands for a literal ':'.
    Text(String),
}

impl ShellInput {
    pub fn parse(line: &str) -> Self {
        if let Some(escaped) = line.strip_prefix("::") {
            return ShellInput::Text(format!(":{}", escaped));
        }
        let Some(command) = line.strip_prefix(':') else {
            return ShellInput::Text(line.to_string());
        };

        match command.trim() {
            "analyze" => ShellInput::Analyze,
            "art" => ShellInput::Art,
            "help" | "h" => ShellInput::Help,
            "quit" | "q" => ShellInput::Quit,
            other => match other.parse::<ActivePanel>() {
                Ok(panel) => ShellInput::Select(panel),
                Err(_) => ShellInput::Unknown(other.to_string()),
            },
        }
    }
}

const SHELL_HELP: &str = "\
Type a line to replace your dream text (start it with :: for a literal ':').
:record :analysis :tools   switch panel
:analyze                   interpret the dream
:art                       generate dream art
:quit                      leave";

/// What the shell does after one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    /// Print the active panel.
    Render,
    /// Read the next line without rendering.
    Skip,
    Quit,
}

/// Apply one shell input to `session`.
///
/// Remote actions switch to the panel that shows their result and print the
/// pending placeholder before waiting.
pub async fn apply(session: &mut DreamSession, input: ShellInput) -> ShellFlow {
    match input {
        ShellInput::Quit => return ShellFlow::Quit,
        ShellInput::Help => {
            println!("{}", SHELL_HELP);
            return ShellFlow::Skip;
        }
        ShellInput::Unknown(command) => {
            println!("Unknown command ':{}' (try :help)", command);
            return ShellFlow::Skip;
        }
        ShellInput::Text(text) => session.set_text(text),
        ShellInput::Select(panel) => session.select(panel),
        ShellInput::Analyze => {
            session.select(ActivePanel::Analysis);
            println!("{}", RequestKind::Interpretation.pending_placeholder());
            session.analyze().await;
        }
        ShellInput::Art => {
            session.select(ActivePanel::Tools);
            println!("{}", RequestKind::Art.pending_placeholder());
            session.generate_art().await;
        }
    }
    ShellFlow::Render
}

/// Run the interactive shell until `:quit` or end of input.
pub async fn interactive(config: &DreamConfig, services: Services) -> Result<()> {
    let mut session = DreamSession::from_config(config, services)?;
    info!("Interactive session {}", session.id());

    println!("DreamWeaver v{}", env!("CARGO_PKG_VERSION"));
    println!("{}\n", SHELL_HELP);
    println!("{}", session.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match apply(&mut session, ShellInput::parse(&line)).await {
            ShellFlow::Quit => break,
            ShellFlow::Skip => {}
            ShellFlow::Render => println!("{}", session.view()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MemoryStore, SettlePolicy};

    #[test]
    fn test_shell_input_parsing() {
        assert_eq!(ShellInput::parse(":analyze"), ShellInput::Analyze);
        assert_eq!(ShellInput::parse(":art"), ShellInput::Art);
        assert_eq!(ShellInput::parse(":q"), ShellInput::Quit);
        assert_eq!(
            ShellInput::parse(":tools"),
            ShellInput::Select(ActivePanel::Tools)
        );
        assert_eq!(
            ShellInput::parse(":dance"),
            ShellInput::Unknown("dance".to_string())
        );
        assert_eq!(
            ShellInput::parse("I was flying over a city"),
            ShellInput::Text("I was flying over a city".to_string())
        );
        assert_eq!(ShellInput::parse(""), ShellInput::Text(String::new()));
        assert_eq!(
            ShellInput::parse("::analyze my fear"),
            ShellInput::Text(":analyze my fear".to_string())
        );
    }

    fn offline_session() -> DreamSession {
        DreamSession::open(
            Box::new(MemoryStore::new()),
            Services::from_client(MockClient::new()),
            SettlePolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_shell_actions_show_their_panel() {
        let mut session = offline_session();
        assert_eq!(
            apply(&mut session, ShellInput::parse("a tower of clocks")).await,
            ShellFlow::Render
        );

        apply(&mut session, ShellInput::Analyze).await;
        assert_eq!(session.active_panel(), ActivePanel::Analysis);
        assert!(session.interpretation().status().ready_value().is_some());

        apply(&mut session, ShellInput::Art).await;
        assert_eq!(session.active_panel(), ActivePanel::Tools);
        assert!(session.art().status().ready_value().is_some());
    }

    #[tokio::test]
    async fn test_shell_escaped_colon_becomes_text() {
        let mut session = offline_session();

        let flow = apply(&mut session, ShellInput::parse("::) a smiling moon")).await;
        assert_eq!(flow, ShellFlow::Render);
        assert_eq!(session.draft().text(), ":) a smiling moon");

        assert_eq!(apply(&mut session, ShellInput::Help).await, ShellFlow::Skip);
        assert_eq!(apply(&mut session, ShellInput::Quit).await, ShellFlow::Quit);
    }

    #[tokio::test]
    async fn test_offline_write_then_analyze() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DreamConfig {
            store_path: temp_dir.path().join("store.json"),
            ..DreamConfig::default()
        };

        write(&config, build_services(&config, true), "chased by a bear").unwrap();
        analyze(&config, build_services(&config, true)).await.unwrap();

        let session = DreamSession::from_config(&config, build_services(&config, true)).unwrap();
        assert_eq!(session.draft().text(), "chased by a bear");
    }
}
