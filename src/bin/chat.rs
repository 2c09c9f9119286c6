//! Eva terminal client
//!
//! Drives the widget core from stdin against a running relay. The "page" is
//! the set of anchors in `EVA_PAGE_SECTIONS`; speech output goes to the log.
//!
//! Commands: `/mic` for voice input, `/quit` to exit.

use eva_assistant::config::ClientConfig;
use eva_assistant::directive::ScrollDirection;
use eva_assistant::widget::{
    ChatMessage, ChatView, CommandTable, FileProfileStore, HttpRelayClient, MessageDispatcher,
    NoRecognizer, OnboardingForm, PageSurface, ProfileStore, RelayClient, Sender, Session, Speaker,
    Startup, UserProfile, WidgetError,
};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Input = Lines<BufReader<Stdin>>;

struct TerminalView;

impl ChatView for TerminalView {
    fn appended(&self, message: &ChatMessage) {
        match message.sender {
            // The user's own line is already on screen
            Sender::User => {}
            Sender::Bot => println!("eva> {}", message.text),
        }
    }

    fn retracted(&self, _message: &ChatMessage) {}
}

struct TerminalPage {
    anchors: HashSet<String>,
}

impl PageSurface for TerminalPage {
    fn has_anchor(&self, anchor: &str) -> bool {
        self.anchors.contains(anchor)
    }

    fn scroll_into_view(&self, anchor: &str) {
        println!("  -- #{anchor} --");
    }

    fn scroll_by(&self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Up => println!("  -- scrolled up --"),
            ScrollDirection::Down => println!("  -- scrolled down --"),
        }
    }
}

struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&self, text: &str) {
        tracing::debug!(text, "speak");
    }
}

fn prompt(label: &str) {
    print!("{label}");
    let _ = std::io::stdout().flush();
}

async fn ask(input: &mut Input, label: &str) -> Result<String, Box<dyn std::error::Error>> {
    prompt(label);
    match input.next_line().await? {
        Some(line) => Ok(line),
        None => Err("input closed before onboarding finished".into()),
    }
}

async fn onboard(
    input: &mut Input,
    store: &dyn ProfileStore,
    relay: &dyn RelayClient,
) -> Result<UserProfile, Box<dyn std::error::Error>> {
    println!("Before we chat, please tell us how to reach you.");
    loop {
        let form = OnboardingForm {
            name: ask(input, "Name: ").await?,
            email: ask(input, "Email: ").await?,
            phone: ask(input, "Phone: ").await?,
        };
        match form.submit(store, relay).await {
            Ok(profile) => return Ok(profile),
            Err(e @ WidgetError::IncompleteProfile) => println!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ClientConfig::from_env();
    let store = FileProfileStore::new(&config.profile_path);
    let relay = Arc::new(HttpRelayClient::new(&config.server_url)?);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let profile = match Startup::decide(&store) {
        Startup::Resume(profile) => profile,
        Startup::Onboarding => onboard(&mut input, &store, relay.as_ref()).await?,
    };

    let session = Arc::new(Session::start(profile, Arc::new(TerminalView))?);
    let page = Arc::new(TerminalPage {
        anchors: config.page_sections.into_iter().collect(),
    });
    let dispatcher = MessageDispatcher::new(
        session,
        Arc::new(CommandTable::default()),
        page,
        Arc::new(LogSpeaker),
        relay,
    );

    dispatcher.greet();
    loop {
        prompt("you> ");
        let Some(line) = input.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" => break,
            "/mic" => {
                dispatcher.listen(&NoRecognizer).await;
            }
            _ => {
                dispatcher.handle(&line).await;
            }
        }
    }

    Ok(())
}
