//! # course-client
//!
//! Command-line front end for the course marketplace.
//!
//! ```bash
//! course-client sync                       # load courses, reviews and the current user
//! course-client search "machine learning"  # one text search
//! course-client voice                      # one spoken search (type the utterance)
//! course-client login --email a@x.io --password secret
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use course_client::config::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_SPEECH_LANG};
use course_client::lifecycle::{setup_tracing_with_default, CourseSystem};
use course_client::search::{Notice, NoticeLevel, SearchHandle, SearchView};
use course_client::speech::SpeechPlatform;
use std::time::Duration;
use tracing::{info, Instrument};

#[derive(Parser, Debug)]
#[command(name = "course-client", version, about = "Course marketplace client")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "COURSE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "COURSE_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    timeout: u64,

    /// Speech recognition language
    #[arg(long, env = "COURSE_SPEECH_LANG", default_value = DEFAULT_SPEECH_LANG)]
    lang: String,

    /// Treat speech recognition and synthesis as unavailable
    #[arg(long, env = "COURSE_DISABLE_VOICE")]
    disable_voice: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount every slice and print what was loaded
    Sync,
    /// Search courses by text
    Search { query: String },
    /// Search courses by voice
    Voice,
    /// Sign in and show the current user
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

impl Cli {
    fn config(&self) -> ClientConfig {
        ClientConfig {
            server_url: self.server_url.clone(),
            request_timeout_secs: self.timeout,
            speech_lang: self.lang.clone(),
            voice_enabled: !self.disable_voice,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing_with_default(match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    });

    let config = cli.config();
    let mut system = CourseSystem::new(&config, SpeechPlatform::console())
        .context("Failed to start course client")?;

    let outcome = match &cli.command {
        Command::Sync => sync(&mut system, config.request_timeout()).await,
        Command::Search { query } => search(&system, query).await,
        Command::Voice => voice(&system).await,
        Command::Login { email, password } => login(&mut system, email, password).await,
    };

    system.shutdown().await?;
    outcome
}

async fn sync(system: &mut CourseSystem, timeout: Duration) -> Result<()> {
    let span = tracing::info_span!("sync");
    async {
        let mut creator = system.store().creator_courses.subscribe().await?;
        for task in system.mount().await? {
            task.finished().await?;
        }

        let store = system.store();
        let user = store.current_user.get().await?;
        if user.is_some() {
            // Creator courses follow the user; give that fetch a chance to land.
            let _ = tokio::time::timeout(timeout, creator.changed()).await;
        }

        println!("courses:         {}", store.courses.get().await?.len());
        println!("reviews:         {}", store.reviews.get().await?.len());
        match user {
            Some(user) => {
                println!("signed in as:    {} <{}>", user.name, user.email);
                println!("creator courses: {}", store.creator_courses.get().await?.len());
            }
            None => println!("signed in as:    (nobody)"),
        }
        Ok::<_, anyhow::Error>(())
    }
    .instrument(span)
    .await
}

/// How a search cycle is started from the command line.
enum Start<'a> {
    Typed(&'a str),
    Spoken,
}

/// Runs one search cycle and collects the notices it raised, including those
/// of a rejected start.
async fn run_cycle(handle: &SearchHandle, start: Start<'_>) -> (Vec<Notice>, Result<SearchView>) {
    let mut notices = handle.notices();
    let started = match start {
        Start::Typed(query) => handle.manual_submit(query).await,
        Start::Spoken => handle.voice_start().await,
    };
    let outcome = match started {
        Ok(session) => {
            info!(%session, "Search started");
            handle.settled().await.map_err(Into::into)
        }
        Err(e) => Err(e.into()),
    };

    let mut raised = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        raised.push(notice);
    }
    (raised, outcome)
}

async fn search(system: &CourseSystem, query: &str) -> Result<()> {
    let (notices, outcome) = run_cycle(system.search(), Start::Typed(query)).await;
    print_notices(&notices);
    print_results(&outcome?);
    Ok(())
}

async fn voice(system: &CourseSystem) -> Result<()> {
    let (notices, outcome) = run_cycle(system.search(), Start::Spoken).await;
    print_notices(&notices);
    print_results(&outcome?);
    Ok(())
}

async fn login(system: &mut CourseSystem, email: &str, password: &str) -> Result<()> {
    let user = system.login(email, password).await?;
    info!(user = %user.id, "Login complete");
    println!("signed in as {} <{}> ({:?})", user.name, user.email, user.role);
    Ok(())
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warn",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}

fn print_results(view: &SearchView) {
    for course in &view.results {
        println!("{}  {}  ({})", course.id, course.title, course.category);
    }
}
