pub mod backend;
pub mod config;
pub mod error;
pub mod quiz;
pub mod render;

use std::io::Write;

use mycoquiz_core::GameSession;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::backend::HttpBackend;
use crate::config::Config;
use crate::quiz::{Command, Flow, Quiz, HELP};

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with the quiz on stdout.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load();
    let backend = HttpBackend::new(&config.api_url);

    // The backend sleeps when idle; start waking it while the bundled deck is in use.
    let waker = backend.clone();
    let (retries, delay) = (config.wakeup_retries, config.wakeup_delay);
    tokio::spawn(async move {
        waker.wake_up(retries, delay).await;
    });

    let session = GameSession::starter()?;
    let mut quiz = Quiz::new(
        session,
        Box::new(backend.clone()),
        Box::new(backend),
        config.default_directory,
    );

    println!("{HELP}\n");
    println!("{}", quiz.screen());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let (flow, output) = quiz.handle(Command::parse(&line)).await;
        if !output.is_empty() {
            println!("{output}");
        }
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}
