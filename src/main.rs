use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tokio_util::sync::CancellationToken;

use conjure::bridge::Bridge;
use conjure::config::Config;
use conjure::host::{ChatSink, ConsoleExecutor, ConsoleSink};
use conjure::policy::CommandPolicy;
use conjure::queue::CommandQueue;
use conjure::ticker::Ticker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    dotenvy::dotenv().ok();

    tracing::info!("conjure starting");

    let config = Config::load()?;

    let queue = Arc::new(CommandQueue::new());
    let policy = Arc::new(CommandPolicy::new(config.allowed_commands.clone()));
    let bridge = Bridge::new(&config, Arc::clone(&queue));
    let ticker = Ticker::new(queue, policy, Arc::new(ConsoleExecutor));

    let shutdown = CancellationToken::new();
    let tick_task = tokio::spawn(ticker.run(config.tick_interval, shutdown.clone()));

    // Console host: each stdin line is a chat trigger, dispatched commands
    // echo to stdout. Stands in for the game-server plugin surface.
    let sink: Arc<dyn ChatSink> = Arc::new(ConsoleSink);
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line? {
                Some(line) => {
                    let args: Vec<String> =
                        line.split_whitespace().map(str::to_string).collect();
                    bridge.handle_chat(&args, Arc::clone(&sink));
                }
                None => break,
            },
        }
    }

    shutdown.cancel();
    tick_task.await.ok();

    tracing::info!("conjure shutting down");
    Ok(())
}
