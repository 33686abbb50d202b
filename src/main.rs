use log::{error, info};
use tokio::io::BufReader;

use snake_agent::bot::Bot;
use snake_agent::config::Config;
use snake_agent::debug_logger::DebugLogger;
use snake_agent::protocol;

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead. Logs go to stderr; stdout is reserved for moves.
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting snake agent...");

    // Load configuration once at startup
    let config = Config::load_or_default();

    let runtime = match protocol::build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start the async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = protocol::run_session(runtime, async move {
        let turn_log = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
        let bot = Bot::new(config);

        info!(
            "Using {} strategy with a {}ms turn budget",
            bot.strategy_name(),
            bot.config().timing.effective_budget_ms()
        );

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();

        let result = protocol::run(&bot, stdin, &mut stdout, &turn_log).await;
        turn_log.finish().await;
        result
    });

    if let Err(e) = result {
        error!("Protocol stream failed: {}", e);
        std::process::exit(1);
    }
}
