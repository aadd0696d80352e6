use anyhow::{Context, Result};
use roombook::api::client::ApiClient;
use roombook::core::config::Config;
use roombook::core::tracing_init::init_tracing;
use roombook::session::store::SessionStore;
use roombook::shell::command::{parse_args, parse_command, Command, Invocation, USAGE};
use roombook::shell::router::Router;
use roombook::views::confirm::{AssumeYes, Confirm, StdinConfirm};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

const DEFAULT_CONFIG: &str = "roombook.toml";

fn main() -> Result<()> {
    let invocation = match parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    // An explicit --config must exist; the default file is optional
    let config = match &invocation.config {
        Some(path) => Config::from_file(path).context(format!(
            "Failed to load configuration from '{}'",
            path.display()
        ))?,
        None => Config::from_file_or_default(&PathBuf::from(DEFAULT_CONFIG))
            .context(format!("Failed to load configuration from '{}'", DEFAULT_CONFIG))?,
    };

    init_tracing(&config.logging);

    // Views are driven one interaction at a time, so a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, invocation))
}

async fn async_main(config: Config, invocation: Invocation) -> Result<()> {
    info!(
        base_url = %config.api.base_url,
        auth_mode = ?config.api.auth_mode,
        session_path = %config.session.path.display(),
        "roombook starting"
    );

    let api = ApiClient::new(&config.api).context("Failed to create API client")?;
    let store = SessionStore::new(config.session.path.clone());

    let confirm: Box<dyn Confirm> = if invocation.assume_yes || !config.ui.confirm_deletes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    };

    let mut router = Router::new(api, store, confirm).context("Failed to load session")?;

    if invocation.command == Command::Shell {
        return run_shell(&mut router).await;
    }

    let screen = router.handle(invocation.command).await?;
    print!("{}", screen);

    Ok(())
}

/// Keep one mounted view alive and feed it commands from stdin
async fn run_shell(router: &mut Router) -> Result<()> {
    print!("{}", router.handle(Command::Dashboard).await?);

    loop {
        print!("roombook> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            break;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["exit"] | ["quit"] => break,
            _ => {}
        }

        match parse_command(words.as_slice()) {
            Ok(Command::Shell) => println!("Already in shell mode"),
            Ok(command) => {
                debug!(?command, "Shell command");
                print!("{}", router.handle(command).await?);
            }
            Err(e) => println!("error: {}", e),
        }
    }

    Ok(())
}
