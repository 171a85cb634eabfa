use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::commands::{parse_line, Console, Response};
use crate::display;
use crate::logging::init_logging;
use bazaar_auth::Settings;

const PROMPT: &str = "bazaar> ";

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        let (log_path, _guard) = init_logging()?;

        tracing::info!("bazaar starting");

        let (client, store) = bazaar_auth::connect(&self.settings)?;

        println!("bazaar API console");
        println!("  backend  {}", client.base_url());
        println!("  session  {}", store.path().display());
        println!("  logs     {}", log_path.display());
        println!("Type 'help' for commands, 'quit' to leave.\n");

        let mut console = Console::new(client);
        let stdin = BufReader::new(tokio::io::stdin());
        repl(&mut console, stdin, std::io::stdout()).await?;

        tracing::info!("bazaar exiting");
        Ok(())
    }
}

/// Read commands line by line until `quit` or end of input, writing each
/// rendered response to `output`.
pub async fn repl<R, W>(console: &mut Console, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(output, "{}", message)?;
                continue;
            }
        };

        let response = console.execute(command).await;
        if response == Response::Quit {
            break;
        }
        writeln!(output, "{}\n", display::render(&response))?;
    }

    Ok(())
}
