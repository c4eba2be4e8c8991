mod commands;
mod terminal;

use commands::{CommandLine, repair};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init_logging(commands.verbose, commands.quiet);

    let cfg = commands.config();
    repair::repair(commands.file, commands.output, &cfg).await
}
