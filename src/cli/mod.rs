// cli/mod.rs - Command line flags for the web server

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "snippetbox")]
#[command(about = "Snippetbox - share snippets of text")]
#[command(version)]
pub struct Cli {
    #[arg(long, env = "ADDR", help = "HTTP network address, e.g. :4000 or 127.0.0.1:4000")]
    pub addr: Option<String>,

    #[arg(long, env = "DATABASE_URL", help = "PostgreSQL data source name")]
    pub dsn: Option<String>,
}
