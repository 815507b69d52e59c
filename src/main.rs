//! Process entry point: flag parsing, the interactive boot menu, server
//! selection, and startup of the compiled dispatch engine.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use hive_gate::config::{loader, paths, RuntimeFlags, Servers};
use hive_gate::observability::logging;
use hive_gate::routing::compiler;

#[derive(Parser, Debug)]
#[command(name = "hive-gate", version, about = "Path-prefix hive router and reverse proxy")]
struct Cli {
    /// Server definition to boot, by name
    #[arg(short = 's', long = "server", default_value = "")]
    server: String,

    /// Dump outgoing requests and hive resolution details
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// List all servers and prompt for a selection
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Keep request path casing instead of lower-casing before routing
    #[arg(short = 'c', long = "preserve-case")]
    preserve_case: bool,

    /// Directory holding go.json; also becomes the base directory
    #[arg(short = 'f', long = "config-dir", default_value = "")]
    config_dir: String,

    /// Listen port, overriding the server's declared port
    #[arg(short = 'p', long = "port", default_value = "")]
    port: String,

    /// Respond with a fixed max-age instead of no-store
    #[arg(short = 'a', long = "caching")]
    caching: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let mut base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config_path = if cli.config_dir.is_empty() {
        base_dir.join("go.json")
    } else {
        base_dir = paths::absolutize(Path::new(&paths::expand_env(&cli.config_dir)));
        base_dir.join("go.json")
    };

    let servers = match loader::load_servers(&config_path) {
        Ok(servers) => servers,
        Err(error) => {
            tracing::error!(%error, path = %config_path.display(), "failed to load configuration");
            return ExitCode::from(2);
        }
    };

    let mut name = cli.server.clone();
    if cli.list {
        print_list(&servers);
        let selected = read_line();
        if !selected.is_empty() {
            name = selected;
        }
    }
    if name.is_empty() {
        match boot_menu(&servers) {
            Some(selected) => name = selected,
            None => return ExitCode::SUCCESS,
        }
    }

    let Some(server) = servers.find(&name) else {
        report_unknown(&name, &servers);
        return ExitCode::from(2);
    };
    println!("Option: {name}");

    // Explicit override takes precedence over the declared port.
    let port_str = if cli.port.is_empty() {
        server.port.as_str()
    } else {
        cli.port.as_str()
    };
    let port: u16 = match port_str.parse() {
        Ok(port) => port,
        Err(_) => {
            tracing::error!(port = %port_str, "invalid listen port");
            return ExitCode::from(2);
        }
    };

    let flags = RuntimeFlags {
        verbose: cli.verbose,
        caching: cli.caching,
        preserve_case: cli.preserve_case,
    };

    let table = match compiler::compile(server, &base_dir, !flags.preserve_case, flags.verbose) {
        Ok(table) => table,
        Err(error) => {
            tracing::error!(%error, server = %name, "route compilation failed");
            return ExitCode::from(2);
        }
    };

    let app = hive_gate::build_app(Arc::new(table), server.host.clone(), flags, server.https);
    if let Err(error) = hive_gate::run(app, port, server.https).await {
        tracing::error!(%error, "server terminated");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_menu() {
    println!("\u{1b}[2J\u{1b}[0;0H");
    println!("**************************");
    println!("*                        *");
    println!("*    Server boot menu    *");
    println!("*                        *");
    println!("*                        *");
    println!("**************************");
    println!();
    println!("1 - List servers");
    println!("2 - Quit");
}

fn print_list(servers: &Servers) {
    println!("\u{1b}[2J\u{1b}[0;0H");
    println!("**************************");
    println!("*                        *");
    println!("*       Server List      *");
    println!("*                        *");
    println!("*                        *");
    println!("**************************");
    println!();
    for name in servers.names() {
        println!("Option: {name}");
    }
}

/// The interactive boot menu shown when no server was named on the command
/// line. Returns the selected name, or `None` on quit.
fn boot_menu(servers: &Servers) -> Option<String> {
    print_menu();
    loop {
        match read_line().as_str() {
            "1" => {
                print_list(servers);
                return Some(read_line());
            }
            "2" => return None,
            _ => println!("Invalid option"),
        }
    }
}

fn report_unknown(name: &str, servers: &Servers) {
    println!("No server found with the name {name}");
    println!();
    println!("Try one of the following...:");
    println!("****************************");
    for name in servers.names() {
        println!("{name}");
    }
    println!("****************************");
}

fn read_line() -> String {
    print!("> ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
    line.trim().to_string()
}
