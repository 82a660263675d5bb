use std::io::Write;

use anyhow::Result;
use clap::Args;
use bazar_lib::bazar_api::Client;
use bazar_lib::{Location, PageLimit, Shell};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output::OutputFormat;
use crate::render;

const HELP: &str = "Comandos: go <href> | search <texto> | next | prev | limit <5|10|15> | back | forward | help | quit";

#[derive(Args)]
pub struct BrowseArgs {
    /// Starting link
    #[arg(default_value = "/")]
    pub href: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Go(String),
    Search(String),
    Next,
    Prev,
    Limit(PageLimit),
    Back,
    Forward,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    match verb {
        "go" | "open" if !rest.is_empty() => Ok(Command::Go(rest.to_string())),
        "search" | "s" => Ok(Command::Search(rest.to_string())),
        "next" | "n" => Ok(Command::Next),
        "prev" | "p" => Ok(Command::Prev),
        "limit" => rest
            .parse::<PageLimit>()
            .map(Command::Limit)
            .map_err(|e| e.user_message()),
        "back" | "b" => Ok(Command::Back),
        "forward" | "f" => Ok(Command::Forward),
        "help" | "?" | "" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("comando desconocido: {}", other)),
    }
}

pub async fn run(args: &BrowseArgs, client: Client, format: &OutputFormat) -> Result<()> {
    let mut shell = Shell::new(client, Location::parse(&args.href));
    show(&mut shell, format).await?;
    eprintln!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("bazar> ");
        std::io::stderr().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let moved = match parse_command(&line) {
            Ok(Command::Go(href)) => {
                shell.navigate(&href);
                true
            }
            Ok(Command::Search(text)) => shell.search(&text),
            Ok(Command::Next) => shell.next_page(),
            Ok(Command::Prev) => shell.previous_page(),
            Ok(Command::Limit(limit)) => shell.set_limit(limit),
            Ok(Command::Back) => shell.back(),
            Ok(Command::Forward) => shell.forward(),
            Ok(Command::Help) => {
                eprintln!("{}", HELP);
                false
            }
            Ok(Command::Quit) => break,
            Err(message) => {
                eprintln!("{}", message);
                false
            }
        };

        if moved {
            show(&mut shell, format).await?;
        } else {
            tracing::debug!("nothing to do at {}", shell.location());
        }
    }
    Ok(())
}

async fn show(shell: &mut Shell<Client>, format: &OutputFormat) -> Result<()> {
    eprintln!();
    eprintln!("{}", render::nav_bar(shell.location()));
    eprintln!("{}  ({})", shell.route().title(), shell.location());

    let spinner = render::spinner("Cargando...");
    let page = shell.load().await;
    spinner.finish_and_clear();
    render::page(&page, format)?;

    render::print_notifications(&shell.drain_notifications());
    Ok(())
}
