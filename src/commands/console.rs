use super::common::{Common, CommonArgs};
use super::query::QUERY_FAILED_MESSAGE;
use chain_sentinel::Result;
use chain_sentinel::engine::Monitor;
use chain_sentinel::reports::{render_focus, render_regions};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Interactive monitoring session.
///
/// The automatic scan cycle runs as a background task while the user types, so a
/// query and the cycle can be in flight at the same time; the registry's atomic
/// operations keep the two paths consistent.
pub async fn run_console(args: &ConsoleArgs) -> Result<()> {
    let common = Common::new(&args.common).await?;
    let colors = common.colors();

    let monitor = Arc::new(common.monitor);
    monitor.bootstrap(common.configured_regions.as_deref()).await;

    let scanner = Arc::clone(&monitor);
    let _scan_task = tokio::spawn(async move { scanner.run_cycle().await });

    println!("Supply Chain Sentinel — type a risk question, or :regions, :select <region>, :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;

        let Some(line) = lines.next_line().await.into_app_err("unable to read from stdin")? else {
            break;
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == ":quit" || line == ":q" {
            break;
        }

        if line == ":regions" {
            let mut output = String::new();
            render_regions(&monitor.regions(), colors, &mut output)?;
            print!("{output}");
            continue;
        }

        if let Some(name) = line.strip_prefix(":select ") {
            select_region(&monitor, name.trim(), colors)?;
            continue;
        }

        handle_query(&monitor, line, colors).await?;
    }

    Ok(())
}

fn select_region(monitor: &Monitor, name: &str, colors: bool) -> Result<()> {
    if monitor.select_region(name) {
        if let Some(focus) = monitor.focus() {
            let mut output = String::new();
            render_focus(&focus, colors, &mut output)?;
            print!("{output}");
        }
    } else {
        println!("No cached scan result for '{name}' yet.");
    }

    Ok(())
}

async fn handle_query(monitor: &Monitor, text: &str, colors: bool) -> Result<()> {
    match monitor.handle_query(text).await {
        Ok(Some(_)) => {
            if let Some(focus) = monitor.focus() {
                let mut output = String::new();
                render_focus(&focus, colors, &mut output)?;
                render_regions(&monitor.regions(), colors, &mut output)?;
                print!("{output}");
            }
        }
        Ok(None) => {}
        Err(e) => {
            log::warn!("Query failed: {e:#}");
            println!("{QUERY_FAILED_MESSAGE}");
        }
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush().into_app_err("unable to flush stdout")
}
