use super::common::{Common, CommonArgs};
use chain_sentinel::Result;
use chain_sentinel::reports::{render_focus, render_regions};
use clap::Parser;

/// Message shown when an interactive query fails; the registry and focus state
/// stay untouched in that case.
pub(crate) const QUERY_FAILED_MESSAGE: &str = "Error analyzing risk. Please try again.";

#[derive(Parser, Debug)]
pub struct QueryArgs {
    /// Free-form risk question, e.g. "impact of chip shortage on our suppliers"
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Skip the automatic scan cycle and send only the query
    #[arg(long)]
    pub no_scan: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Bootstrap the registry, run the automatic scan cycle, then reconcile the
/// user's query and print the resulting focus view and region table.
pub async fn run_query(args: &QueryArgs) -> Result<()> {
    let common = Common::new(&args.common).await?;

    common.monitor.bootstrap(common.configured_regions.as_deref()).await;
    if !args.no_scan {
        common.monitor.run_cycle().await;
    }

    let mut output = String::new();

    match common.monitor.handle_query(&args.text).await {
        Ok(Some(_)) => {
            if let Some(focus) = common.monitor.focus() {
                render_focus(&focus, common.colors(), &mut output)?;
            }
        }
        Ok(None) => {}
        Err(e) => {
            // Query failures degrade to a message; they are not fatal
            log::warn!("Query failed: {e:#}");
            output.push_str(QUERY_FAILED_MESSAGE);
            output.push('\n');
        }
    }

    output.push('\n');
    render_regions(&common.monitor.regions(), common.colors(), &mut output)?;
    print!("{output}");

    Ok(())
}
