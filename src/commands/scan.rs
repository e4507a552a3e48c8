use super::common::{Common, CommonArgs};
use chain_sentinel::Result;
use chain_sentinel::reports::render_regions;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Populate the region registry, run one sequential scan cycle, and print the
/// region status table.
pub async fn run_scan(args: &ScanArgs) -> Result<()> {
    let common = Common::new(&args.common).await?;

    common.monitor.bootstrap(common.configured_regions.as_deref()).await;
    common.monitor.run_cycle().await;

    let mut output = String::new();
    render_regions(&common.monitor.regions(), common.colors(), &mut output)?;
    print!("{output}");

    Ok(())
}
