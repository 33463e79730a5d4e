use daybook_api::{Loadable, Quote, QuoteClient};
use daybook_config::DaybookConfig;

use crate::cli::GlobalFlags;
use crate::output::{Table, output_loadable_table};
use crate::progress::Progress;

/// Handle `dbk quote`. Needs no session.
pub async fn handle(config: &DaybookConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = QuoteClient::new(&config.quotes.url, config.api.timeout())?;
    let progress = Progress::spinner("fetching quote");
    let result = client.today().await;
    progress.finish_clear();

    let quote = Loadable::settle(result)?;
    output_loadable_table(&quote, flags.format, |quote: &Quote| {
        let mut table = Table::new(["quote", "author"]);
        table.push([quote.text.clone(), quote.author.clone()]);
        table
    })
}
