use daybook_api::Loadable;
use daybook_core::entities::DiaryEntry;

use super::preview;
use crate::cli::GlobalFlags;
use crate::commands::shared::limit::apply_limit;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::{Table, output_loadable_table};

pub async fn run(date: Option<&str>, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let date = date.map(|raw| parse_date(raw, "date")).transpose()?;
    let configured = ctx.config.general.default_limit;
    let client = ctx.require_session()?;

    let result = match date {
        Some(day) => client.entries_by_date(day).await,
        None => client.list_entries().await,
    };
    let entries = Loadable::settle_list(result, "no diary entries yet")?
        .map(|entries| apply_limit(entries, flags.limit, configured));

    let time_zone = ctx.time_zone;
    output_loadable_table(&entries, flags.format, |entries: &Vec<DiaryEntry>| {
        let mut table = Table::new(["id", "created", "title", "blocks", "preview"]);
        for entry in entries {
            table.push([
                entry.id.to_string(),
                entry
                    .created_at
                    .with_timezone(&time_zone)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                entry.title.clone(),
                entry.content_blocks.len().to_string(),
                preview(entry, 40),
            ]);
        }
        table
    })
}
