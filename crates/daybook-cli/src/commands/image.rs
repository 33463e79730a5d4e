use chrono::{Datelike, Utc};
use daybook_api::{CategoryCycle, ImageClient, Loadable, RandomImage};
use daybook_config::DaybookConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImageArgs;
use crate::output::{Table, output_loadable_table};
use crate::progress::Progress;

/// Handle `dbk image`. Needs no session.
pub async fn handle(
    args: &ImageArgs,
    config: &DaybookConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let image = if config.images.is_configured() {
        let client = ImageClient::new(&config.images.url, &config.images.access_key, config.api.timeout())?;
        let mut cycle = category_cycle(args.category.as_deref(), &config.images.categories);
        let progress = Progress::spinner("fetching image");
        let result = client.random(&mut cycle).await;
        progress.finish_clear();
        Loadable::settle(result)?
    } else {
        Loadable::Empty(String::from(
            "image service not configured; set DAYBOOK_IMAGES__ACCESS_KEY",
        ))
    };

    if args.open
        && let Loadable::Loaded(image) = &image
        && let Err(error) = open::that(&image.url)
    {
        tracing::warn!(%error, url = %image.url, "could not open the image");
    }

    output_loadable_table(&image, flags.format, |image: &RandomImage| {
        let mut table = Table::new(["url", "category", "description", "author"]);
        table.push([
            image.url.clone(),
            image.category.clone().unwrap_or_default(),
            image.description.clone().unwrap_or_default(),
            image.author.clone().unwrap_or_default(),
        ]);
        table
    })
}

/// An explicit category wins; otherwise the rotation starts at a different
/// category each day.
fn category_cycle(category: Option<&str>, categories: &[String]) -> CategoryCycle {
    match category {
        Some(category) => CategoryCycle::new(vec![category.to_string()]),
        None => {
            let offset = usize::try_from(Utc::now().ordinal0()).unwrap_or_default();
            CategoryCycle::new(categories.to_vec()).starting_at(offset)
        }
    }
}
