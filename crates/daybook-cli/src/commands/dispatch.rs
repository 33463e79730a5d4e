use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Diary { action } => commands::diary::handle(&action, ctx, flags).await,
        Commands::Calendar(args) => commands::calendar::handle(&args, ctx, flags).await,
        Commands::Habit { action } => commands::habit::handle(&action, ctx, flags).await,
        Commands::Reflect { action } => commands::reflect::handle(&action, ctx, flags).await,
        Commands::Dashboard(args) => commands::dashboard::handle(&args, ctx, flags).await,
        Commands::Quote | Commands::Image(_) | Commands::Schema(_) => {
            unreachable!("quote/image/schema are pre-dispatched in main")
        }
    }
}
