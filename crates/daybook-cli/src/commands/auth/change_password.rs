use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::ChangePasswordArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ChangePasswordResponse {
    changed: bool,
}

pub async fn handle(
    args: &ChangePasswordArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.old == args.new {
        anyhow::bail!("the new password must differ from the old one");
    }
    ctx.require_session()?
        .session_mut()
        .change_password(&args.old, &args.new)
        .await?;
    output(&ChangePasswordResponse { changed: true }, flags.format)
}
