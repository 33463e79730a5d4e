use daybook_core::identity::User;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
pub(super) struct AuthLoginResponse {
    pub authenticated: bool,
    pub user: User,
    pub store: &'static str,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    refuse_if_signed_in(ctx, args.force)?;
    let session = ctx.session_mut();
    let progress = Progress::spinner("logging in");
    let result = session.login(args.email.trim(), &args.password).await;
    progress.finish_clear();
    let user = result?.clone();

    output(
        &AuthLoginResponse {
            authenticated: true,
            user,
            store: session.store_source(),
        },
        flags.format,
    )
}

/// Signing in over a live session needs `--force`.
pub(super) fn refuse_if_signed_in(ctx: &AppContext, force: bool) -> anyhow::Result<()> {
    let session = ctx.client.session();
    if force || !session.is_authenticated() {
        return Ok(());
    }
    let who = session
        .user()
        .map_or_else(|| String::from("a user"), User::display_name);
    anyhow::bail!("already logged in as {who}; pass --force to replace the session")
}
