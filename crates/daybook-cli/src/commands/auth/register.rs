use daybook_auth::RegisterRequest;

use super::login::{AuthLoginResponse, refuse_if_signed_in};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn handle(
    args: &AuthRegisterArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    refuse_if_signed_in(ctx, args.force)?;
    let request = RegisterRequest {
        email: args.email.trim().to_string(),
        first_name: args.first_name.trim().to_string(),
        last_name: args.last_name.trim().to_string(),
        password: args.password.clone(),
        password2: args
            .password_confirm
            .clone()
            .unwrap_or_else(|| args.password.clone()),
    };

    let session = ctx.session_mut();
    let progress = Progress::spinner("creating account");
    let result = session.register(&request).await;
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
