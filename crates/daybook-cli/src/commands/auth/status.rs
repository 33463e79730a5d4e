use daybook_core::responses::SessionStatusResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.client.session();
    let status = SessionStatusResponse {
        state: session.state(),
        user: session.user().cloned(),
        base_url: ctx.config.api.origin().to_string(),
        store: session.store_source().to_string(),
        access_expires_at: session.access_expires_at(),
        access_expiring: session.access_expiring(),
    };
    output(&status, flags.format)
}
