use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with email and password.
    Login(AuthLoginArgs),
    /// Create an account and log in.
    Register(AuthRegisterArgs),
    /// Invalidate the refresh token and clear stored credentials.
    Logout,
    /// Show current session state.
    Status,
    /// Change the account password.
    ChangePassword(ChangePasswordArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Replace a session that is still valid.
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub password: String,
    /// Confirmation; defaults to `--password`.
    #[arg(long)]
    pub password_confirm: Option<String>,
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ChangePasswordArgs {
    #[arg(long)]
    pub old: String,
    #[arg(long)]
    pub new: String,
}
