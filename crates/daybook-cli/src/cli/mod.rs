use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `dbk` binary.
#[derive(Debug, Parser)]
#[command(
    name = "dbk",
    version,
    about = "Daybook - diary, habits and daily self-reflection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{DiaryCommands, HabitCommands, ReflectCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["dbk", "--format", "json", "--limit", "10", "--verbose", "quote"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Quote));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["dbk", "calendar", "--month", "2025-02", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        let Commands::Calendar(args) = cli.command else {
            panic!("expected calendar");
        };
        assert_eq!(args.month.as_deref(), Some("2025-02"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["dbk", "--format", "xml", "quote"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn diary_edit_collects_repeated_operations() {
        let cli = Cli::try_parse_from([
            "dbk", "diary", "edit", "7", "--append", "text:more", "--remove", "0", "--move", "1:up",
            "--move", "0:down", "--set", "0=hello",
        ])
        .expect("cli should parse");

        let Commands::Diary {
            action: DiaryCommands::Edit(args),
        } = cli.command
        else {
            panic!("expected diary edit");
        };
        assert_eq!(args.id, 7);
        assert_eq!(args.append, ["text:more"]);
        assert_eq!(args.remove, [0]);
        assert_eq!(args.moves, ["1:up", "0:down"]);
        assert_eq!(args.set, ["0=hello"]);
    }

    #[test]
    fn habit_log_defaults_value_to_one() {
        let cli = Cli::try_parse_from(["dbk", "habit", "log", "3"]).expect("cli should parse");
        let Commands::Habit {
            action: HabitCommands::Log { id, value, notes },
        } = cli.command
        else {
            panic!("expected habit log");
        };
        assert_eq!((id, value, notes), (3, 1, None));
    }

    #[test]
    fn reflect_submit_accepts_answers() {
        let cli = Cli::try_parse_from([
            "dbk", "reflect", "submit", "--answer", "1=7", "--answer", "2=good", "--date", "2025-03-01",
        ])
        .expect("cli should parse");
        let Commands::Reflect {
            action: ReflectCommands::Submit { answers, date, .. },
        } = cli.command
        else {
            panic!("expected reflect submit");
        };
        assert_eq!(answers, ["1=7", "2=good"]);
        assert_eq!(date.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn reflect_history_range_is_optional_but_paired() {
        let cli = Cli::try_parse_from(["dbk", "reflect", "history"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Reflect {
                action: ReflectCommands::History { from: None, to: None },
            }
        ));

        let cli = Cli::try_parse_from(["dbk", "reflect", "history", "2025-03-01", "2025-03-07"])
            .expect("cli should parse");
        let Commands::Reflect {
            action: ReflectCommands::History { from, to },
        } = cli.command
        else {
            panic!("expected reflect history");
        };
        assert_eq!(from.as_deref(), Some("2025-03-01"));
        assert_eq!(to.as_deref(), Some("2025-03-07"));
    }

    #[test]
    fn habit_log_edit_takes_optional_fields() {
        let cli = Cli::try_parse_from(["dbk", "habit", "log-edit", "9", "--value", "4"])
            .expect("cli should parse");
        let Commands::Habit {
            action: HabitCommands::LogEdit { id, value, notes },
        } = cli.command
        else {
            panic!("expected habit log-edit");
        };
        assert_eq!((id, value, notes), (9, Some(4), None));
    }
}
