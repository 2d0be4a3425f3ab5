use std::path::PathBuf;

use clap::{Parser, Subcommand};
use koleksi_core::{Category, EntryId};

#[derive(Debug, Parser)]
#[command(name = "koleksi")]
#[command(version, about = "Manage the Daarul Ilmi media collection catalog")]
#[command(
    after_help = "Environment:\n  KOLEKSI_CONFIG   Config file path (default: koleksi.toml)\n  KOLEKSI_<SECTION>__<KEY>   Override a config value, e.g. KOLEKSI_STORAGE__PATH\n  RUST_LOG         Log filter (default: info)"
)]
pub struct Cli {
    /// Config file to load
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Print entries as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog entries
    List {
        /// Only entries in this category (video, audio, hadist)
        #[arg(long)]
        category: Option<Category>,
        /// Case-insensitive match on title or presenter
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one entry
    Show { id: EntryId },
    /// Add an entry. Only the file's name is recorded.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "video")]
        category: Category,
        #[arg(long)]
        presenter: String,
        #[arg(long)]
        summary: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Edit an entry. Omitted fields keep their current value.
    Edit {
        id: EntryId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        presenter: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Remove an entry
    Remove { id: EntryId },
    /// Check whether a file is accepted for a category
    Validate {
        #[arg(long)]
        category: Category,
        file: PathBuf,
    },
    /// Entry counts per category
    Counts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "koleksi", "list", "--category", "audio", "--search", "tafsir",
        ])
        .unwrap();
        match cli.command {
            Command::List { category, search } => {
                assert_eq!(category, Some(Category::Audio));
                assert_eq!(search.as_deref(), Some("tafsir"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let result = Cli::try_parse_from(["koleksi", "list", "--category", "podcast"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["koleksi", "show", "3", "--json", "--config", "x.toml"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Command::Show { id: 3 }));
    }

    #[test]
    fn test_parse_add_defaults_to_video() {
        let cli = Cli::try_parse_from([
            "koleksi",
            "add",
            "--title",
            "Kajian",
            "--presenter",
            "Ustadz",
            "--summary",
            "Ringkas",
            "--file",
            "a.mp4",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Add {
                category: Category::Video,
                ..
            }
        ));
    }
}
