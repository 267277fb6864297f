//! # Codex CLI (`codex`)
//!
//! Local front end for the Codex Machina core: manage atoms and source texts
//! in a SQLite file and ask for related-content suggestions.
//!
//! ```bash
//! codex init
//! codex text add --title "Simulacra and Simulation" --author "Jean Baudrillard"
//! codex atom add --title "Hyperreality" --body "signs without referents" --type idea
//! codex suggest --title "Simulation and signs" --json
//! codex related 11111111-2222-4333-8444-555555555555
//! ```

mod config;
mod output;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use codex_core::db::{open_db, Connection};
use codex_core::{
    extract_keywords, init_logging, AtomListQuery, AtomService, AtomType, CreateAtomRequest,
    LogLevel, ModerationStatus, RelatedRequest, ScoreInput, SqliteAtomRepository,
    SqliteCandidateSource, SqliteTextRepository, SuggestionService, TextService, TextType,
};
use config::{load_config, Config};
use std::path::PathBuf;
use uuid::Uuid;

/// Codex Machina: atomic notes, source texts and related-content suggestions.
#[derive(Parser)]
#[command(name = "codex", version)]
struct Cli {
    /// Path to configuration file (TOML). Defaults to `./codex.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `[db] path` from the config file.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and apply schema migrations. Idempotent.
    Init,

    /// Manage source texts.
    #[command(subcommand)]
    Text(TextCommand),

    /// Manage atoms.
    #[command(subcommand)]
    Atom(AtomCommand),

    /// Suggest notes and texts related to a draft.
    Suggest(SuggestArgs),

    /// Suggest notes and texts related to a stored atom.
    Related {
        id: Uuid,
        /// Maximum number of notes (texts are always capped by config).
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },

    /// Print the keywords extracted from a text.
    Keywords { text: String },
}

#[derive(Subcommand)]
enum TextCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long = "type", default_value = "book", value_parser = parse_text_type)]
        kind: TextType,
    },
    List {
        /// Include archived texts.
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    Archive { id: Uuid },
}

#[derive(Subcommand)]
enum AtomCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long = "type", default_value = "idea", value_parser = parse_atom_type)]
        kind: AtomType,
        /// Cited source text.
        #[arg(long)]
        text: Option<Uuid>,
    },
    List {
        /// Include rejected and hidden atoms.
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Record a moderation decision (pending|approved|rejected).
    Moderate {
        id: Uuid,
        #[arg(value_parser = parse_status)]
        status: ModerationStatus,
    },
    Hide {
        id: Uuid,
        /// Make the atom visible again.
        #[arg(long)]
        undo: bool,
    },
}

#[derive(Args)]
struct SuggestArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    body: String,
    #[arg(long = "type", value_parser = parse_atom_type)]
    kind: Option<AtomType>,
    /// Source text the draft cites.
    #[arg(long)]
    text: Option<Uuid>,
    /// Atom never suggested, e.g. the one being edited.
    #[arg(long)]
    exclude: Option<Uuid>,
    #[arg(long)]
    limit: Option<usize>,
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.db.path = db;
    }
    start_logging(&config)?;

    match cli.command {
        Commands::Init => {
            open(&config)?;
            println!("Database ready: {}", config.db.path.display());
        }
        Commands::Text(command) => run_text(&config, command)?,
        Commands::Atom(command) => run_atom(&config, command)?,
        Commands::Suggest(args) => {
            let conn = open(&config)?;
            let service = suggestion_service(&conn, &config)?;
            let request = RelatedRequest {
                input: ScoreInput {
                    title: args.title,
                    body: args.body,
                    kind: args.kind,
                    text_uuid: args.text,
                },
                exclude: args.exclude,
                note_limit: args.limit,
            };
            output::print_related(&service.related_for_draft(&request), args.json)?;
        }
        Commands::Related { id, limit, json } => {
            let conn = open(&config)?;
            let atoms = AtomService::new(SqliteAtomRepository::try_new(&conn)?);
            let Some(atom) = atoms.get_atom(id)? else {
                bail!("atom not found: {id}");
            };
            let service = suggestion_service(&conn, &config)?;
            output::print_related(&service.related_for_atom(&atom, limit), json)?;
        }
        Commands::Keywords { text } => {
            for keyword in extract_keywords(&text) {
                println!("{keyword}");
            }
        }
    }

    Ok(())
}

fn run_text(config: &Config, command: TextCommand) -> Result<()> {
    let conn = open(config)?;
    let service = TextService::new(SqliteTextRepository::try_new(&conn)?);
    match command {
        TextCommand::Add {
            title,
            author,
            kind,
        } => {
            let text = service.add_text(kind, title, author)?;
            println!("{}", text.uuid);
        }
        TextCommand::List { all, json } => {
            output::print_texts(&service.list_texts(all)?, json)?;
        }
        TextCommand::Archive { id } => {
            service.archive(id)?;
            println!("Archived {id}");
        }
    }
    Ok(())
}

fn run_atom(config: &Config, command: AtomCommand) -> Result<()> {
    let conn = open(config)?;
    let service = AtomService::new(SqliteAtomRepository::try_new(&conn)?);
    match command {
        AtomCommand::Add {
            title,
            body,
            kind,
            text,
        } => {
            let atom = service.create_atom(&CreateAtomRequest {
                kind,
                title,
                body,
                text_uuid: text,
            })?;
            println!("{}", atom.uuid);
        }
        AtomCommand::List { all, json } => {
            let query = if all {
                AtomListQuery::default()
            } else {
                AtomListQuery::visible()
            };
            output::print_atoms(&service.list_atoms(&query)?, json)?;
        }
        AtomCommand::Moderate { id, status } => {
            service.moderate(id, status)?;
            println!("{id} -> {}", status.as_str());
        }
        AtomCommand::Hide { id, undo } => {
            if undo {
                service.unhide(id)?;
            } else {
                service.hide(id)?;
            }
        }
    }
    Ok(())
}

fn open(config: &Config) -> Result<Connection> {
    open_db(&config.db.path)
        .with_context(|| format!("Failed to open database: {}", config.db.path.display()))
}

fn suggestion_service<'conn>(
    conn: &'conn Connection,
    config: &Config,
) -> Result<SuggestionService<SqliteCandidateSource<'conn>>> {
    let source = SqliteCandidateSource::try_new(conn)?;
    Ok(SuggestionService::new(source, config.suggest.clone())?)
}

fn start_logging(config: &Config) -> Result<()> {
    let Some(dir) = &config.logging.dir else {
        return Ok(());
    };
    let dir = if dir.is_absolute() {
        dir.clone()
    } else {
        std::env::current_dir()
            .context("Failed to resolve current directory")?
            .join(dir)
    };
    let level = match &config.logging.level {
        Some(level) => level.clone(),
        None => LogLevel::build_default().as_str().to_string(),
    };
    let dir = dir
        .to_str()
        .with_context(|| format!("Log directory is not valid UTF-8: {}", dir.display()))?;
    init_logging(&level, dir)?;
    Ok(())
}

fn parse_atom_type(value: &str) -> Result<AtomType, String> {
    AtomType::parse(&value.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown atom type `{value}`; expected idea|question|quote|insight"))
}

fn parse_text_type(value: &str) -> Result<TextType, String> {
    TextType::parse(&value.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown text type `{value}`; expected book|article|paper|video|other"))
}

fn parse_status(value: &str) -> Result<ModerationStatus, String> {
    ModerationStatus::parse(&value.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown status `{value}`; expected pending|approved|rejected"))
}
