mod storage;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use feign::consts::{FEI_COLOR_CODES, FEI_COLORS};
use feign::css_builder::build_css;
use feign::io::app_state_io::{ExportOptions, app_state_to_json, initialize_app_state, load_json_string};
use feign::io::file::{DataType, FileError, LoaderMessage, MAX_FILE_SIZE_KB, MessageLevel, TextSource, load_text_from_file};
use feign::models::FieldError;
use feign::models::app_state::AppState;
use feign::models::channel::{
    create_url, is_valid_voice_channel_url, retrieve_channel_ids, validate_channel_name, validate_channel_url,
};
use feign::models::discord_user::{DiscordUser, validate_new_user};
use feign::state::actions;
use feign::state::store::Store;
use tracing_subscriber::EnvFilter;

use crate::storage::{FileStorage, StorageError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid field: {0}")]
    Field(#[from] FieldError),
    #[error("no selectable user with ID {0}")]
    UnknownUser(String),
    #[error("no user group named {0}")]
    UnknownGroup(String),
    #[error("nothing was imported")]
    ImportFailed,
}

#[derive(Parser, Debug)]
#[command(name = "feign", about = "Feign overlay settings and stylesheet generator")]
struct Cli {
    /// Storage file holding the saved settings.
    #[arg(long, env = "FEIGN_STORAGE", default_value = "feign-storage.json")]
    storage: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print or write the overlay stylesheet for the current group.
    Css {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the streamkit overlay URL.
    Url,
    /// Print the overlay embed size as `width height`.
    Size,
    /// List the slots of the current group.
    Players {
        /// Only occupied slots, as `id name`.
        #[arg(long, default_value_t = false)]
        active: bool,
    },
    Export(ExportArgs),
    Import(ImportArgs),
    /// Set the current voice channel URL.
    Channel { url: String },
    /// Save the current voice channel under a name.
    SaveChannel { name: String },
    /// Assign a user to a slot (0-12); an empty ID clears the slot.
    Assign {
        #[arg(value_parser = clap::value_parser!(u8).range(0..13))]
        slot: u8,
        user_id: String,
    },
    /// Select a user group; omit the name to return to all users.
    Group { name: Option<String> },
    AddUser {
        id: String,
        name: String,
        #[arg(long = "group")]
        groups: Vec<String>,
    },
    RemoveUser { id: String },
    /// Reset every setting to its default.
    Reset,
}

/// Without `--data` or `--view`, both are included.
#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long, default_value_t = false)]
    anonymize: bool,
    #[arg(long, default_value_t = false)]
    data: bool,
    #[arg(long, default_value_t = false)]
    view: bool,
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Without `--data` or `--view`, both are imported.
#[derive(Args, Debug)]
struct ImportArgs {
    file: PathBuf,
    #[arg(long, default_value_t = false)]
    data: bool,
    #[arg(long, default_value_t = false)]
    view: bool,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = Store::load(FileStorage::open(&cli.storage)?);
    let result = run(&mut store, cli.command);
    store.into_storage().save()?;
    result
}

fn run(store: &mut Store<FileStorage>, command: Command) -> Result<(), CliError> {
    match command {
        Command::Css { out } => {
            let state = store.state();
            let css = build_css(&state.feign_players.get_players(), &state.view_settings);
            emit(&css, out.as_deref())
        }
        Command::Url => {
            let state = store.state();
            validate_channel_url(&state.channel_url)?;
            let (server_id, channel_id) = retrieve_channel_ids(&state.channel_url);
            println!(
                "{}",
                create_url(server_id, channel_id, state.view_settings.streamer.show_streamer_first)
            );
            Ok(())
        }
        Command::Size => {
            let view = &store.state().view_settings;
            println!("{} {}", view.obs_width(), view.obs_height());
            Ok(())
        }
        Command::Players { active } => {
            print_players(store.state(), active);
            Ok(())
        }
        Command::Export(args) => run_export(store, args),
        Command::Import(args) => run_import(store, args),
        Command::Channel { url } => {
            store.dispatch(|s| actions::set_channel_url(s, &url));
            if !is_valid_voice_channel_url(&store.state().channel_url) {
                tracing::warn!(url = %store.state().channel_url, "not a voice channel URL");
            }
            Ok(())
        }
        Command::SaveChannel { name } => {
            let state = store.state();
            validate_channel_url(&state.channel_url)?;
            validate_channel_name(name.trim(), &state.named_channels, None)?;
            let created_at = now_millis();
            store.dispatch(|s| actions::register_channel(s, &name, created_at));
            Ok(())
        }
        Command::Assign { slot, user_id } => {
            let known = user_id.is_empty() || store.state().selectable_users().any(|u| u.id == user_id);
            if !known {
                return Err(CliError::UnknownUser(user_id));
            }
            store.dispatch(|s| actions::assign_player(s, usize::from(slot), &user_id));
            Ok(())
        }
        Command::Group { name } => {
            if let Some(group) = &name {
                if !store.state().user_groups().contains(group) {
                    return Err(CliError::UnknownGroup(group.clone()));
                }
            }
            store.dispatch(|s| actions::select_group(s, name.as_deref()));
            Ok(())
        }
        Command::AddUser { id, name, groups } => {
            validate_new_user(&name, &id, &store.state().discord_users)?;
            let name = name.trim().to_owned();
            store.dispatch(|s| actions::add_user(s, DiscordUser { id, name, groups }));
            Ok(())
        }
        Command::RemoveUser { id } => {
            if !store.state().discord_users.iter().any(|u| u.id == id) {
                return Err(CliError::UnknownUser(id));
            }
            store.dispatch(|s| actions::remove_user(s, &id));
            Ok(())
        }
        Command::Reset => {
            initialize_app_state(store);
            Ok(())
        }
    }
}

fn print_players(state: &AppState, active_only: bool) {
    if active_only {
        for user in state.active_users() {
            println!("{} {}", user.id, user.name);
        }
        return;
    }
    let slots = state.feign_players.get_players();
    let colors = FEI_COLORS.iter().zip(FEI_COLOR_CODES);
    for (slot, (id, (color, code))) in slots.iter().zip(colors).enumerate() {
        let name = state
            .discord_users
            .iter()
            .find(|u| u.id == id)
            .map_or("", |u| u.name.as_str());
        println!("{slot:>2} {color:<7} {code} {id} {name}");
    }
}

fn run_export(store: &Store<FileStorage>, args: ExportArgs) -> Result<(), CliError> {
    let both = !args.data && !args.view;
    let options = ExportOptions {
        anonymize: args.anonymize,
        include_data: args.data || both,
        include_view: args.view || both,
    };
    emit(&app_state_to_json(store.state(), options), args.out.as_deref())
}

fn run_import(store: &mut Store<FileStorage>, args: ImportArgs) -> Result<(), CliError> {
    let both = !args.data && !args.view;
    let (include_data, include_view) = (args.data || both, args.view || both);

    let mut last = LoaderMessage::info("");
    load_text_from_file(
        PathSource::open(&args.file),
        |content| load_json_string(store, content, include_data, include_view).is_ok(),
        |message| {
            if !message.message.is_empty() {
                eprintln!("{}: {}", message.level, message.message);
            }
            last = message;
        },
        "json",
        MAX_FILE_SIZE_KB,
    );
    if last.level == MessageLevel::Success {
        Ok(())
    } else {
        Err(CliError::ImportFailed)
    }
}

/// Print `content`, or write it to `out`.
fn emit(content: &str, out: Option<&Path>) -> Result<(), CliError> {
    let Some(path) = out else {
        println!("{content}");
        return Ok(());
    };
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let data_type = DataType::for_file_name(&name);
    fs::write(path, content).map_err(|source| CliError::Write {
        path: path.to_owned(),
        source,
    })?;
    tracing::info!(path = %path.display(), mime = data_type.legacy_mime, "written");
    Ok(())
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

/// A file named on the command line.
struct PathSource {
    path: PathBuf,
    name: String,
    size: u64,
}

impl PathSource {
    fn open(path: &Path) -> Result<Self, FileError> {
        let name = path.display().to_string();
        let metadata = fs::metadata(path).map_err(|source| FileError::Read {
            name: name.clone(),
            source,
        })?;
        Ok(Self {
            path: path.to_owned(),
            name,
            size: metadata.len(),
        })
    }
}

impl TextSource for PathSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn read_text(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}
