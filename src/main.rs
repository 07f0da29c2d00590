// ElasChat - main.rs
//
// Command-line front end. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation (debug mode support)
// 3. Dispatch to the display transforms, screen views, and auth session

use clap::{Parser, Subcommand, ValueEnum};
use elaschat::app::discover;
use elaschat::app::session::{AuthSession, ProfileUpdate, SignupForm};
use elaschat::app::views::{self, ViewContext};
use elaschat::core::catalog::Catalog;
use elaschat::core::count::try_format_count;
use elaschat::core::identity::{identity, AvatarIdentity};
use elaschat::core::model::{Chat, Notification, NotificationKind};
use elaschat::core::relative_time::{parse_timestamp, time_ago_with};
use elaschat::platform::config::{self, AppConfig, PlatformPaths};
use elaschat::platform::storage::KeyValueStore;
use elaschat::util;
use elaschat::util::error::{ElasChatError, SessionError};
use serde::Serialize;
use std::path::PathBuf;

/// ElasChat - display core for the short-video client.
///
/// Derives avatar identities, relative ages, and compact counts, searches
/// the bundled catalogue, and manages the local sign-in session.
#[derive(Parser, Debug)]
#[command(name = "elaschat", version, about)]
struct Cli {
    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Directory for config.toml and local storage (overrides platform dirs).
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    /// Print rows as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Avatar colour and initials for a display name.
    Avatar { name: String },

    /// Compact form of a count (1.5K, 2.3M).
    Count {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Relative age of an ISO-8601 timestamp.
    Ago {
        timestamp: String,

        /// Reference instant instead of the system clock.
        #[arg(long)]
        now: Option<String>,
    },

    /// Search the catalogue the way the discover and messages tabs do.
    Search {
        #[arg(value_enum)]
        scope: SearchScope,
        query: String,
    },

    /// Trending hashtag chips from the discover tab.
    Trending {
        /// Run the chip at this 1-based position as a video search.
        #[arg(long)]
        select: Option<usize>,
    },

    /// Home feed cards.
    Feed,

    /// Comments under a video.
    Comments { video_id: String },

    /// Inbox rows.
    Chats,

    /// Messages in one chat.
    Messages { chat_id: String },

    /// Activity notifications.
    Notifications {
        /// Only show one kind.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Profile header; defaults to the signed-in user.
    Profile { user_id: Option<String> },

    /// Local sign-in session.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    /// Show the signed-in user.
    Status,

    /// Create an account on this device and sign in.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        username: String,
        #[arg(long = "display-name")]
        display_name: String,
    },

    /// Sign in with the account stored on this device.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign out.
    Logout,

    /// Edit the signed-in user's profile.
    Update {
        #[arg(long = "display-name")]
        display_name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long = "avatar-url")]
        avatar_url: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SearchScope {
    Videos,
    Users,
    Chats,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Like,
    Comment,
    Follow,
    Mention,
}

impl From<KindArg> for NotificationKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Like => NotificationKind::Like,
            KindArg::Comment => NotificationKind::Comment,
            KindArg::Follow => NotificationKind::Follow,
            KindArg::Mention => NotificationKind::Mention,
        }
    }
}

/// `avatar` output, tagged with the palette it was derived from.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvatarOutput {
    name: String,
    palette_version: u32,
    #[serde(flatten)]
    identity: AvatarIdentity,
}

/// Everything a command needs, resolved once at startup.
struct Runtime {
    config: AppConfig,
    paths: PlatformPaths,
    catalog: Catalog,
    json: bool,
}

impl Runtime {
    fn view_context(&self) -> ViewContext {
        ViewContext {
            time_options: self.config.time_ago_options(),
            ..ViewContext::now()
        }
    }

    fn open_session(&self) -> AuthSession {
        let store = KeyValueStore::open(self.config.store_path(&self.paths.data_dir));
        AuthSession::load(store)
    }

    /// Print `rows` as JSON, or each via `line` as text.
    fn emit<T: Serialize>(&self, rows: &[T], line: impl Fn(&T) -> String) {
        if self.json {
            match serde_json::to_string_pretty(rows) {
                Ok(s) => println!("{s}"),
                Err(e) => tracing::error!(error = %e, "Failed to serialise output"),
            }
        } else {
            for row in rows {
                println!("{}", line(row));
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(ref dir) => PlatformPaths::single(dir),
        None => PlatformPaths::resolve(),
    };
    let (config, config_warnings) = config::load_config(&paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "ElasChat starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let runtime = Runtime {
        config,
        paths,
        catalog: Catalog::mock(),
        json: cli.json,
    };

    if let Err(e) = run(cli.command, &runtime) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, rt: &Runtime) -> Result<(), ElasChatError> {
    match command {
        Command::Avatar { name } => {
            let out = AvatarOutput {
                identity: identity(&name),
                name,
                palette_version: util::constants::PALETTE_VERSION,
            };
            rt.emit(std::slice::from_ref(&out), |o| {
                format!("{} {}", o.identity.background_color, o.identity.initials)
            });
        }

        Command::Count { value } => {
            println!("{}", try_format_count(value)?);
        }

        Command::Ago { timestamp, now } => {
            let now = match now {
                Some(raw) => parse_timestamp(&raw)?,
                None => chrono::Utc::now(),
            };
            println!(
                "{}",
                time_ago_with(&timestamp, now, &rt.config.time_ago_options())?
            );
        }

        Command::Search { scope, query } => {
            let ctx = rt.view_context();
            match scope {
                SearchScope::Videos => {
                    let found = discover::search_videos(&rt.catalog, &query);
                    let cards = views::video_cards(&rt.catalog, &found, &ctx);
                    rt.emit(&cards, |c| format!("{}  {}  {}", c.id, c.author.handle, c.caption));
                }
                SearchScope::Users => {
                    let found: Vec<_> = discover::search_users(&rt.catalog, &query)
                        .into_iter()
                        .map(views::badge)
                        .collect();
                    rt.emit(&found, |b| {
                        format!("{} {}  {}", b.avatar.initials, b.display_name, b.handle)
                    });
                }
                SearchScope::Chats => {
                    let found = discover::search_chats(&rt.catalog, &query);
                    let rows = views::chat_rows(&rt.catalog, &found, &ctx);
                    rt.emit(&rows, |r| {
                        format!("{}  {}", r.participant.display_name, r.last_message)
                    });
                }
            }
        }

        Command::Trending { select } => {
            let chips = views::trending(&rt.catalog);
            match select {
                None => rt.emit(&chips, |c| format!("{}  {} posts", c.label, c.posts)),
                Some(n) => {
                    let Some(chip) = n.checked_sub(1).and_then(|i| chips.get(i)) else {
                        println!("No trending tag at position {n}");
                        return Ok(());
                    };
                    let found = discover::search_videos(&rt.catalog, &chip.tag);
                    let cards = views::video_cards(&rt.catalog, &found, &rt.view_context());
                    rt.emit(&cards, |c| {
                        format!("{}  {}  {}", c.id, c.author.handle, c.caption)
                    });
                }
            }
        }

        Command::Feed => {
            let cards = views::feed(&rt.catalog, &rt.view_context());
            rt.emit(&cards, |c| {
                format!(
                    "[{} {}] {} {}  | {} likes, {} comments, {} shares | {}\n    {}",
                    c.author.avatar.background_color,
                    c.author.avatar.initials,
                    c.author.display_name,
                    c.author.handle,
                    c.likes,
                    c.comments,
                    c.shares,
                    c.age,
                    c.caption
                )
            });
        }

        Command::Comments { video_id } => {
            let rows = views::comments(&rt.catalog, &video_id, &rt.view_context());
            rt.emit(&rows, |r| {
                format!("{} ({}): {}  [{} likes]", r.author.display_name, r.age, r.text, r.likes)
            });
        }

        Command::Chats => {
            let chats: Vec<&Chat> = rt.catalog.chats.iter().collect();
            let rows = views::chat_rows(&rt.catalog, &chats, &rt.view_context());
            rt.emit(&rows, |r| {
                let badge = r
                    .unread_badge
                    .as_deref()
                    .map(|b| format!(" ({b})"))
                    .unwrap_or_default();
                format!("{}{}  {}  {}", r.participant.display_name, badge, r.last_message, r.age)
            });
        }

        Command::Messages { chat_id } => {
            let rows = views::messages(&rt.catalog, &chat_id, &rt.view_context());
            rt.emit(&rows, |r| {
                let arrow = if r.outgoing { ">>" } else { "<<" };
                format!("{arrow} {}  ({})", r.text, r.age)
            });
        }

        Command::Notifications { kind } => {
            let selected: Vec<&Notification> = match kind {
                Some(k) => rt.catalog.notifications_of_kind(k.into()),
                None => rt.catalog.notifications.iter().collect(),
            };
            let rows = views::notification_rows(&rt.catalog, &selected, &rt.view_context());
            rt.emit(&rows, |r| {
                let marker = if r.unread { "*" } else { " " };
                format!("{marker} {}  {}", r.text, r.age)
            });
        }

        Command::Profile { user_id } => {
            let session;
            let user = match user_id {
                Some(ref id) => rt.catalog.user(id),
                None => {
                    session = rt.open_session();
                    session.current_user()
                }
            };
            match user {
                Some(user) => {
                    let header = views::profile(&rt.catalog, user, &rt.view_context());
                    rt.emit(std::slice::from_ref(&header), |h| {
                        format!(
                            "{} {}\n{}\n{} followers  {} following  {} posts  ({} videos)",
                            h.badge.display_name,
                            h.badge.handle,
                            h.bio,
                            h.followers,
                            h.following,
                            h.posts,
                            h.videos.len()
                        )
                    });
                }
                None if user_id.is_some() => {
                    println!("No such user");
                }
                None => return Err(SessionError::NotSignedIn.into()),
            }
        }

        Command::Session { action } => run_session(action, rt)?,
    }
    Ok(())
}

fn run_session(action: SessionAction, rt: &Runtime) -> Result<(), ElasChatError> {
    let mut session = rt.open_session();

    match action {
        SessionAction::Status => match session.current_user() {
            Some(user) => println!("Signed in as {} ({})", user.display_name, user.handle()),
            None if session.has_account() => println!("Signed out (account on this device)"),
            None => println!("Signed out"),
        },

        SessionAction::Signup {
            email,
            password,
            username,
            display_name,
        } => {
            let form = SignupForm {
                email,
                password,
                username,
                display_name,
            };
            let user = session.signup(&form)?;
            println!("Welcome, {} ({})", user.display_name, user.handle());
        }

        SessionAction::Login { email, password } => {
            let user = session.login(&email, &password)?;
            println!("Signed in as {} ({})", user.display_name, user.handle());
        }

        SessionAction::Logout => {
            session.logout()?;
            println!("Signed out");
        }

        SessionAction::Update {
            display_name,
            username,
            bio,
            avatar_url,
        } => {
            let user = session.update_user(ProfileUpdate {
                display_name,
                username,
                bio,
                avatar_url,
            })?;
            println!("Updated {} ({})", user.display_name, user.handle());
        }
    }
    Ok(())
}
