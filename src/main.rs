use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wall_core::config::{
    countdown_target_from_env_value, like_set_key_from_env_value, page_size_from_env_value,
    placeholder_name_from_env_value,
};
use wall_core::constants::{DEFAULT_DATA_DIR, SHARE_TITLE};
use wall_core::{
    share_text, CoreConfig, Countdown, FileStore, FilterCriteria, KeyValueStore, MediaKind,
    Story, StoryId, StoryInput, StoryStore,
};

const DEFAULT_PAGE_URL: &str = "https://wall.example/";

#[derive(Parser)]
#[command(name = "story-wall")]
#[command(about = "Browse, submit and like stories on the wall")]
struct Cli {
    /// Directory holding the like-set (overrides WALL_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// List stories, newest first
    List {
        /// Only stories from this region
        #[arg(long)]
        region: Option<String>,
        /// Only stories of this kind (text, photo, video)
        #[arg(long)]
        kind: Option<MediaKind>,
        /// Number of pages to reveal
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// Print stories as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single story
    Show {
        id: StoryId,
        #[arg(long)]
        json: bool,
    },
    /// Like a story, or unlike it if already liked
    Like { id: StoryId },
    /// Print share text for a story
    Share {
        id: StoryId,
        /// Page URL appended to the share text
        #[arg(long, default_value = DEFAULT_PAGE_URL)]
        url: String,
    },
    /// Show wall totals
    Stats,
    /// Show time left until the target date
    Countdown,
    /// Submit a story for this session and show the first page
    Submit {
        /// Display name (placeholder used when omitted)
        #[arg(long)]
        name: Option<String>,
        region: String,
        text: String,
        /// Photo reference
        #[arg(long)]
        photo: Option<String>,
        /// Video reference
        #[arg(long)]
        video: Option<String>,
    },
}

/// Entry point for the story wall terminal view.
///
/// Every invocation seeds the sample stories and opens the file-backed like-set, so likes
/// survive between runs while submitted stories only live for the run that submitted them.
///
/// # Environment Variables
/// - `WALL_DATA_DIR`: directory for the like-set file (default: "wall_data")
/// - `WALL_PAGE_SIZE`: stories per page (default: 6)
/// - `WALL_PLACEHOLDER_NAME`: name used for anonymous submissions
/// - `WALL_LIKE_SET_KEY`: storage key of the like-set (default: "likedStories")
/// - `WALL_COUNTDOWN_TARGET`: RFC 3339 countdown target (default: "2025-09-23T00:00:00Z")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("story_wall=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config_from_env()?;

    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var("WALL_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let storage = FileStore::new(&data_dir)
        .with_context(|| format!("cannot use data directory {}", data_dir.display()))?;

    tracing::debug!("using data directory {}", data_dir.display());

    let mut store = StoryStore::seeded(config, storage)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(command) => run(command, &mut store, &mut out),
        None => {
            writeln!(out, "Use 'story-wall --help' for commands")?;
            Ok(())
        }
    }
}

fn config_from_env() -> anyhow::Result<CoreConfig> {
    let env = |name: &str| std::env::var(name).ok();

    let config = CoreConfig::new(
        page_size_from_env_value(env("WALL_PAGE_SIZE"))?,
        placeholder_name_from_env_value(env("WALL_PLACEHOLDER_NAME")),
        like_set_key_from_env_value(env("WALL_LIKE_SET_KEY")),
        countdown_target_from_env_value(env("WALL_COUNTDOWN_TARGET"))?,
    )?;

    Ok(config)
}

fn run<S: KeyValueStore>(
    command: Commands,
    store: &mut StoryStore<S>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::List {
            region,
            kind,
            pages,
            json,
        } => {
            store.set_filter(FilterCriteria {
                region,
                media_kind: kind,
            });
            for _ in 1..pages {
                store.next_page();
            }
            write_page(store, json, out)?;
        }
        Commands::Show { id, json } => {
            let story = store
                .story(id)
                .with_context(|| format!("no story with id {id}"))?;
            if json {
                let view = StoryView::new(store, story);
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                write_card(store, story, true, out)?;
            }
        }
        Commands::Like { id } => match store.toggle_like(id) {
            Some(toggle) if toggle.liked => {
                writeln!(out, "Liked story {} ({} likes)", id, toggle.like_count)?
            }
            Some(toggle) => writeln!(out, "Unliked story {} ({} likes)", id, toggle.like_count)?,
            None => writeln!(out, "No story with id {id}")?,
        },
        Commands::Share { id, url } => {
            let story = store
                .story(id)
                .with_context(|| format!("no story with id {id}"))?;
            writeln!(out, "{}", SHARE_TITLE)?;
            writeln!(out, "{}", share_text(story, &url))?;
        }
        Commands::Stats => {
            let stats = store.stats();
            writeln!(out, "Stories: {}", stats.total_stories)?;
            writeln!(out, "Likes: {}", stats.total_likes)?;
        }
        Commands::Countdown => {
            let countdown = Countdown::until(store.config().countdown_target(), Utc::now());
            writeln!(
                out,
                "{} days, {} hours, {} minutes",
                countdown.days, countdown.hours, countdown.minutes
            )?;
        }
        Commands::Submit {
            name,
            region,
            text,
            photo,
            video,
        } => {
            let story = store.add_story(StoryInput {
                name,
                region,
                text,
                photo,
                video,
            });
            tracing::info!("++ Submitted story {}", story.id());
            writeln!(out, "Story {} submitted.", story.id())?;
            write_page(store, false, out)?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct StoryView<'a> {
    #[serde(flatten)]
    story: &'a Story,
    media_kind: MediaKind,
    liked: bool,
}

impl<'a> StoryView<'a> {
    fn new<S: KeyValueStore>(store: &StoryStore<S>, story: &'a Story) -> Self {
        Self {
            story,
            media_kind: story.media_kind(),
            liked: store.is_liked(story.id()),
        }
    }
}

fn write_page<S: KeyValueStore>(
    store: &StoryStore<S>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let visible = store.visible_stories();

    if json {
        let views: Vec<StoryView> = visible.iter().map(|s| StoryView::new(store, s)).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&views)?)?;
        return Ok(());
    }

    if visible.is_empty() {
        if store.filter().is_unrestricted() {
            writeln!(out, "No stories found.")?;
        } else {
            writeln!(out, "No stories match the filter.")?;
        }
        return Ok(());
    }

    for story in &visible {
        write_card(store, story, false, out)?;
    }

    writeln!(
        out,
        "Showing {} of {} stories{}",
        visible.len(),
        store.filtered_len(),
        if store.has_more() {
            " (use --pages to see more)"
        } else {
            ""
        }
    )?;
    Ok(())
}

fn write_card<S: KeyValueStore>(
    store: &StoryStore<S>,
    story: &Story,
    detailed: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let heart = if store.is_liked(story.id()) { "♥" } else { "♡" };
    writeln!(
        out,
        "[{}] {} · {} · {} · {} {}",
        story.id(),
        story.name(),
        story.region(),
        story.media_kind(),
        heart,
        story.like_count()
    )?;
    writeln!(out, "    {}", story.text())?;

    if detailed {
        if let Some(media) = story.media() {
            writeln!(out, "    {}: {}", media.kind(), media.url())?;
        }
        writeln!(out, "    {}", story.created_at().format("%Y-%m-%d"))?;
    }

    Ok(())
}
