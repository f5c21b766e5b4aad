//! Command-line front end for the media catalog.
//!
//! # Responsibility
//! - Resolve configuration from file and flags, then open the catalog.
//! - Expose read-only reports (stats, export) and bulk maintenance
//!   (positions, clear) over the core services.

use catalog_core::repo::stats_repo::CatalogStats;
use catalog_core::service::{
    book_service, episode_service, game_service, genre_service, movie_service, music_service,
    program_service, season_service, show_service, song_service,
};
use catalog_core::{
    format_length, init_logging, open_db, CatalogConfig, CatalogEntity, Episode, LogLevel, Music,
    Scope, Season, Show, Song, SqliteStatsRepository, StatsRepository, DEFAULT_CONFIG_FILE,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Personal media catalog")]
struct Cli {
    /// JSON config file; `catalog.json` in the working directory is used when
    /// present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file; overrides the config value.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print statistics of every collection.
    Stats,
    /// Print one collection as pretty JSON.
    Export { collection: Collection },
    /// Renumber positions of one collection and its children.
    Positions { collection: Collection },
    /// Remove every record of one collection.
    Clear { collection: Collection },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Collection {
    Genres,
    Movies,
    Shows,
    Games,
    Music,
    Programs,
    Books,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = resolve_config(&cli)?;
    if let Some(settings) = config.log_settings() {
        init_logging(&settings)?;
    }

    let conn = open_db(&config.db_path)?;
    match cli.command {
        Command::Stats => {
            let stats = SqliteStatsRepository::try_new(&conn)?.catalog_stats()?;
            print!("{}", render_stats(&stats));
        }
        Command::Export { collection } => {
            let value = export_collection(&conn, collection)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Positions { collection } => {
            update_positions(&conn, collection)?;
            info!("event=cli_positions module=cli status=ok collection={collection:?}");
        }
        Command::Clear { collection } => {
            clear_collection(&conn, collection)?;
            info!("event=cli_clear module=cli status=ok collection={collection:?}");
        }
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> CliResult<CatalogConfig> {
    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.parse::<LogLevel>()?;
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    config.validate()?;
    Ok(config)
}

fn render_stats(stats: &CatalogStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Genres: {}\n", stats.genres_count));
    out.push_str(&format!(
        "Movies: {} (media: {}, length: {})\n",
        stats.movies.count,
        stats.movies.media_count,
        format_length(stats.movies.total_length)
    ));
    out.push_str(&format!(
        "Shows: {} (seasons: {}, episodes: {}, length: {})\n",
        stats.shows.count,
        stats.shows.seasons_count,
        stats.shows.episodes_count,
        format_length(stats.shows.total_length)
    ));
    out.push_str(&format!(
        "Games: {} (media: {})\n",
        stats.games.count, stats.games.media_count
    ));
    out.push_str(&format!(
        "Music: {} (media: {}, songs: {}, length: {})\n",
        stats.music.count,
        stats.music.media_count,
        stats.music.songs_count,
        format_length(stats.music.total_length)
    ));
    out.push_str(&format!(
        "Programs: {} (media: {})\n",
        stats.programs.count, stats.programs.media_count
    ));
    out.push_str(&format!("Books: {}\n", stats.books_count));
    out
}

/// Show with its seasons and their episodes.
#[derive(Serialize)]
struct ShowExport {
    show: Show,
    seasons: Vec<SeasonExport>,
}

#[derive(Serialize)]
struct SeasonExport {
    season: Season,
    episodes: Vec<Episode>,
}

#[derive(Serialize)]
struct MusicExport {
    music: Music,
    songs: Vec<Song>,
}

fn export_collection(conn: &Connection, collection: Collection) -> CliResult<Value> {
    let value = match collection {
        Collection::Genres => serde_json::to_value(genre_service(conn)?.get_all(Scope::Root)?)?,
        Collection::Movies => serde_json::to_value(movie_service(conn)?.get_all(Scope::Root)?)?,
        Collection::Games => serde_json::to_value(game_service(conn)?.get_all(Scope::Root)?)?,
        Collection::Programs => {
            serde_json::to_value(program_service(conn)?.get_all(Scope::Root)?)?
        }
        Collection::Books => serde_json::to_value(book_service(conn)?.get_all(Scope::Root)?)?,
        Collection::Shows => {
            let seasons = season_service(conn)?;
            let episodes = episode_service(conn)?;
            let mut shows = Vec::new();
            for show in show_service(conn)?.get_all(Scope::Root)? {
                let mut show_seasons = Vec::new();
                for season in seasons.get_all(Scope::Parent(show.id()))? {
                    let season_episodes = episodes.get_all(Scope::Parent(season.id()))?;
                    show_seasons.push(SeasonExport {
                        season,
                        episodes: season_episodes,
                    });
                }
                shows.push(ShowExport {
                    show,
                    seasons: show_seasons,
                });
            }
            serde_json::to_value(shows)?
        }
        Collection::Music => {
            let songs = song_service(conn)?;
            let mut items = Vec::new();
            for music in music_service(conn)?.get_all(Scope::Root)? {
                let music_songs = songs.get_all(Scope::Parent(music.id()))?;
                items.push(MusicExport {
                    music,
                    songs: music_songs,
                });
            }
            serde_json::to_value(items)?
        }
    };
    Ok(value)
}

fn update_positions(conn: &Connection, collection: Collection) -> CliResult<()> {
    match collection {
        Collection::Genres => genre_service(conn)?.update_positions(Scope::Root)?,
        Collection::Movies => movie_service(conn)?.update_positions(Scope::Root)?,
        Collection::Games => game_service(conn)?.update_positions(Scope::Root)?,
        Collection::Programs => program_service(conn)?.update_positions(Scope::Root)?,
        Collection::Books => book_service(conn)?.update_positions(Scope::Root)?,
        Collection::Shows => {
            let shows = show_service(conn)?;
            let seasons = season_service(conn)?;
            let episodes = episode_service(conn)?;
            shows.update_positions(Scope::Root)?;
            for show in shows.get_all(Scope::Root)? {
                let scope = Scope::Parent(show.id());
                seasons.update_positions(scope)?;
                for season in seasons.get_all(scope)? {
                    episodes.update_positions(Scope::Parent(season.id()))?;
                }
            }
        }
        Collection::Music => {
            let music = music_service(conn)?;
            let songs = song_service(conn)?;
            music.update_positions(Scope::Root)?;
            for item in music.get_all(Scope::Root)? {
                songs.update_positions(Scope::Parent(item.id()))?;
            }
        }
    }
    Ok(())
}

fn clear_collection(conn: &Connection, collection: Collection) -> CliResult<()> {
    match collection {
        Collection::Genres => genre_service(conn)?.new_data()?,
        Collection::Movies => movie_service(conn)?.new_data()?,
        Collection::Shows => show_service(conn)?.new_data()?,
        Collection::Games => game_service(conn)?.new_data()?,
        Collection::Music => music_service(conn)?.new_data()?,
        Collection::Programs => program_service(conn)?.new_data()?,
        Collection::Books => book_service(conn)?.new_data()?,
    }
    Ok(())
}
