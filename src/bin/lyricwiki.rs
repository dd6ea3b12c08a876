//! Command-line scraper printing discographies and lyrics as JSON.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use lyricwiki_rs::common::initialize_logging;
use lyricwiki_rs::error::{ExpectedError, LyricWikiError};
use lyricwiki_rs::{Config, Encoding, LyricWiki, ScrapeOptions};

#[derive(Parser, Debug)]
#[command(name = "lyricwiki")]
#[command(about = "Scrape artists, albums and lyrics from the lyrics wiki")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "LYRICWIKI_CONFIG")]
    config: Option<PathBuf>,

    /// User agent sent with every request
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Seconds to wait before every request
    #[arg(long, global = true)]
    sleep: Option<f64>,

    /// Log every page visited
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Transliterate the output to ASCII
    #[arg(long, global = true)]
    ascii: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Scope {
    /// Include songs by other artists (covers, features)
    #[arg(long)]
    cover: bool,

    /// Include compilations, remixes and other releases
    #[arg(long)]
    other: bool,
}

impl Scope {
    fn options(&self) -> ScrapeOptions {
        ScrapeOptions { cover: self.cover, other: self.other }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full discography of an artist, with lyrics
    Discography {
        artist: String,
        #[command(flatten)]
        scope: Scope,
    },
    /// Albums of an artist with their track listings
    Albums {
        artist: String,
        #[command(flatten)]
        scope: Scope,
    },
    /// Lyrics of every song of an artist
    Lyrics {
        artist: String,
        #[command(flatten)]
        scope: Scope,
    },
    /// A single song with its lyrics
    Song { artist: String, song: String },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match Config::parse(cli.config.as_deref()) {
        Ok(config) => config,
        Err(LyricWikiError::Expected(ExpectedError::ConfigNotFound { path })) if cli.config.is_none() => {
            debug!("No configuration file at {}, using defaults", path.display());
            Config::default()
        }
        Err(e) => return Err(e).context("Failed to load configuration"),
    };
    let verbose = cli.verbose || config.verbose;
    let mut config = config.with_user_agent(cli.user_agent.as_deref()).with_verbose(verbose);
    if let Some(sleep) = cli.sleep {
        anyhow::ensure!(sleep.is_finite() && sleep >= 0.0, "--sleep must be a non-negative number of seconds");
        config = config.with_sleep(Duration::from_secs_f64(sleep));
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(None, "stderr")?;

    let config = load_config(&cli)?;
    let encoding = if cli.ascii { Encoding::Ascii } else { Encoding::Unicode };
    let wiki = LyricWiki::new(config);

    let value = match &cli.command {
        Command::Discography { artist, scope } => wiki.get_discography(artist, scope.options(), encoding)?,
        Command::Albums { artist, scope } => {
            let albums = wiki
                .get_albums(artist, scope.options())
                .into_iter()
                .map(|mut album| album.to_json(wiki.fetcher(), encoding))
                .collect::<lyricwiki_rs::Result<Vec<_>>>()?;
            serde_json::Value::Array(albums)
        }
        Command::Lyrics { artist, scope } => {
            let entries = wiki.get_lyrics(artist, scope.options());
            lyricwiki_rs::serialize::to_json_value(&entries, encoding)?
        }
        Command::Song { artist, song } => wiki.search_song(artist, song).to_json(wiki.fetcher(), encoding)?,
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
