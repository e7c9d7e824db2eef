use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use torrent_meta::bencode::{Decoder, DecoderConfig, DEFAULT_MAX_DEPTH};
use torrent_meta::torrent::{load_torrent_file, TorrentInfo};
use tracing::info;

#[derive(Parser)]
#[command(name = "torrent-meta")]
#[command(about = "Decode bencoded values and inspect .torrent files", long_about = None)]
pub struct Cli {
    /// Maximum nesting of lists and dictionaries accepted by the decoder
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a bencoded value and print it as JSON
    Decode {
        /// The bencoded value, taken as raw bytes
        value: OsString,
    },

    /// Show information about a torrent file
    Info {
        /// Path to the .torrent file
        torrent: PathBuf,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn run(&self) -> Result<()> {
        let decoder = Decoder::new(DecoderConfig {
            max_depth: self.max_depth,
        });

        match &self.command {
            Commands::Decode { value } => {
                let decoded = decoder
                    .decode(value.as_encoded_bytes())
                    .context("failed to decode value")?;
                println!("{}", serde_json::to_string(&decoded)?);
            }

            Commands::Info { torrent } => {
                self.show_torrent_info(torrent, &decoder).await?;
            }
        }

        Ok(())
    }

    async fn show_torrent_info(&self, torrent_path: &Path, decoder: &Decoder) -> Result<()> {
        info!("Reading torrent: {}", torrent_path.display());

        let metainfo: TorrentInfo = load_torrent_file(torrent_path, decoder)
            .await
            .with_context(|| format!("failed to load {}", torrent_path.display()))?;

        println!("Tracker URL: {}", metainfo.tracker_url());
        println!("Length: {}", metainfo.length);
        println!("Info Hash: {}", metainfo.info_hash_hex());
        println!("Piece Length: {}", metainfo.piece_length);
        println!("Piece Hashes:");

        for hash in metainfo.pieces.iter() {
            println!("{}", hash.hex());
        }

        Ok(())
    }
}
