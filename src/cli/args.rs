//! CLI argument definitions using clap
//!
//! Commands:
//! - lightsaber serve [--config <path>] [--port <port>] ...
//! - lightsaber list [--color <c>] [--creator <name>] [--active <bool>]
//! - lightsaber show <id>
//! - lightsaber create --name ... --color ... --creator ... --crystal ... --hilt ...
//! - lightsaber edit <id> [--name ...] [--color ...] ...
//! - lightsaber replace <id> --name ... (all fields)
//! - lightsaber toggle <id>
//! - lightsaber delete <id>

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::DEFAULT_BASE_URL;
use crate::config::ConfigOverrides;
use crate::schema::{Color, CrystalType, HiltMaterial, LightsaberPatch, ListFilters, NewLightsaber};

/// Lightsaber records: REST server and command-line client
#[derive(Parser, Debug)]
#[command(name = "lightsaber")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the REST server
    Serve(ServeArgs),

    /// List lightsabers
    List {
        #[command(flatten)]
        server: ServerArgs,

        /// Only this blade color
        #[arg(long)]
        color: Option<Color>,

        /// Only this creator
        #[arg(long)]
        creator: Option<String>,

        /// Only active (true) or inactive (false)
        #[arg(long)]
        active: Option<bool>,
    },

    /// Show one lightsaber
    Show {
        #[command(flatten)]
        server: ServerArgs,
        id: String,
    },

    /// Create a lightsaber
    Create {
        #[command(flatten)]
        server: ServerArgs,
        #[command(flatten)]
        fields: RecordArgs,
    },

    /// Change only the given fields
    Edit {
        #[command(flatten)]
        server: ServerArgs,
        id: String,
        #[command(flatten)]
        fields: PatchArgs,
    },

    /// Replace every field (id and creation time are kept)
    Replace {
        #[command(flatten)]
        server: ServerArgs,
        id: String,
        #[command(flatten)]
        fields: RecordArgs,
    },

    /// Activate or deactivate
    Toggle {
        #[command(flatten)]
        server: ServerArgs,
        id: String,
    },

    /// Delete a lightsaber
    Delete {
        #[command(flatten)]
        server: ServerArgs,
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Path to JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Data directory for the file backend
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl ServeArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
            data_dir: self.data_dir.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// API base URL
    #[arg(long, env = "LIGHTSABER_SERVER", default_value = DEFAULT_BASE_URL)]
    pub server: String,
}

/// Every field of a record, for create and replace
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub color: Color,

    #[arg(long)]
    pub creator: String,

    /// Crystal type, e.g. "Kyber" or "Krayt Dragon Pearl"
    #[arg(long = "crystal")]
    pub crystal_type: CrystalType,

    /// Hilt material, e.g. "Beskar"
    #[arg(long = "hilt")]
    pub hilt_material: HiltMaterial,

    /// Store as deactivated
    #[arg(long)]
    pub inactive: bool,
}

impl RecordArgs {
    pub fn into_new(self) -> NewLightsaber {
        NewLightsaber {
            name: self.name,
            color: self.color,
            creator: self.creator,
            crystal_type: self.crystal_type,
            hilt_material: self.hilt_material,
            is_active: if self.inactive { Some(false) } else { None },
        }
    }
}

/// Optional fields for a partial update
#[derive(Args, Debug, Clone)]
pub struct PatchArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub color: Option<Color>,

    #[arg(long)]
    pub creator: Option<String>,

    #[arg(long = "crystal")]
    pub crystal_type: Option<CrystalType>,

    #[arg(long = "hilt")]
    pub hilt_material: Option<HiltMaterial>,

    #[arg(long)]
    pub active: Option<bool>,
}

impl PatchArgs {
    pub fn into_patch(self) -> LightsaberPatch {
        LightsaberPatch {
            name: self.name,
            color: self.color,
            creator: self.creator,
            crystal_type: self.crystal_type,
            hilt_material: self.hilt_material,
            is_active: self.active,
        }
    }
}

/// Filters from `list` flags
pub fn list_filters(
    color: Option<Color>,
    creator: Option<String>,
    active: Option<bool>,
) -> ListFilters {
    ListFilters {
        color,
        creator,
        is_active: active,
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
