pub mod cli;
pub mod config;
pub mod console;
pub mod installer;
pub mod layout;
pub mod prereq;
pub mod resolver;
pub mod setup;

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Resolver errors
    #[error("cannot resolve plugin '{reference}': {reason}")]
    NameResolution { reference: String, reason: String },

    // Network errors
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    // External tool errors
    #[error("`{tool} {}` exited with {status}", .args.join(" "))]
    ExternalTool {
        tool: String,
        args: Vec<String>,
        status: ExitStatus,
    },

    #[error("failed to run `{tool}`: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing prerequisite(s): {}", .0.join(", "))]
    MissingPrerequisites(Vec<String>),

    // Config errors
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("failed to parse settings in {path}: {reason}")]
    SettingsParse { path: PathBuf, reason: String },

    // Filesystem errors
    #[error("failed to create directory {path}: {source}")]
    DirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Git errors
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
