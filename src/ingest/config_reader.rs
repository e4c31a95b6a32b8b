use crate::ingest::*;
use snafu::prelude::*;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INPUT_ROOT: &str = "data/raw";
pub const DEFAULT_OUTPUT_ROOT: &str = "data/processed";

/// The content of a configuration file. All the fields are optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "inputRoot")]
    pub input_root: Option<String>,
    #[serde(rename = "outputRoot")]
    pub output_root: Option<String>,
    #[serde(rename = "identityKey")]
    pub identity_key: Option<String>,
    #[serde(rename = "skipProceduralOnlyEvents")]
    pub skip_procedural_only_events: Option<bool>,
}

/// The settings of one run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SessionConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub identity_key: IdentityKeyMode,
    pub skip_procedural_only_events: bool,
}

impl SessionConfig {
    /// The directory holding the vote files of a session.
    pub fn session_input_dir(&self, session: &str) -> PathBuf {
        self.input_root.join(session)
    }

    /// Where the table of a session is written.
    pub fn table_path(&self, session: &str) -> PathBuf {
        self.output_root.join(io_common::table_file_name(session))
    }
}

pub fn read_config_file(path: &str) -> IngestResult<ConfigFile> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: ConfigFile =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    debug!("read_config_file: {:?}", config);
    Ok(config)
}

/// Combines the configuration file (if any) with the command line overrides.
pub fn resolve_config(
    file: Option<ConfigFile>,
    input_root: Option<String>,
    output_root: Option<String>,
    identity_key: Option<String>,
) -> IngestResult<SessionConfig> {
    let file = file.unwrap_or_default();
    let identity_key = match identity_key.or(file.identity_key) {
        Some(s) => parse_identity_key(&s)?,
        None => IdentityKeyMode::default(),
    };
    Ok(SessionConfig {
        input_root: PathBuf::from(
            input_root
                .or(file.input_root)
                .unwrap_or_else(|| DEFAULT_INPUT_ROOT.to_string()),
        ),
        output_root: PathBuf::from(
            output_root
                .or(file.output_root)
                .unwrap_or_else(|| DEFAULT_OUTPUT_ROOT.to_string()),
        ),
        identity_key,
        skip_procedural_only_events: file.skip_procedural_only_events.unwrap_or(false),
    })
}

fn parse_identity_key(s: &str) -> IngestResult<IdentityKeyMode> {
    match s {
        "displayName" => Ok(IdentityKeyMode::DisplayName),
        "legislatorId" => Ok(IdentityKeyMode::LegislatorId),
        x => whatever!(
            "Unknown identity key {:?}: expected displayName or legislatorId",
            x
        ),
    }
}
