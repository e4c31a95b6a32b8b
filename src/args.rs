use clap::Parser;

/// Builds the vote table of a legislative session from its roll-call vote files.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// The session identifier, for example `113`. The vote files are read from
    /// <input root>/<session> and the table is written to <output root>/<session>_dataframe.csv
    #[clap(value_parser)]
    pub session: String,

    /// (file path, optional) A JSON file with the session configuration.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, default data/raw) The directory containing one sub-directory of vote files per session.
    /// Overrides the value from the --config file.
    #[clap(short, long, value_parser)]
    pub input_root: Option<String>,

    /// (directory, default data/processed) The directory receiving the table.
    /// Overrides the value from the --config file.
    #[clap(short, long, value_parser)]
    pub output_root: Option<String>,

    /// (displayName or legislatorId) How legislators are identified in the rows of the table.
    #[clap(long, value_parser)]
    pub identity_key: Option<String>,

    /// (file path) A reference table in CSV format. If provided, rollcall will check that the
    /// produced table matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
