use clap::{Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQL `SELECT` statements
    Sql,
    /// In-memory record predicates
    Memory,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a filter into the queries to run against a backend
    Translate {
        #[arg(long, help = "Filter expression; omit it to select everything")]
        filter: Option<String>,

        #[arg(long, value_enum, default_value_t = Backend::Sql)]
        backend: Backend,

        /// SQL dialect: "postgres" or "mysql"
        #[arg(long, default_value = "postgres")]
        dialect: String,

        #[arg(long, default_value = "records", help = "Table the SQL statements select from")]
        table: String,

        #[arg(long, help = "TOML file with [translator] and [capabilities] sections")]
        config: Option<String>,

        #[arg(
            long,
            help = "JSON array of records to search instead of printing the queries (memory backend)"
        )]
        records: Option<String>,

        #[arg(long, default_value = "id", help = "Identifier attribute used to union results")]
        id: String,

        #[arg(long, help = "Print JSON instead of plain text")]
        json: bool,
    },
    /// Print a filter with every negation pushed down to its leaves
    Normalize {
        #[arg(long)]
        filter: String,

        #[arg(long, help = "Print the filter tree as JSON")]
        json: bool,
    },
    /// Validate filter syntax and leaf typing
    Check {
        #[arg(long)]
        filter: String,
    },
}
