//! dwconnect - run a query against a SQL Server warehouse over ODBC.

use dw_connect::cli::Cli;
use dw_connect::db::{self, OdbcDriver};
use dw_connect::error::Result;
use dw_connect::logging;
use dw_connect::output;
use dw_connect::query::run_query;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let format = cli.output_format()?;

    info!("Loading config from: {}", cli.config_path().display());
    let settings = cli.odbc_settings()?;
    let options = cli.connect_options()?;

    let client = db::connect(&OdbcDriver::new(), &options, &settings)?;
    let result = run_query(&cli.query, client.as_ref())?;

    println!("{}", output::render(&result, format)?);
    Ok(())
}
