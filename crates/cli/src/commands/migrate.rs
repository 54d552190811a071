use clientele_core::config::{AppConfig, LoadOptions};
use clientele_db::{connect_with_settings, migrations, CustomerRepository, SqlCustomerRepository};

use crate::commands::{CommandResult, ErrorClass};

const COMMAND: &str = "migrate";

enum MigrateFailure {
    Runtime(std::io::Error),
    Connect(String),
    Apply(String),
}

impl MigrateFailure {
    fn into_result(self) -> CommandResult {
        match self {
            Self::Runtime(error) => CommandResult::failure(
                COMMAND,
                ErrorClass::RuntimeInit,
                &format!("failed to initialize async runtime: {error}"),
            ),
            Self::Connect(detail) => {
                CommandResult::failure(COMMAND, ErrorClass::DbConnectivity, &detail)
            }
            Self::Apply(detail) => CommandResult::failure(COMMAND, ErrorClass::Migration, &detail),
        }
    }
}

pub fn run() -> CommandResult {
    run_with(LoadOptions::default())
}

pub fn run_with(options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                ErrorClass::ConfigValidation,
                &format!("configuration issue: {error}"),
            );
        }
    };

    match apply(&config) {
        Ok((applied, customers)) => CommandResult::success(
            COMMAND,
            &format!(
                "applied {applied} migration(s) to `{}`; customer table holds {customers} row(s)",
                config.database.url
            ),
        ),
        Err(failure) => failure.into_result(),
    }
}

fn apply(config: &AppConfig) -> Result<(usize, usize), MigrateFailure> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(MigrateFailure::Runtime)?;

    runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| MigrateFailure::Connect(error.to_string()))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| MigrateFailure::Apply(error.to_string()))?;

        let customers = SqlCustomerRepository::new(pool.clone())
            .list_all()
            .await
            .map_err(|error| MigrateFailure::Apply(error.to_string()))?
            .len();
        pool.close().await;
        Ok((migrations::MIGRATOR.iter().count(), customers))
    })
}

