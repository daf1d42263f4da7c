//! The Executor - single entry point to the contract.
//!
//! The Executor is a stateless dispatcher: each command runs in its own
//! ledger transaction, mutations are committed only when the handler
//! succeeds, and every invocation is logged under the executor's span.

use std::path::Path;

use tracing::{debug, info_span, warn, Span};
use waybill_core::Ledger;

use crate::config::{ContractConfig, CONFIG_FILE_NAME};
use crate::handlers;
use crate::{Command, Error, Output, Response, Result};

/// The command executor - single entry point to the contract.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` when the ledger is, and can be shared across
/// threads. It holds no mutable state of its own.
///
/// # Logging
///
/// The executor owns a `contract` span carrying the configured contract
/// name. Every [`invoke`](Executor::invoke) opens an `invoke` span beneath
/// it, so all handler and ledger events are attributed to the contract.
///
/// # Example
///
/// ```
/// use waybill_executor::Executor;
/// use waybill_storage::MemoryLedger;
///
/// let executor = Executor::new(MemoryLedger::new());
///
/// let created = executor.invoke(
///     "createProduct",
///     &["PRODUCT1", "p-1", "Widget", "tools", "Acme"],
/// );
/// assert!(created.is_ok());
///
/// let read = executor.invoke("queryProduct", &["PRODUCT1"]);
/// assert_eq!(read.payload_json().unwrap()["status"], "Produced");
/// ```
pub struct Executor<L: Ledger> {
    ledger: L,
    config: ContractConfig,
    span: Span,
}

impl<L: Ledger> Executor<L> {
    /// Create an executor with the default configuration.
    pub fn new(ledger: L) -> Self {
        Self::build(ledger, ContractConfig::default())
    }

    /// Create an executor with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration is invalid.
    pub fn with_config(ledger: L, config: ContractConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(ledger, config))
    }

    /// Create an executor configured from `waybill.toml` in `config_dir`.
    ///
    /// The directory is created if needed, and a default `waybill.toml` is
    /// written there on first use.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the directory or file cannot be created, or the
    /// file cannot be parsed or validated.
    pub fn open<P: AsRef<Path>>(ledger: L, config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        std::fs::create_dir_all(config_dir).map_err(|e| Error::Config {
            reason: format!(
                "Failed to create config directory '{}': {}",
                config_dir.display(),
                e
            ),
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        ContractConfig::write_default_if_missing(&config_path)?;
        let config = ContractConfig::from_file(&config_path)?;
        Self::with_config(ledger, config)
    }

    /// Create an executor with an explicit configuration and persist it.
    ///
    /// The config is written to `waybill.toml` in `config_dir` so that a
    /// later [`open`](Executor::open) picks up the same settings.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration is invalid or cannot be written.
    pub fn open_with_config<P: AsRef<Path>>(
        ledger: L,
        config_dir: P,
        config: ContractConfig,
    ) -> Result<Self> {
        config.validate()?;
        let config_path = config_dir.as_ref().join(CONFIG_FILE_NAME);
        config.write_to_file(&config_path)?;
        Self::with_config(ledger, config)
    }

    fn build(ledger: L, config: ContractConfig) -> Self {
        let span = info_span!(target: "waybill::dispatch", "contract", name = %config.name);
        Self {
            ledger,
            config,
            span,
        }
    }

    /// The ledger this executor writes to.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Active configuration.
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Span every invocation is recorded under.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Execute a single command in its own transaction.
    ///
    /// On error the transaction is dropped and nothing is written.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let kind = cmd.kind();
        let mut txn = self.ledger.begin()?;
        let output = self.dispatch(&mut txn, cmd)?;

        if kind.is_mutation() {
            self.ledger.commit(txn)?;
            debug!(target: "waybill::dispatch", command = %kind, "Committed");
        }
        Ok(output)
    }

    /// Execute several commands in order, each in its own transaction.
    ///
    /// A failing command does not stop the batch or undo earlier commands.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    fn dispatch(&self, txn: &mut L::Txn, cmd: Command) -> Result<Output> {
        match cmd {
            Command::QueryProduct { key } => handlers::product::query_product(&*txn, &key),
            Command::CreateProduct {
                key,
                product_id,
                name,
                class,
                producer,
            } => handlers::product::create_product(txn, &key, product_id, name, class, producer),
            Command::QueryAllProduct => handlers::query::query_by_range(
                &*txn,
                &self.config.range_start,
                &self.config.range_end,
            ),
            Command::ChangeProductStatus {
                key,
                transporter,
                status,
            } => handlers::product::change_product_status(txn, &key, &transporter, status),
            Command::GetHistoryForProduct { key } => handlers::history::history_for(&*txn, &key),
            Command::QueryProductByStatus { status } => {
                handlers::query::query_by_status(&*txn, status)
            }
        }
    }

    /// Parse and execute a named invocation.
    ///
    /// Never fails: every error becomes an error [`Response`] whose message
    /// is the error's display text.
    pub fn invoke<S: AsRef<str>>(&self, function: &str, args: &[S]) -> Response {
        let span = info_span!(
            target: "waybill::dispatch",
            parent: &self.span,
            "invoke",
            function,
            args = args.len()
        );
        let _guard = span.enter();

        let result = Command::parse(function, args).and_then(|cmd| self.execute(cmd));
        if let Err(err) = &result {
            warn!(target: "waybill::dispatch", error = %err, "Invocation rejected");
        }
        Response::from(result)
    }
}

impl<L: Ledger + std::fmt::Debug> std::fmt::Debug for Executor<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("ledger", &self.ledger)
            .field("config", &self.config)
            .finish()
    }
}
