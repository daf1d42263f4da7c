//! Command enum defining every contract operation.
//!
//! Commands are the "instruction set" of the contract. An invocation arrives
//! as a function name plus positional string arguments; [`Command::parse`]
//! checks the name and arity against the [`CommandKind`] table and produces
//! a typed command.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Typed**: Statuses are parsed before dispatch, never passed as raw strings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use waybill_core::ProductStatus;

use crate::{Error, Result};

/// The dispatch table: every function name the contract answers to
///
/// | Name | Arity | Arguments |
/// |------|-------|-----------|
/// | `queryProduct` | 1 | key |
/// | `createProduct` | 5 | key, productid, name, class, producer |
/// | `queryAllProduct` | 0 | |
/// | `changeProductStatus` | 3 | key, transporter, status (`""` = next) |
/// | `getHistoryForProduct` | 1 | key |
/// | `queryProductByStatus` | 1 | status |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Read one product
    QueryProduct,
    /// Create a product in `Produced`
    CreateProduct,
    /// List products in the configured key range
    QueryAllProduct,
    /// Move a product along its lifecycle
    ChangeProductStatus,
    /// Revision history of one product
    GetHistoryForProduct,
    /// Products currently in a status
    QueryProductByStatus,
}

impl CommandKind {
    /// Every command, in table order
    pub const ALL: [CommandKind; 6] = [
        CommandKind::QueryProduct,
        CommandKind::CreateProduct,
        CommandKind::QueryAllProduct,
        CommandKind::ChangeProductStatus,
        CommandKind::GetHistoryForProduct,
        CommandKind::QueryProductByStatus,
    ];

    /// Function name used on the wire
    pub const fn name(&self) -> &'static str {
        match self {
            CommandKind::QueryProduct => "queryProduct",
            CommandKind::CreateProduct => "createProduct",
            CommandKind::QueryAllProduct => "queryAllProduct",
            CommandKind::ChangeProductStatus => "changeProductStatus",
            CommandKind::GetHistoryForProduct => "getHistoryForProduct",
            CommandKind::QueryProductByStatus => "queryProductByStatus",
        }
    }

    /// Exact number of positional arguments
    pub const fn arity(&self) -> usize {
        match self {
            CommandKind::QueryProduct => 1,
            CommandKind::CreateProduct => 5,
            CommandKind::QueryAllProduct => 0,
            CommandKind::ChangeProductStatus => 3,
            CommandKind::GetHistoryForProduct => 1,
            CommandKind::QueryProductByStatus => 1,
        }
    }

    /// Whether the command writes to the ledger
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            CommandKind::CreateProduct | CommandKind::ChangeProductStatus
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownCommand { name: s.to_string() })
    }
}

/// A parsed invocation.
///
/// # Example
///
/// ```
/// use waybill_executor::{Command, CommandKind};
///
/// let cmd = Command::parse("queryProduct", &["PRODUCT1"]).unwrap();
/// assert_eq!(cmd.kind(), CommandKind::QueryProduct);
///
/// assert!(Command::parse("queryProduct", &["a", "b"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Read the product stored at `key`.
    /// Returns: `Output::Product`
    QueryProduct { key: String },

    /// Create a product at `key`.
    /// Returns: `Output::Product`
    CreateProduct {
        key: String,
        product_id: String,
        name: String,
        class: String,
        producer: String,
    },

    /// List products in the configured range.
    /// Returns: `Output::Records`
    QueryAllProduct,

    /// Move the product at `key` to `status`, or to its next status when
    /// `status` is `None`.
    /// Returns: `Output::Product`
    ChangeProductStatus {
        key: String,
        transporter: String,
        status: Option<ProductStatus>,
    },

    /// Revision history of `key`, oldest first.
    /// Returns: `Output::History`
    GetHistoryForProduct { key: String },

    /// Products whose current status is `status`.
    /// Returns: `Output::Products`
    QueryProductByStatus { status: ProductStatus },
}

impl Command {
    /// Build a command from a function name and positional arguments
    ///
    /// # Errors
    ///
    /// - `UnknownCommand` if `name` is not in the dispatch table
    /// - `Arity` if the argument count does not match
    /// - `InvalidArgument` if a status argument is not a known status
    pub fn parse<S: AsRef<str>>(name: &str, args: &[S]) -> Result<Self> {
        let kind: CommandKind = name.parse()?;
        if args.len() != kind.arity() {
            return Err(Error::Arity {
                expected: kind.arity(),
                actual: args.len(),
            });
        }
        let arg = |i: usize| args[i].as_ref().to_string();

        let cmd = match kind {
            CommandKind::QueryProduct => Command::QueryProduct { key: arg(0) },
            CommandKind::CreateProduct => Command::CreateProduct {
                key: arg(0),
                product_id: arg(1),
                name: arg(2),
                class: arg(3),
                producer: arg(4),
            },
            CommandKind::QueryAllProduct => Command::QueryAllProduct,
            CommandKind::ChangeProductStatus => {
                let status = match args[2].as_ref() {
                    "" => None,
                    s => Some(parse_status(s)?),
                };
                Command::ChangeProductStatus {
                    key: arg(0),
                    transporter: arg(1),
                    status,
                }
            }
            CommandKind::GetHistoryForProduct => Command::GetHistoryForProduct { key: arg(0) },
            CommandKind::QueryProductByStatus => Command::QueryProductByStatus {
                status: parse_status(args[0].as_ref())?,
            },
        };
        Ok(cmd)
    }

    /// Dispatch-table entry for this command
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::QueryProduct { .. } => CommandKind::QueryProduct,
            Command::CreateProduct { .. } => CommandKind::CreateProduct,
            Command::QueryAllProduct => CommandKind::QueryAllProduct,
            Command::ChangeProductStatus { .. } => CommandKind::ChangeProductStatus,
            Command::GetHistoryForProduct { .. } => CommandKind::GetHistoryForProduct,
            Command::QueryProductByStatus { .. } => CommandKind::QueryProductByStatus,
        }
    }
}

fn parse_status(s: &str) -> Result<ProductStatus> {
    s.parse()
        .map_err(|reason| Error::InvalidArgument { reason })
}
