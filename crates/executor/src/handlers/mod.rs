//! Command handlers organized by concern.
//!
//! Every handler runs inside the transaction the [`Executor`](crate::Executor)
//! opened for the invocation and returns an [`Output`](crate::Output).
//!
//! | Module | Commands |
//! |--------|----------|
//! | `product` | queryProduct, createProduct, changeProductStatus |
//! | `query` | queryAllProduct, queryProductByStatus |
//! | `history` | getHistoryForProduct |

pub mod history;
pub mod product;
pub mod query;
