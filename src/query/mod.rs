//! Query execution for dw-connect.
//!
//! Resolves inline SQL or `.sql` files, runs them against a client, and
//! applies the `DimDateID` date conversion to the result.

pub mod dim_date;
pub mod executor;

pub use dim_date::{apply_dim_date_id, DIM_DATE_COLUMN};
pub use executor::{run_query, QuerySource};
