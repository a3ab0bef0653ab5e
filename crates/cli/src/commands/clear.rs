//! Delete every document in a collection.

use scout_sales_core::{Collection, Filter};
use scout_sales_server::db::DocumentStore as _;

use super::{CliError, open_store};

/// Clear a collection.
///
/// # Errors
///
/// Returns an error if `confirmed` is false or the delete fails.
pub async fn run(collection: Collection, confirmed: bool) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::NotConfirmed(collection.as_str()));
    }

    let store = open_store().await?;
    let result = store.delete_many(collection, &Filter::all()).await?;

    tracing::info!(
        collection = %collection,
        deleted = result.deleted_count,
        "Collection cleared"
    );
    Ok(())
}
