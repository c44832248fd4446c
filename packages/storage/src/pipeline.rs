// ABOUTME: Ordered chain of listing strategies
// ABOUTME: Each strategy is total; the first non-empty answer wins and listing never fails

use async_trait::async_trait;
use tracing::{debug, info, warn};

/// One way of producing a resource listing
#[async_trait]
pub trait ListingStrategy<T: Send>: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` when the strategy could not produce an answer at all
    async fn extract(&self) -> Option<Vec<T>>;
}

/// Run strategies in order and return the first non-empty result, or an
/// empty list when every strategy fails or comes back empty
pub async fn first_non_empty<T: Send>(strategies: &[&dyn ListingStrategy<T>]) -> Vec<T> {
    for strategy in strategies {
        match strategy.extract().await {
            Some(items) if !items.is_empty() => {
                info!(
                    "Listing strategy '{}' returned {} item(s)",
                    strategy.name(),
                    items.len()
                );
                return items;
            }
            Some(_) => debug!("Listing strategy '{}' returned nothing", strategy.name()),
            None => warn!(
                "Listing strategy '{}' failed, trying the next one",
                strategy.name()
            ),
        }
    }

    warn!("Every listing strategy came back empty");
    Vec::new()
}
