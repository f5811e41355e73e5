//! # Item Client
//!
//! Provides a high‑level API for interacting with the `Item` actor: the
//! listing, counting and tag-frequency queries, plus item management.
//!
//! Every query method takes the authenticated [`Caller`]. Authentication has
//! already happened by the time these run; the caller is only recorded in the
//! span (and, for [`ItemClient::list_own_items`], used as the owner filter).
use super::entity_error;
use crate::item_actor::ItemError;
use crate::model::{Caller, Item, ItemCreate, ItemDraft, ItemField, ItemId, ItemPatch, ItemUpdate, TagCount};
use crate::query::{ItemFilter, ItemQuery, QueryParams};
use async_trait::async_trait;
use bazaar_actor::query::Record;
use bazaar_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Item actor.
#[derive(Clone)]
pub struct ItemClient {
    inner: ResourceClient<Item>,
}

impl ItemClient {
    pub fn new(inner: ResourceClient<Item>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Item> for ItemClient {
    type Error = ItemError;

    fn inner(&self) -> &ResourceClient<Item> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<ItemError>(e) {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ItemError::NotFound(id),
            Err(other) => ItemError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ItemClient {
    /// Runs a parsed query and returns matching items in result order.
    #[instrument(skip(self))]
    pub async fn find_items(&self, query: &ItemQuery) -> Result<Vec<Item>, ItemError> {
        debug!("Sending request");
        self.find(query.find_query()).await
    }

    /// Filters, sorts, pages and projects the item collection.
    ///
    /// Fails with `InvalidParameter` before reaching the actor if any
    /// parameter is malformed.
    #[instrument(skip(self, caller), fields(caller = %caller.user_id))]
    pub async fn list_items(&self, caller: &Caller, params: &QueryParams) -> Result<Vec<Record>, ItemError> {
        let query = ItemQuery::parse(params)?;
        debug!(?query, "Built item query");
        self.run_listing(&query).await
    }

    /// The caller's own items. Any `owner` parameter is overridden.
    #[instrument(skip(self, caller), fields(caller = %caller.user_id))]
    pub async fn list_own_items(&self, caller: &Caller, params: &QueryParams) -> Result<Vec<Record>, ItemError> {
        let mut query = ItemQuery::parse(params)?;
        query.filter.owner = Some(caller.user_id);
        debug!(?query, "Built item query");
        self.run_listing(&query).await
    }

    async fn run_listing(&self, query: &ItemQuery) -> Result<Vec<Record>, ItemError> {
        let items = self.find_items(query).await?;
        let projection = query.projection();
        items
            .iter()
            .map(|item| projection.apply(item))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ItemError::Serialization(e.to_string()))
    }

    /// Number of items matching the filter parameters. Sort, page and
    /// projection parameters are not looked at.
    #[instrument(skip(self, caller), fields(caller = %caller.user_id))]
    pub async fn count_items(&self, caller: &Caller, params: &QueryParams) -> Result<usize, ItemError> {
        let filter = ItemFilter::parse(params)?;
        debug!(?filter, "Built item filter");
        self.inner
            .count(filter.to_filter())
            .await
            .map_err(Self::map_error)
    }

    /// How many items carry each tag, most common first; ties by tag name.
    #[instrument(skip(self, caller), fields(caller = %caller.user_id))]
    pub async fn tag_frequency(&self, caller: &Caller) -> Result<Vec<TagCount>, ItemError> {
        debug!("Sending request");
        let buckets = self
            .inner
            .group_count(ItemField::Tags.as_str())
            .await
            .map_err(Self::map_error)?;
        Ok(buckets
            .into_iter()
            .map(|b| TagCount {
                tag: b.key,
                count: b.count,
            })
            .collect())
    }

    #[instrument(skip(self, caller), fields(caller = %caller.user_id))]
    pub async fn get_item(&self, caller: &Caller, id: ItemId) -> Result<Item, ItemError> {
        debug!("Sending request");
        self.get(id)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    /// Lists a new item owned by the caller.
    #[instrument(skip(self, caller), fields(caller = %caller.user_id))]
    pub async fn create_item(&self, caller: &Caller, draft: ItemDraft) -> Result<Item, ItemError> {
        let params = ItemCreate {
            owner: caller.user_id,
            draft,
        };
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(item_id = %id, "Item created");
        self.get(id)
            .await?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    /// Applies a patch. Only the owner may update; the check runs inside the
    /// actor together with the update.
    #[instrument(skip(self, caller), fields(caller = %caller.user_id))]
    pub async fn update_item(&self, caller: &Caller, id: ItemId, patch: ItemPatch) -> Result<Item, ItemError> {
        let update = ItemUpdate {
            caller: caller.user_id,
            patch,
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Removes an item. Only the owner may delete.
    #[instrument(skip(self, caller), fields(caller = %caller.user_id))]
    pub async fn delete_item(&self, caller: &Caller, id: ItemId) -> Result<(), ItemError> {
        let item = self.get_item(caller, id).await?;
        if item.owner != caller.user_id {
            warn!(item_id = %id, owner = %item.owner, "Delete refused");
            return Err(ItemError::Forbidden(id.to_string()));
        }
        self.delete(id).await?;
        info!(item_id = %id, "Item deleted");
        Ok(())
    }
}
