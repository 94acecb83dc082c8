//! In-memory NFT state store.
//!
//! Owns the full/owned/listed collections exclusively. Every mutating
//! operation composes remote calls first and touches local state only
//! after the network confirms, so a failure never leaves a collection
//! partially updated.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use wallet_core::{Address, CallArg, TransactionRequest, WalletAdapter, WalletError};
use walrus_storage::{BlobStore, NftMetadata};

use crate::error::{CreationError, StoreError};
use crate::index::NftIndex;
use crate::types::{CreateNftRequest, NftId, NftRecord};

/// On-chain deployment the store builds calls against.
#[derive(Debug, Clone)]
pub struct ContractConfig {
    /// Package holding the token and marketplace modules.
    pub package_id: String,

    /// Fee budget attached to every call.
    pub gas_budget: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            package_id: "0xdece5d51dc7abc7ecfd81251e0f624e5255663ef917a6950568d7986b21064cb"
                .to_string(),
            gas_budget: 10_000,
        }
    }
}

#[derive(Default)]
struct Collections {
    nfts: Vec<NftRecord>,
    owned: Vec<NftRecord>,
    listed: Vec<NftRecord>,
}

impl Collections {
    /// Rewrite the listing state of `id` in every collection holding a
    /// copy, and add it to or drop it from the listed collection.
    fn apply_listing(&mut self, id: &NftId, price: Option<String>) {
        for record in self.nfts.iter_mut().chain(self.owned.iter_mut()) {
            if &record.id == id {
                record.set_listing(price.clone());
            }
        }

        self.listed.retain(|r| &r.id != id);
        if price.is_some()
            && let Some(record) = self.nfts.iter().find(|r| &r.id == id)
        {
            self.listed.push(record.clone());
        }
    }
}

/// Client-side NFT state and the operations that mutate it.
///
/// Mutating operations against the same token identifier are serialized by
/// a per-identifier lock held for the duration of the operation; the
/// network's own ordering stays authoritative for the real asset state.
pub struct NftStore {
    wallet: Arc<WalletAdapter>,
    storage: Arc<dyn BlobStore>,
    index: Arc<dyn NftIndex>,
    contract: ContractConfig,
    collections: RwLock<Collections>,
    op_locks: Mutex<HashMap<NftId, Arc<Mutex<()>>>>,
}

impl NftStore {
    pub fn new(
        wallet: Arc<WalletAdapter>,
        storage: Arc<dyn BlobStore>,
        index: Arc<dyn NftIndex>,
        contract: ContractConfig,
    ) -> Self {
        Self {
            wallet,
            storage,
            index,
            contract,
            collections: RwLock::new(Collections::default()),
            op_locks: Mutex::new(HashMap::new()),
        }
    }

    // ========================================================================
    // Mutating operations
    // ========================================================================

    /// Mint a new token.
    ///
    /// Uploads the image, stores the metadata document, submits the mint
    /// transaction, and appends the resulting record to the full and owned
    /// collections. All-or-nothing: any failing step aborts with
    /// [`StoreError::CreationFailed`] and no partial record is inserted.
    pub async fn create_nft(&self, request: CreateNftRequest) -> Result<NftRecord, StoreError> {
        let creator = self.connected_address().await?;

        let record = self
            .run_create(request, &creator)
            .await
            .map_err(StoreError::CreationFailed)?;

        let mut collections = self.collections.write().await;
        collections.nfts.push(record.clone());
        collections.owned.push(record.clone());

        Ok(record)
    }

    async fn run_create(
        &self,
        request: CreateNftRequest,
        creator: &Address,
    ) -> Result<NftRecord, CreationError> {
        let image_blob = self
            .storage
            .upload_blob(request.image_bytes, &request.image_content_type)
            .await?;
        let image_url = self.storage.public_url(&image_blob);

        let metadata = NftMetadata {
            name: request.name.clone(),
            description: request.description.clone(),
            image: image_url.clone(),
            attributes: request.attributes,
            creator: creator.as_str().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            extra: Default::default(),
        };

        let metadata_blob = self.storage.store_metadata(&metadata).await?;

        let mint = TransactionRequest {
            package: self.contract.package_id.clone(),
            module: "non_fungible_token".to_string(),
            function: "mint_to_sender".to_string(),
            arguments: vec![
                CallArg::Text(request.name.clone()),
                CallArg::Text(request.description.clone()),
                // The metadata blob id is the token's content pointer.
                CallArg::Text(metadata_blob.as_str().to_string()),
            ],
            gas_budget: self.contract.gas_budget,
        };

        let response = self.wallet.submit_transaction(&mint).await?;

        let id = response
            .first_created()
            .ok_or(CreationError::MintResultMalformed)?;

        tracing::info!("✓ NFT minted: {}", id);

        Ok(NftRecord {
            id: NftId::new(id),
            name: request.name,
            description: request.description,
            image_url,
            owner: creator.clone(),
            creator: creator.clone(),
            price: None,
            listed: false,
            metadata,
            blob_id: metadata_blob,
        })
    }

    /// List a token for sale at `price`.
    ///
    /// Collections are updated only after the network confirms. Ownership
    /// is checked locally before submission; the network remains the
    /// authority either way.
    pub async fn list_nft(&self, id: &NftId, price: &str) -> Result<(), StoreError> {
        let address = self.connected_address().await?;

        let guard = self.op_lock(id).await;
        let _held = guard.lock().await;

        self.require_owned(id, &address).await?;

        let request = self.marketplace_call(
            "list",
            vec![
                CallArg::Object(id.as_str().to_string()),
                CallArg::Text(price.to_string()),
            ],
        );

        self.wallet
            .submit_transaction(&request)
            .await
            .map_err(|e| transaction_failure("list", id, e))?;

        let mut collections = self.collections.write().await;
        collections.apply_listing(id, Some(price.to_string()));

        tracing::info!("✓ NFT listed: {} at {}", id, price);

        Ok(())
    }

    /// Remove a token's listing.
    pub async fn unlist_nft(&self, id: &NftId) -> Result<(), StoreError> {
        let address = self.connected_address().await?;

        let guard = self.op_lock(id).await;
        let _held = guard.lock().await;

        self.require_owned(id, &address).await?;

        let request =
            self.marketplace_call("unlist", vec![CallArg::Object(id.as_str().to_string())]);

        self.wallet
            .submit_transaction(&request)
            .await
            .map_err(|e| transaction_failure("unlist", id, e))?;

        let mut collections = self.collections.write().await;
        collections.apply_listing(id, None);

        tracing::info!("✓ NFT unlisted: {}", id);

        Ok(())
    }

    /// Purchase a listed token.
    ///
    /// The token must be present in the local full collection — this
    /// client has no remote point lookup on the purchase path.
    pub async fn buy_nft(&self, id: &NftId) -> Result<(), StoreError> {
        let buyer = self.connected_address().await?;

        let guard = self.op_lock(id).await;
        let _held = guard.lock().await;

        {
            let collections = self.collections.read().await;
            if !collections.nfts.iter().any(|r| &r.id == id) {
                return Err(StoreError::NotFound(id.clone()));
            }
        }

        let request = self.marketplace_call("buy", vec![CallArg::Object(id.as_str().to_string())]);

        self.wallet
            .submit_transaction(&request)
            .await
            .map_err(|e| transaction_failure("buy", id, e))?;

        let mut collections = self.collections.write().await;
        let mut bought = None;
        for record in collections.nfts.iter_mut() {
            if &record.id == id {
                record.owner = buyer.clone();
                record.set_listing(None);
                bought = Some(record.clone());
            }
        }
        collections.listed.retain(|r| &r.id != id);
        if let Some(record) = bought {
            collections.owned.push(record);
        }

        tracing::info!("✓ NFT purchased: {}", id);

        Ok(())
    }

    // ========================================================================
    // Reads and refreshes
    // ========================================================================

    /// Replace the full collection from the indexing service.
    ///
    /// The listed collection is refreshed from the same result.
    pub async fn fetch_nfts(&self) -> Result<(), StoreError> {
        let records = self.index.all().await?;

        let mut collections = self.collections.write().await;
        collections.listed = records.iter().filter(|r| r.listed).cloned().collect();
        collections.nfts = records;

        Ok(())
    }

    /// Replace the owned collection. A disconnected session owns nothing.
    pub async fn fetch_owned_nfts(&self) -> Result<(), StoreError> {
        let Some(address) = self.wallet.address().await else {
            self.collections.write().await.owned.clear();
            return Ok(());
        };

        let records = self.index.owned_by(&address).await?;
        self.collections.write().await.owned = records;

        Ok(())
    }

    /// Replace the listed collection.
    pub async fn fetch_listed_nfts(&self) -> Result<(), StoreError> {
        let records = self.index.listed().await?;
        self.collections.write().await.listed = records;

        Ok(())
    }

    /// Linear point lookup over the full collection.
    pub async fn get_nft_by_id(&self, id: &NftId) -> Option<NftRecord> {
        self.collections
            .read()
            .await
            .nfts
            .iter()
            .find(|r| &r.id == id)
            .cloned()
    }

    /// Snapshot of every known token.
    pub async fn nfts(&self) -> Vec<NftRecord> {
        self.collections.read().await.nfts.clone()
    }

    /// Snapshot of the connected account's tokens.
    pub async fn owned_nfts(&self) -> Vec<NftRecord> {
        self.collections.read().await.owned.clone()
    }

    /// Snapshot of the tokens currently listed for sale.
    pub async fn listed_nfts(&self) -> Vec<NftRecord> {
        self.collections.read().await.listed.clone()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn connected_address(&self) -> Result<Address, StoreError> {
        self.wallet.address().await.ok_or(StoreError::NotConnected)
    }

    async fn require_owned(&self, id: &NftId, address: &Address) -> Result<(), StoreError> {
        let collections = self.collections.read().await;
        let record = collections
            .nfts
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if &record.owner != address {
            return Err(StoreError::NotOwned(id.clone()));
        }
        Ok(())
    }

    fn marketplace_call(&self, function: &str, arguments: Vec<CallArg>) -> TransactionRequest {
        TransactionRequest {
            package: self.contract.package_id.clone(),
            module: "marketplace".to_string(),
            function: function.to_string(),
            arguments,
            gas_budget: self.contract.gas_budget,
        }
    }

    async fn op_lock(&self, id: &NftId) -> Arc<Mutex<()>> {
        let mut locks = self.op_locks.lock().await;
        locks.entry(id.clone()).or_default().clone()
    }
}

fn transaction_failure(operation: &str, id: &NftId, error: WalletError) -> StoreError {
    tracing::warn!("{} failed for {}: {}", operation, id, error);
    StoreError::Transaction(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    use wallet_core::MockSigningProvider;
    use walrus_storage::{MemoryBlobStore, StorageError, TraitPair};

    use crate::index::FixtureIndex;

    struct Fixture {
        provider: Arc<MockSigningProvider>,
        storage: Arc<MemoryBlobStore>,
        wallet: Arc<WalletAdapter>,
        store: NftStore,
    }

    fn fixture_with_address(address: &str) -> Fixture {
        let provider = Arc::new(MockSigningProvider::new(address));
        let storage = Arc::new(MemoryBlobStore::new());
        let wallet = Arc::new(WalletAdapter::new(provider.clone()));
        let store = NftStore::new(
            wallet.clone(),
            storage.clone(),
            Arc::new(FixtureIndex::demo()),
            ContractConfig::default(),
        );
        Fixture {
            provider,
            storage,
            wallet,
            store,
        }
    }

    fn create_request() -> CreateNftRequest {
        CreateNftRequest {
            name: "Pixel Art #1".to_string(),
            description: "test".to_string(),
            image_bytes: vec![0x89, 0x50, 0x4e, 0x47],
            image_content_type: "image/png".to_string(),
            attributes: vec![TraitPair::new("Background", "Blue")],
        }
    }

    async fn assert_invariants(store: &NftStore) {
        let nfts = store.nfts().await;
        let owned = store.owned_nfts().await;
        for record in nfts.iter().chain(owned.iter()) {
            assert_eq!(record.listed, record.price.is_some());
        }
        for record in store.listed_nfts().await {
            assert!(record.listed);
            assert!(record.price.is_some());
        }
    }

    #[tokio::test]
    async fn create_requires_connection() {
        let f = fixture_with_address("0xabc");

        let err = f.store.create_nft(create_request()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotConnected));
        assert!(f.store.nfts().await.is_empty());
    }

    #[tokio::test]
    async fn create_appends_to_full_and_owned() {
        let f = fixture_with_address("0xabc");
        f.wallet.connect().await;
        f.provider
            .push_response(Ok(MockSigningProvider::success_with_created("0xnew")));

        let record = f.store.create_nft(create_request()).await.unwrap();

        assert_eq!(record.id, NftId::new("0xnew"));
        assert_eq!(record.owner, Address::new("0xabc"));
        assert_eq!(record.creator, Address::new("0xabc"));
        assert!(!record.listed);
        assert_eq!(record.price, None);
        assert_eq!(
            record.metadata.attributes,
            vec![TraitPair::new("Background", "Blue")]
        );

        assert_eq!(f.store.nfts().await.len(), 1);
        assert_eq!(f.store.owned_nfts().await.len(), 1);
        // Image blob + metadata document.
        assert_eq!(f.storage.len(), 2);

        // The mint call carries the metadata blob id as content pointer.
        let submitted = f.provider.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].module, "non_fungible_token");
        assert_eq!(submitted[0].function, "mint_to_sender");
        assert_eq!(
            submitted[0].arguments[2],
            CallArg::Text(record.blob_id.as_str().to_string())
        );

        assert_invariants(&f.store).await;
    }

    #[tokio::test]
    async fn create_aborts_on_upload_failure() {
        let f = fixture_with_address("0xabc");
        f.wallet.connect().await;
        f.storage.fail_uploads(true);

        let err = f.store.create_nft(create_request()).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::CreationFailed(CreationError::Storage(StorageError::UploadFailed(_)))
        ));

        assert!(f.store.nfts().await.is_empty());
        assert!(f.store.owned_nfts().await.is_empty());
        assert!(f.provider.submitted().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_mint_without_created_objects() {
        let f = fixture_with_address("0xabc");
        f.wallet.connect().await;
        f.provider
            .push_response(Ok(MockSigningProvider::success_without_created()));

        let err = f.store.create_nft(create_request()).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::CreationFailed(CreationError::MintResultMalformed)
        ));
        assert!(f.store.nfts().await.is_empty());
    }

    #[tokio::test]
    async fn list_marks_record_in_every_collection() {
        // 0x456 is owned by 0xdef and unlisted in the demo catalogue.
        let f = fixture_with_address("0xdef");
        f.wallet.connect().await;
        f.store.fetch_nfts().await.unwrap();
        f.store.fetch_owned_nfts().await.unwrap();

        let id = NftId::new("0x456");
        f.store.list_nft(&id, "2.0").await.unwrap();

        let record = f.store.get_nft_by_id(&id).await.unwrap();
        assert!(record.listed);
        assert_eq!(record.price.as_deref(), Some("2.0"));

        let listed = f.store.listed_nfts().await;
        assert!(listed.iter().any(|r| r.id == id));
        let owned = f.store.owned_nfts().await;
        assert!(owned.iter().find(|r| r.id == id).unwrap().listed);

        let submitted = f.provider.submitted();
        assert_eq!(submitted[0].module, "marketplace");
        assert_eq!(submitted[0].function, "list");

        assert_invariants(&f.store).await;
    }

    #[tokio::test]
    async fn list_then_unlist_restores_unlisted_state() {
        let f = fixture_with_address("0xdef");
        f.wallet.connect().await;
        f.store.fetch_nfts().await.unwrap();

        let id = NftId::new("0x456");
        let listed_before = f.store.listed_nfts().await.len();

        f.store.list_nft(&id, "2.0").await.unwrap();
        f.store.unlist_nft(&id).await.unwrap();

        let record = f.store.get_nft_by_id(&id).await.unwrap();
        assert!(!record.listed);
        assert_eq!(record.price, None);
        assert_eq!(f.store.listed_nfts().await.len(), listed_before);

        assert_invariants(&f.store).await;
    }

    #[tokio::test]
    async fn list_refuses_tokens_owned_by_someone_else() {
        // Connected as 0xabc; 0x456 belongs to 0xdef.
        let f = fixture_with_address("0xabc");
        f.wallet.connect().await;
        f.store.fetch_nfts().await.unwrap();

        let err = f
            .store
            .list_nft(&NftId::new("0x456"), "2.0")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotOwned(_)));
        assert!(f.provider.submitted().is_empty());
    }

    #[tokio::test]
    async fn list_failure_leaves_collections_untouched() {
        let f = fixture_with_address("0xdef");
        f.wallet.connect().await;
        f.store.fetch_nfts().await.unwrap();
        f.provider.push_failure("marketplace rejected");

        let id = NftId::new("0x456");
        let err = f.store.list_nft(&id, "2.0").await.unwrap_err();
        assert!(matches!(err, StoreError::Transaction(_)));

        let record = f.store.get_nft_by_id(&id).await.unwrap();
        assert!(!record.listed);
        assert_eq!(record.price, None);
        assert!(!f.store.listed_nfts().await.iter().any(|r| r.id == id));
    }

    #[tokio::test]
    async fn buy_transfers_ownership_and_clears_listing() {
        // 0x123 is listed at 1.5 by 0xabc; buyer is 0xbuyer.
        let f = fixture_with_address("0xbuyer");
        f.wallet.connect().await;
        f.store.fetch_nfts().await.unwrap();

        let id = NftId::new("0x123");
        let listed_before = f.store.listed_nfts().await.len();

        f.store.buy_nft(&id).await.unwrap();

        let record = f.store.get_nft_by_id(&id).await.unwrap();
        assert_eq!(record.owner, Address::new("0xbuyer"));
        assert_eq!(record.creator, Address::new("0xabc"));
        assert!(!record.listed);
        assert_eq!(record.price, None);

        assert_eq!(f.store.listed_nfts().await.len(), listed_before - 1);
        assert!(f.store.owned_nfts().await.iter().any(|r| r.id == id));

        assert_invariants(&f.store).await;
    }

    #[tokio::test]
    async fn buy_unknown_token_mutates_nothing() {
        let f = fixture_with_address("0xbuyer");
        f.wallet.connect().await;
        f.store.fetch_nfts().await.unwrap();

        let before = f.store.nfts().await;
        let err = f.store.buy_nft(&NftId::new("0xmissing")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        assert_eq!(f.store.nfts().await, before);
        assert!(f.provider.submitted().is_empty());
    }

    #[tokio::test]
    async fn buy_failure_leaves_collections_untouched() {
        let f = fixture_with_address("0xbuyer");
        f.wallet.connect().await;
        f.store.fetch_nfts().await.unwrap();
        f.provider.push_failure("insufficient balance");

        let id = NftId::new("0x123");
        let err = f.store.buy_nft(&id).await.unwrap_err();
        assert!(matches!(err, StoreError::Transaction(_)));

        let record = f.store.get_nft_by_id(&id).await.unwrap();
        assert_eq!(record.owner, Address::new("0xabc"));
        assert!(record.listed);
        assert!(f.store.owned_nfts().await.is_empty());
    }

    #[tokio::test]
    async fn fetch_owned_clears_when_disconnected() {
        let f = fixture_with_address("0xdef");
        f.wallet.connect().await;
        f.store.fetch_owned_nfts().await.unwrap();
        assert_eq!(f.store.owned_nfts().await.len(), 1);

        f.wallet.disconnect().await;
        f.store.fetch_owned_nfts().await.unwrap();
        assert!(f.store.owned_nfts().await.is_empty());
    }

    #[tokio::test]
    async fn point_lookup_misses_return_none() {
        let f = fixture_with_address("0xabc");
        f.store.fetch_nfts().await.unwrap();

        assert!(f.store.get_nft_by_id(&NftId::new("0x123")).await.is_some());
        assert!(f.store.get_nft_by_id(&NftId::new("0x999")).await.is_none());
    }
}
