//! End-to-end marketplace scenario against in-process collaborators.
//!
//! Walks the full client flow: connect a wallet, pull the catalogue from
//! the index, buy a token listed by someone else, mint a new token, list
//! it, and unlist it again — checking the listing invariant after every
//! transition.

use std::sync::Arc;

use nft_store::{ContractConfig, CreateNftRequest, FixtureIndex, NftId, NftStore};
use wallet_core::{Address, ConnectOutcome, MockSigningProvider, WalletAdapter};
use walrus_storage::{BlobStore, MemoryBlobStore, TraitPair};

async fn assert_listing_invariant(store: &NftStore) {
    let nfts = store.nfts().await;
    let owned = store.owned_nfts().await;
    for record in nfts.iter().chain(owned.iter()) {
        assert_eq!(
            record.listed,
            record.price.is_some(),
            "listed flag and price out of lockstep for {}",
            record.id
        );
    }
    for record in store.listed_nfts().await {
        assert!(record.listed, "{} sits unlisted in the listed collection", record.id);
    }
}

#[tokio::test]
async fn full_marketplace_session() {
    let provider = Arc::new(MockSigningProvider::new("0xbuyer"));
    let storage = Arc::new(MemoryBlobStore::new());
    let wallet = Arc::new(WalletAdapter::new(provider.clone()));
    let store = NftStore::new(
        wallet.clone(),
        storage.clone(),
        Arc::new(FixtureIndex::demo()),
        ContractConfig::default(),
    );

    // Connect and pull the catalogue.
    let outcome = wallet.connect().await;
    assert_eq!(outcome, ConnectOutcome::Connected(Address::new("0xbuyer")));

    store.fetch_nfts().await.unwrap();
    store.fetch_owned_nfts().await.unwrap();
    assert_eq!(store.nfts().await.len(), 2);
    assert_eq!(store.listed_nfts().await.len(), 1);
    assert!(store.owned_nfts().await.is_empty());
    assert_listing_invariant(&store).await;

    // Buy the token 0xabc has listed.
    let bought = NftId::new("0x123");
    store.buy_nft(&bought).await.unwrap();

    let record = store.get_nft_by_id(&bought).await.unwrap();
    assert_eq!(record.owner, Address::new("0xbuyer"));
    assert_eq!(record.creator, Address::new("0xabc"));
    assert!(!record.listed);
    assert!(store.listed_nfts().await.is_empty());
    assert_eq!(store.owned_nfts().await.len(), 1);
    assert_listing_invariant(&store).await;

    // Mint a new token.
    provider.push_response(Ok(MockSigningProvider::success_with_created("0x789")));
    let minted = store
        .create_nft(CreateNftRequest {
            name: "Pixel Art #2".to_string(),
            description: "a follow-up piece".to_string(),
            image_bytes: vec![1, 2, 3, 4],
            image_content_type: "image/png".to_string(),
            attributes: vec![
                TraitPair::new("Background", "Red"),
                TraitPair::new("Character", "Knight"),
            ],
        })
        .await
        .unwrap();

    assert_eq!(minted.id, NftId::new("0x789"));
    assert_eq!(minted.owner, Address::new("0xbuyer"));
    assert!(!minted.listed);
    assert!(storage.check_availability(&minted.blob_id).await);
    assert_eq!(store.nfts().await.len(), 3);
    assert_eq!(store.owned_nfts().await.len(), 2);
    assert_listing_invariant(&store).await;

    // List it, then change plans.
    store.list_nft(&minted.id, "3.25").await.unwrap();
    let listed = store.get_nft_by_id(&minted.id).await.unwrap();
    assert_eq!(listed.price.as_deref(), Some("3.25"));
    assert_eq!(store.listed_nfts().await.len(), 1);
    assert_listing_invariant(&store).await;

    store.unlist_nft(&minted.id).await.unwrap();
    let unlisted = store.get_nft_by_id(&minted.id).await.unwrap();
    assert!(!unlisted.listed);
    assert_eq!(unlisted.price, None);
    assert!(store.listed_nfts().await.is_empty());
    assert_listing_invariant(&store).await;

    // Every remote call went through the marketplace package.
    let submitted = provider.submitted();
    assert_eq!(submitted.len(), 4);
    assert!(
        submitted
            .iter()
            .all(|r| r.package == ContractConfig::default().package_id)
    );
}
