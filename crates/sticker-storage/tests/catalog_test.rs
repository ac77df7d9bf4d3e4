use sticker_core::{
    Catalog, CoreError, DraftEvent, NewSticker, PacketDraft, PacketKind, Platform,
    SyndicationEdit,
};
use sticker_storage::Storage;

#[tokio::test]
async fn test_packet_lifecycle() {
    // Create a temporary database
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let catalog = Catalog::new(Storage::new(Some(db_path.clone())).await.unwrap());

    let album = catalog.create_album("Calciatori", 2024).await.unwrap();
    for name in ["Zoff", "Baresi", "Maldini", "Tardelli", "Rossi"] {
        catalog
            .create_sticker(NewSticker::new(name, &album.id))
            .await
            .unwrap();
    }

    let packet = catalog
        .create_packet("Starter", PacketKind::Statico, 1)
        .await
        .unwrap();

    let (mut draft, _) = catalog.open_draft(&packet.id).await.unwrap();
    let pool = catalog.sticker_pool(&album.id).await.unwrap();
    draft.apply(DraftEvent::AlbumChanged(album.id.clone()), &pool);
    draft.apply(DraftEvent::TargetCountChanged(8), &pool);
    draft.apply(
        DraftEvent::Syndication(SyndicationEdit::Publish {
            platform: Platform::Ios,
            published: true,
        }),
        &pool,
    );
    catalog.save_draft(&draft).await.unwrap();

    // Reopen the database from disk
    drop(catalog);
    let catalog = Catalog::new(Storage::new(Some(db_path)).await.unwrap());

    let stored = catalog.get_packet(&packet.id).await.unwrap();
    assert_eq!(stored.num_figurine, 5);
    assert_eq!(stored.stickers().len(), 5);
    assert!(stored.syndication.entry(Platform::Ios).unwrap().is_published);

    let (reopened, _) = catalog.open_draft(&packet.id).await.unwrap();
    assert_eq!(reopened.target_count(), 5);
    let names: Vec<String> = {
        let stickers = catalog.list_stickers(None, Some(&album.id)).await.unwrap();
        reopened
            .selections()
            .iter()
            .map(|s| {
                stickers
                    .iter()
                    .find(|st| st.id == s.sticker_id)
                    .map(|st| st.nome.clone())
                    .unwrap()
            })
            .collect()
    };
    assert_eq!(names, vec!["Baresi", "Maldini", "Rossi", "Tardelli", "Zoff"]);
}

#[tokio::test]
async fn test_dynamic_weights_over_sqlite() {
    let catalog = Catalog::new(Storage::in_memory().await.unwrap());
    let album = catalog.create_album("Basket", 2023).await.unwrap();
    let first = catalog
        .create_sticker(NewSticker::new("Jordan", &album.id))
        .await
        .unwrap();
    let second = catalog
        .create_sticker(NewSticker::new("Pippen", &album.id))
        .await
        .unwrap();

    let pool = catalog.sticker_pool(&album.id).await.unwrap();
    let mut draft = PacketDraft::new(PacketKind::Dinamico);
    draft.apply(DraftEvent::Renamed("Lucky".to_string()), &pool);
    draft.apply(DraftEvent::AlbumChanged(album.id.clone()), &pool);
    for (sticker, weight) in [(&first, 60), (&second, 30)] {
        draft.apply(DraftEvent::StickerToggled(sticker.id.clone()), &pool);
        draft.apply(
            DraftEvent::WeightChanged {
                sticker_id: sticker.id.clone(),
                weight,
            },
            &pool,
        );
    }

    let err = catalog.save_draft(&draft).await.unwrap_err();
    assert!(matches!(err, CoreError::WeightSum { sum: 90 }));
    assert!(catalog.list_packets().await.unwrap().is_empty());

    draft.apply(
        DraftEvent::WeightChanged {
            sticker_id: second.id.clone(),
            weight: 40,
        },
        &pool,
    );
    let saved = catalog.save_draft(&draft).await.unwrap();

    let exported = catalog.export().await.unwrap();
    let packet = &exported["pacchetti"][0];
    assert_eq!(packet["id"], saved.id.as_str());
    assert_eq!(packet["tipo"], "dinamico");
    assert_eq!(packet["figurine"][0]["frequenza"], 60);
    assert_eq!(packet["figurine"][1]["frequenza"], 40);
}
