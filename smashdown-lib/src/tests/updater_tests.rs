use rand::SeedableRng;
use rand::rngs::StdRng;
use smashdown_catalog::CatalogError;
use tempfile::TempDir;

use super::*;
use crate::progress::{LogProgress, SilentProgress};
use crate::testing::{FakeClient, catalog_with};

fn game_ids(catalog: &Catalog) -> Vec<u64> {
    catalog.site().games.iter().map(|g| g.id).collect()
}

fn deleted_game_ids(catalog: &Catalog) -> Vec<u64> {
    catalog
        .site()
        .games
        .iter()
        .filter(|g| g.is_deleted_from_site)
        .map(|g| g.id)
        .collect()
}

// ---------------------------------------------------------------------------
// Game list
// ---------------------------------------------------------------------------

#[test]
fn test_game_list_into_empty_catalog() {
    let mut client = FakeClient::new()
        .with_game(1726, &[])
        .with_game(4126, &[])
        .with_game(5063, &[]);
    let mut catalog = catalog_with(&[]);

    let changes = Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();

    assert_eq!(changes.added, vec![1726, 4126, 5063]);
    assert!(changes.removed.is_empty());
    assert_eq!(game_ids(&catalog), vec![1726, 4126, 5063]);
    assert_eq!(catalog.game(4126).unwrap().title, "Game 4126");
    assert!(catalog.game(4126).unwrap().songs.is_empty());
    assert_eq!(catalog.site().download_timestamps.len(), 1);
}

#[test]
fn test_soft_delete_and_addition() {
    let mut client = FakeClient::new()
        .with_game(2, &[])
        .with_game(3, &[])
        .with_game(4, &[]);
    let mut catalog = catalog_with(&[(1, &[]), (2, &[]), (3, &[])]);

    let changes = Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();

    assert_eq!(game_ids(&catalog), vec![1, 2, 3, 4]);
    assert_eq!(deleted_game_ids(&catalog), vec![1]);
    assert_eq!(changes.added, vec![4]);
    assert_eq!(changes.removed, vec![1]);
    assert!(changes.reappeared.is_empty());
}

#[test]
fn test_game_list_is_idempotent() {
    let mut client = FakeClient::new().with_game(2, &[]).with_game(3, &[]);
    let mut catalog = catalog_with(&[(1, &[]), (2, &[]), (3, &[])]);

    Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();
    let after_first = catalog.site().games.clone();

    let changes = Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();

    assert!(changes.is_empty());
    assert_eq!(catalog.site().games, after_first);
    assert_eq!(catalog.site().download_timestamps.len(), 2);
}

#[test]
fn test_reappearing_game_is_undeleted() {
    let mut client = FakeClient::new().with_game(1, &[]);
    let mut catalog = catalog_with(&[(1, &[])]);
    catalog.game_mut(1).unwrap().is_deleted_from_site = true;

    let changes = Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();

    assert!(!catalog.game(1).unwrap().is_deleted_from_site);
    assert_eq!(changes.reappeared, vec![1]);
}

#[test]
fn test_already_deleted_game_is_not_reported_again() {
    let mut client = FakeClient::new();
    let mut catalog = catalog_with(&[(1, &[])]);
    catalog.game_mut(1).unwrap().is_deleted_from_site = true;

    let changes = Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();

    assert!(catalog.game(1).unwrap().is_deleted_from_site);
    assert!(changes.removed.is_empty());
}

#[test]
fn test_titles_are_kept() {
    let mut client = FakeClient::new().with_game(1, &[]);
    let mut catalog = catalog_with(&[(1, &[])]);
    catalog.game_mut(1).unwrap().title = "Old Title".to_string();

    Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();

    assert_eq!(catalog.game(1).unwrap().title, "Old Title");
}

#[test]
fn test_duplicate_listing_entries_added_once() {
    let mut client = FakeClient::new().with_game(7, &[]).with_game(7, &[]);
    let mut catalog = catalog_with(&[]);

    Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();

    assert_eq!(game_ids(&catalog), vec![7]);
}

#[test]
fn test_game_list_is_saved() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("db.json");
    let mut client = FakeClient::new().with_game(1726, &[]);
    let mut catalog = catalog_with(&[]).with_output_file(&path);

    Updater::new(&mut client, &mut catalog)
        .update_game_list()
        .unwrap();

    let reloaded = Catalog::load(&path).unwrap();
    assert_eq!(reloaded.site(), catalog.site());
}

// ---------------------------------------------------------------------------
// Song lists
// ---------------------------------------------------------------------------

#[test]
fn test_song_list_cases() {
    struct Case {
        source: &'static [(u64, &'static [u64])],
        expected: &'static [(u64, &'static [u64])],
        removed: &'static [u64],
    }
    let cases = [
        Case {
            source: &[(1726, &[96613, 32272, 93397]), (4126, &[77724, 96008]), (5063, &[])],
            expected: &[(1726, &[96613, 32272, 93397]), (4126, &[77724, 96008]), (5063, &[])],
            removed: &[],
        },
        Case {
            source: &[(1726, &[93397]), (4126, &[]), (5063, &[])],
            expected: &[(1726, &[93397, 96613, 32272]), (4126, &[77724, 96008]), (5063, &[])],
            removed: &[],
        },
        Case {
            source: &[(1726, &[96613, 93397, 111]), (4126, &[222, 77724, 96008]), (5063, &[333])],
            expected: &[
                (1726, &[96613, 93397, 111, 32272]),
                (4126, &[222, 77724, 96008]),
                (5063, &[333]),
            ],
            removed: &[111, 222, 333],
        },
    ];

    for case in cases {
        let mut client = FakeClient::new()
            .with_game(1726, &[96613, 32272, 93397])
            .with_game(4126, &[77724, 96008])
            .with_game(5063, &[]);
        let mut catalog = catalog_with(case.source);
        let mut updater = Updater::new(&mut client, &mut catalog);
        for &(game_id, _) in case.source {
            updater.update_game_song_list(game_id).unwrap();
        }

        for &(game_id, song_ids) in case.expected {
            let game = catalog.game(game_id).unwrap();
            let got: Vec<u64> = game.songs.iter().map(|s| s.id).collect();
            assert_eq!(got, song_ids, "songs of game {game_id}");
            assert_eq!(game.download_timestamps.len(), 1);
            for song in &game.songs {
                assert_eq!(
                    song.is_deleted_from_site,
                    case.removed.contains(&song.id),
                    "deleted flag of song {}",
                    song.id
                );
            }
        }
    }
}

#[test]
fn test_song_list_of_game_missing_from_site_fails() {
    let mut client = FakeClient::new();
    let mut catalog = catalog_with(&[(999, &[444])]);

    let result = Updater::new(&mut client, &mut catalog).update_game_song_list(999);

    assert!(matches!(
        result,
        Err(SyncError::Scrape(smashdown_scraper::ScrapeError::Status { status: 404, .. }))
    ));
    let game = catalog.game(999).unwrap();
    assert!(game.download_timestamps.is_empty());
    assert!(!game.songs[0].is_deleted_from_site);
}

#[test]
fn test_song_list_of_unknown_game_fails_before_fetching() {
    let mut client = FakeClient::new().with_game(1, &[10]);
    let mut catalog = catalog_with(&[]);

    let result = Updater::new(&mut client, &mut catalog).update_game_song_list(1);

    assert!(matches!(
        result,
        Err(SyncError::Catalog(CatalogError::GameNotFound(1)))
    ));
    assert!(client.calls.is_empty());
}

#[test]
fn test_reappearing_song_is_undeleted() {
    let mut client = FakeClient::new().with_game(1726, &[93397]);
    let mut catalog = catalog_with(&[(1726, &[93397])]);
    catalog.song_mut(93397).unwrap().is_deleted_from_site = true;

    let changes = Updater::new(&mut client, &mut catalog)
        .update_game_song_list(1726)
        .unwrap();

    assert!(!catalog.song(93397).unwrap().is_deleted_from_site);
    assert_eq!(changes.reappeared, vec![93397]);
}

#[test]
fn test_song_owned_by_another_game_is_skipped() {
    let mut client = FakeClient::new().with_game(2, &[10, 20]);
    let mut catalog = catalog_with(&[(1, &[10]), (2, &[])]);

    let changes = Updater::new(&mut client, &mut catalog)
        .update_game_song_list(2)
        .unwrap();

    assert_eq!(changes.added, vec![20]);
    let ids: Vec<u64> = catalog.game(2).unwrap().songs.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![20]);
    assert_eq!(catalog.game_containing_song(10).unwrap().id, 1);
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

#[test]
fn test_batch_visits_stalest_games() {
    let mut client = FakeClient::new()
        .with_game(1, &[])
        .with_game(2, &[])
        .with_game(3, &[])
        .with_game(4, &[]);
    let mut catalog = catalog_with(&[(1, &[]), (2, &[]), (3, &[]), (4, &[])]);
    catalog.game_mut(1).unwrap().download_timestamps = vec![1, 5];
    catalog.game_mut(3).unwrap().download_timestamps = vec![3, 2];

    let results = Updater::new(&mut client, &mut catalog)
        .update_game_song_lists(3, &mut SilentProgress)
        .unwrap();

    let visited: Vec<u64> = results.iter().map(|(id, _)| *id).collect();
    assert_eq!(visited, vec![2, 4, 3]);
    assert_eq!(client.calls, vec!["game/2", "game/4", "game/3"]);
}

#[test]
fn test_batch_rotates_over_repeated_runs() {
    let mut client = FakeClient::new()
        .with_game(1, &[])
        .with_game(2, &[])
        .with_game(3, &[]);
    let mut catalog = catalog_with(&[(1, &[]), (2, &[]), (3, &[])]);

    let mut updater = Updater::new(&mut client, &mut catalog);
    updater.update_game_song_lists(2, &mut SilentProgress).unwrap();
    updater.update_game_song_lists(2, &mut LogProgress::new()).unwrap();

    assert_eq!(client.calls, vec!["game/1", "game/2", "game/3", "game/1"]);
}

#[test]
fn test_batch_skips_deleted_games() {
    let mut client = FakeClient::new().with_game(1, &[]).with_game(2, &[]);
    let mut catalog = catalog_with(&[(1, &[]), (2, &[])]);
    catalog.game_mut(1).unwrap().is_deleted_from_site = true;

    Updater::new(&mut client, &mut catalog)
        .update_game_song_lists(10, &mut SilentProgress)
        .unwrap();

    assert_eq!(client.calls, vec!["game/2"]);
}

#[test]
fn test_batch_stops_at_first_failure() {
    let mut client = FakeClient::new().with_game(2, &[]);
    let mut catalog = catalog_with(&[(1, &[]), (2, &[])]);

    let result = Updater::new(&mut client, &mut catalog)
        .update_game_song_lists(2, &mut SilentProgress);

    assert!(result.is_err());
    assert_eq!(client.calls, vec!["game/1"]);
    assert!(catalog.game(2).unwrap().download_timestamps.is_empty());
}

#[test]
fn test_homepage_policy_picks_under_fetched_games() {
    let mut client = FakeClient::new()
        .with_game(1, &[10, 11])
        .with_game(2, &[20])
        .with_game(3, &[30, 31, 32])
        .with_game(4, &[])
        .with_advertised_count(4, None);
    let mut catalog = catalog_with(&[(1, &[10]), (2, &[20]), (3, &[]), (4, &[])])
        .with_rng(StdRng::seed_from_u64(7));

    let results = Updater::new(&mut client, &mut catalog)
        .update_game_song_lists_by_using_homepage(10, &mut SilentProgress)
        .unwrap();

    let mut visited: Vec<u64> = results.iter().map(|(id, _)| *id).collect();
    visited.sort_unstable();
    assert_eq!(visited, vec![1, 3]);
    assert_eq!(client.calls[0], "home");
    assert_eq!(catalog.game(1).unwrap().active_song_count(), 2);
    assert_eq!(catalog.game(3).unwrap().active_song_count(), 3);
}

#[test]
fn test_homepage_policy_respects_max_count() {
    let mut client = FakeClient::new()
        .with_game(1, &[10])
        .with_game(2, &[20])
        .with_game(3, &[30]);
    let mut catalog = catalog_with(&[(1, &[]), (2, &[]), (3, &[])])
        .with_rng(StdRng::seed_from_u64(1));

    let results = Updater::new(&mut client, &mut catalog)
        .update_game_song_lists_by_using_homepage(2, &mut SilentProgress)
        .unwrap();

    assert_eq!(results.len(), 2);
}

#[test]
fn test_homepage_policy_counts_deleted_songs_as_missing() {
    let mut client = FakeClient::new().with_game(1, &[10]);
    let mut catalog = catalog_with(&[(1, &[10])]);
    catalog.song_mut(10).unwrap().is_deleted_from_site = true;

    let results = Updater::new(&mut client, &mut catalog)
        .update_game_song_lists_by_using_homepage(5, &mut SilentProgress)
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].1.reappeared, vec![10]);
}
