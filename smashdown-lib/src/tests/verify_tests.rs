use tempfile::TempDir;

use super::*;
use crate::downloader::Downloader;
use crate::hasher::digest_bytes;
use crate::progress::SilentProgress;
use crate::testing::{FakeClient, catalog_with};

/// Catalog with songs 10 and 11 downloaded into `dir`, song 12 not.
fn downloaded_catalog(dir: &Path) -> Catalog {
    let mut catalog = catalog_with(&[(1, &[10, 11, 12])]);
    let mut client = FakeClient::new().with_game(1, &[10, 11, 12]);
    let mut downloader = Downloader::new(&mut client, &mut catalog, dir);
    downloader.download_one(10).unwrap();
    downloader.download_one(11).unwrap();
    catalog
}

#[test]
fn test_verify_clean_downloads() {
    let tmp = TempDir::new().unwrap();
    let catalog = downloaded_catalog(tmp.path());

    let stats = verify_downloads(&catalog, tmp.path());

    assert_eq!(stats.checked, 2);
    assert_eq!(stats.verified, 2);
    assert!(stats.is_clean());
}

#[test]
fn test_verify_reports_missing_and_corrupt_files() {
    let tmp = TempDir::new().unwrap();
    let catalog = downloaded_catalog(tmp.path());
    let location_10 = catalog.song(10).unwrap().download_info.clone().unwrap().location;
    let location_11 = catalog.song(11).unwrap().download_info.clone().unwrap().location;
    fs::remove_file(tmp.path().join(&location_10)).unwrap();
    fs::write(tmp.path().join(&location_11), b"tampered").unwrap();

    let stats = verify_downloads(&catalog, tmp.path());

    assert_eq!(stats.checked, 2);
    assert_eq!(stats.verified, 0);
    assert_eq!(stats.missing, 1);
    assert_eq!(stats.digest_mismatch, 1);
    assert_eq!(stats.errors, 0);
    assert!(stats.issues.contains(&VerifyIssue::Missing {
        song_id: 10,
        location: location_10,
    }));
    assert!(stats.issues.iter().any(|issue| matches!(
        issue,
        VerifyIssue::DigestMismatch { song_id: 11, actual, .. } if *actual == digest_bytes(b"tampered")
    )));
}

#[test]
fn test_orphans_are_files_without_records() {
    let tmp = TempDir::new().unwrap();
    let catalog = downloaded_catalog(tmp.path());
    let game_dir = tmp.path().join("1_game_1");
    fs::write(game_dir.join("12_song_12.brstm"), b"leftover").unwrap();
    fs::create_dir_all(tmp.path().join("99")).unwrap();
    fs::write(tmp.path().join("99/1.brstm"), b"stray").unwrap();
    fs::write(tmp.path().join("notes.txt"), b"hi").unwrap();

    let orphans = find_orphan_files(&catalog, tmp.path()).unwrap();

    assert_eq!(
        orphans,
        vec![
            PathBuf::from("1_game_1/12_song_12.brstm"),
            PathBuf::from("99/1.brstm"),
            PathBuf::from("notes.txt"),
        ]
    );
}

#[test]
fn test_orphans_of_missing_dir() {
    let tmp = TempDir::new().unwrap();
    let catalog = catalog_with(&[(1, &[10])]);
    let orphans = find_orphan_files(&catalog, &tmp.path().join("nothing-here")).unwrap();
    assert!(orphans.is_empty());
}

#[test]
fn test_repair_adopts_existing_files() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("db.json");
    let out = tmp.path().join("songs");
    let mut catalog = catalog_with(&[(1, &[10, 11, 12])]).with_output_file(&db_path);
    catalog.song_mut(12).unwrap().is_deleted_from_site = true;
    fs::create_dir_all(out.join("1_game_1")).unwrap();
    fs::write(out.join("1_game_1/10_song_10.brstm"), b"ten").unwrap();
    fs::write(out.join("1_game_1/12_song_12.brstm"), b"twelve").unwrap();

    let adopted = repair_downloads(&mut catalog, &out).unwrap();

    assert_eq!(adopted, 1);
    let info = catalog.song(10).unwrap().download_info.clone().unwrap();
    assert_eq!(info.location, PathBuf::from("1_game_1/10_song_10.brstm"));
    assert_eq!(info.content_digest, digest_bytes(b"ten"));
    assert!(!catalog.song(11).unwrap().is_downloaded());
    assert!(!catalog.song(12).unwrap().is_downloaded());

    let reloaded = Catalog::load(&db_path).unwrap();
    assert!(reloaded.song(10).unwrap().is_downloaded());
    assert!(verify_downloads(&reloaded, &out).is_clean());
}

#[test]
fn test_repair_with_nothing_to_adopt_does_not_save() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("db.json");
    let mut catalog = catalog_with(&[(1, &[10])]).with_output_file(&db_path);

    assert_eq!(repair_downloads(&mut catalog, tmp.path()).unwrap(), 0);
    assert!(!db_path.exists());
}

#[test]
fn test_repair_after_interrupted_batch() {
    let tmp = TempDir::new().unwrap();
    let mut catalog = catalog_with(&[(3, &[30, 31])]);
    let mut client = FakeClient::new().with_game(3, &[30, 31]);
    Downloader::new(&mut client, &mut catalog, tmp.path())
        .download_many(2, &mut SilentProgress)
        .unwrap();
    // Simulate a crash between file write and catalog save.
    catalog.song_mut(31).unwrap().download_info = None;

    assert_eq!(
        find_orphan_files(&catalog, tmp.path()).unwrap(),
        vec![PathBuf::from("3_game_3/31_song_31.brstm")]
    );
    assert_eq!(repair_downloads(&mut catalog, tmp.path()).unwrap(), 1);
    assert!(find_orphan_files(&catalog, tmp.path()).unwrap().is_empty());
}
