use std::fs::OpenOptions;
use std::path::PathBuf;

use periph_media::{BlockMedia, MediaError, PoMedia, BLOCK_SIZE};
use pretty_assertions::assert_eq;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("po_media_{}_{}.po", std::process::id(), name))
}

fn open_image(name: &str, blocks: u32) -> (PathBuf, PoMedia) {
    let path = temp_path(name);
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .unwrap();
    PoMedia::create(&mut file, blocks).unwrap();
    let size = file.metadata().unwrap().len();
    let media = PoMedia::mount(file, size).unwrap();
    (path, media)
}

#[test]
fn mount_rejects_uneven_size() {
    let path = temp_path("uneven");
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .unwrap();

    let err = PoMedia::mount(file, 513).unwrap_err();
    assert!(matches!(err, MediaError::UnevenImage { size: 513 }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn mount_rejects_empty_image() {
    let path = temp_path("empty");
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .unwrap();

    assert!(PoMedia::mount(file, 0).is_err());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn create_sizes_the_image() {
    let (path, media) = open_image("create", 280);

    assert_eq!(media.block_count(), 280);
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 280 * BLOCK_SIZE as u64);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn sequential_read_write_round_trip() {
    let (path, mut media) = open_image("roundtrip", 8);

    for block in 0..8u32 {
        let data = [block as u8; BLOCK_SIZE];
        media.write(block, &data).unwrap();
    }
    media.reset_seek_cache();
    for block in 0..8u32 {
        let mut buf = [0u8; BLOCK_SIZE];
        media.read(block, &mut buf).unwrap();
        assert_eq!(buf, [block as u8; BLOCK_SIZE]);
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn random_access_round_trip() {
    let (path, mut media) = open_image("random", 8);

    // Out-of-order access must still land on the right blocks.
    for &block in &[5u32, 2, 7, 0] {
        let data = [block as u8 ^ 0xA5; BLOCK_SIZE];
        media.write(block, &data).unwrap();
    }
    for &block in &[0u32, 7, 2, 5] {
        let mut buf = [0u8; BLOCK_SIZE];
        media.read(block, &mut buf).unwrap();
        assert_eq!(buf[0], block as u8 ^ 0xA5);
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn block_out_of_range() {
    let (path, mut media) = open_image("range", 4);

    let mut buf = [0u8; BLOCK_SIZE];
    let err = media.read(4, &mut buf).unwrap_err();
    assert!(matches!(err, MediaError::BlockOutOfRange { block: 4, count: 4 }));
    assert!(media.write(100, &buf).is_err());

    // In-range access still works afterwards.
    media.read(3, &mut buf).unwrap();

    let _ = std::fs::remove_file(&path);
}

#[test]
fn format_zero_fills() {
    let (path, mut media) = open_image("format", 4);

    media.write(2, &[0xFF; BLOCK_SIZE]).unwrap();
    media.format().unwrap();

    let mut buf = [0xEEu8; BLOCK_SIZE];
    media.read(2, &mut buf).unwrap();
    assert_eq!(buf, [0u8; BLOCK_SIZE]);
    assert!(media.status());

    let _ = std::fs::remove_file(&path);
}
