use std::io::Cursor;

use afsar::{Archive, ArchiveBuilder, Error};
use afsar_core::{Timestamp, FILE_INFO_POINTER};

const PADDING: u32 = 2048;

fn sample_archive() -> Vec<u8> {
    let mut dest = Cursor::new(Vec::new());

    let mut builder = ArchiveBuilder::new(PADDING).unwrap();
    builder
        .data("first.txt", Timestamp::new(2003, 7, 24, 8, 0, 0), b"first contents".to_vec())
        .unwrap();
    builder
        .data("second.dat", Timestamp::new(2003, 7, 24, 8, 0, 1), vec![0xDE, 0xAD, 0xBE, 0xEF])
        .unwrap();
    builder.write_archive(&mut dest).unwrap();

    dest.into_inner()
}

fn file_info_offset(archive: &[u8]) -> usize {
    let slot = FILE_INFO_POINTER as usize;
    u32::from_le_bytes(archive[slot..slot + 4].try_into().unwrap()) as usize
}

#[test]
fn rejects_bad_magic() {
    let mut archive = sample_archive();
    archive[..4].copy_from_slice(b"ZIP\x00");

    match Archive::read_from(&mut archive) {
        Err(Error::Core(afsar_core::Error::InvalidMagic(magic))) => {
            assert_eq!(&magic, b"ZIP\x00");
        }
        other => panic!("expected InvalidMagic, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn rejects_length_mismatch() {
    let mut archive = sample_archive();

    // Corrupt the recorded length of the first file-info record. The
    // length field sits behind the 32-byte name and 12-byte timestamp.
    let length_at = file_info_offset(&archive) + 44;
    let recorded = u32::from_le_bytes(archive[length_at..length_at + 4].try_into().unwrap());
    archive[length_at..length_at + 4].copy_from_slice(&(recorded + 1).to_le_bytes());

    match Archive::read_from(&mut archive) {
        Err(Error::Core(afsar_core::Error::LengthMismatch { expected, actual })) => {
            assert_eq!(expected, recorded);
            assert_eq!(actual, recorded + 1);
        }
        other => panic!("expected LengthMismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn rejects_non_ascii_name() {
    let mut archive = sample_archive();

    let name_at = file_info_offset(&archive);
    archive[name_at] = 0xFF;

    match Archive::read_from(&mut archive) {
        Err(Error::Core(afsar_core::Error::NonAsciiName)) => {}
        other => panic!("expected NonAsciiName, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn rejects_truncated_file_info() {
    let mut archive = sample_archive();
    archive.truncate(file_info_offset(&archive) + 10);

    match Archive::read_from(&mut archive) {
        Err(Error::Core(afsar_core::Error::UnexpectedEof)) => {}
        other => panic!("expected UnexpectedEof, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn rejects_entry_data_out_of_bounds() {
    let mut archive = sample_archive();

    // Point the first table entry far beyond the end of the stream
    archive[8..12].copy_from_slice(&u32::MAX.to_le_bytes());

    match Archive::read_from(&mut archive) {
        Err(Error::Core(afsar_core::Error::UnexpectedEof)) => {}
        other => panic!("expected UnexpectedEof, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn missing_file_info_degrades_to_defaults() -> Result<(), Error> {
    let mut archive = sample_archive();

    // A zeroed pointer slot marks an archive without name or timestamp
    // metadata
    let slot = FILE_INFO_POINTER as usize;
    archive[slot..slot + 8].fill(0);

    let decoded = Archive::read_from(&mut archive)?;
    assert!(decoded.file_info_missing());
    assert_eq!(decoded.entries().len(), 2);
    for entry in decoded.entries() {
        assert_eq!(entry.name, "");
        assert_eq!(entry.timestamp, Timestamp::EPOCH);
    }
    assert_eq!(decoded.entries()[0].data, b"first contents");
    assert_eq!(decoded.entries()[1].data, [0xDE, 0xAD, 0xBE, 0xEF]);

    Ok(())
}
