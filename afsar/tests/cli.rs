use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

use afsar::FILE_LISTING_NAME;

#[test]
fn cli_pack_unpack_cycle() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;
    fs::write(source.path().join("stage.bin"), [7u8; 4000])?;
    fs::write(source.path().join("notes.txt"), b"some notes")?;
    fs::write(
        source.path().join(FILE_LISTING_NAME),
        "stage.bin;;2004 3 18 9 30 0\nnotes.txt;;2004 3 18 9 30 1\n",
    )?;

    let work = tempdir()?;
    let archive_path = work.path().join("game.afs");

    let mut cmd = Command::cargo_bin("afsar")?;
    cmd.arg(source.path()).arg(&archive_path);
    cmd.assert().success();

    let archive = fs::read(&archive_path)?;
    assert_eq!(&archive[..4], b"AFS\x00");

    let out_dir = work.path().join("extracted");
    let mut cmd = Command::cargo_bin("afsar")?;
    cmd.arg(&archive_path).arg(&out_dir);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("stage.bin").and(predicate::str::contains("notes.txt")));

    assert_eq!(fs::read(out_dir.join("stage.bin"))?, [7u8; 4000]);
    assert_eq!(fs::read(out_dir.join("notes.txt"))?, b"some notes");
    assert_eq!(
        fs::read_to_string(out_dir.join(FILE_LISTING_NAME))?,
        "stage.bin;;2004 3 18 9 30 0\nnotes.txt;;2004 3 18 9 30 1\n",
    );

    Ok(())
}

#[test]
fn cli_rejects_bad_padding() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;

    let mut cmd = Command::cargo_bin("afsar")?;
    cmd.arg(source.path()).arg("--padding").arg("3000");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("power of two"));

    Ok(())
}

#[test]
fn cli_rejects_non_integer_padding() -> Result<(), Box<dyn std::error::Error>> {
    let source = tempdir()?;

    let mut cmd = Command::cargo_bin("afsar")?;
    cmd.arg(source.path()).arg("--padding").arg("lots");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("integer"));

    Ok(())
}
