use hazreg::index::{build_index, CacheState, IndexCache};
use hazreg::resolve::resolve;
use hazreg::source::{RecordSource, SdsSource};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_sized(path: &Path, size: usize) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![b'%'; size]).unwrap();
}

fn chemicals_root(base: &Path) -> PathBuf {
    let root = base.join("root");
    write_sized(&root.join("ChemicalsA/Benzene_MSDS.pdf"), 3072);
    write_sized(&root.join("ChemicalsB/lead compound.pdf"), 1536);
    root
}

#[test]
fn test_two_folder_scenario() {
    let dir = tempdir().unwrap();
    let root = chemicals_root(dir.path());
    let source = SdsSource::new(&root, &dir.path().join("sds_index.csv"));

    let table = source.load().unwrap();

    assert_eq!(
        table.columns,
        vec!["Material", "Folder", "FileName", "FileSizeKB", "PdfRelativePath"]
    );
    assert_eq!(
        table.rows,
        vec![
            vec![
                "Benzene MSDS",
                "ChemicalsA",
                "Benzene_MSDS.pdf",
                "3.0",
                "ChemicalsA/Benzene_MSDS.pdf"
            ],
            vec![
                "lead compound",
                "ChemicalsB",
                "lead compound.pdf",
                "1.5",
                "ChemicalsB/lead compound.pdf"
            ],
        ]
    );
}

#[test]
fn test_2048_bytes_is_two_kb() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    write_sized(&root.join("A/two.pdf"), 2048);

    let table = SdsSource::new(&root, &dir.path().join("cache.csv"))
        .load()
        .unwrap();
    assert_eq!(table.rows[0][3], "2.0");
}

#[test]
fn test_every_pdf_indexed_once_and_resolvable() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    let files = [
        "top.pdf",
        "A/one.pdf",
        "A/deeper/two.pdf",
        "B/three_four.pdf",
        "B/notes.txt",
    ];
    for f in files {
        write_sized(&root.join(f), 100);
    }

    let entries = build_index(&root).unwrap();
    assert_eq!(entries.len(), 4);

    let mut paths: Vec<_> = entries
        .iter()
        .map(|e| e.pdf_relative_path.clone())
        .collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 4);

    for entry in &entries {
        assert!(!entry.pdf_relative_path.contains('\\'));
        let joined = root.join(&entry.pdf_relative_path);
        assert!(joined.is_file(), "{} does not exist", joined.display());
        assert_eq!(
            resolve(&root, &entry.pdf_relative_path).unwrap(),
            joined.canonicalize().unwrap()
        );
    }

    let nested = entries.iter().find(|e| e.file_name == "two.pdf").unwrap();
    assert_eq!(nested.folder, "deeper");
    assert_eq!(nested.pdf_relative_path, "A/deeper/two.pdf");
}

#[test]
fn test_build_is_deterministic() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    for name in ["z/b.pdf", "a/c.pdf", "a/a.pdf", "m/x_y.pdf", "m/X y.pdf"] {
        write_sized(&root.join(name), 10);
    }

    let first = build_index(&root).unwrap();
    let second = build_index(&root).unwrap();
    assert_eq!(first, second);

    let cache_a = IndexCache::new(dir.path().join("a.csv"));
    let cache_b = IndexCache::new(dir.path().join("b.csv"));
    cache_a.persist(&first).unwrap();
    cache_b.persist(&second).unwrap();
    assert_eq!(
        fs::read(cache_a.path()).unwrap(),
        fs::read(cache_b.path()).unwrap()
    );
}

#[test]
fn test_stale_cache_is_not_rebuilt() {
    let dir = tempdir().unwrap();
    let root = chemicals_root(dir.path());
    let source = SdsSource::new(&root, &dir.path().join("sds_index.csv"));

    assert_eq!(source.cache().state(), CacheState::Missing);
    assert_eq!(source.load().unwrap().len(), 2);
    assert_eq!(source.cache().state(), CacheState::Built);

    write_sized(&root.join("ChemicalsC/Mercury.pdf"), 512);
    let table = source.load().unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.rows.iter().all(|r| r[0] != "Mercury"));

    // Deleting the cache is the only way back to Missing.
    source.cache().invalidate().unwrap();
    assert_eq!(source.load().unwrap().len(), 3);
}

#[test]
fn test_rebuild_overwrites_cache() {
    let dir = tempdir().unwrap();
    let root = chemicals_root(dir.path());
    let cache = IndexCache::new(dir.path().join("cache.csv"));

    assert_eq!(cache.rebuild(&root).unwrap().len(), 2);
    fs::remove_file(root.join("ChemicalsB/lead compound.pdf")).unwrap();
    assert_eq!(cache.rebuild(&root).unwrap().len(), 1);
    assert_eq!(cache.read().unwrap().len(), 1);
}
