use std::io::Write;

use plagscan::{MatchConfig, PlagscanConfig, Scanner, compare_texts, normalize};

#[test]
fn normalize_reference_sentences() {
    assert_eq!(normalize("Hello, World!"), "hello world");
    assert_eq!(
        normalize("The quick brown foxes are jumping over the lazy dogs."),
        "quick brown fox jump lazi dog"
    );
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("The and of, it is!"), "");
}

#[test]
fn near_copy_is_flagged_and_paraphrase_is_not() {
    let original = "The French Revolution abolished feudal privileges and proclaimed \
                    the rights of man, reshaping European politics for a century.";
    // Same words, different punctuation and case.
    let near_copy = "the french revolution ABOLISHED feudal privileges; and proclaimed \
                     the rights of man -- reshaping european politics for a century";
    let paraphrase = "Feudal privileges ended when revolutionaries in France declared \
                      universal rights, changing politics across Europe for generations.";

    let cfg = MatchConfig::default();
    let copy = compare_texts(original, near_copy, &cfg).expect("compare");
    assert_eq!(copy.similarity_ratio, 1.0);
    assert!(copy.is_plagiarized);

    let para = compare_texts(original, paraphrase, &cfg).expect("compare");
    assert!(para.similarity_ratio < 0.2);
    assert!(!para.is_plagiarized);
}

#[test]
fn short_texts_score_zero() {
    let cfg = MatchConfig::default();
    let result = compare_texts("Cats sleep.", "Cats sleep.", &cfg).expect("compare");
    assert_eq!(result.compared_windows, 0);
    assert_eq!(result.similarity_ratio, 0.0);
    assert!(!result.is_plagiarized);
}

#[test]
fn yaml_config_drives_scanner() {
    let yaml = r#"
version: "1.0"
name: "lenient"
matcher:
  window_size: 5
  threshold: 0.5
scan:
  parallel: true
"#;
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write config");
    let config = PlagscanConfig::from_file(file.path()).expect("load config");
    let scanner = Scanner::new(&config).expect("scanner");

    // "cat sleep" is 9 chars: five 5-char windows.
    let result = scanner
        .compare_texts("Cats sleep.", "Cats sleep!")
        .expect("compare");
    assert_eq!(result.compared_windows, 5);
    assert_eq!(result.similarity_ratio, 1.0);
}

#[test]
fn scan_files_on_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let write = |name: &str, text: &str| {
        let path = dir.path().join(name);
        std::fs::write(&path, text).expect("write file");
        path
    };

    let base = write(
        "base.txt",
        "Neural networks approximate functions by composing many simple nonlinear units.",
    );
    let copy = write(
        "copy.TXT",
        "NEURAL networks approximate functions, by composing many simple nonlinear units!",
    );
    let own = write(
        "own.txt",
        "Bread rises because yeast ferments sugars and releases carbon dioxide bubbles.",
    );
    let empty = write("empty.txt", "");

    let scanner = Scanner::new(&PlagscanConfig::default()).expect("scanner");
    let report = scanner
        .scan_paths(&base, &[copy, empty, own])
        .expect("scan");

    assert_eq!(report.base.name, "base.txt");
    assert_eq!(report.rows.len(), 2);
    assert_eq!((report.rows[0].no, report.rows[0].filename.as_str()), (1, "copy.TXT"));
    assert_eq!(report.rows[0].similarity_rate, "100.00%");
    assert_eq!((report.rows[1].no, report.rows[1].filename.as_str()), (2, "own.txt"));
    assert_eq!(report.skipped[0].filename, "empty.txt");

    let table = report.to_string();
    assert!(table.starts_with("No.  Filename  Similarity Rate  Verdict"));
    assert!(table.contains("Plagiarism detected"));
    assert!(table.contains("No plagiarism detected"));
    assert!(table.ends_with("Skipped empty.txt: no text could be extracted from empty.txt"));
}
