//! Integration tests for the PDF bundler library

mod common;

use common::{page_markers, page_texts, source};
use lopdf::Object;
use pdf_bundler::bundle::{DocumentSet, MoveOutcome, SourceHandle, SourceLoader};
use pdf_bundler::manifest::Manifest;
use pdf_bundler::pdf::{inspect, merge_documents, MergeEngine, MergeOptions};
use pdf_bundler::Error;
use rstest::rstest;
use tempfile::TempDir;

/// DocA with pages A1, A2 titled "Alpha"; DocB with page B1 titled "Beta"
fn alpha_beta() -> (DocumentSet, SourceHandle, SourceHandle) {
    let doc_a = source("doc_a.pdf", &["A1", "A2"]);
    let doc_b = source("doc_b.pdf", &["B1"]);

    let mut set = DocumentSet::new();
    set.add(doc_a.clone());
    set.add(doc_b.clone());
    set.set_title(&doc_a, "Alpha").unwrap();
    set.set_title(&doc_b, "Beta").unwrap();

    (set, doc_a, doc_b)
}

fn merge(set: &DocumentSet, insert_document_titles: bool) -> Vec<u8> {
    MergeEngine::default()
        .merge(set, &MergeOptions { insert_document_titles })
        .expect("Failed to merge bundle")
}

fn snapshot(set: &DocumentSet) -> Vec<(String, String)> {
    set.ordered_view()
        .iter()
        .map(|doc| (doc.source().name().to_string(), doc.title().to_string()))
        .collect()
}

#[rstest]
#[case::plain(None, false, &["A1", "A2", "B1"])]
#[case::cover(Some("Cover"), false, &["Cover", "A1", "A2", "B1"])]
#[case::section_titles(None, true, &["Alpha", "A1", "A2", "Beta", "B1"])]
#[case::cover_and_section_titles(
    Some("Cover"),
    true,
    &["Cover", "Alpha", "A1", "A2", "Beta", "B1"]
)]
fn test_merge_page_order(
    #[case] cover: Option<&str>,
    #[case] insert_document_titles: bool,
    #[case] expected: &[&str],
) {
    let (mut set, _, _) = alpha_beta();
    set.set_leading_title(cover.map(str::to_string));

    let bytes = merge(&set, insert_document_titles);

    assert_eq!(page_markers(&bytes), expected);
}

#[test]
fn test_move_up_reorders_merge_output() {
    let (mut set, _, doc_b) = alpha_beta();

    assert_eq!(set.move_up(&doc_b), MoveOutcome::Moved);

    let titles: Vec<&str> = set.ordered_view().iter().map(|doc| doc.title()).collect();
    assert_eq!(titles, ["Beta", "Alpha"]);

    let bytes = merge(&set, true);
    assert_eq!(page_markers(&bytes), ["Beta", "B1", "Alpha", "A1", "A2"]);
}

#[test]
fn test_unreadable_document_aborts_merge() {
    let (mut set, _, _) = alpha_beta();
    let corrupt = SourceHandle::new("corrupt.pdf", b"this is not a pdf at all".to_vec());
    set.add(corrupt);

    let result = MergeEngine::default().merge(&set, &MergeOptions::default());

    match result {
        Err(Error::DocumentUnreadable { position, name, .. }) => {
            assert_eq!(position, 3);
            assert_eq!(name, "corrupt.pdf");
        }
        Err(other) => panic!("expected DocumentUnreadable, got {other}"),
        Ok(_) => panic!("merge with a corrupt document must not produce output"),
    }
}

#[test]
fn test_unrenderable_title_aborts_merge() {
    let (mut set, doc_a, _) = alpha_beta();
    set.set_title(&doc_a, "概要").unwrap();

    let result = MergeEngine::default().merge(&set, &MergeOptions { insert_document_titles: true });
    assert!(matches!(result, Err(Error::Render { .. })));

    // Without section titles the title is never rendered
    assert!(MergeEngine::default().merge(&set, &MergeOptions::default()).is_ok());
}

#[test]
fn test_merge_is_read_only() {
    let (mut set, _, doc_b) = alpha_beta();
    set.set_leading_title(Some("Cover".to_string()));
    set.move_up(&doc_b);
    let before = snapshot(&set);

    merge(&set, true);

    assert_eq!(snapshot(&set), before);
    assert_eq!(set.leading_title(), Some("Cover"));
}

#[test]
fn test_merge_is_deterministic() {
    let (mut set, _, _) = alpha_beta();
    set.set_leading_title(Some("Cover".to_string()));

    let first = merge(&set, true);
    let second = merge(&set, true);

    assert_eq!(first, second);
}

#[test]
fn test_empty_bundle_is_nothing_to_merge() {
    let set = DocumentSet::new();

    let result = MergeEngine::default().merge(&set, &MergeOptions { insert_document_titles: true });
    assert!(matches!(result, Err(Error::NothingToMerge)));
}

#[test]
fn test_stale_handle_moves_are_noops() {
    let (mut set, _, _) = alpha_beta();
    let before = snapshot(&set);
    let stranger = source("doc_a.pdf", &["A1", "A2"]);

    assert_eq!(set.move_up(&stranger), MoveOutcome::NotMember);
    assert_eq!(set.move_down(&stranger), MoveOutcome::NotMember);
    assert_eq!(snapshot(&set), before);
}

#[test]
fn test_duplicate_upload_is_merged_once() {
    let (mut set, doc_a, _) = alpha_beta();
    assert!(!set.add(doc_a));

    let bytes = merge(&set, false);
    assert_eq!(page_markers(&bytes), ["A1", "A2", "B1"]);
}

#[test]
fn test_same_file_loaded_twice_is_merged_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("a.pdf");
    std::fs::write(&path, common::sample_pdf(&["A1"])).unwrap();

    let mut loader = SourceLoader::new();
    let mut set = DocumentSet::new();
    assert!(set.add(loader.load(&path).unwrap()));
    assert!(!set.add(loader.load(&path).unwrap()));

    let bytes = merge(&set, false);
    assert_eq!(page_markers(&bytes), ["A1"]);
}

#[test]
fn test_inspect_merged_bundle() {
    let (mut set, _, _) = alpha_beta();
    set.set_leading_title(Some("Cover".to_string()));

    let metadata = inspect(&merge(&set, true)).unwrap();
    assert_eq!(metadata.page_count, 6);
}

#[test]
fn test_title_pages_use_helvetica() {
    let (set, _, _) = alpha_beta();
    let bytes = merge(&set, true);

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    let title_page = *doc.get_pages().get(&1).unwrap();
    let fonts = doc
        .get_dictionary(title_page)
        .unwrap()
        .get(b"Resources")
        .and_then(Object::as_dict)
        .unwrap()
        .get(b"Font")
        .and_then(Object::as_dict)
        .unwrap();
    let font_id = fonts.get(b"F1").and_then(Object::as_reference).unwrap();
    let base_font = doc
        .get_dictionary(font_id)
        .unwrap()
        .get(b"BaseFont")
        .and_then(Object::as_name)
        .unwrap();

    assert_eq!(base_font, &b"Helvetica"[..]);
    assert!(page_texts(&bytes)[0].contains("(Alpha) Tj"));
}

#[test]
fn test_merge_documents_boundary_function() {
    let bytes = merge_documents(
        vec![
            (source("x.pdf", &["X1"]), "Ex".to_string()),
            (source("y.pdf", &["Y1", "Y2"]), "Why".to_string()),
        ],
        Some("Bundle"),
        false,
    )
    .unwrap();

    assert_eq!(page_markers(&bytes), ["Bundle", "X1", "Y1", "Y2"]);
}

#[test]
fn test_manifest_round_trip_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(temp_dir.path().join("one.pdf"), common::sample_pdf(&["P1"])).unwrap();
    std::fs::create_dir(temp_dir.path().join("more")).unwrap();
    std::fs::write(
        temp_dir.path().join("more").join("two.pdf"),
        common::sample_pdf(&["Q1", "Q2"]),
    )
    .unwrap();

    let manifest_path = temp_dir.path().join("bundle.json");
    std::fs::write(
        &manifest_path,
        r#"{
            "cover": "Handouts",
            "section_titles": true,
            "documents": [
                { "path": "more/two.pdf", "title": "Second" },
                { "path": "one.pdf" }
            ]
        }"#,
    )
    .unwrap();

    let manifest = Manifest::load(&manifest_path).unwrap();
    let options = MergeOptions { insert_document_titles: manifest.section_titles };
    let set = manifest.into_document_set().unwrap();

    let output_path = temp_dir.path().join("bundle.pdf");
    let bytes = MergeEngine::default().merge(&set, &options).unwrap();
    std::fs::write(&output_path, &bytes).unwrap();

    assert!(output_path.exists(), "Bundle PDF was not created");
    let written = std::fs::read(&output_path).unwrap();
    assert_eq!(
        page_markers(&written),
        ["Handouts", "Second", "Q1", "Q2", "one.pdf", "P1"]
    );
}
