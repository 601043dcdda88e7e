//! Integration tests for PDF output on disk.

use lopdf::content::Content;
use lopdf::{Document, Object};
use repdf::{process_document, reconstruct_file, Error, PageGeometry, PageSelection, Repdf};
use std::fs;
use std::path::Path;

const EXTRACTION: &str = r#"{
    "DocumentMetadata": { "Pages": 2 },
    "Blocks": [
        { "BlockType": "PAGE", "Page": 1 },
        { "BlockType": "LINE", "Page": 1, "Text": "Chapter &amp; Verse",
          "Geometry": { "BoundingBox": { "Top": 0.05, "Left": 0.1 } } },
        { "BlockType": "LINE", "Page": 1, "Text": "日本語",
          "Geometry": { "BoundingBox": { "Top": 0.2, "Left": 0.1 } } },
        { "BlockType": "LINE", "Page": 1, "Text": "*Body* text",
          "Geometry": { "BoundingBox": { "Top": 0.3, "Left": 0.1 } } },
        { "BlockType": "WORD", "Page": 1, "Text": "Body",
          "Geometry": { "BoundingBox": { "Top": 0.3, "Left": 0.1 } } },
        { "BlockType": "LINE", "Page": 2, "Text": "Second page",
          "Geometry": { "BoundingBox": { "Top": 0.5, "Left": 0.5 } } }
    ]
}"#;

const LAYOUT: &str = "'Page number','Layout','Text','Reading Order','Confidence score % (Layout)'\n\
'1','Title 1','Chapter & Verse','0','96.1'\n\
'1','Text 1','Body text','1','90.4'\n";

fn write_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let json = dir.join("analyzeDocResponse.json");
    let csv = dir.join("layout.csv");
    fs::write(&json, EXTRACTION).unwrap();
    fs::write(&csv, LAYOUT).unwrap();
    (json, csv)
}

/// Text strings drawn on each page, in content stream order.
fn drawn_text(pdf: &Path) -> Vec<Vec<String>> {
    let doc = Document::load(pdf).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(Object::String(bytes, _)) => {
                        Some(String::from_utf8_lossy(bytes).into_owned())
                    }
                    _ => None,
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_reconstruct_file_skips_unsupported_glyphs() {
    let dir = tempfile::tempdir().unwrap();
    let (json, _) = write_inputs(dir.path());
    let output = dir.path().join("book.pdf");

    let report = reconstruct_file(&json, &output).unwrap();

    assert_eq!(report.page_count, 2);
    assert_eq!(report.placement_count, 4);
    assert_eq!(report.drawn_count, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].page, 1);
    assert_eq!(report.failures[0].excerpt, "日本語");

    let pages = drawn_text(&output);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0], vec!["Chapter & Verse", "Body text"]);
    assert_eq!(pages[1], vec!["Second page"]);
}

#[test]
fn test_media_box_matches_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let (json, _) = write_inputs(dir.path());
    let output = dir.path().join("letter.pdf");

    Repdf::new()
        .with_geometry(PageGeometry::letter())
        .load(&json)
        .unwrap()
        .write_pdf(&output)
        .unwrap();

    let doc = Document::load(&output).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let numbers: Vec<f32> = media_box
        .iter()
        .map(|o| match o {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r as f32,
            other => panic!("unexpected MediaBox entry {:?}", other),
        })
        .collect();
    assert_eq!(numbers, vec![0.0, 0.0, 612.0, 792.0]);
}

#[test]
fn test_page_selection_limits_output() {
    let dir = tempfile::tempdir().unwrap();
    let (json, csv) = write_inputs(dir.path());
    let output = dir.path().join("page2.pdf");

    let job = Repdf::new()
        .with_pages(PageSelection::Pages(vec![2]))
        .load_with_layout(&json, &csv)
        .unwrap();
    assert_eq!(job.layout.as_ref().map(|t| t.len()), Some(2));

    let report = job.write_pdf(&output).unwrap();
    assert_eq!(report.page_count, 1);
    assert_eq!(drawn_text(&output), vec![vec!["Second page".to_string()]]);
}

#[test]
fn test_process_document_success_and_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (json, csv) = write_inputs(dir.path());
    let output = dir.path().join("out.pdf");

    assert!(process_document(&json, &csv, &output));
    assert!(output.exists());

    let bad_csv = dir.path().join("bad.csv");
    fs::write(&bad_csv, "'Page number','Text'\n'1','x'\n").unwrap();
    assert!(!process_document(&json, &bad_csv, dir.path().join("never.pdf")));
}

#[test]
fn test_layout_missing_column_is_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (json, _) = write_inputs(dir.path());
    let bad_csv = dir.path().join("bad.csv");
    fs::write(&bad_csv, "'Layout','Text'\n").unwrap();

    let err = Repdf::new().load_with_layout(&json, &bad_csv).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "Page number"));
    assert!(err.is_load_failure());
}

#[test]
fn test_unrepresentable_position_recorded_as_failure() {
    let json = br#"{
        "DocumentMetadata": { "Pages": 1 },
        "Blocks": [
            { "BlockType": "LINE", "Page": 1, "Text": "far",
              "Geometry": { "BoundingBox": { "Top": 1e40, "Left": 0.1 } } },
            { "BlockType": "LINE", "Page": 1, "Text": "near",
              "Geometry": { "BoundingBox": { "Top": 0.5, "Left": 0.1 } } }
        ]
    }"#;

    let (pdf, report) = Repdf::new().load_bytes(json).unwrap().to_pdf_bytes().unwrap();

    assert_eq!(report.drawn_count, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].excerpt, "far");

    let doc = Document::load_mem(&pdf).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    let operators: Vec<&str> = content.operations.iter().map(|op| op.operator.as_str()).collect();
    assert_eq!(operators, vec!["BT", "Tf", "Td", "Tj", "ET"]);
}
