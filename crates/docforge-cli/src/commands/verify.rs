//! Verify command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use docforge_engine::verify_document;
use docforge_model::Document;
use serde_json::json;

pub fn run(dir: String, strict: bool, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    collect_json_files(Path::new(&dir), &mut files)?;
    files.sort();

    if files.is_empty() {
        return Err(format!("no document JSON files found under {}", dir).into());
    }

    let mut results = Vec::new();
    let mut all_ok = true;
    for path in &files {
        let text = fs::read_to_string(path)?;
        match serde_json::from_str::<Document>(&text) {
            Ok(document) => match verify_document(&document) {
                Ok(()) => results.push((path.clone(), Some(document), None)),
                Err(defect) => {
                    all_ok = false;
                    results.push((path.clone(), Some(document), Some(defect.to_string())));
                }
            },
            Err(e) => {
                all_ok = false;
                results.push((path.clone(), None, Some(format!("unparseable: {}", e))));
            }
        }
    }

    if json_output {
        let value: Vec<_> = results
            .iter()
            .map(|(path, document, defect)| {
                json!({
                    "file": path.to_string_lossy(),
                    "doc_type": document.as_ref().map(|d| d.doc_type().tag()),
                    "id": document.as_ref().map(|d| d.id().to_string()),
                    "ok": defect.is_none(),
                    "defect": defect,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{:<38} {:<15} {:<8} DEFECT", "DOCUMENT_ID", "TYPE", "VERDICT");
        println!("{}", "-".repeat(82));
        for (path, document, defect) in &results {
            let (id, doc_type) = match document {
                Some(document) => (document.id().to_string(), document.doc_type().tag()),
                None => (path.to_string_lossy().into_owned(), "?"),
            };
            println!(
                "{:<38} {:<15} {:<8} {}",
                id,
                doc_type,
                if defect.is_none() { "ok" } else { "DEFECT" },
                defect.as_deref().unwrap_or("-")
            );
        }
        let defective = results.iter().filter(|(_, _, d)| d.is_some()).count();
        println!();
        println!("{} document(s) checked, {} defective", results.len(), defective);
    }

    if strict && !all_ok {
        return Err("verification failed for at least one document".into());
    }
    Ok(())
}

/// Collects `.json` files directly in `dir` and one level of
/// subdirectories (the per-type layout `gen` writes).
fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), std::io::Error> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            for nested in fs::read_dir(&path)? {
                let nested = nested?.path();
                if nested.extension().is_some_and(|ext| ext == "json") {
                    files.push(nested);
                }
            }
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}
