// Documents
//
// Finding rendered documents on disk and pulling their labels out in parallel.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use glob::glob;
use group_icons::{extract_labels, IconSession, LabelSet};
use rayon::prelude::*;
use tracing::debug;

/// Expand glob patterns into a sorted, deduplicated list of files.
pub fn collect_documents(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let entries =
            glob(pattern).with_context(|| format!("invalid glob pattern `{}`", pattern))?;
        files.extend(entries.filter_map(|entry| entry.ok()).filter(|path| path.is_file()));
    }
    files.sort();
    files.dedup();
    debug!(documents = files.len(), "collected documents");
    Ok(files)
}

/// Extract labels from every document. Files are read and scanned in
/// parallel; the results are recorded into `session` in path order so the
/// label order does not depend on scheduling.
pub fn extract_from_documents(files: &[PathBuf], session: &mut IconSession) -> Result<LabelSet> {
    let found = files
        .par_iter()
        .map(|path| -> Result<LabelSet> {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(extract_labels(&content))
        })
        .collect::<Result<Vec<_>>>()?;

    for labels in &found {
        session.observe(labels);
    }
    Ok(session.take_snapshot())
}
