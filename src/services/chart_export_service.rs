//! Write the chart images currently shown on the page to disk

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;
use tracing::{debug, info};

use crate::page::{ids, Document};

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("chart `{0}` does not hold a PNG data URI")]
    NotPngDataUri(String),
    #[error("chart `{0}` decoded to data that is not a PNG image")]
    NotPngImage(String),
    #[error("chart `{chart}` has invalid base64 data: {source}")]
    Decode {
        chart: String,
        #[source]
        source: base64::DecodeError,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decode the payload of a `data:image/png;base64,` URI
pub fn decode_png_data_uri(chart: &str, src: &str) -> Result<Vec<u8>, ExportError> {
    let payload = src
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or_else(|| ExportError::NotPngDataUri(chart.to_string()))?;

    STANDARD.decode(payload.trim()).map_err(|source| ExportError::Decode {
        chart: chart.to_string(),
        source,
    })
}

/// Save every visible chart as `<chart id>.png` under `dir`.
///
/// Hidden charts are skipped. Returns the files written, line chart first.
pub fn export_charts(doc: &Document, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::new();

    for chart in [ids::LINE_CHART, ids::PIE_CHART] {
        let src = match doc.element(chart) {
            Some(element) if !element.is_hidden() => match &element.src {
                Some(src) => src,
                None => continue,
            },
            _ => {
                debug!("Skipping hidden or missing chart {}", chart);
                continue;
            }
        };

        let bytes = decode_png_data_uri(chart, src)?;
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(ExportError::NotPngImage(chart.to_string()));
        }

        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(format!("{}.png", chart));
        fs::write(&path, &bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        written.push(path);
    }

    Ok(written)
}
