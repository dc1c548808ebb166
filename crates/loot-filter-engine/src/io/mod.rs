use crate::models::{FILTER_EXTENSION, FilterWorkspace, filter_name_from_file_name};
use crate::parsing::{DecodeOptions, SkippedParagraph};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid workspace file {path}: {source}")]
    InvalidWorkspace {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid filter directory: {0}")]
    InvalidFilterDir(String),
}

/// Read a filter file and return its content
pub fn read_filter_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write content to a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// Decode a `.filter` file into a workspace named after the file
pub fn import_filter(
    path: &Path,
    options: &DecodeOptions,
) -> Result<(FilterWorkspace, Vec<SkippedParagraph>), IoError> {
    let content = read_filter_file(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let filter_name = filter_name_from_file_name(&file_name);

    log::info!("Importing filter {filter_name:?} from {}", path.display());
    Ok(FilterWorkspace::from_filter_text(
        filter_name,
        &content,
        options,
    ))
}

/// Encode a workspace into `<dir>/<filter name>.filter`, returning the path written
pub fn export_filter(dir: &Path, workspace: &FilterWorkspace) -> Result<PathBuf, IoError> {
    let path = dir.join(workspace.file_name());
    write_file(&path, &workspace.to_filter_text())?;
    log::info!(
        "Exported {} blocks to {}",
        workspace.blocks.len(),
        path.display()
    );
    Ok(path)
}

/// Load a workspace saved as JSON
pub fn load_workspace(path: &Path) -> Result<FilterWorkspace, IoError> {
    let content = read_filter_file(path)?;
    FilterWorkspace::from_json(&content).map_err(|source| IoError::InvalidWorkspace {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a workspace as pretty-printed JSON
pub fn save_workspace(path: &Path, workspace: &FilterWorkspace) -> Result<(), IoError> {
    let json = workspace
        .to_json_pretty()
        .map_err(|source| IoError::InvalidWorkspace {
            path: path.to_path_buf(),
            source,
        })?;
    write_file(path, &json)
}

/// Scan for filter files in a directory
pub fn scan_filter_files(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !dir.exists() || !dir.is_dir() {
        return Err(IoError::InvalidFilterDir(
            "filter directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == FILTER_EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}
