//! Request models for the native pickers.
//!
//! The caller fills in the configuration fields, the controller shows the
//! picker and, if the user accepts, writes the selection back into the same
//! request.

use std::path::{Path, PathBuf};

use crate::dialog::errors::DialogError;

/// Fields shared by the open and save file pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDialogRequest {
    /// Append `default_ext` when the user types a name without extension.
    pub add_extension: bool,
    pub check_file_exists: bool,
    pub check_path_exists: bool,
    /// Extension without the leading dot, e.g. `"csv"`.
    pub default_ext: Option<String>,
    /// First selected file; also the initial file name shown.
    pub file_name: Option<PathBuf>,
    /// Every selected file.
    pub file_names: Vec<PathBuf>,
    /// Filter in `"Label|*.ext;*.ext2|Label2|*.*"` form.
    pub filter: Option<String>,
    pub initial_directory: Option<PathBuf>,
    pub title: Option<String>,
}

impl Default for FileDialogRequest {
    fn default() -> Self {
        Self {
            add_extension: true,
            check_file_exists: false,
            check_path_exists: true,
            default_ext: None,
            file_name: None,
            file_names: Vec::new(),
            filter: None,
            initial_directory: None,
            title: None,
        }
    }
}

impl FileDialogRequest {
    /// Parsed form of [`filter`](Self::filter).
    pub fn filters(&self) -> Result<Vec<FileFilter>, DialogError> {
        match self.filter.as_deref() {
            Some(filter) => FileFilter::parse(filter),
            None => Ok(Vec::new()),
        }
    }

    /// Store an accepted selection.
    pub fn accept(&mut self, paths: Vec<PathBuf>) {
        self.file_name = paths.first().cloned();
        self.file_names = paths;
    }

    /// Initial file name to pre-fill, as shown to the user.
    pub fn initial_file_name(&self) -> Option<String> {
        self.file_name
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// First of `paths` failing `check_file_exists` or `check_path_exists`.
    pub fn rejected_path<'a>(&self, paths: &'a [PathBuf]) -> Option<&'a Path> {
        paths.iter().map(PathBuf::as_path).find(|path| {
            (self.check_file_exists && !path.is_file())
                || (self.check_path_exists && !parent_exists(path))
        })
    }

    /// `path` with `default_ext` appended when it has no extension and
    /// `add_extension` is on.
    pub fn with_default_extension(&self, path: PathBuf) -> PathBuf {
        match self.default_ext.as_deref() {
            Some(ext) if self.add_extension && path.extension().is_none() => {
                path.with_extension(ext.trim_start_matches('.'))
            }
            _ => path,
        }
    }
}

// A bare file name has an empty parent, which means the current directory.
fn parent_exists(path: &Path) -> bool {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
        _ => true,
    }
}

/// Request for the open-file picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenFileRequest {
    pub file: FileDialogRequest,
    pub multiselect: bool,
}

impl OpenFileRequest {
    pub fn new() -> Self {
        Self {
            file: FileDialogRequest {
                check_file_exists: true,
                ..Default::default()
            },
            multiselect: false,
        }
    }
}

/// Request for the save-file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFileRequest {
    pub file: FileDialogRequest,
    /// Ask before overwriting an existing file.
    pub overwrite_prompt: bool,
}

impl Default for SaveFileRequest {
    fn default() -> Self {
        Self {
            file: FileDialogRequest::default(),
            overwrite_prompt: true,
        }
    }
}

impl SaveFileRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Request for the folder picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderBrowserRequest {
    /// Text shown above the folder tree; used as the picker title.
    pub description: Option<String>,
    /// Folder selected initially, and the accepted folder afterwards.
    pub selected_path: Option<PathBuf>,
    pub show_new_folder_button: bool,
    /// Directory the picker starts in when nothing is selected.
    pub root_directory: Option<PathBuf>,
}

impl Default for FolderBrowserRequest {
    fn default() -> Self {
        Self {
            description: None,
            selected_path: None,
            show_new_folder_button: true,
            root_directory: None,
        }
    }
}

impl FolderBrowserRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One entry of a picker filter: a label and the extensions it matches.
///
/// `"*"` in `extensions` matches every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Parse `"Label|*.ext;*.ext2|Label2|*.*"` into filter entries.
    ///
    /// An empty string yields no filters.
    pub fn parse(filter: &str) -> Result<Vec<FileFilter>, DialogError> {
        if filter.trim().is_empty() {
            return Ok(Vec::new());
        }

        let invalid = |message: &str| DialogError::InvalidFilter {
            filter: filter.to_string(),
            message: message.to_string(),
        };

        let segments: Vec<&str> = filter.split('|').collect();
        if segments.len() % 2 != 0 {
            return Err(invalid("expected label|pattern pairs"));
        }

        segments
            .chunks(2)
            .map(|pair| {
                let name = pair[0].trim();
                if name.is_empty() {
                    return Err(invalid("filter label is empty"));
                }

                let extensions = pair[1]
                    .split(';')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(pattern_extension)
                    .collect::<Vec<_>>();
                if extensions.is_empty() {
                    return Err(invalid("filter pattern list is empty"));
                }

                Ok(FileFilter {
                    name: name.to_string(),
                    extensions,
                })
            })
            .collect()
    }

    pub fn matches_all(&self) -> bool {
        self.extensions.iter().any(|e| e == "*")
    }
}

fn pattern_extension(pattern: &str) -> String {
    match pattern {
        "*" | "*.*" => "*".to_string(),
        _ => pattern
            .strip_prefix("*.")
            .or_else(|| pattern.strip_prefix('.'))
            .unwrap_or(pattern)
            .to_string(),
    }
}
