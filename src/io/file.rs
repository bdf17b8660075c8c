//! Checks and status messages around user-picked text files.
//!
//! TRADE-OFFS
//! ==========
//! The actual picker is host-specific (browser file dialog, CLI path), so it
//! is abstracted as a [`TextSource`]. Only the validation order and the
//! resulting [`LoaderMessage`]s live here; cancelling the picker is silent.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::fmt;

/// Largest file accepted by [`load_text_from_file`], in KiB.
pub const MAX_FILE_SIZE_KB: u64 = 100;

// =============================================================================
// DATA TYPES
// =============================================================================

/// Save-dialog metadata for a file extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataType {
    pub description: &'static str,
    pub mime: &'static str,
    /// Accepted extension including the leading dot.
    pub extension: String,
    /// MIME type with charset, for plain downloads.
    pub legacy_mime: &'static str,
}

impl DataType {
    #[must_use]
    pub fn for_extension(extension: &str) -> Self {
        let ext = extension.to_ascii_lowercase();
        let (description, mime, legacy_mime) = match ext.as_str() {
            "txt" => ("Text file", "text/plain", "text/plain;charset=utf-8"),
            "json" => ("JSON file", "application/json", "application/json;charset=utf-8"),
            "css" => ("CSS file", "text/css", "text/css;charset=utf-8"),
            _ => ("Unknown", "text/plain", "text/plain;charset=utf-8"),
        };
        Self {
            description,
            mime,
            extension: format!(".{ext}"),
            legacy_mime,
        }
    }

    /// Data type of a suggested file name, keyed by its last extension.
    #[must_use]
    pub fn for_file_name(name: &str) -> Self {
        Self::for_extension(name.rsplit('.').next().unwrap_or_default())
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Danger,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Danger => "danger",
        })
    }
}

/// Status line shown next to the load button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderMessage {
    pub level: MessageLevel,
    pub message: String,
}

impl LoaderMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: MessageLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: MessageLevel::Success, message: message.into() }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self { level: MessageLevel::Danger, message: message.into() }
    }
}

// =============================================================================
// LOADING
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The user closed the picker without choosing a file.
    #[error("cancelled")]
    Cancelled,
    #[error("Choose a .{extension} file.")]
    WrongExtension { extension: String },
    #[error("The file is too large.")]
    TooLarge,
    #[error("Failed to load: {name}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// A picked file whose content has not been read yet.
pub trait TextSource {
    fn name(&self) -> &str;
    fn size(&self) -> u64;
    /// # Errors
    ///
    /// Host read failures.
    fn read_text(&self) -> std::io::Result<String>;
}

/// Extension and size checks, in that order.
///
/// # Errors
///
/// [`FileError::WrongExtension`] or [`FileError::TooLarge`].
pub fn check_file(file: &impl TextSource, extension: &str, max_file_size_kb: u64) -> Result<(), FileError> {
    let suffix = format!(".{}", extension.to_ascii_lowercase());
    if !file.name().to_lowercase().ends_with(&suffix) {
        return Err(FileError::WrongExtension {
            extension: extension.to_owned(),
        });
    }
    if file.size() > max_file_size_kb * 1024 {
        return Err(FileError::TooLarge);
    }
    Ok(())
}

/// Validate and read a picked file, handing its text to `on_content`.
///
/// `picked` is `Err(FileError::Cancelled)` when the picker was dismissed;
/// nothing is reported in that case. `on_content` returns whether the text
/// was accepted. Progress and the outcome are reported through `on_message`.
pub fn load_text_from_file<F: TextSource>(
    picked: Result<F, FileError>,
    on_content: impl FnOnce(&str) -> bool,
    mut on_message: impl FnMut(LoaderMessage),
    extension: &str,
    max_file_size_kb: u64,
) {
    on_message(LoaderMessage::info(""));
    match read_checked(picked, extension, max_file_size_kb, &mut on_message) {
        Ok((name, content)) => {
            if on_content(&content) {
                tracing::info!(%name, "file loaded");
                on_message(LoaderMessage::success(format!("Loaded: {name}")));
            } else {
                tracing::info!(%name, "file content rejected");
                on_message(LoaderMessage::danger(format!("Failed to load: {name}")));
            }
        }
        Err(FileError::Cancelled) => {}
        Err(e) => {
            tracing::info!(error = %e, "file not loaded");
            on_message(LoaderMessage::danger(e.to_string()));
        }
    }
}

fn read_checked<F: TextSource>(
    picked: Result<F, FileError>,
    extension: &str,
    max_file_size_kb: u64,
    on_message: &mut impl FnMut(LoaderMessage),
) -> Result<(String, String), FileError> {
    let file = picked?;
    check_file(&file, extension, max_file_size_kb)?;
    let name = file.name().to_owned();
    on_message(LoaderMessage::info(format!("Loading: {name}")));
    let content = file.read_text().map_err(|source| FileError::Read {
        name: name.clone(),
        source,
    })?;
    Ok((name, content))
}
