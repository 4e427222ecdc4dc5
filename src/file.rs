//! File-path classification for the command-line and batch-processing
//! collaborators that sit above this crate: given a path, decide which
//! dialect it names and whether it plays an input or output role.
//!
//! Invalid paths are reported through an injected [`FailHandler`]
//! collaborator rather than a bare `Result`, since the default behavior
//! (prompt the operator and terminate the process) is itself part of the
//! external interface, not something every caller wants threaded through
//! `?`.

use std::path::Path;

/// The dialect a file path names, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Vendor TXT mnemonic export (`.txt`).
    Txt,
    /// Vendor PRN export (`.prn`).
    Prn,
    /// Slim MARCXML (`.xml`).
    Xml,
    /// Mnemonic-line output (`.lex`). Output role only.
    Lex,
}

impl FileKind {
    /// Classify a path by its extension, case-insensitively.
    ///
    /// `.xml` is valid in both the input and output role; `.txt`/`.prn`
    /// are input-only, `.lex` is output-only. This method only classifies
    /// the extension; role validity is checked by [`classify`].
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "prn" => Some(Self::Prn),
            "xml" => Some(Self::Xml),
            "lex" => Some(Self::Lex),
            _ => None,
        }
    }
}

/// Whether a path is being used as a source or a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Must already exist.
    Input,
    /// Will be created or overwritten; existence is not checked.
    Output,
}

/// Receives a human-readable message when a path fails classification or
/// existence checks. The default implementation prints to stderr and
/// terminates the process, matching the "prompt and terminate" behavior
/// external interfaces expect; callers that want recoverable errors
/// instead should inject their own implementation.
pub trait FailHandler {
    /// Report `message` and decide whether to continue. The default
    /// handler never returns.
    fn fail(&self, message: &str) -> !;
}

/// The default [`FailHandler`]: print to stderr and exit the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminateOnFailure;

impl FailHandler for TerminateOnFailure {
    fn fail(&self, message: &str) -> ! {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// A classified, role-checked file path.
#[derive(Debug, Clone)]
pub struct ClassifiedPath {
    /// The original path.
    pub path: std::path::PathBuf,
    /// The dialect inferred from its extension.
    pub kind: FileKind,
    /// The role it was classified for.
    pub role: FileRole,
}

/// Classify `path` for the given `role`, reporting through `handler` (and
/// never returning to the caller) if the extension is unrecognized, the
/// extension doesn't support the requested role, or (for [`FileRole::Input`])
/// the path doesn't exist.
pub fn classify(path: impl AsRef<Path>, role: FileRole, handler: &impl FailHandler) -> ClassifiedPath {
    let path = path.as_ref();

    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        handler.fail(&format!("{}: no file extension", path.display()));
    };
    let Some(kind) = FileKind::from_extension(ext) else {
        handler.fail(&format!("{}: unrecognized file extension {ext:?}", path.display()));
    };

    match (kind, role) {
        (FileKind::Lex, FileRole::Input) => {
            handler.fail(&format!("{}: .lex is an output-only format", path.display()));
        }
        (FileKind::Txt | FileKind::Prn, FileRole::Output) => {
            handler.fail(&format!("{}: .{ext} is an input-only format", path.display()));
        }
        _ => {}
    }

    if role == FileRole::Input && !path.exists() {
        handler.fail(&format!("{}: no such file", path.display()));
    }

    ClassifiedPath {
        path: path.to_path_buf(),
        kind,
        role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHandler {
        messages: RefCell<Vec<String>>,
    }

    impl FailHandler for RecordingHandler {
        fn fail(&self, message: &str) -> ! {
            self.messages.borrow_mut().push(message.to_string());
            panic!("test fail handler invoked: {message}");
        }
    }

    #[test]
    fn recognizes_input_extensions() {
        assert_eq!(FileKind::from_extension("txt"), Some(FileKind::Txt));
        assert_eq!(FileKind::from_extension("PRN"), Some(FileKind::Prn));
        assert_eq!(FileKind::from_extension("xml"), Some(FileKind::Xml));
        assert_eq!(FileKind::from_extension("lex"), Some(FileKind::Lex));
        assert_eq!(FileKind::from_extension("mrc"), None);
    }

    #[test]
    fn classify_output_xml_does_not_require_existence() {
        let handler = RecordingHandler::default();
        let classified = classify("/no/such/dir/report.xml", FileRole::Output, &handler);
        assert_eq!(classified.kind, FileKind::Xml);
        assert!(handler.messages.borrow().is_empty());
    }

    #[test]
    fn classify_missing_input_fails() {
        let handler = RecordingHandler::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            classify("/no/such/file.txt", FileRole::Input, &handler)
        }));
        assert!(result.is_err());
        assert!(handler.messages.borrow()[0].contains("no such file"));
    }

    #[test]
    fn classify_lex_as_input_fails() {
        let handler = RecordingHandler::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            classify("out.lex", FileRole::Input, &handler)
        }));
        assert!(result.is_err());
        assert!(handler.messages.borrow()[0].contains("output-only"));
    }
}
