//! Bulk file ingestion: type check, preview, and the upload state machine.
//!
//! # Design
//! - The preview is advisory; the untouched file is what gets uploaded.
//! - `UploadFlow` is generic over the file handle so it runs without a browser.
//! - Every selection bumps a generation so a late preview for a replaced file is dropped.

use thiserror::Error;

/// Lines shown in the upload preview.
pub const PREVIEW_LINES: usize = 10;

/// Why a selection or upload step was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    /// The file is neither `text/plain` nor named `*.txt`.
    #[error("{name} is not a .txt file")]
    NotText {
        /// Name of the refused file.
        name: String,
    },
    /// Upload requested with no file chosen.
    #[error("no file selected")]
    NoFile,
    /// An upload is already running.
    #[error("an upload is already in progress")]
    Busy,
}

/// Accept declared plain text or a `.txt` name.
#[must_use]
pub fn is_text_upload(name: &str, mime: &str) -> bool {
    mime.eq_ignore_ascii_case("text/plain")
        || name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("txt"))
}

/// First `limit` trimmed lines that are neither blank nor `#` comments.
#[must_use]
pub fn extract_preview(content: &str, limit: usize) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// A chosen file and what is known about it so far.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    /// Browser handle, uploaded as-is.
    pub file: F,
    /// File name for display.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Preview lines once the read completes.
    pub preview: Option<Vec<String>>,
    /// Generation assigned at selection.
    pub generation: u64,
}

/// Where the upload dialog is.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadStage<F> {
    /// Nothing chosen.
    Idle,
    /// A file is chosen; `error` holds the last failed upload message.
    FileSelected {
        /// Current file.
        selected: SelectedFile<F>,
        /// Message from the last failed upload.
        error: Option<String>,
    },
    /// Upload in flight.
    Uploading {
        /// File being sent.
        selected: SelectedFile<F>,
    },
}

impl<F> Default for UploadStage<F> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Upload dialog state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFlow<F> {
    stage: UploadStage<F>,
    generation: u64,
}

impl<F> Default for UploadFlow<F> {
    fn default() -> Self {
        Self {
            stage: UploadStage::Idle,
            generation: 0,
        }
    }
}

impl<F: Clone> UploadFlow<F> {
    /// Current stage.
    #[must_use]
    pub const fn stage(&self) -> &UploadStage<F> {
        &self.stage
    }

    /// File currently held, in any non-idle stage.
    #[must_use]
    pub const fn selected(&self) -> Option<&SelectedFile<F>> {
        match &self.stage {
            UploadStage::Idle => None,
            UploadStage::FileSelected { selected, .. } | UploadStage::Uploading { selected } => {
                Some(selected)
            }
        }
    }

    /// Error from the last failed upload.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.stage {
            UploadStage::FileSelected { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Whether an upload is running.
    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        matches!(self.stage, UploadStage::Uploading { .. })
    }

    /// Choose a file, replacing any previous one. Returns the generation
    /// the preview must be delivered with.
    ///
    /// # Errors
    ///
    /// Refuses non-text files and any selection while uploading; state is
    /// left untouched in both cases.
    pub fn select(
        &mut self,
        file: F,
        name: &str,
        mime: &str,
        size: u64,
    ) -> Result<u64, UploadRejection> {
        if self.is_uploading() {
            return Err(UploadRejection::Busy);
        }
        if !is_text_upload(name, mime) {
            return Err(UploadRejection::NotText {
                name: name.to_string(),
            });
        }
        self.generation = self.generation.wrapping_add(1);
        self.stage = UploadStage::FileSelected {
            selected: SelectedFile {
                file,
                name: name.to_string(),
                size,
                preview: None,
                generation: self.generation,
            },
            error: None,
        };
        Ok(self.generation)
    }

    /// Store preview lines for the file of `generation`; stale generations are ignored.
    pub fn set_preview(&mut self, generation: u64, lines: Vec<String>) -> bool {
        match &mut self.stage {
            UploadStage::FileSelected { selected, .. } if selected.generation == generation => {
                selected.preview = Some(lines);
                true
            }
            _ => false,
        }
    }

    /// Move to `Uploading`, handing back the file to send.
    ///
    /// # Errors
    ///
    /// `NoFile` when idle, `Busy` when already uploading.
    pub fn begin_upload(&mut self) -> Result<F, UploadRejection> {
        match std::mem::take(&mut self.stage) {
            UploadStage::FileSelected { selected, .. } => {
                let file = selected.file.clone();
                self.stage = UploadStage::Uploading { selected };
                Ok(file)
            }
            UploadStage::Idle => Err(UploadRejection::NoFile),
            stage @ UploadStage::Uploading { .. } => {
                self.stage = stage;
                Err(UploadRejection::Busy)
            }
        }
    }

    /// Settle the running upload. Success closes the dialog; failure keeps
    /// the file and shows the message. Returns whether the dialog closed.
    pub fn finish(&mut self, outcome: Result<(), String>) -> bool {
        match std::mem::take(&mut self.stage) {
            UploadStage::Uploading { selected } => match outcome {
                Ok(()) => true,
                Err(message) => {
                    self.stage = UploadStage::FileSelected {
                        selected,
                        error: Some(message),
                    };
                    false
                }
            },
            other => {
                self.stage = other;
                false
            }
        }
    }

    /// Discard the file and preview. Refused while uploading.
    pub fn cancel(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        self.stage = UploadStage::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_text_by_type_or_extension() {
        assert!(is_text_upload("list.txt", ""));
        assert!(is_text_upload("LIST.TXT", "application/octet-stream"));
        assert!(is_text_upload("domains", "text/plain"));
        assert!(!is_text_upload("list.csv", "text/csv"));
        assert!(!is_text_upload("txt", ""));
    }

    #[test]
    fn preview_skips_comments_and_blanks() {
        let mut content = String::from("# comment\n\nexample.com\n  www.test.org  \n");
        for n in 0..13 {
            content.push_str(&format!("host{n}.net\r\n"));
        }
        let preview = extract_preview(&content, PREVIEW_LINES);
        assert_eq!(preview.len(), 10);
        assert_eq!(preview[0], "example.com");
        assert_eq!(preview[1], "www.test.org");
        assert_eq!(preview[9], "host7.net");
    }

    #[test]
    fn indented_comment_is_dropped() {
        assert_eq!(extract_preview("   # note\na.com", 10), vec!["a.com"]);
    }

    #[test]
    fn upload_sends_original_file_not_preview() {
        let original = "# comment\n\nexample.com\nwww.test.org\n".to_string();
        let mut flow = UploadFlow::default();
        let generation = flow
            .select(original.clone(), "list.txt", "text/plain", 40)
            .expect("text file accepted");
        assert!(flow.set_preview(generation, extract_preview(&original, PREVIEW_LINES)));
        let sent = flow.begin_upload().expect("file selected");
        assert_eq!(sent, original);
        assert!(flow.is_uploading());
    }

    #[test]
    fn rejected_type_leaves_state_untouched() {
        let mut flow = UploadFlow::default();
        flow.select(1u8, "a.txt", "", 1).expect("accepted");
        let before = flow.clone();
        let err = flow.select(2u8, "a.pdf", "application/pdf", 1);
        assert_eq!(
            err,
            Err(UploadRejection::NotText {
                name: "a.pdf".into()
            })
        );
        assert_eq!(flow, before);
    }

    #[test]
    fn reselection_replaces_and_drops_late_preview() {
        let mut flow = UploadFlow::default();
        let first = flow.select("one", "one.txt", "", 1).expect("accepted");
        let second = flow.select("two", "two.txt", "", 1).expect("accepted");
        assert!(!flow.set_preview(first, vec!["stale.com".into()]));
        assert!(flow.set_preview(second, vec!["fresh.com".into()]));
        let selected = flow.selected().expect("file held");
        assert_eq!(selected.file, "two");
        assert_eq!(selected.preview, Some(vec!["fresh.com".to_string()]));
    }

    #[test]
    fn success_closes_and_failure_keeps_file() {
        let mut flow = UploadFlow::default();
        flow.select("f", "f.txt", "", 1).expect("accepted");
        flow.begin_upload().expect("begins");
        assert!(!flow.finish(Err("upload failed".into())));
        assert_eq!(flow.error(), Some("upload failed"));
        assert!(flow.selected().is_some());

        flow.begin_upload().expect("retry begins");
        assert!(flow.finish(Ok(())));
        assert_eq!(flow.stage(), &UploadStage::Idle);
    }

    #[test]
    fn cancel_refused_while_uploading() {
        let mut flow = UploadFlow::default();
        flow.select("f", "f.txt", "", 1).expect("accepted");
        flow.begin_upload().expect("begins");
        assert!(!flow.cancel());
        assert_eq!(flow.select("g", "g.txt", "", 1), Err(UploadRejection::Busy));
        assert_eq!(flow.begin_upload(), Err(UploadRejection::Busy));
        flow.finish(Err("x".into()));
        assert!(flow.cancel());
        assert!(flow.selected().is_none());
    }

    #[test]
    fn begin_without_file_is_refused() {
        let mut flow = UploadFlow::<u8>::default();
        assert_eq!(flow.begin_upload(), Err(UploadRejection::NoFile));
        assert!(flow.cancel());
    }
}
