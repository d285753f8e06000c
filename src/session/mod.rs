//! Editing session: one document plus its selection and pending uploads.
//!
//! The session is the only owner of its [`Document`]. Edits apply in call
//! order; nothing is persisted until [`EditorSession::save`] is called.

mod persistence;
mod upload;

pub use persistence::{JsonFilePersistence, MemoryPersistence, Persistence};
pub use upload::{ImageUploader, UploadTicket, UploadedImage};

use crate::command::{self, Command, CommandGrammar, Dispatch, Outcome, Selection};
use crate::edit::{moved_index, BlockPatch, Operation};
use crate::error::{Error, Result};
use crate::model::{self, Block, Document, DocumentKind, PersistedPayload};
use crate::render::{self, RenderOptions};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use upload::UploadTracker;

/// An open document and its session-scoped state.
#[derive(Debug)]
pub struct EditorSession {
    kind: DocumentKind,
    document: Document,
    selection: Selection,
    title: String,
    uploads: UploadTracker,
    dirty: bool,
    last_saved: Option<DateTime<Utc>>,
}

impl EditorSession {
    /// Open a fresh session with the seed document for `kind`.
    pub fn new(kind: DocumentKind) -> Self {
        Self::from_document(Document::seeded(kind), kind)
    }

    /// Open a session over an existing document.
    pub fn from_document(document: Document, kind: DocumentKind) -> Self {
        Self {
            kind,
            document,
            selection: None,
            title: String::new(),
            uploads: UploadTracker::default(),
            dirty: false,
            last_saved: None,
        }
    }

    /// Load from a persistence collaborator and normalize.
    pub fn open(store: &dyn Persistence, kind: DocumentKind) -> Result<Self> {
        let mut session = match store.load()? {
            Some(value) => {
                let mut session = Self::from_document(model::normalize(&value, kind), kind);
                if let Some(title) = model::section_title(&value) {
                    session.title = title;
                }
                session
            }
            None => Self::new(kind),
        };
        session.dirty = false;
        info!(
            "Opened {} document with {} blocks",
            kind,
            session.document.block_count()
        );
        Ok(session)
    }

    /// Document kind.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Selected block index.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Select a block; out-of-range indices clear the selection.
    pub fn select(&mut self, index: Selection) {
        self.selection = index.filter(|i| *i < self.document.block_count());
    }

    /// Portfolio section title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the portfolio section title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.dirty = true;
    }

    /// Check for edits since the last save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Time of the last successful save.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Number of uploads still resolving.
    pub fn pending_uploads(&self) -> usize {
        self.uploads.len()
    }

    /// Apply a direct edit, keeping the selection on the same block.
    pub fn apply(&mut self, op: &Operation) -> bool {
        let moved = match op {
            Operation::MoveBlock { index, direction } => {
                moved_index(&self.document, *index, *direction)
            }
            _ => None,
        };
        let changed = self.document.apply(op);
        if !changed {
            return false;
        }

        match op {
            Operation::RemoveBlock(index) => self.uploads.remove_block(*index),
            Operation::MoveBlock { index, .. } => {
                if let Some(to) = moved {
                    self.uploads.swap_blocks(*index, to);
                }
            }
            Operation::RemoveLastBlock => self.uploads.truncate(self.document.block_count()),
            _ => {}
        }

        self.selection = match op {
            Operation::AddBlock(_) | Operation::AddImage => Some(self.document.block_count() - 1),
            Operation::RemoveBlock(index) => match self.selection {
                Some(s) if s == *index => None,
                Some(s) if s > *index => Some(s - 1),
                other => other,
            },
            Operation::MoveBlock { .. } => moved.or(self.selection),
            Operation::RemoveLastBlock => None,
            _ => self.selection,
        };
        self.select(self.selection);
        self.dirty = true;
        true
    }

    /// Dispatch a recognized command.
    pub fn execute(&mut self, command: &Command) -> Outcome {
        let dispatch = command::dispatch(&self.document, self.selection, command);
        self.commit(dispatch)
    }

    /// Parse and dispatch an utterance, dictating it if nothing matches.
    pub fn handle_utterance(&mut self, grammar: &CommandGrammar, utterance: &str) -> Outcome {
        let dispatch =
            command::dispatch_utterance(grammar, &self.document, self.selection, utterance);
        self.commit(dispatch)
    }

    /// Adopt the result of a dispatch.
    pub fn commit(&mut self, dispatch: Dispatch) -> Outcome {
        if dispatch.outcome == Outcome::Applied {
            self.document = dispatch.document;
            self.uploads.truncate(self.document.block_count());
            self.dirty = true;
        }
        self.selection = dispatch.selection;
        self.select(self.selection);
        dispatch.outcome
    }

    /// Start an upload for the image block at `index`.
    ///
    /// The block is not touched until [`finish_upload`](Self::finish_upload).
    pub fn begin_upload(&mut self, index: usize) -> Result<UploadTicket> {
        match self.document.get(index) {
            None => {
                return Err(Error::BlockOutOfRange(
                    index,
                    self.document.block_count(),
                ))
            }
            Some(Block::Image(_)) => {}
            Some(_) => return Err(Error::NotAnImage(index)),
        }
        if self.uploads.is_pending(index) {
            return Err(Error::UploadPending(index));
        }
        debug!("Upload started for block {}", index);
        Ok(self.uploads.issue(index))
    }

    /// Resolve an upload. The url is written only on success.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadedImage>,
    ) -> Result<()> {
        let index = match self.uploads.retire(&ticket) {
            Some(index) => index,
            None => {
                warn!("Ignoring stale upload ticket for block {}", ticket.block());
                return Ok(());
            }
        };

        let uploaded = result.map_err(|e| {
            warn!("Upload for block {} failed: {}", index, e);
            e
        })?;

        if !matches!(self.document.get(index), Some(Block::Image(_))) {
            warn!("Block {} is no longer an image, dropping upload", index);
            return Err(Error::NotAnImage(index));
        }

        self.apply(&Operation::UpdateBlock {
            index,
            patch: BlockPatch::new().with_url(uploaded.url),
        });
        Ok(())
    }

    /// Upload bytes for the image block at `index` and store the url.
    pub fn upload_image(
        &mut self,
        index: usize,
        uploader: &dyn ImageUploader,
        bytes: &[u8],
    ) -> Result<()> {
        let ticket = self.begin_upload(index)?;
        let result = uploader.upload(bytes);
        self.finish_upload(ticket, result)
    }

    /// Serialize the document in the layout its kind is stored in.
    ///
    /// Portfolios keep their section title; resumes use the block record.
    pub fn persisted(&self) -> PersistedPayload {
        PersistedPayload::for_kind(self.kind, &self.title, &self.document)
    }

    /// Save through the persistence collaborator.
    pub fn save(&mut self, store: &mut dyn Persistence) -> Result<DateTime<Utc>> {
        let persisted = self.persisted();
        if let Err(e) = store.save(&persisted) {
            warn!("Save failed: {}", e);
            return Err(e);
        }

        let now = Utc::now();
        self.last_saved = Some(now);
        self.dirty = false;
        info!(
            "Saved {} document ({} blocks) at {}",
            self.kind,
            persisted.block_count(),
            now.to_rfc3339()
        );
        Ok(now)
    }

    /// Render the screen preview fragment.
    pub fn preview_html(&self, options: &RenderOptions) -> Result<String> {
        render::to_html(&self.document, options)
    }

    /// Render the standalone print page; fails while uploads are pending.
    pub fn export_html(&self, options: &RenderOptions) -> Result<String> {
        let pending = self.uploads.len();
        if pending > 0 {
            return Err(Error::ExportNotReady(pending));
        }
        let options = options.clone().for_print();
        render::to_html_page(&self.document, &options)
    }
}
