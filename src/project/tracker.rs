//! Parse tickets
//!
//! Last-write-wins ordering for per-document re-parses.
//!
//! Every parse of a document starts by taking a [`ParseTicket`]. Taking a
//! new ticket cancels the token of the previous one, so an in-flight parse
//! of an older text stops early. A finished parse may only be committed
//! while its ticket is still the latest for that document.

use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;

use crate::base::FileId;

/// Permission to commit the parse of one document version.
#[derive(Clone, Debug)]
pub struct ParseTicket {
    pub file: FileId,
    pub generation: u64,
    cancel: CancellationToken,
}

impl ParseTicket {
    /// Token the parse should poll.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether a newer ticket has superseded this one.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Issues tickets and remembers the latest one per document.
#[derive(Debug, Default)]
pub struct DocumentTracker {
    next_generation: u64,
    latest: FxHashMap<FileId, (u64, CancellationToken)>,
}

impl DocumentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a parse of `file`, superseding any parse already in flight.
    pub fn begin(&mut self, file: FileId) -> ParseTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        let cancel = CancellationToken::new();
        if let Some((previous, token)) = self.latest.insert(file, (generation, cancel.clone())) {
            tracing::trace!(?file, previous, generation, "parse superseded");
            token.cancel();
        }
        ParseTicket {
            file,
            generation,
            cancel,
        }
    }

    /// Whether `ticket` is still the latest for its document.
    pub fn is_current(&self, ticket: &ParseTicket) -> bool {
        self.latest
            .get(&ticket.file)
            .is_some_and(|(generation, _)| *generation == ticket.generation)
    }

    /// Cancel and forget whatever is in flight for `file`.
    pub fn forget(&mut self, file: FileId) {
        if let Some((_, token)) = self.latest.remove(&file) {
            token.cancel();
        }
    }

    /// Cancel everything in flight.
    pub fn clear(&mut self) {
        for (_, (_, token)) in self.latest.drain() {
            token.cancel();
        }
    }
}
