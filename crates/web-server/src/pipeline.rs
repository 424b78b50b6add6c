use crate::error::AppError;
use api_client::QuoteSource;
use core_types::Quotation;
use database::QuoteRecorder;
use std::fmt;

/// The stages a quotation request moves through.
///
/// `Idle → Fetching → Recording → Responding → Done`, with `Errored`
/// reachable from `Fetching` and `Recording`. Nothing is sent to the caller
/// before `Responding`, so a failed write never leaks a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Recording,
    Responding,
    Done,
    Errored,
}

impl Stage {
    /// Whether the pipeline may move from `self` to `next`.
    pub fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Idle, Stage::Fetching)
                | (Stage::Fetching, Stage::Recording)
                | (Stage::Fetching, Stage::Errored)
                | (Stage::Recording, Stage::Responding)
                | (Stage::Recording, Stage::Errored)
                | (Stage::Responding, Stage::Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Errored)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Recording => "recording",
            Stage::Responding => "responding",
            Stage::Done => "done",
            Stage::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// One run of fetch → record for a single inbound request.
///
/// Each stage is bounded by its own deadline, owned by the component that
/// runs it (`QuoteSource` for the fetch, `QuoteRecorder` for the write).
/// The pipeline itself adds no deadline and no retries. If the request future
/// is dropped, e.g. because the caller hung up, the in-flight stage is
/// dropped with it.
pub struct QuotePipeline<'a> {
    source: &'a dyn QuoteSource,
    recorder: &'a QuoteRecorder,
    stage: Stage,
}

impl<'a> QuotePipeline<'a> {
    pub fn new(source: &'a dyn QuoteSource, recorder: &'a QuoteRecorder) -> Self {
        Self {
            source,
            recorder,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Fetches a quotation and records it, returning the recorded quotation
    /// ready to be sent. On return the pipeline is in `Responding` or
    /// `Errored`.
    pub async fn run(&mut self) -> Result<Quotation, AppError> {
        self.advance(Stage::Fetching);
        let quotation = match self.source.fetch_quotation().await {
            Ok(quotation) => quotation,
            Err(e) => {
                self.advance(Stage::Errored);
                return Err(AppError::Fetch(e));
            }
        };

        self.advance(Stage::Recording);
        if let Err(e) = self.recorder.record(&quotation).await {
            // The quotation is valid but not durable, so it is dropped here.
            self.advance(Stage::Errored);
            return Err(AppError::Record(e));
        }

        self.advance(Stage::Responding);
        Ok(quotation)
    }

    /// Marks the response as encoded and handed off to the transport.
    pub fn finish(&mut self) {
        self.advance(Stage::Done);
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "invalid pipeline transition {} -> {}",
            self.stage,
            next
        );
        tracing::debug!(from = %self.stage, to = %next, "Quote pipeline transition.");
        self.stage = next;
    }
}
