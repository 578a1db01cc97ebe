pub mod filter;
pub mod page;

pub use filter::{Filters, ALL};
pub use page::PageView;

use serde::Serialize;
use tracing::{debug, warn};

use crate::ingest::{self, Batch};
use crate::sheet::coerce::Record;
use crate::sheet::fields::{keys, Variant};
use crate::sheet::metrics;

/// The one status value rendered with stronger emphasis than all others.
pub const FEATURED_STATUS: &str = "In Production";

/// Client-variant presentation toggle. The internal view is always a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    Table,
}

/// Handle for one in-flight upload; see [`SheetSession::begin_upload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// One record as the renderer sees it: the coerced fields plus the
/// presentation-time derivations.
#[derive(Debug, Serialize)]
pub struct RenderRecord<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    /// Derived for the internal variant only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    /// True when the record carries the featured status value.
    pub emphasized: bool,
}

/// Everything the presentation layer needs for one render pass.
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    pub records: Vec<RenderRecord<'a>>,
    #[serde(flatten)]
    pub page: PageView,
    /// Dropdown option space, always derived from the full batch so the
    /// dropdowns offer every value even while a filter is active.
    pub categories: Vec<String>,
    pub statuses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

/// Per-session view-model state: one batch plus the live search, filter,
/// page and view-mode inputs. All mutation happens through `&mut self` on
/// the platform's one-event-at-a-time thread, so there is no locking.
#[derive(Debug)]
pub struct SheetSession {
    variant: Variant,
    records: Vec<Record>,
    filters: Filters,
    current_page: usize,
    view_mode: Option<ViewMode>,
    error: Option<String>,
    upload_seq: u64,
}

impl SheetSession {
    pub fn new(variant: Variant) -> Self {
        SheetSession {
            variant,
            records: Vec::new(),
            filters: Filters::default(),
            current_page: 1,
            view_mode: variant.has_view_mode().then_some(ViewMode::Grid),
            error: None,
            upload_seq: 0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Parse `text` and install the result synchronously. Success replaces
    /// the whole batch and resets every view input; failure stores the
    /// error message and clears the previously loaded batch.
    pub fn ingest_text(&mut self, text: &str) {
        let ticket = self.begin_upload();
        self.finish_upload(ticket, ingest::ingest(self.variant, text));
    }

    /// Start an upload that completes later, e.g. after an async file read.
    /// Each call supersedes every ticket issued before it.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.upload_seq += 1;
        UploadTicket(self.upload_seq)
    }

    /// Install a finished upload. A stale ticket is dropped unapplied: last
    /// write wins on the record set. Returns whether the result landed.
    pub fn finish_upload(&mut self, ticket: UploadTicket, parsed: anyhow::Result<Batch>) -> bool {
        if ticket.0 != self.upload_seq {
            debug!(ticket = ticket.0, current = self.upload_seq, "dropping superseded upload");
            return false;
        }
        self.filters = Filters::default();
        self.current_page = 1;
        if let Some(mode) = self.view_mode.as_mut() {
            *mode = ViewMode::Grid;
        }
        match parsed {
            Ok(batch) => {
                debug_assert_eq!(batch.variant, self.variant);
                self.records = batch.records;
                self.error = None;
            }
            Err(err) => {
                let message = format!("{err:#}");
                warn!(error = %message, "line sheet ingestion failed");
                self.records = Vec::new();
                self.error = Some(message);
            }
        }
        true
    }

    /// Every search change sends the view back to page 1.
    pub fn set_search(&mut self, term: &str) {
        self.filters.search = term.to_string();
        self.current_page = 1;
    }

    /// Category dropdown input; `"All"` disables the dimension.
    pub fn set_category(&mut self, category: &str) {
        self.filters.category = category.to_string();
        self.current_page = 1;
    }

    /// Status dropdown input; `"All"` disables the dimension.
    pub fn set_status(&mut self, status: &str) {
        self.filters.status = status.to_string();
        self.current_page = 1;
    }

    /// Grid/table toggle. Only the client variant has one; other calls are
    /// ignored.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if let Some(current) = self.view_mode.as_mut() {
            *current = mode;
        }
    }

    /// Advance one page; a no-op on the last page.
    pub fn next_page(&mut self) {
        if self.current_page < self.filtered_page_count() {
            self.current_page += 1;
        }
    }

    /// Go back one page; a no-op on page 1.
    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    fn filtered_page_count(&self) -> usize {
        let filtered = filter::apply(&self.records, &self.filters);
        page::total_pages(filtered.len(), self.variant.page_size())
    }

    /// Assemble the render-ready view: filter, paginate, wrap each record
    /// with its derived presentation fields, and attach the dropdown option
    /// space.
    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let filtered = filter::apply(&self.records, &self.filters);
        let (slice, page) = page::paginate(&filtered, self.variant.page_size(), self.current_page);
        let records = slice
            .iter()
            .copied()
            .map(|record| RenderRecord {
                record,
                margin: self.variant.derives_margin().then(|| metrics::margin(record)),
                emphasized: record.text(keys::STATUS) == FEATURED_STATUS,
            })
            .collect();
        ViewSnapshot {
            records,
            page,
            categories: filter::distinct_values(&self.records, keys::CATEGORY),
            statuses: filter::distinct_values(&self.records, keys::STATUS),
            view_mode: self.view_mode,
            error: self.error.as_deref(),
        }
    }
}
