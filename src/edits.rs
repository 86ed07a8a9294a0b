//! Edit operations – the fixed sequence of structural changes that turns a
//! monitoring report into the exception report.
//!
//! Pipeline order (see [`standard_edits`]):
//!
//! 1. [`Retitle`] – first `h2` gets the exception-report title.
//! 2. [`RemovePingMonitorGraphs`] – drop `center` blocks headed "Ping Monitor".
//! 3. [`PruneDataTables`] – keep only the `.data-table` at index 2, counted
//!    over the tables of the unedited report.
//! 4. [`InsertCriteria`] – exception-criteria fragment after the first `section`.
//! 5. [`SwapLogo`] – first `h1` becomes the company logo image.

use serde::Serialize;

use crate::dom::{fragment_roots, Document, DomNode, ElementNode, NodeId, Tag};
use crate::error::DocumentEditError;
use crate::select::Selector;

/// Title written into the report's first `h2`.
pub const REPORT_TITLE: &str = "Azure Monthly Exception Report";

/// Logo that replaces the report's first `h1`.
pub const LOGO_URL: &str = "https://perspecta.com/sites/default/files/perspecta_logo_tm_0.png";
pub const LOGO_HEIGHT: &str = "100";

/// Heading text that marks a ping-monitor graph block.
pub const PING_MONITOR_MARKER: &str = "Ping Monitor";

/// Class shared by the report's data tables.
pub const DATA_TABLE_CLASS: &str = "data-table";

/// Document-order index of the one data table kept (the error time summary).
///
/// Positional only: if the report generator reorders its tables, the wrong
/// one is kept without any error.
pub const RETAINED_TABLE_INDEX: usize = 2;

/// A named structural edit over a [`Document`].
pub trait EditOperation {
    /// Stable, kebab-case name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Apply the edit, returning how many nodes were changed.
    fn apply(&self, doc: &mut Document) -> Result<usize, DocumentEditError>;
}

/// Outcome of one applied operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedEdit {
    pub operation: &'static str,
    pub affected: usize,
}

/// What a pipeline run changed, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditSummary {
    pub edits: Vec<AppliedEdit>,
}

impl EditSummary {
    pub fn affected(&self, operation: &str) -> Option<usize> {
        self.edits
            .iter()
            .find(|e| e.operation == operation)
            .map(|e| e.affected)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// The five report edits in their fixed order, prepared for `doc`.
///
/// Data-table positions are fixed here, before any edit runs.
pub fn standard_edits(doc: &Document, criteria: Document) -> Vec<Box<dyn EditOperation>> {
    vec![
        Box::new(Retitle),
        Box::new(RemovePingMonitorGraphs),
        Box::new(PruneDataTables::snapshot(doc)),
        Box::new(InsertCriteria::new(criteria)),
        Box::new(SwapLogo),
    ]
}

/// Run `edits` in order, stopping at the first failure.
pub fn apply_all(
    doc: &mut Document,
    edits: &[Box<dyn EditOperation>],
) -> Result<EditSummary, DocumentEditError> {
    let mut summary = EditSummary::default();
    for edit in edits {
        let affected = edit.apply(doc)?;
        log::debug!("{}: {} node(s) affected", edit.name(), affected);
        summary.edits.push(AppliedEdit {
            operation: edit.name(),
            affected,
        });
    }
    Ok(summary)
}

fn missing(operation: &'static str, selector: &Selector) -> DocumentEditError {
    DocumentEditError::MissingNode {
        operation,
        selector: selector.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Replace the leading text of the first `h2` with [`REPORT_TITLE`].
///
/// Fails if the document has no `h2`. An empty `h2` gets the title as its
/// only child.
#[derive(Debug, Clone, Copy)]
pub struct Retitle;

impl EditOperation for Retitle {
    fn name(&self) -> &'static str {
        "retitle"
    }

    fn apply(&self, doc: &mut Document) -> Result<usize, DocumentEditError> {
        let selector = Selector::tag(Tag::H2);
        let h2 = selector
            .select_first(doc)
            .ok_or_else(|| missing(self.name(), &selector))?;
        let title = doc.create_text(REPORT_TITLE);
        match doc.children(h2).first().copied() {
            Some(leading) => {
                doc.replace(leading, title);
            }
            None => doc.append_child(h2, title),
        }
        Ok(1)
    }
}

/// Remove every `center` block whose direct `h3` child starts with text
/// containing [`PING_MONITOR_MARKER`]. Zero matches is fine.
#[derive(Debug, Clone, Copy)]
pub struct RemovePingMonitorGraphs;

impl EditOperation for RemovePingMonitorGraphs {
    fn name(&self) -> &'static str {
        "remove-ping-monitor-graphs"
    }

    fn apply(&self, doc: &mut Document) -> Result<usize, DocumentEditError> {
        let headings = Selector::child(Tag::Center, Tag::H3).select_all(doc);
        let mut blocks = Vec::new();
        for h3 in headings {
            let is_ping = doc
                .leading_text(h3)
                .is_some_and(|t| t.contains(PING_MONITOR_MARKER));
            if !is_ping {
                continue;
            }
            if let Some(center) = doc.parent(h3) {
                if !blocks.contains(&center) {
                    blocks.push(center);
                }
            }
        }
        for &center in &blocks {
            doc.detach(center);
        }
        Ok(blocks.len())
    }
}

/// Remove every `.data-table` except the one at [`RETAINED_TABLE_INDEX`].
///
/// Indices come from the tables captured by [`PruneDataTables::snapshot`],
/// so a table already dropped with a ping-monitor block still holds its
/// position. With fewer than three captured tables nothing is removed.
#[derive(Debug, Clone)]
pub struct PruneDataTables {
    tables: Vec<NodeId>,
}

impl PruneDataTables {
    /// Capture the document's `.data-table`s in document order.
    pub fn snapshot(doc: &Document) -> Self {
        Self {
            tables: Selector::class(DATA_TABLE_CLASS).select_all(doc),
        }
    }
}

impl EditOperation for PruneDataTables {
    fn name(&self) -> &'static str {
        "prune-data-tables"
    }

    fn apply(&self, doc: &mut Document) -> Result<usize, DocumentEditError> {
        if self.tables.len() <= RETAINED_TABLE_INDEX {
            return Ok(0);
        }
        let mut removed = 0;
        for (i, &table) in self.tables.iter().enumerate() {
            if i != RETAINED_TABLE_INDEX && doc.is_attached(table) {
                doc.detach(table);
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Insert a copy of the exception-criteria fragment directly after the
/// first `section` element. Fails if there is no `section`.
#[derive(Debug, Clone)]
pub struct InsertCriteria {
    fragment: Document,
}

impl InsertCriteria {
    pub fn new(fragment: Document) -> Self {
        Self { fragment }
    }
}

impl EditOperation for InsertCriteria {
    fn name(&self) -> &'static str {
        "insert-criteria"
    }

    fn apply(&self, doc: &mut Document) -> Result<usize, DocumentEditError> {
        let selector = Selector::tag(Tag::Section);
        let section = selector
            .select_first(doc)
            .ok_or_else(|| missing(self.name(), &selector))?;
        let copies: Vec<_> = fragment_roots(&self.fragment)
            .into_iter()
            .map(|n| doc.import(&self.fragment, n))
            .collect();
        doc.insert_after(section, &copies);
        Ok(copies.len())
    }
}

/// Replace the first `h1` with the logo image. Fails if there is no `h1`.
#[derive(Debug, Clone, Copy)]
pub struct SwapLogo;

impl EditOperation for SwapLogo {
    fn name(&self) -> &'static str {
        "swap-logo"
    }

    fn apply(&self, doc: &mut Document) -> Result<usize, DocumentEditError> {
        let selector = Selector::tag(Tag::H1);
        let h1 = selector
            .select_first(doc)
            .ok_or_else(|| missing(self.name(), &selector))?;
        let img = ElementNode::new(Tag::Img)
            .with_attr("src", LOGO_URL)
            .with_attr("height", LOGO_HEIGHT);
        let img = doc.create(DomNode::Element(img));
        doc.replace(h1, img);
        Ok(1)
    }
}
