//! Anchor-based field segmentation. Each descriptive field is recovered by
//! scanning the left column's blocks for an anchor heading and taking the
//! block that follows it. The anchor patterns live in one declarative rule
//! table; supporting a new page layout means editing the table, not the
//! scan.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use url::Url;

use crate::diagnostics::Diagnostics;
use crate::error::ExtractError;
use crate::parser::flatten::flatten;
use crate::record::ParamRow;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Base for resolving the path-only URLs these pages use ("/v1/widgets").
// Only the path of the join result is ever kept.
static URL_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://docs.invalid/").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Authentication,
    Authorization,
    Pagination,
    RequiredQueryParams,
    OptionalQueryParams,
    RequiredBodyParams,
    OptionalBodyParams,
    ReturnValues,
    ResponseCodes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Value is the following block's collapsed text.
    Text,
    /// Value is the rows of the table inside the following block.
    Table,
}

pub struct FieldRule {
    pub field: Field,
    pub shape: Shape,
    pub anchor: Regex,
}

/// Anchor rules in the order the assembler runs them. Title is positional
/// (always the first block) and the URL line has its own locator, so
/// neither appears here; `definition` has no recognizable anchor yet.
pub static FIELD_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    [
        (Field::Authentication, Shape::Text, "Authen"),
        (Field::Authorization, Shape::Text, "Author"),
        (Field::Pagination, Shape::Text, "Pagination"),
        // Some pages write "Parameters", some "Params".
        (Field::RequiredQueryParams, Shape::Table, "Required Query Param"),
        (Field::OptionalQueryParams, Shape::Table, "Optional Query Param"),
        // Body tables sometimes say "Values" instead of "Parameters".
        (Field::RequiredBodyParams, Shape::Table, "Required Body (Param|Value)"),
        (Field::OptionalBodyParams, Shape::Table, "Optional Body (Param|Value)"),
        (Field::ReturnValues, Shape::Table, "Return Values|Response Fields"),
        (Field::ResponseCodes, Shape::Table, "Response Codes"),
    ]
    .into_iter()
    .map(|(field, shape, pattern)| FieldRule {
        field,
        shape,
        anchor: Regex::new(pattern).unwrap(),
    })
    .collect()
});

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_ws(s: &str) -> String {
    WS_RE.replace_all(s.trim(), " ").into_owned()
}

/// Index of the first block whose flattened text matches `anchor`.
/// Later matches are ignored.
fn find_anchor(
    blocks: &[NodeRef<Node>],
    anchor: &Regex,
    diags: &mut Diagnostics,
) -> Option<usize> {
    blocks
        .iter()
        .position(|b| anchor.is_match(&flatten(*b, diags)))
}

/// True when an anchor at `idx` cannot yield a value: index 0 is reserved
/// for the title, and an anchor in last position has nothing after it.
fn anchor_unusable(idx: usize, len: usize) -> bool {
    idx == 0 || idx + 1 >= len
}

/// Collapsed text of the block following the anchor, or empty. Absence of
/// the anchor is a deliberate no-op, never an error.
pub fn locate_text(
    blocks: &[NodeRef<Node>],
    anchor: &Regex,
    diags: &mut Diagnostics,
) -> String {
    let Some(idx) = find_anchor(blocks, anchor, diags) else {
        return String::new();
    };
    if anchor_unusable(idx, blocks.len()) {
        return String::new();
    }
    collapse_ws(&flatten(blocks[idx + 1], diags))
}

/// Rows of the first table inside the block following the anchor, or empty.
pub fn locate_table(
    blocks: &[NodeRef<Node>],
    anchor: &Regex,
    diags: &mut Diagnostics,
) -> Vec<ParamRow> {
    let Some(idx) = find_anchor(blocks, anchor, diags) else {
        return Vec::new();
    };
    if anchor_unusable(idx, blocks.len()) {
        return Vec::new();
    }
    match find_table(blocks[idx + 1]) {
        Some(table) => parse_table(table, diags),
        None => Vec::new(),
    }
}

/// The block itself or its first descendant that is a `table` element.
fn find_table(node: NodeRef<Node>) -> Option<NodeRef<Node>> {
    node.descendants()
        .find(|n| n.value().as_element().is_some_and(|el| el.name() == "table"))
}

/// Header keys come from the first row; every later row zips its cells
/// with those keys. A short row simply omits the trailing keys — rows are
/// not required to share a key set.
fn parse_table(table: NodeRef<Node>, diags: &mut Diagnostics) -> Vec<ParamRow> {
    let mut rows = table.descendants().filter(|n| {
        n.value()
            .as_element()
            .is_some_and(|el| el.name() == "tr")
    });

    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let keys: Vec<String> = row_cells(header)
        .into_iter()
        .map(|cell| collapse_ws(&flatten(cell, diags)))
        .collect();

    let mut out = Vec::new();
    for row in rows {
        let row_map: ParamRow = keys
            .iter()
            .zip(row_cells(row))
            .map(|(key, cell)| (key.clone(), collapse_ws(&flatten(cell, diags))))
            .collect();
        if !row_map.is_empty() {
            out.push(row_map);
        }
    }
    out
}

fn row_cells(row: NodeRef<Node>) -> Vec<NodeRef<Node>> {
    row.children()
        .filter(|n| {
            n.value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "td" | "th"))
        })
        .collect()
}

/// Specialized locator for the URL line: the anchor block's whole text must
/// equal "url" case-insensitively (not a substring match). The following
/// block holds either `path` or `METHOD path`; anything else is a fatal
/// format error for this document.
pub fn locate_url(
    blocks: &[NodeRef<Node>],
    endpoint: usize,
    diags: &mut Diagnostics,
) -> Result<(String, String), ExtractError> {
    let default = || ("GET".to_string(), String::new());

    let idx = blocks
        .iter()
        .position(|b| flatten(*b, diags).trim().eq_ignore_ascii_case("url"));
    let Some(idx) = idx else {
        return Ok(default());
    };
    if anchor_unusable(idx, blocks.len()) {
        return Ok(default());
    }

    let line = collapse_ws(&flatten(blocks[idx + 1], diags));
    if line.is_empty() {
        return Ok(default());
    }

    let parts: Vec<&str> = line.split(' ').collect();
    let (method, raw) = match parts.as_slice() {
        [path] => ("GET".to_string(), *path),
        [method, path] => ((*method).to_string(), *path),
        _ => {
            return Err(ExtractError::UrlTokenCount {
                endpoint,
                found: parts.len(),
                line,
            })
        }
    };

    let parsed = URL_BASE
        .join(raw)
        .map_err(|source| ExtractError::UrlParse {
            endpoint,
            url: raw.to_string(),
            source,
        })?;
    Ok((method, parsed.path().to_string()))
}

// ── Tests ──
