//! Per-endpoint assembly: one `doc-content` block in, one `Endpoint` out.
//! The left column drives the field rules in fixed order; the right column
//! is collected verbatim as code samples.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::ElementRef;

use crate::diagnostics::Diagnostics;
use crate::error::ExtractError;
use crate::parser::dom;
use crate::parser::fields::{self, Field, Shape, FIELD_RULES};
use crate::parser::flatten::flatten;
use crate::record::Endpoint;

pub const LEFT_DOCS_CLASS: &str = "left-docs";
pub const RIGHT_CODE_CLASS: &str = "right-code";

/// Build the record for the endpoint block at `index` (0-based, counted
/// after the discarded table-of-contents block). Both columns must exist;
/// a missing one fails the whole document, no endpoint is silently skipped.
pub fn build_endpoint(
    index: usize,
    node: NodeRef<Node>,
    diags: &mut Diagnostics,
) -> Result<Endpoint, ExtractError> {
    let left = dom::find_child_with_class(node, LEFT_DOCS_CLASS).ok_or(
        ExtractError::MissingSubtree {
            endpoint: index,
            class: LEFT_DOCS_CLASS,
        },
    )?;
    let right = dom::find_child_with_class(node, RIGHT_CODE_CLASS).ok_or(
        ExtractError::MissingSubtree {
            endpoint: index,
            class: RIGHT_CODE_CLASS,
        },
    )?;

    let blocks = dom::filter(dom::children(left), |n| !n.value().is_text());

    let mut ep = Endpoint {
        title: blocks
            .first()
            .map(|b| fields::collapse_ws(&flatten(*b, diags)))
            .unwrap_or_default(),
        ..Endpoint::default()
    };

    for rule in FIELD_RULES.iter() {
        match rule.shape {
            Shape::Text => {
                let value = fields::locate_text(&blocks, &rule.anchor, diags);
                match rule.field {
                    Field::Authentication => ep.authentication = value,
                    Field::Authorization => ep.authorization = value,
                    Field::Pagination => ep.pagination_support = value,
                    _ => {}
                }
            }
            Shape::Table => {
                let rows = fields::locate_table(&blocks, &rule.anchor, diags);
                match rule.field {
                    Field::RequiredQueryParams => ep.required_query_params = rows,
                    Field::OptionalQueryParams => ep.optional_query_params = rows,
                    Field::RequiredBodyParams => ep.required_body_params = rows,
                    Field::OptionalBodyParams => ep.optional_body_params = rows,
                    Field::ReturnValues => ep.return_values = rows,
                    Field::ResponseCodes => ep.response_codes = rows,
                    _ => {}
                }
            }
        }
    }

    let (method, url) = fields::locate_url(&blocks, index, diags)?;
    ep.method = method;
    ep.url = url;

    ep.code_samples = dom::children(right)
        .into_iter()
        .filter_map(ElementRef::wrap)
        .map(|el| el.html())
        .collect();

    Ok(ep)
}

// ── Tests ──
