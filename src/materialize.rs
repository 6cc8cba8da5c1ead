//! Creates DOM nodes from [`lignin`] VDOM descriptions.
//!
//! Only creation is supported. Rows are patched in place by [`DomSurface`](`crate::dom::DomSurface`) afterwards,
//! so there's no need to diff trees here.

use core::slice;
use lignin::{Element, Node, ThreadBound};
use tracing::{error, instrument, trace_span};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Appends DOM nodes for `vdom` to `parent`'s child nodes.
///
/// `depth_limit` is the maximum element nesting depth that will be created.
/// [`Node::Multi`] doesn't count towards it.
///
/// Returns the number of DOM nodes appended directly to `parent`.
#[instrument(skip(document, parent, vdom))]
pub fn append_child_nodes(document: &web_sys::Document, parent: &web_sys::Element, vdom: &[Node<'_, ThreadBound>], depth_limit: usize) -> u32 {
	let mut appended = 0;
	for node in vdom {
		appended += match *node {
			Node::Text { text, .. } => {
				let span = trace_span!("Creating text node", len = text.len());
				let _enter = span.enter();
				let dom_text = document.create_text_node(text);
				match parent.append_child(dom_text.as_ref()) {
					Ok(_) => 1,
					Err(error) => {
						error!("Failed to insert text: {:?}", error);
						0
					}
				}
			}
			Node::Comment { comment, .. } => {
				let span = trace_span!("Creating comment", comment);
				let _enter = span.enter();
				let dom_comment = document.create_comment(comment);
				match parent.append_child(dom_comment.as_ref()) {
					Ok(_) => 1,
					Err(error) => {
						error!("Failed to insert comment: {:?}", error);
						0
					}
				}
			}
			Node::HtmlElement { element, .. } => {
				let span = trace_span!("Creating HTML element", name = element.name);
				let _enter = span.enter();
				create_element(document, parent, element, None, depth_limit)
			}
			Node::SvgElement { element, .. } => {
				let span = trace_span!("Creating SVG element", name = element.name);
				let _enter = span.enter();
				create_element(document, parent, element, Some(SVG_NAMESPACE), depth_limit)
			}
			Node::Multi(nodes) => {
				let span = trace_span!("Creating multi", "nodes.len()" = nodes.len());
				let _enter = span.enter();
				append_child_nodes(document, parent, nodes, depth_limit)
			}
			_ => {
				error!("Unsupported VDOM node kind in row template. Skipping it.");
				0
			}
		}
	}
	appended
}

fn create_element(document: &web_sys::Document, parent: &web_sys::Element, element: &Element<'_, ThreadBound>, namespace: Option<&str>, depth_limit: usize) -> u32 {
	if depth_limit == 0 {
		error!("Depth limit reached");
		return 0;
	}

	let &Element { name, creation_options, attributes, content, .. } = element;
	let dom_element = match match (namespace, creation_options.is()) {
		// This isn't entirely modern, but is well-supported.
		(None, Some(is)) => document.create_element_with_str(name, is),
		(None, None) => document.create_element(name),
		(Some(namespace), Some(is)) => document.create_element_ns_with_str(Some(namespace), name, is),
		(Some(namespace), None) => document.create_element_ns(Some(namespace), name),
	} {
		Ok(element) => element,
		Err(error) => {
			error!("Failed to create element <{}>: {:?}", name, error);
			return 0;
		}
	};

	for attribute in attributes {
		if let Err(error) = dom_element.set_attribute(attribute.name, attribute.value) {
			error!("Failed to set attribute {:?} on <{}>: {:?}", attribute.name, name, error);
		}
	}
	append_child_nodes(document, &dom_element, slice::from_ref(&content), depth_limit - 1);

	if let Err(error) = parent.append_child(&dom_element) {
		error!("Failed to insert element <{}>: {:?}", name, error);
		return 0;
	}
	1
}
