use crate::{
	entry::Entry,
	materialize::append_child_nodes,
	reconcile::Surface,
	template::{selectors, with_row, ROW_DEPTH},
};
use core::slice;
use tracing::{error, instrument, trace};
use wasm_bindgen::JsCast;

/// Attached to the leaderboard's wrapper element, this `struct` renders one absolutely positioned row per entry into its children.
///
/// Children without the row class are ignored, so the wrapper may contain other (e.g. placeholder) content.
#[derive(Debug, Clone)]
pub struct DomSurface {
	document: web_sys::Document,
	container: web_sys::HtmlElement,
	score_step: u8,
}
impl DomSurface {
	/// Returns [`None`] iff `container` isn't attached to a document.
	#[must_use]
	pub fn new(container: web_sys::HtmlElement, score_step: u8) -> Option<Self> {
		Some(Self {
			document: container.owner_document()?,
			container,
			score_step,
		})
	}

	fn set_text(row: &web_sys::HtmlElement, selector: &str, text: &str) {
		match row.query_selector(selector) {
			Ok(Some(element)) => element.set_text_content(Some(text)),
			Ok(None) => error!("Row {:?} has no {} element.", row.id(), selector),
			Err(error) => error!("Failed to query {}: {:?}", selector, error),
		}
	}

	fn set_index(row: &web_sys::HtmlElement, selector: &str, index: &str) {
		match row.query_selector(selector) {
			Ok(Some(control)) => {
				if let Err(error) = control.set_attribute(selectors::INDEX_ATTRIBUTE, index) {
					error!("Failed to set {} on {}: {:?}", selectors::INDEX_ATTRIBUTE, selector, error)
				}
			}
			Ok(None) => error!("Row {:?} has no {} control.", row.id(), selector),
			Err(error) => error!("Failed to query {}: {:?}", selector, error),
		}
	}
}
impl Surface for DomSurface {
	type Row = web_sys::HtmlElement;

	fn live_rows(&self) -> Vec<(String, Self::Row)> {
		let children = self.container.children();
		(0..children.length())
			.filter_map(|i| children.item(i))
			.filter(|child| child.class_list().contains(selectors::ROW_CLASS))
			.filter_map(|child| match child.dyn_into::<web_sys::HtmlElement>() {
				Ok(row) => Some((row.id(), row)),
				Err(child) => {
					error!("Expected row to be an `HtmlElement` but found {:?}. Ignoring it.", child);
					None
				}
			})
			.collect()
	}

	#[instrument(skip(self, entry), fields(id = %entry.id))]
	fn create_row(&mut self, entry: &Entry, index: usize, offset: u32) {
		let container: &web_sys::Element = &self.container;
		let created = with_row(entry, index, offset, self.score_step, |vdom| append_child_nodes(&self.document, container, slice::from_ref(vdom), ROW_DEPTH));
		trace!(created, "Created row.");
	}

	fn update_row(&mut self, row: &Self::Row, entry: &Entry, index: usize, offset: u32) {
		if let Err(error) = row.style().set_property("top", &format!("{}px", offset)) {
			error!("Failed to set row offset: {:?}", error)
		}
		Self::set_text(row, selectors::TIME, &entry.time);
		Self::set_text(row, selectors::SCORE, &entry.score.to_string());

		let index = index.to_string();
		for control in [selectors::INCREMENT, selectors::DECREMENT, selectors::DELETE] {
			Self::set_index(row, control, &index);
		}
	}

	fn remove_row(&mut self, row: Self::Row) {
		row.remove()
	}

	fn set_wrapper_height(&mut self, height: u32) {
		if let Err(error) = self.container.style().set_property("height", &format!("{}px", height)) {
			error!("Failed to set wrapper height: {:?}", error)
		}
	}
}
