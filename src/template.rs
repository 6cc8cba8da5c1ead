//! Row markup, described as a [`lignin`] VDOM tree.
//!
//! The reconciler only relies on the parts listed in [`selectors`]; everything else here is presentation.

use crate::entry::Entry;
use lignin::{Attribute, Element, ElementCreationOptions, Node, ThreadBound};

/// Class names and attributes the reconciler reads or rewrites.
pub mod selectors {
	pub const ROW_CLASS: &str = "record";
	pub const ROW: &str = ".record";
	pub const TIME: &str = ".time";
	pub const SCORE: &str = ".score";
	pub const CONTROL: &str = ".btn";
	pub const INCREMENT: &str = ".btn.plus";
	pub const DECREMENT: &str = ".btn.minus";
	pub const DELETE: &str = ".btn.delete";
	/// Positional index of a control's row, rewritten on every reconciliation pass.
	pub const INDEX_ATTRIBUTE: &str = "data-index";
	pub const ID_ATTRIBUTE: &str = "data-id";
}

/// Nesting depth of [`with_row`]'s tree, as needed to materialize it completely.
pub const ROW_DEPTH: usize = 6;

const TRASH_ICON_PATH: &str = "M10 3h3v1h-1v9l-1 1H4l-1-1V4H2V3h3V2a1 1 0 0 1 1-1h3a1 1 0 0 1 1 1zM9 2H6v1h3zM4 13h7V4H4zm2-8H5v7h1zm1 0h1v7H7zm2 0h1v7H9z";

fn element<'a>(name: &'a str, attributes: &'a [Attribute<'a>], content: Node<'a, ThreadBound>) -> Element<'a, ThreadBound> {
	Element {
		name,
		creation_options: ElementCreationOptions::new(),
		attributes,
		content,
		event_bindings: &[],
	}
}

fn html<'a>(element: &'a Element<'a, ThreadBound>) -> Node<'a, ThreadBound> {
	Node::HtmlElement { element, dom_binding: None }
}

fn svg<'a>(element: &'a Element<'a, ThreadBound>) -> Node<'a, ThreadBound> {
	Node::SvgElement { element, dom_binding: None }
}

fn text(text: &str) -> Node<'_, ThreadBound> {
	Node::Text { text, dom_binding: None }
}

fn class(value: &str) -> Attribute<'_> {
	Attribute { name: "class", value }
}

/// Builds the VDOM of `entry`'s row at `index`/`offset` and hands it to `f`.
///
/// `score_step` labels the increment and decrement controls.
pub fn with_row<R>(entry: &Entry, index: usize, offset: u32, score_step: u8, f: impl FnOnce(&Node<'_, ThreadBound>) -> R) -> R {
	let style = format!("top: {}px;", offset);
	let index = index.to_string();
	let score = entry.score.to_string();
	let increment_label = format!("+{}", score_step);
	let decrement_label = format!("-{}", score_step);

	let name = [text(&entry.name)];
	let name_attributes = [class("name uppercase")];
	let name = element("SPAN", &name_attributes, Node::Multi(&name));
	let time = [text(&entry.time)];
	let time_attributes = [class("time text-xs text-black/40")];
	let time = element("SPAN", &time_attributes, Node::Multi(&time));
	let area_a = [html(&name), html(&time)];
	let area_a_attributes = [class("grid gap-2 area-a")];
	let area_a = element("DIV", &area_a_attributes, Node::Multi(&area_a));

	let country = [text(&entry.country)];
	let country_attributes = [class("country truncate")];
	let country = element("P", &country_attributes, Node::Multi(&country));
	let area_b = [html(&country)];
	let area_b_attributes = [class("overflow-hidden area-b")];
	let area_b = element("DIV", &area_b_attributes, Node::Multi(&area_b));

	let score = [text(&score)];
	let score_attributes = [class("score")];
	let score = element("SPAN", &score_attributes, Node::Multi(&score));
	let area_c = [html(&score)];
	let area_c_attributes = [class("area-c")];
	let area_c = element("DIV", &area_c_attributes, Node::Multi(&area_c));

	let path_attributes = [
		Attribute { name: "fill", value: "currentColor" },
		Attribute { name: "fill-rule", value: "evenodd" },
		Attribute { name: "d", value: TRASH_ICON_PATH },
		Attribute { name: "clip-rule", value: "evenodd" },
	];
	let path = element("path", &path_attributes, Node::Multi(&[]));
	let icon = [svg(&path)];
	let icon_attributes = [
		Attribute { name: "width", value: "1em" },
		Attribute { name: "height", value: "1em" },
		Attribute { name: "viewBox", value: "0 0 16 16" },
	];
	let icon = element("svg", &icon_attributes, Node::Multi(&icon));
	let icon_wrapper = [svg(&icon)];
	let icon_wrapper_attributes = [class("text-error")];
	let icon_wrapper = element("SPAN", &icon_wrapper_attributes, Node::Multi(&icon_wrapper));
	let delete = [html(&icon_wrapper)];
	let delete_attributes = [
		class("btn delete"),
		Attribute { name: selectors::INDEX_ATTRIBUTE, value: &index },
		Attribute { name: selectors::ID_ATTRIBUTE, value: entry.id.as_str() },
	];
	let delete = element("DIV", &delete_attributes, Node::Multi(&delete));

	let increment = [text(&increment_label)];
	let increment_attributes = [class("btn plus"), Attribute { name: selectors::INDEX_ATTRIBUTE, value: &index }];
	let increment = element("DIV", &increment_attributes, Node::Multi(&increment));

	let decrement = [text(&decrement_label)];
	let decrement_attributes = [class("btn minus"), Attribute { name: selectors::INDEX_ATTRIBUTE, value: &index }];
	let decrement = element("DIV", &decrement_attributes, Node::Multi(&decrement));

	let area_d = [html(&delete), html(&increment), html(&decrement)];
	let area_d_attributes = [class("w-full h-full flex flex-col-reverse justify-between md:flex-row md:justify-start items-center gap-1 area-d")];
	let area_d = element("DIV", &area_d_attributes, Node::Multi(&area_d));

	let row = [html(&area_a), html(&area_b), html(&area_c), html(&area_d)];
	let row_attributes = [
		class(selectors::ROW_CLASS),
		Attribute { name: "id", value: entry.id.as_str() },
		Attribute { name: "style", value: &style },
	];
	let row = element("DIV", &row_attributes, Node::Multi(&row));

	f(&html(&row))
}
