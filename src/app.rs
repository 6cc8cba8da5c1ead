//! The mounted controller: wires events to [`Session`] mutations and renders through [`DomSurface`].
//!
//! Every mutation is a two-phase commit. The handler mutates and persists the session synchronously
//! (pre-rendering a fresh row at the end of the list when adding), then schedules a [`reconcile`] pass for
//! the next task-queue turn. The browser thereby registers each row's old offset before the pass moves it,
//! which is what makes the `top` transition visible.
//!
//! Passes aren't cancelled or coalesced. Each one reads the state current when it runs.

use crate::{
	config::Config,
	countries::{append_options, fetch_country_names},
	dom::DomSurface,
	form::{collect_fields, parse_new_entry},
	layout::{Layout, LayoutConfig, ViewportClass},
	reconcile::{reconcile, Pass, Surface},
	session::Session,
	storage::{BrowserStore, StorageError},
	store::Adjustment,
	template::selectors,
};
use chrono::{Datelike, Local};
use core::cell::RefCell;
use gloo_timers::callback::Timeout;
use rand::{rngs::StdRng, SeedableRng};
use std::rc::Rc;
use tracing::{debug, error, info, instrument, trace, warn};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, thiserror::Error)]
pub enum MountError {
	#[error("no global `window`")]
	NoWindow,
	#[error("no document")]
	NoDocument,
	#[error("no element matches {0:?}")]
	MissingElement(String),
	#[error("element {selector:?} isn't a {expected}")]
	WrongElementType { selector: String, expected: &'static str },
	#[error("failed to query {selector:?}: {message}")]
	Query { selector: String, message: String },
	#[error("failed to add {event:?} listener: {message}")]
	Listener { event: &'static str, message: String },
	#[error(transparent)]
	Storage(#[from] StorageError),
}

/// The control kinds a row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
	Increment,
	Decrement,
	Delete,
}

pub(crate) struct App {
	session: Session<BrowserStore, StdRng>,
	surface: DomSurface,
	layout_config: LayoutConfig,
	viewport: ViewportClass,
	form: web_sys::HtmlFormElement,
	error_text: web_sys::Element,
	score_step: u8,
}
impl App {
	fn layout(&self) -> Layout {
		self.layout_config.layout(self.viewport)
	}

	fn apply_wrapper_height(&mut self) {
		let height = self.layout().wrapper_height(self.session.len());
		self.surface.set_wrapper_height(height);
	}

	pub(crate) fn reconcile(&mut self) -> Pass {
		let layout = self.layout();
		reconcile(self.session.entries(), self.session.ids(), layout, &mut self.surface)
	}

	/// Returns whether a reconciliation pass is needed.
	#[instrument(skip(self))]
	fn submit(&mut self) -> bool {
		let new = match collect_fields(&self.form).and_then(|fields| parse_new_entry(&fields)) {
			Ok(new) => new,
			Err(error) => {
				debug!("Rejected submission: {:?}", error);
				self.error_text.set_text_content(Some(&error.to_string()));
				return false;
			}
		};
		self.error_text.set_text_content(Some(""));

		// The row is created at the end of the list first, so the deferred pass can slide it into place.
		let index = self.session.len();
		let entry = self.session.add(new);
		let offset = self.layout().offset(index);
		self.surface.create_row(&entry, index, offset);
		self.apply_wrapper_height();

		self.form.reset();
		true
	}

	/// Translates a clicked control into the id of its entry.
	///
	/// The row's own id is authoritative: a control inside a row whose entry is gone (still awaiting its
	/// deferred pass) resolves to nothing. The positional index is only a fallback for controls outside a row.
	fn resolve_target(&self, control: &web_sys::Element) -> Option<String> {
		if let Ok(Some(row)) = control.closest(selectors::ROW) {
			let id = row.id();
			return self.session.get(&id).is_some().then_some(id);
		}
		let index = control.get_attribute(selectors::INDEX_ATTRIBUTE)?.parse::<usize>().ok()?;
		self.session.id_at(index).map(|id| id.as_str().to_owned())
	}

	/// Returns whether a reconciliation pass is needed.
	#[instrument(skip(self, control))]
	fn activate(&mut self, control: &web_sys::Element) -> bool {
		let class_list = control.class_list();
		let kind = if class_list.contains("plus") {
			Control::Increment
		} else if class_list.contains("minus") {
			Control::Decrement
		} else if class_list.contains("delete") {
			Control::Delete
		} else {
			trace!("Not a row control.");
			return false;
		};
		let id = match self.resolve_target(control) {
			Some(id) => id,
			None => {
				warn!(?kind, "Could not resolve the clicked control's entry.");
				return false;
			}
		};

		let step = i32::from(self.score_step);
		let changed = match kind {
			Control::Increment => self.adjust(&id, step),
			Control::Decrement => self.adjust(&id, -step),
			Control::Delete => self.session.delete(&id).is_some(),
		};
		if changed {
			self.apply_wrapper_height();
		}
		changed
	}

	fn adjust(&mut self, id: &str, delta: i32) -> bool {
		match self.session.adjust_score(id, delta) {
			Adjustment::Applied { from, to } => {
				trace!(from, to, "Adjusted score.");
				true
			}
			Adjustment::OutOfRange { .. } | Adjustment::Missing => false,
		}
	}

	/// Re-renders immediately if the viewport width class changed.
	fn resize(&mut self, viewport_width: f64) {
		let viewport = self.layout_config.classify(viewport_width);
		if viewport != self.viewport {
			info!(?viewport, "Viewport class changed.");
			self.viewport = viewport;
			self.reconcile();
		}
	}
}

/// Runs a reconciliation pass on the next task-queue turn.
fn schedule_reconcile(app: &Rc<RefCell<App>>) {
	let app = Rc::clone(app);
	Timeout::new(0, move || match app.try_borrow_mut() {
		Ok(mut app) => {
			app.reconcile();
		}
		Err(_) => error!("Leaderboard busy during deferred reconciliation. Skipping the pass."),
	})
	.forget();
}

struct Listener {
	target: web_sys::EventTarget,
	event: &'static str,
	closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// A mounted leaderboard.
///
/// Dropping this removes its event listeners. Rendered rows and persisted state stay as they are.
#[wasm_bindgen]
pub struct Leaderboard {
	app: Rc<RefCell<App>>,
	listeners: Vec<Listener>,
}
impl Leaderboard {
	fn listen(&mut self, target: &web_sys::EventTarget, event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Result<(), MountError> {
		let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
		target
			.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
			.map_err(|error| MountError::Listener { event, message: format!("{:?}", error) })?;
		self.listeners.push(Listener { target: target.clone(), event, closure });
		Ok(())
	}

	/// Number of entries currently on the board.
	#[must_use]
	pub fn len(&self) -> usize {
		self.app.borrow().session.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Runs a reconciliation pass right away.
	pub fn reconcile(&self) -> Pass {
		self.app.borrow_mut().reconcile()
	}
}
impl Drop for Leaderboard {
	fn drop(&mut self) {
		for Listener { target, event, closure } in self.listeners.drain(..) {
			if let Err(error) = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
				error!("Failed to remove {:?} listener: {:?}", event, error);
			}
		}
	}
}

fn query<T: JsCast>(document: &web_sys::Document, selector: &str, expected: &'static str) -> Result<T, MountError> {
	document
		.query_selector(selector)
		.map_err(|error| MountError::Query { selector: selector.to_owned(), message: format!("{:?}", error) })?
		.ok_or_else(|| MountError::MissingElement(selector.to_owned()))?
		.dyn_into::<T>()
		.map_err(|_| MountError::WrongElementType { selector: selector.to_owned(), expected })
}

fn viewport_width(window: &web_sys::Window) -> f64 {
	window.inner_width().ok().and_then(|width| width.as_f64()).unwrap_or_default()
}

/// Mounts a leaderboard onto the current document.
///
/// Loads persisted state, renders it, fills in the current year, starts fetching the country list
/// and attaches the form, control and resize handlers.
///
/// # Errors
///
/// Iff a required element is missing or `localStorage` is unavailable.
#[instrument]
pub fn mount(config: Config) -> Result<Leaderboard, MountError> {
	if !tracing::dispatcher::has_been_set() {
		tracing_wasm::set_as_global_default();
	}

	let window = web_sys::window().ok_or(MountError::NoWindow)?;
	let document = window.document().ok_or(MountError::NoDocument)?;

	let form: web_sys::HtmlFormElement = query(&document, &config.form, "form")?;
	let error_text: web_sys::Element = query(&document, &config.error_text, "element")?;
	let container: web_sys::HtmlElement = query(&document, &config.leaderboard, "HTML element")?;
	let surface = DomSurface::new(container.clone(), config.score_step).ok_or(MountError::NoDocument)?;

	let storage = BrowserStore::local(&window)?;
	let session = Session::load(storage, config.storage_keys.clone(), StdRng::from_entropy());

	let app = Rc::new(RefCell::new(App {
		session,
		surface,
		layout_config: config.layout,
		viewport: config.layout.classify(viewport_width(&window)),
		form: form.clone(),
		error_text,
		score_step: config.score_step,
	}));
	let initial = app.borrow_mut().reconcile();
	info!(rows = initial.created, "Rendered persisted entries.");

	match document.query_selector(&config.year) {
		Ok(Some(year)) => year.set_text_content(Some(&Local::now().year().to_string())),
		Ok(None) => trace!("No year element."),
		Err(error) => error!("Failed to query year element: {:?}", error),
	}

	if let Some(url) = config.country_list_url.clone() {
		match document.query_selector(&config.country_select) {
			Ok(Some(select)) => spawn_local(async move {
				match fetch_country_names(&url).await {
					Ok(names) => append_options(&document, &select, &names),
					Err(error) => error!("Failed to fetch the country list: {}", error),
				}
			}),
			Ok(None) => warn!("No country selection element."),
			Err(error) => error!("Failed to query country selection element: {:?}", error),
		}
	}

	let mut leaderboard = Leaderboard { app: Rc::clone(&app), listeners: Vec::new() };

	let submit_app = Rc::clone(&app);
	leaderboard.listen(&form, "submit", move |event| {
		event.prevent_default();
		let schedule = match submit_app.try_borrow_mut() {
			Ok(mut app) => app.submit(),
			Err(_) => {
				error!("Leaderboard busy. Dropping submission.");
				false
			}
		};
		if schedule {
			schedule_reconcile(&submit_app);
		}
	})?;

	let click_app = Rc::clone(&app);
	leaderboard.listen(&container, "click", move |event| {
		let control = match event.target().and_then(|target| target.dyn_into::<web_sys::Element>().ok()).and_then(|target| target.closest(selectors::CONTROL).ok().flatten()) {
			Some(control) => control,
			None => return,
		};
		let schedule = match click_app.try_borrow_mut() {
			Ok(mut app) => app.activate(&control),
			Err(_) => {
				error!("Leaderboard busy. Dropping click.");
				false
			}
		};
		if schedule {
			schedule_reconcile(&click_app);
		}
	})?;

	let resize_app = Rc::clone(&app);
	let resize_window = window.clone();
	leaderboard.listen(&window, "resize", move |_| match resize_app.try_borrow_mut() {
		Ok(mut app) => app.resize(viewport_width(&resize_window)),
		Err(_) => error!("Leaderboard busy. Dropping resize."),
	})?;

	Ok(leaderboard)
}

/// Mounts a leaderboard with the default [`Config`].
///
/// # Errors
///
/// Iff mounting fails, see [`mount`].
#[wasm_bindgen(js_name = mountLeaderboard)]
pub fn mount_leaderboard() -> Result<Leaderboard, JsValue> {
	mount(Config::default()).map_err(|error| JsValue::from_str(&error.to_string()))
}
