//! Collects and validates the add-entry form.

use crate::{
	entry::{MAX_SCORE, MIN_SCORE},
	session::NewEntry,
};
use hashbrown::HashMap;
use tracing::{instrument, trace};
use wasm_bindgen::JsCast;

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const COUNTRY: &str = "country";
pub const SCORE: &str = "score";

/// Validation failures, displayed verbatim to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
	#[error("All fields are required")]
	MissingField { field: String },
	#[error("Score must be a number")]
	InvalidScore { value: String },
	#[error("Score must be between {} and {}", MIN_SCORE, MAX_SCORE)]
	ScoreOutOfRange { score: f64 },
}

/// Reads every named control of `form`, upper-casing the values.
///
/// Fails on the first empty control.
///
/// # Errors
///
/// [`FormError::MissingField`] iff any named control is empty.
#[instrument(skip(form))]
pub fn collect_fields(form: &web_sys::HtmlFormElement) -> Result<HashMap<String, String>, FormError> {
	let mut fields = HashMap::new();
	let controls = match form.query_selector_all("[name]") {
		Ok(controls) => controls,
		Err(error) => {
			tracing::error!("Failed to query form controls: {:?}", error);
			return Ok(fields);
		}
	};
	for i in 0..controls.length() {
		let control = match controls.item(i) {
			Some(control) => control,
			None => continue,
		};
		let (name, value) = if let Some(input) = control.dyn_ref::<web_sys::HtmlInputElement>() {
			(input.name(), input.value())
		} else if let Some(select) = control.dyn_ref::<web_sys::HtmlSelectElement>() {
			(select.name(), select.value())
		} else {
			trace!("Skipping named node that isn't an input or select.");
			continue;
		};
		if value.is_empty() {
			return Err(FormError::MissingField { field: name });
		}
		fields.insert(name, value.to_uppercase());
	}
	Ok(fields)
}

/// Turns collected fields into a [`NewEntry`].
///
/// The score is parsed as a decimal number and rounded to the nearest integer, with halves rounding up.
///
/// # Errors
///
/// Iff a required field is missing or empty, or the score isn't a number in the allowed range.
pub fn parse_new_entry(fields: &HashMap<String, String>) -> Result<NewEntry, FormError> {
	let field = |name: &str| match fields.get(name) {
		Some(value) if !value.is_empty() => Ok(value.clone()),
		_ => Err(FormError::MissingField { field: name.to_owned() }),
	};

	let first_name = field(FIRST_NAME)?;
	let last_name = field(LAST_NAME)?;
	let country = field(COUNTRY)?;
	let score = field(SCORE)?;

	Ok(NewEntry {
		first_name,
		last_name,
		country,
		score: parse_score(&score)?,
	})
}

fn parse_score(value: &str) -> Result<u8, FormError> {
	let number = match value.trim().parse::<f64>() {
		Ok(number) if number.is_finite() => number,
		_ => return Err(FormError::InvalidScore { value: value.to_owned() }),
	};
	let rounded = (number + 0.5).floor();
	if rounded < f64::from(MIN_SCORE) || rounded > f64::from(MAX_SCORE) {
		return Err(FormError::ScoreOutOfRange { score: rounded });
	}
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Range-checked above.
	let score = rounded as u8;
	Ok(score)
}
