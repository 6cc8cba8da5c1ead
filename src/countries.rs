//! The country selection list, fetched once on mount.

use serde::Deserialize;
use tracing::{error, info, instrument};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Default source of country names.
pub const COUNTRY_LIST_URL: &str = "https://restcountries.com/v3.1/all?fields=name";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	#[error("no window to fetch from")]
	NoWindow,
	#[error("request failed: {0}")]
	Request(String),
	#[error("unexpected response status {0}")]
	Status(u16),
	#[error("malformed country list: {0}")]
	Json(#[from] serde_json::Error),
}
impl From<JsValue> for FetchError {
	fn from(error: JsValue) -> Self {
		Self::Request(format!("{:?}", error))
	}
}

#[derive(Debug, Deserialize)]
struct Country {
	name: CountryName,
}

#[derive(Debug, Deserialize)]
struct CountryName {
	common: String,
}

/// Extracts the common country names from a `restcountries` response body, sorted.
///
/// # Errors
///
/// Iff `json` doesn't have the expected shape.
pub fn parse_country_names(json: &str) -> Result<Vec<String>, serde_json::Error> {
	let countries: Vec<Country> = serde_json::from_str(json)?;
	let mut names = countries.into_iter().map(|country| country.name.common).collect::<Vec<_>>();
	names.sort();
	Ok(names)
}

/// Fetches and parses the country list at `url`.
///
/// # Errors
///
/// Iff the request fails, the response isn't successful or its body can't be parsed.
#[instrument]
pub async fn fetch_country_names(url: &str) -> Result<Vec<String>, FetchError> {
	let window = web_sys::window().ok_or(FetchError::NoWindow)?;
	let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
	if !response.ok() {
		return Err(FetchError::Status(response.status()));
	}
	let body = JsFuture::from(response.text()?).await?.as_string().unwrap_or_default();
	Ok(parse_country_names(&body)?)
}

/// Appends one `<option>` per name to `select`.
pub fn append_options(document: &web_sys::Document, select: &web_sys::Element, names: &[String]) {
	for name in names {
		let option = match document.create_element("option") {
			Ok(option) => option,
			Err(error) => {
				error!("Failed to create option: {:?}", error);
				return;
			}
		};
		if let Err(error) = option.set_attribute("value", name) {
			error!("Failed to set option value: {:?}", error);
			continue;
		}
		option.set_text_content(Some(name));
		if let Err(error) = select.append_child(&option) {
			error!("Failed to append option: {:?}", error);
		}
	}
	info!(count = names.len(), "Populated country list.");
}
