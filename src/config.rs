use crate::{countries::COUNTRY_LIST_URL, layout::LayoutConfig, storage::StorageKeys};

/// Everything [`mount`](`crate::mount`) needs to find its elements and behave.
///
/// [`Default`] matches the stock page markup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	/// The add-entry form. Each of its named controls is a required field.
	pub form: String,
	/// Where the inline validation message goes.
	pub error_text: String,
	/// The rows' wrapper. Rows are positioned absolutely inside it.
	pub leaderboard: String,
	/// The country selection control, populated from [`Config::country_list_url`].
	pub country_select: String,
	/// Receives the current year, if present.
	pub year: String,
	pub storage_keys: StorageKeys,
	/// [`None`] skips fetching the country list.
	pub country_list_url: Option<String>,
	/// Amount the increment and decrement controls change a score by.
	pub score_step: u8,
	pub layout: LayoutConfig,
}
impl Default for Config {
	fn default() -> Self {
		Self {
			form: ".add-entry-form".to_owned(),
			error_text: ".error-text".to_owned(),
			leaderboard: ".leaderboard".to_owned(),
			country_select: "select[name=country]".to_owned(),
			year: "#year".to_owned(),
			storage_keys: StorageKeys::default(),
			country_list_url: Some(COUNTRY_LIST_URL.to_owned()),
			score_step: 5,
			layout: LayoutConfig::default(),
		}
	}
}
