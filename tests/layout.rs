use chrono::{TimeZone, Utc};
use leaderboard_dom::{
	entry::{format_timestamp, MAX_SCORE, MIN_SCORE},
	layout::{LayoutConfig, ViewportClass},
	Entry, EntryId,
};

#[test]
fn breakpoint_selects_row_height() {
	let config = LayoutConfig::default();
	assert_eq!(config.classify(320.), ViewportClass::Mobile);
	assert_eq!(config.classify(767.9), ViewportClass::Mobile);
	assert_eq!(config.classify(768.), ViewportClass::Desktop);
	assert_eq!(config.classify(1920.), ViewportClass::Desktop);

	assert_eq!(config.layout(ViewportClass::Mobile).row_height, 160);
	assert_eq!(config.layout(ViewportClass::Desktop).row_height, 88);
}

#[test]
fn fractional_breakpoints_are_configurable() {
	let desktop_only = LayoutConfig {
		mobile_breakpoint: 0.,
		..LayoutConfig::default()
	};
	assert_ne!(desktop_only, LayoutConfig::default());
	assert_eq!(desktop_only.classify(0.), ViewportClass::Desktop);

	let between = LayoutConfig {
		mobile_breakpoint: 600.5,
		..LayoutConfig::default()
	};
	assert_eq!(between.classify(600.4), ViewportClass::Mobile);
	assert_eq!(between.classify(600.5), ViewportClass::Desktop);
}

#[test]
fn offsets_and_wrapper_height() {
	let layout = LayoutConfig::default().layout(ViewportClass::Desktop);
	assert_eq!(layout.offset(0), 0);
	assert_eq!(layout.offset(1), 92);
	assert_eq!(layout.offset(10), 920);

	assert_eq!(layout.wrapper_height(0), 0);
	assert_eq!(layout.wrapper_height(1), 88);
	assert_eq!(layout.wrapper_height(5), 88 * 5 + 4 * 4);
}

#[test]
fn timestamps_are_formatted_for_display() {
	let moment = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 59).unwrap();
	assert_eq!(format_timestamp(&moment), "Mar 05, 2024 14:30");
}

#[test]
fn adjusted_scores_stay_in_range() {
	let entry = Entry {
		id: EntryId::new("000001"),
		name: "A B".to_owned(),
		country: "C".to_owned(),
		score: 95,
		time: String::new(),
	};
	assert_eq!(entry.adjusted_score(5), Some(MAX_SCORE));
	assert_eq!(entry.adjusted_score(6), None);
	assert_eq!(entry.adjusted_score(-95), Some(MIN_SCORE));
	assert_eq!(entry.adjusted_score(-96), None);
	assert_eq!(entry.adjusted_score(i32::MAX), None);
}
