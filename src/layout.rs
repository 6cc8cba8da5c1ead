//! Row geometry: the leaderboard's rows are absolutely positioned, so their offsets and the wrapper's height are computed here.

/// Viewport width class, selecting one of two fixed row heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
	Mobile,
	Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
	/// Viewports narrower than this (in CSS pixels) are [`ViewportClass::Mobile`].
	pub mobile_breakpoint: f64,
	pub mobile_row_height: u32,
	pub desktop_row_height: u32,
	pub row_gap: u32,
}
impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			mobile_breakpoint: 768.,
			mobile_row_height: 160,
			desktop_row_height: 88,
			row_gap: 4,
		}
	}
}
impl LayoutConfig {
	#[must_use]
	pub fn classify(&self, viewport_width: f64) -> ViewportClass {
		if viewport_width < self.mobile_breakpoint {
			ViewportClass::Mobile
		} else {
			ViewportClass::Desktop
		}
	}

	#[must_use]
	pub fn layout(&self, class: ViewportClass) -> Layout {
		Layout {
			row_height: match class {
				ViewportClass::Mobile => self.mobile_row_height,
				ViewportClass::Desktop => self.desktop_row_height,
			},
			row_gap: self.row_gap,
		}
	}
}

/// Concrete row metrics for the current [`ViewportClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
	pub row_height: u32,
	pub row_gap: u32,
}
impl Layout {
	/// Vertical offset in pixels of the row at `index`.
	#[must_use]
	pub fn offset(&self, index: usize) -> u32 {
		u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(self.row_height + self.row_gap)
	}

	/// Height in pixels of a wrapper holding `rows` rows, without trailing gap.
	#[must_use]
	pub fn wrapper_height(&self, rows: usize) -> u32 {
		match rows {
			0 => 0,
			rows => self.offset(rows - 1).saturating_add(self.row_height),
		}
	}
}
