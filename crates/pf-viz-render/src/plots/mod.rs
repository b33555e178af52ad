pub mod axes_draw;
pub mod coef_bars;
pub mod rsquared;
