pub mod line_chart;
pub mod metric_card;
pub mod scroll_view;
pub mod tab_bar;
pub mod text;
pub mod toggle;

pub use line_chart::{ChartColors, LineChart};
pub use metric_card::{CARD_HEIGHT_PX, CardColors, MetricCard};
pub use scroll_view::ScrollView;
pub use tab_bar::{ChromeColors, TabBar};
pub use text::{Label, Paragraph, TextSize};
pub use toggle::{SWITCH_SIZE, ToggleSwitch};
