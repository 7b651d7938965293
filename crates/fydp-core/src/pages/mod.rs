pub mod constants;
pub mod dashboard;
pub mod history;
pub mod page;
pub mod settings;

pub use dashboard::DashboardPage;
pub use history::HistoryPage;
pub use page::{Page, PageWrapper};
pub use settings::SettingsPage;
