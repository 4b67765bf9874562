pub mod breakdown_chart;
pub mod combined_chart;
pub mod record_form;
pub mod record_table;
pub mod sidebar;

pub use breakdown_chart::BreakdownChart;
pub use combined_chart::CombinedChart;
pub use record_form::RecordForm;
pub use record_table::RecordTable;
pub use sidebar::Sidebar;
