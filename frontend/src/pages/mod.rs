pub mod dashboard;
pub mod login;
pub mod profile;
pub mod records;
pub mod signup;
pub mod support;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use records::RecordsPage;
pub use signup::SignUpPage;
pub use support::SupportPage;
