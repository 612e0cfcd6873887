//! Page Components

mod dashboard;
mod landing;
mod subscription;

pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use subscription::SubscriptionPage;
