pub mod onboarding;
pub mod organizations;
pub mod rfqs;
pub mod vendors;
pub mod vessels;
