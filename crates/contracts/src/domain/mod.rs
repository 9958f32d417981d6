pub mod onboarding;
pub mod organization;
pub mod rfq;
pub mod vendor;
pub mod vessel;
