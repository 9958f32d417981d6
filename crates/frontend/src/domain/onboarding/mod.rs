pub mod ui;

use contracts::domain::onboarding::OnboardingRequest;

use crate::shared::components::remote_list::Identified;
use crate::shared::query::Resource;

pub const ONBOARDING: Resource = Resource::new("onboarding-requests");

impl Identified for OnboardingRequest {
    fn id(&self) -> &str {
        &self.id
    }
}
