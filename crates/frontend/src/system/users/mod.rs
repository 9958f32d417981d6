pub mod ui;

use contracts::enums::PortalType;
use contracts::system::users::User;

use crate::shared::components::remote_list::Identified;
use crate::shared::query::Resource;

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Users are scoped to the portal they belong to
pub fn users_resource(portal: PortalType) -> Resource {
    Resource::scoped("users", portal)
}
