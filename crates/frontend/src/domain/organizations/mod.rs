pub mod ui;

use contracts::domain::organization::Organization;

use crate::shared::components::remote_list::Identified;
use crate::shared::query::Resource;

pub const ORGANIZATIONS: Resource = Resource::new("organizations");

impl Identified for Organization {
    fn id(&self) -> &str {
        &self.id
    }
}
