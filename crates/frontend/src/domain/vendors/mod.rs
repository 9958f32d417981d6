pub mod ui;

use contracts::domain::vendor::Vendor;

use crate::shared::components::remote_list::Identified;
use crate::shared::query::Resource;

pub const VENDORS: Resource = Resource::new("vendors");

impl Identified for Vendor {
    fn id(&self) -> &str {
        &self.id
    }
}
