pub mod ui;

use contracts::domain::vessel::Vessel;

use crate::shared::components::remote_list::Identified;
use crate::shared::query::Resource;

pub const VESSELS: Resource = Resource::new("vessels");

impl Identified for Vessel {
    fn id(&self) -> &str {
        &self.id
    }
}
