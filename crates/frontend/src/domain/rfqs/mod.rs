pub mod ui;

use contracts::domain::rfq::Rfq;

use crate::shared::components::remote_list::Identified;
use crate::shared::query::Resource;

pub const RFQS: Resource = Resource::new("rfqs");

impl Identified for Rfq {
    fn id(&self) -> &str {
        &self.id
    }
}
