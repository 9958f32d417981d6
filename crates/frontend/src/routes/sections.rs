//! Which pages each portal exposes.

use contracts::enums::PortalType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Users,
    Organizations,
    Vendors,
    Onboarding,
    Vessels,
    Rfqs,
}

impl Section {
    pub fn code(&self) -> &'static str {
        match self {
            Section::Users => "users",
            Section::Organizations => "organizations",
            Section::Vendors => "vendors",
            Section::Onboarding => "onboarding",
            Section::Vessels => "vessels",
            Section::Rfqs => "rfqs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Users => "Users & roles",
            Section::Organizations => "Organizations",
            Section::Vendors => "Vendors",
            Section::Onboarding => "Onboarding",
            Section::Vessels => "Fleet",
            Section::Rfqs => "RFQs",
        }
    }

    /// Icon name understood by `shared::icons::icon`
    pub fn icon(&self) -> &'static str {
        self.code()
    }
}

pub fn sections_for(portal: PortalType) -> &'static [Section] {
    match portal {
        PortalType::Admin => &[
            Section::Users,
            Section::Organizations,
            Section::Vendors,
            Section::Onboarding,
            Section::Rfqs,
        ],
        PortalType::Customer => &[Section::Users, Section::Vessels, Section::Rfqs],
        PortalType::Tech | PortalType::Vendor => &[Section::Users, Section::Rfqs],
    }
}

/// Resolve a `/:portal/:section` pair; sections foreign to the portal are rejected
pub fn resolve(portal: &str, section: &str) -> Option<(PortalType, Section)> {
    let portal = PortalType::from_code(portal)?;
    let section = section.trim().to_ascii_lowercase();
    sections_for(portal)
        .iter()
        .copied()
        .find(|s| s.code() == section)
        .map(|s| (portal, s))
}

pub fn section_path(portal: PortalType, section: Section) -> String {
    format!("/{}/{}", portal.code(), section.code())
}

/// Landing path of a portal
pub fn home_path(portal: PortalType) -> String {
    section_path(portal, sections_for(portal)[0])
}
