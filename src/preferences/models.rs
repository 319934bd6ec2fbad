/// the three independent bits a user can hold for a tag
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PreferenceField {
    Saved,
    Followed,
    Hidden,
}

impl PreferenceField {
    /// parses the wire name used by the toggle endpoint
    pub fn from_field_name(name: &str) -> Option<PreferenceField> {
        match name {
            "is_saved" => Some(PreferenceField::Saved),
            "is_followed" => Some(PreferenceField::Followed),
            "is_hidden" => Some(PreferenceField::Hidden),
            _ => None,
        }
    }

    /// parses the tab name used by the my-tags endpoint
    pub fn from_tab(tab: &str) -> Option<PreferenceField> {
        match tab {
            "saved" => Some(PreferenceField::Saved),
            "followed" => Some(PreferenceField::Followed),
            "hidden" => Some(PreferenceField::Hidden),
            _ => None,
        }
    }

    /// the column this bit lives in. Only ever interpolated into queries from
    /// this enum, never from request input
    pub fn column(&self) -> &'static str {
        match self {
            PreferenceField::Saved => "saved",
            PreferenceField::Followed => "followed",
            PreferenceField::Hidden => "hidden",
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            PreferenceField::Saved => "is_saved",
            PreferenceField::Followed => "is_followed",
            PreferenceField::Hidden => "is_hidden",
        }
    }
}
