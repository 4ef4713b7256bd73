// Vehicle domain model

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub registration: String,
}

impl Vehicle {
    pub fn new(registration: String) -> Self {
        Self { registration }
    }

    /// Case-insensitive substring match against the registration.
    /// An empty search matches every vehicle.
    pub fn matches(&self, search: &str) -> bool {
        self.registration
            .to_lowercase()
            .contains(&search.trim().to_lowercase())
    }
}

/// Keep the registrations matching `search`, in directory order.
pub fn filter_registrations<'a>(vehicles: &'a [Vehicle], search: &str) -> Vec<&'a str> {
    vehicles
        .iter()
        .filter(|v| v.matches(search))
        .map(|v| v.registration.as_str())
        .collect()
}
