// Categorical status signals reported by the vehicle gateway

/// A categorical signal plotted as small integer codes.
pub trait StatusSignal {
    /// Plot code, or `None` for values outside the lookup table.
    fn code(&self) -> Option<i32>;

    /// Axis ticks for the signal's chart, as (code, label) pairs.
    fn ticks() -> &'static [(i32, &'static str)];
}

/// Gearbox run state (`gbStatus`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GearboxStatus {
    Start,
    Stop,
    Idle,
    Unknown(String),
}

impl GearboxStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Start" => Self::Start,
            "Stop" => Self::Stop,
            "Idle" => Self::Idle,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
            Self::Idle => "Idle",
            Self::Unknown(raw) => raw,
        }
    }
}

impl StatusSignal for GearboxStatus {
    fn code(&self) -> Option<i32> {
        match self {
            Self::Start => Some(1),
            Self::Stop => Some(2),
            Self::Idle => Some(3),
            Self::Unknown(_) => None,
        }
    }

    fn ticks() -> &'static [(i32, &'static str)] {
        &[(1, "Start"), (2, "Stop"), (3, "Idle")]
    }
}

/// Charging state (`gbCharge`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeStatus {
    Charging,
    NotCharging,
    Unknown(String),
}

impl ChargeStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Charging" => Self::Charging,
            "Not in Charging" => Self::NotCharging,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Charging => "Charging",
            Self::NotCharging => "Not in Charging",
            Self::Unknown(raw) => raw,
        }
    }
}

impl StatusSignal for ChargeStatus {
    fn code(&self) -> Option<i32> {
        match self {
            Self::Charging => Some(1),
            Self::NotCharging => Some(0),
            Self::Unknown(_) => None,
        }
    }

    fn ticks() -> &'static [(i32, &'static str)] {
        &[(0, "Not charging"), (1, "Charging")]
    }
}

/// Overall vehicle activity state (`evStatus`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleStatus {
    Active,
    Inactive,
    Error,
    Unknown(String),
}

impl VehicleStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "Active" => Self::Active,
            "Inactive" => Self::Inactive,
            "Error" => Self::Error,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Error => "Error",
            Self::Unknown(raw) => raw,
        }
    }
}

impl StatusSignal for VehicleStatus {
    fn code(&self) -> Option<i32> {
        match self {
            Self::Active => Some(1),
            Self::Inactive => Some(2),
            Self::Error => Some(3),
            Self::Unknown(_) => None,
        }
    }

    fn ticks() -> &'static [(i32, &'static str)] {
        &[(1, "Active"), (2, "Inactive"), (3, "Error")]
    }
}
