use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------- Positions ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    PointGuard,
    ShootingGuard,
    SmallForward,
    PowerForward,
    Center,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::PointGuard,
        Position::ShootingGuard,
        Position::SmallForward,
        Position::PowerForward,
        Position::Center,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "PG" => Some(Position::PointGuard),
            "SG" => Some(Position::ShootingGuard),
            "SF" => Some(Position::SmallForward),
            "PF" => Some(Position::PowerForward),
            "C" => Some(Position::Center),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }

    pub fn numeric(self) -> f32 {
        match self {
            Position::PointGuard => 1.0,
            Position::ShootingGuard => 2.0,
            Position::SmallForward => 3.0,
            Position::PowerForward => 4.0,
            Position::Center => 5.0,
        }
    }
}

/// Numeric value the model was trained with for a roster position code.
/// Unrecognized codes map to 0.
pub fn position_numeric(code: &str) -> f32 {
    Position::from_code(code).map_or(0.0, Position::numeric)
}

// ---------- Injury types ----------

/// The closed set of hypothetical injuries offered by the form.
///
/// Declaration order is the dropdown order and also the integer encoding
/// the model was trained against (see [`InjuryType::code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjuryType {
    FootFracture,
    HipFlexorSurgery,
    CalfStrain,
    Quad,
    ShoulderSprain,
    FootSprain,
    TornRotatorCuff,
    TornMcl,
    HipFlexorStrain,
    FracturedLeg,
    SprainedMcl,
    AnkleSprain,
    Hamstring,
    MeniscusTear,
    TornHamstring,
    DislocatedShoulder,
    AnkleFracture,
    FracturedHand,
    BoneSpurs,
    AclTear,
    HipLabrum,
    BackSurgery,
    Arm,
    TornShoulderLabrum,
    LowerBackSpasm,
}

impl InjuryType {
    pub const ALL: [InjuryType; 25] = [
        InjuryType::FootFracture,
        InjuryType::HipFlexorSurgery,
        InjuryType::CalfStrain,
        InjuryType::Quad,
        InjuryType::ShoulderSprain,
        InjuryType::FootSprain,
        InjuryType::TornRotatorCuff,
        InjuryType::TornMcl,
        InjuryType::HipFlexorStrain,
        InjuryType::FracturedLeg,
        InjuryType::SprainedMcl,
        InjuryType::AnkleSprain,
        InjuryType::Hamstring,
        InjuryType::MeniscusTear,
        InjuryType::TornHamstring,
        InjuryType::DislocatedShoulder,
        InjuryType::AnkleFracture,
        InjuryType::FracturedHand,
        InjuryType::BoneSpurs,
        InjuryType::AclTear,
        InjuryType::HipLabrum,
        InjuryType::BackSurgery,
        InjuryType::Arm,
        InjuryType::TornShoulderLabrum,
        InjuryType::LowerBackSpasm,
    ];

    /// Label as it appears in the training data.
    pub fn label(self) -> &'static str {
        match self {
            InjuryType::FootFracture => "foot fracture injury",
            InjuryType::HipFlexorSurgery => "hip flexor surgery injury",
            InjuryType::CalfStrain => "calf strain injury",
            InjuryType::Quad => "quad injury injury",
            InjuryType::ShoulderSprain => "shoulder sprain injury",
            InjuryType::FootSprain => "foot sprain injury",
            InjuryType::TornRotatorCuff => "torn rotator cuff injury injury",
            InjuryType::TornMcl => "torn mcl injury",
            InjuryType::HipFlexorStrain => "hip flexor strain injury",
            InjuryType::FracturedLeg => "fractured leg injury",
            InjuryType::SprainedMcl => "sprained mcl injury",
            InjuryType::AnkleSprain => "ankle sprain injury",
            InjuryType::Hamstring => "hamstring injury injury",
            InjuryType::MeniscusTear => "meniscus tear injury",
            InjuryType::TornHamstring => "torn hamstring injury",
            InjuryType::DislocatedShoulder => "dislocated shoulder injury",
            InjuryType::AnkleFracture => "ankle fracture injury",
            InjuryType::FracturedHand => "fractured hand injury",
            InjuryType::BoneSpurs => "bone spurs injury",
            InjuryType::AclTear => "acl tear injury",
            InjuryType::HipLabrum => "hip labrum injury",
            InjuryType::BackSurgery => "back surgery injury",
            InjuryType::Arm => "arm injury injury",
            InjuryType::TornShoulderLabrum => "torn shoulder labrum injury",
            InjuryType::LowerBackSpasm => "lower back spasm injury",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|injury| injury.label() == label)
    }

    /// Historical average days missed for this injury.
    pub fn average_days(self) -> f64 {
        match self {
            InjuryType::FootFracture => 207.666667,
            InjuryType::HipFlexorSurgery => 256.0,
            InjuryType::CalfStrain => 236.0,
            InjuryType::Quad => 283.0,
            InjuryType::ShoulderSprain => 259.5,
            InjuryType::FootSprain => 294.0,
            InjuryType::TornRotatorCuff => 251.5,
            InjuryType::TornMcl => 271.0,
            InjuryType::HipFlexorStrain => 253.0,
            InjuryType::FracturedLeg => 250.25,
            InjuryType::SprainedMcl => 228.666667,
            InjuryType::AnkleSprain => 231.333333,
            InjuryType::Hamstring => 220.0,
            InjuryType::MeniscusTear => 201.25,
            InjuryType::TornHamstring => 187.666667,
            InjuryType::DislocatedShoulder => 269.0,
            InjuryType::AnkleFracture => 114.5,
            InjuryType::FracturedHand => 169.142857,
            InjuryType::BoneSpurs => 151.5,
            InjuryType::AclTear => 268.0,
            InjuryType::HipLabrum => 247.5,
            InjuryType::BackSurgery => 215.8,
            InjuryType::Arm => 303.666667,
            InjuryType::TornShoulderLabrum => 195.666667,
            InjuryType::LowerBackSpasm => 234.0,
        }
    }

    /// Average days rounded to a whole day, used to pre-fill the days control.
    pub fn default_days(self) -> u32 {
        clamp_days(self.average_days().round() as i64)
    }

    /// Fixed integer code fed to the model in the `injury_type` column.
    pub fn code(self) -> u32 {
        Self::ALL
            .iter()
            .position(|injury| *injury == self)
            .unwrap_or_default() as u32
    }
}

impl Default for InjuryType {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl std::fmt::Display for InjuryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InjuryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InjuryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        InjuryType::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown injury type: {label}")))
    }
}

// ---------- Days injured bounds ----------

pub const MIN_DAYS_INJURED: u32 = 0;
pub const MAX_DAYS_INJURED: u32 = 365;

/// Bound a requested days-injured value to the range the slider allows.
pub fn clamp_days(days: i64) -> u32 {
    days.clamp(MIN_DAYS_INJURED as i64, MAX_DAYS_INJURED as i64) as u32
}
