//! Manufacturer list used for random selection

/// Known manufacturers the spin operation samples from.
///
/// The upstream provider's coverage is sparse outside these makes, so the
/// orchestrator only ever queries names from this list.
pub const MOTORCYCLE_MAKES: &[&str] = &[
    "Honda",
    "Yamaha",
    "Kawasaki",
    "Suzuki",
    "BMW",
    "Ducati",
    "Harley-Davidson",
    "Triumph",
    "KTM",
    "Aprilia",
    "Indian",
    "Moto Guzzi",
    "Norton",
    "Royal Enfield",
    "Zero",
    "Husqvarna",
    "Gas Gas",
    "Beta",
    "Sherco",
    "TM Racing",
];

/// Oldest model year the spin operation samples.
pub const MIN_YEAR: i32 = 1970;
