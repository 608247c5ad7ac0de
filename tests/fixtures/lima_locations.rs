//! Approximate Lima locations for realistic test fixtures.
//!
//! Coordinates are rounded to four decimals; they are close enough to the
//! real places for intra-city distance comparisons.

#![allow(dead_code)]

use route_planner::Stop;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub code: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(code: &'static str, name: &'static str, lat: f64, lng: f64) -> Self {
        Self { code, name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn to_stop(&self) -> Stop {
        Stop::new(self.code, self.name, self.lat, self.lng)
    }
}

// ============================================================================
// Salesperson starting points
// ============================================================================

pub const DEPOTS: &[Location] = &[
    Location::new("V01", "Plaza de Armas", -12.0464, -77.0300),
    Location::new("V02", "Parque Kennedy", -12.1211, -77.0297),
    Location::new("V03", "Jockey Plaza", -12.0853, -76.9767),
];

// ============================================================================
// Miraflores customers
// ============================================================================

pub const MIRAFLORES: &[Location] = &[
    Location::new("C101", "Bodega Larco", -12.1254, -77.0301),
    Location::new("C102", "Minimarket Pardo", -12.1166, -77.0410),
    Location::new("C103", "Abarrotes Benavides", -12.1280, -77.0220),
    Location::new("C104", "Tienda Angamos", -12.1130, -77.0270),
    Location::new("C105", "Market Malecon", -12.1310, -77.0370),
    Location::new("C106", "Bodega Reducto", -12.1230, -77.0240),
    Location::new("C107", "Tienda Arequipa", -12.1100, -77.0330),
    Location::new("C108", "Minimarket Shell", -12.1200, -77.0350),
];

// ============================================================================
// Surco customers
// ============================================================================

pub const SURCO: &[Location] = &[
    Location::new("C201", "Bodega Primavera", -12.1110, -76.9890),
    Location::new("C202", "Minimarket Higuereta", -12.1290, -76.9990),
    Location::new("C203", "Tienda Caminos del Inca", -12.1190, -76.9860),
    Location::new("C204", "Abarrotes Chacarilla", -12.1110, -76.9950),
    Location::new("C205", "Market Monterrico", -12.1030, -76.9700),
    Location::new("C206", "Bodega Benavides Este", -12.1330, -76.9830),
];

/// Customers from every district, in fixture order.
pub fn all_customers() -> Vec<Stop> {
    MIRAFLORES.iter().chain(SURCO.iter()).map(Location::to_stop).collect()
}
