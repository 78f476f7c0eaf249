pub mod mock;

use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Specifications {
    pub year: u16,
    pub fuel: String,
    pub transmission: String,
    pub seats: u8,
    pub mileage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Owner {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub rating: f32,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub next_available: String,  // ISO date, informational only
}

/// A rental listing with everything the detail view shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub price: u32,              // Per day, whole currency units
    pub location: String,
    pub image: String,
    pub rating: f32,
    pub reviews: u32,
    pub features: Vec<String>,
    pub description: String,
    pub specifications: Specifications,
    pub owner: Owner,
    pub availability: Availability,
}

/// The subset of a vehicle shown in the listing table
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSummary {
    pub id: u32,
    pub name: String,
    pub vehicle_type: String,
    pub price: u32,
    pub location: String,
    pub rating: f32,
    pub available: bool,
}

impl From<&Vehicle> for VehicleSummary {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.name.clone(),
            vehicle_type: v.vehicle_type.clone(),
            price: v.price,
            location: v.location.clone(),
            rating: v.rating,
            available: v.availability.available,
        }
    }
}

/// Summaries of every listed vehicle
pub fn listings() -> Vec<VehicleSummary> {
    mock::vehicles().iter().map(VehicleSummary::from).collect()
}

/// Look up a full vehicle record by id
pub fn find(id: u32) -> Option<Vehicle> {
    mock::vehicles().into_iter().find(|v| v.id == id)
}

/// Fetch a vehicle after an artificial delay.
///
/// Stands in for a remote lookup: there is no cancellation or retry, the
/// caller simply ignores results it no longer wants.
pub async fn fetch_vehicle(id: u32, delay: Duration) -> Option<Vehicle> {
    tracing::debug!("Fetching vehicle {} (simulated latency {:?})", id, delay);
    tokio::time::sleep(delay).await;

    let vehicle = find(id);
    if vehicle.is_none() {
        tracing::warn!("Vehicle {} not found", id);
    }
    vehicle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listings_match_records() {
        let listings = listings();
        assert!(!listings.is_empty());
        for summary in &listings {
            let vehicle = find(summary.id).expect("listed vehicle should exist");
            assert_eq!(vehicle.price, summary.price);
            assert_eq!(vehicle.availability.available, summary.available);
        }
    }

    #[test]
    fn test_find_unknown_id() {
        assert!(find(9999).is_none());
    }

    #[test]
    fn test_vehicle_json_shape() {
        let vehicle = find(1).unwrap();
        let json = serde_json::to_value(&vehicle).unwrap();

        assert_eq!(json["type"], "Sedan");
        assert_eq!(json["availability"]["nextAvailable"], vehicle.availability.next_available);
        assert!(json["owner"]["verified"].is_boolean());
    }

    #[tokio::test]
    async fn test_fetch_vehicle_waits_then_resolves() {
        let started = std::time::Instant::now();
        let vehicle = fetch_vehicle(1, Duration::from_millis(30)).await;

        assert!(vehicle.is_some());
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(fetch_vehicle(42, Duration::ZERO).await.is_none());
    }
}
