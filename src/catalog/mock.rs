//! Fabricated listings. Nothing here is persisted; every call builds fresh
//! records.

use super::{Availability, Owner, Specifications, Vehicle};

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: 1,
            name: "Toyota Camry 2023".to_string(),
            vehicle_type: "Sedan".to_string(),
            price: 45,
            location: "Downtown".to_string(),
            image: "https://images.pexels.com/photos/1592384/pexels-photo-1592384.jpeg".to_string(),
            rating: 4.8,
            reviews: 124,
            features: features(&["GPS Navigation", "Bluetooth", "Backup Camera", "Cruise Control", "USB Charging", "Air Conditioning"]),
            description: "Comfortable and fuel-efficient sedan, well suited to city driving and longer trips. \
                Regularly serviced and cleaned between rentals."
                .to_string(),
            specifications: Specifications {
                year: 2023,
                fuel: "Gasoline".to_string(),
                transmission: "Automatic".to_string(),
                seats: 5,
                mileage: "32 mpg".to_string(),
            },
            owner: Owner {
                name: "John Smith".to_string(),
                phone: "+1 (555) 123-4567".to_string(),
                email: "john.smith@example.com".to_string(),
                rating: 4.9,
                verified: true,
            },
            availability: Availability {
                available: true,
                next_available: "2024-01-15".to_string(),
            },
        },
        Vehicle {
            id: 2,
            name: "Ford F-150 2022".to_string(),
            vehicle_type: "Pickup".to_string(),
            price: 75,
            location: "Harbor District".to_string(),
            image: "https://images.pexels.com/photos/1149137/pexels-photo-1149137.jpeg".to_string(),
            rating: 4.6,
            reviews: 87,
            features: features(&["Tow Package", "4x4", "Bed Liner", "Bluetooth"]),
            description: "Full-size pickup for moving day, hauling materials or towing a small trailer.".to_string(),
            specifications: Specifications {
                year: 2022,
                fuel: "Gasoline".to_string(),
                transmission: "Automatic".to_string(),
                seats: 5,
                mileage: "20 mpg".to_string(),
            },
            owner: Owner {
                name: "Maria Lopez".to_string(),
                phone: "+1 (555) 987-6543".to_string(),
                email: "maria.lopez@example.com".to_string(),
                rating: 4.7,
                verified: false,
            },
            availability: Availability {
                available: false,
                next_available: "2024-02-01".to_string(),
            },
        },
        Vehicle {
            id: 3,
            name: "Tesla Model 3".to_string(),
            vehicle_type: "Electric".to_string(),
            price: 95,
            location: "Tech Park".to_string(),
            image: "https://images.pexels.com/photos/3729464/pexels-photo-3729464.jpeg".to_string(),
            rating: 4.9,
            reviews: 203,
            features: features(&["Autopilot", "Premium Audio", "Heated Seats", "Glass Roof", "Supercharging"]),
            description: "Quiet, quick and fully electric. Charging cable included.".to_string(),
            specifications: Specifications {
                year: 2023,
                fuel: "Electric".to_string(),
                transmission: "Automatic".to_string(),
                seats: 5,
                mileage: "358 mi range".to_string(),
            },
            owner: Owner {
                name: "Alex Chen".to_string(),
                phone: "+1 (555) 246-8100".to_string(),
                email: "alex.chen@example.com".to_string(),
                rating: 5.0,
                verified: true,
            },
            availability: Availability {
                available: true,
                next_available: "2024-01-10".to_string(),
            },
        },
    ]
}
