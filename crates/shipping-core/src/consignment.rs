// crates/shipping-core/src/consignment.rs

use serde::{Deserialize, Serialize};

/// A shipment of one or more containers bound for a vessel.
///
/// The service stores and returns consignments exactly as received. No field
/// is interpreted, validated, or assigned on the way through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consignment {
    /// Caller-supplied identifier. Not checked for uniqueness.
    pub id: String,
    /// Free-form description of the cargo.
    pub description: String,
    /// Total weight.
    pub weight: i32,
    /// Containers making up the consignment.
    pub containers: Vec<Container>,
    /// Vessel the consignment is assigned to.
    pub vessel_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    pub id: String,
    pub customer_id: String,
    pub origin: String,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let c: Consignment =
            serde_json::from_str(r#"{"id":"x1","weight":55000}"#).unwrap();
        assert_eq!(c.id, "x1");
        assert_eq!(c.weight, 55000);
        assert!(c.description.is_empty());
        assert!(c.containers.is_empty());
        assert!(c.vessel_id.is_empty());
    }

    #[test]
    fn test_nested_containers_deserialize() {
        let json = r#"{
            "id": "x2",
            "description": "Pallets",
            "weight": 1200,
            "containers": [
                {"id": "c1", "customer_id": "cust-9", "origin": "Manchester", "user_id": "u-1"}
            ],
            "vessel_id": "vessel001"
        }"#;
        let c: Consignment = serde_json::from_str(json).unwrap();
        assert_eq!(c.containers.len(), 1);
        assert_eq!(c.containers[0].origin, "Manchester");
        assert_eq!(c.vessel_id, "vessel001");
    }

    #[test]
    fn test_empty_object_is_well_formed() {
        let c: Consignment = serde_json::from_str("{}").unwrap();
        assert_eq!(c, Consignment::default());
    }
}
