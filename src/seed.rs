//! Demo data set loaded at startup.

use chrono::{Duration, Utc};

use crate::models::{Item, Job, Material, Milestone, Vendor};

pub fn jobs() -> Vec<Job> {
    vec![
        Job::new("NPC-057", "Acme", "Packaging line upgrade"),
        Job::new("AEX-018", "Thorburn", "CNC scheduling dashboard"),
        Job::new("QTE-144", "BetaCo", "Procurement automation"),
    ]
}

pub fn milestones() -> Vec<Milestone> {
    let now = Utc::now();
    let record = |id: i64,
                  job_id: &str,
                  name: &str,
                  responsible: &str,
                  completion_date: Option<&str>,
                  note: &str,
                  age_secs: i64| Milestone {
        id,
        job_id: job_id.to_string(),
        name: name.to_string(),
        responsible_code: responsible.to_string(),
        is_complete: completion_date.is_some(),
        completion_date: completion_date.map(str::to_string),
        note: note.to_string(),
        updated_at: now - Duration::seconds(age_secs),
    };

    vec![
        record(101, "NPC-057", "Engineering Approved", "ENG01", None, "", 50),
        record(102, "NPC-057", "Material Ordered", "PUR02", Some("2026-01-20"), "PO sent", 40),
        record(201, "AEX-018", "Prototype UI", "DEV01", None, "", 30),
        record(
            202,
            "AEX-018",
            "API Integration",
            "DEV01",
            None,
            "Waiting for endpoint",
            20,
        ),
    ]
}

pub fn items() -> Vec<Item> {
    vec![
        Item::new("MTL-1001", "Steel Pipe 3in", Material::Metal),
        Item::new("MTL-2002", "Aluminum Sheet", Material::Metal),
        Item::new("PLS-3001", "PVC Connector", Material::Plastic),
        Item::new("PLS-3002", "ABS Fitting", Material::Plastic),
        Item::new("WOD-4001", "Oak Panel", Material::Wood),
    ]
}

pub fn vendors() -> Vec<Vendor> {
    vec![
        Vendor::new("V-QC-01", "Montreal Metals", "Montreal", "QC"),
        Vendor::new("V-QC-02", "Quebec Industrial", "Quebec City", "QC"),
        Vendor::new("V-ON-01", "Toronto Supply", "Toronto", "ON"),
        Vendor::new("V-BC-01", "Vancouver Plastics", "Vancouver", "BC"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeded_milestones_are_consistent() {
        assert!(milestones().iter().all(Milestone::is_consistent));
    }

    #[test]
    fn seeded_keys_are_unique() {
        let ids: HashSet<_> = milestones().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 4);
        let parts: HashSet<_> = items().into_iter().map(|i| i.part_number).collect();
        assert_eq!(parts.len(), 5);
        let vendors: HashSet<_> = vendors().into_iter().map(|v| v.vendor_code).collect();
        assert_eq!(vendors.len(), 4);
    }
}
