use std::collections::BTreeMap;

use anyhow::Context;
use serde::Serialize;

use crate::models::ServiceDescriptor;

// (filename, title, service id, hourly)
const BUILTIN: [(&str, &str, Option<u32>, bool); 17] = [
    ("bathroom.png", "Bathroom Deep Clean", Some(5), false),
    ("kitchen.png", "Kitchen Deep Clean", Some(3), false),
    ("carpet.png", "Carpet Cleaning", Some(7), false),
    ("afterbuilders.png", "After Builders Cleaning", Some(11), false),
    ("domestic.png", "Regular Domestic Clean", Some(8), false),
    ("deep.png", "One-Off Deep Clean", Some(9), false),
    ("tenancy.png", "End of Tenancy Cleaning", Some(6), false),
    ("ovenafter.png", "Oven Deep Clean", Some(4), false),
    ("furniture.png", "Upholstery Cleaning", Some(12), false),
    ("patio.png", "Patio & Decking Cleaning", Some(13), false),
    ("office.png", "Office Cleaning", Some(2), true),
    ("commercial.png", "Commercial Cleaning", Some(14), true),
    ("windows.png", "Window Cleaning", Some(10), false),
    ("emergency.png", "Emergency Cleaning", None, true),
    ("flooring.png", "Property Maintenance", None, true),
    ("turf.png", "Garden Maintenance", None, true),
    ("livingroom.png", "Regular Domestic Clean", Some(8), false),
];

/// Image filename to service lookup. Built once at startup and shared
/// read-only; keys are lower-case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    entries: BTreeMap<String, ServiceDescriptor>,
}

impl ServiceCatalog {
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(file, title, id, hourly)| {
                (
                    file.to_string(),
                    ServiceDescriptor {
                        title: title.to_string(),
                        service_id: *id,
                        is_hourly: *hourly,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let parsed: BTreeMap<String, ServiceDescriptor> =
            serde_json::from_str(raw).context("invalid service map JSON")?;
        let entries = parsed
            .into_iter()
            .map(|(file, svc)| (file.to_lowercase(), svc))
            .collect();
        Ok(Self { entries })
    }

    /// The built-in table, or the JSON file at `path` when one is configured.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read service map {path}"))?;
                Self::from_json(&raw)
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn lookup(&self, filename: &str) -> Option<&ServiceDescriptor> {
        self.entries.get(filename)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
