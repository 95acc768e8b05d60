//! Closed material taxonomy and its chart palette.

use serde::{Deserialize, Serialize};

/// Report category of a material line item.
///
/// Declaration order is the reporting order (`Ord` follows it).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Foundation")]
    Foundation,
    #[serde(rename = "Steel & Structure")]
    SteelAndStructure,
    #[serde(rename = "Electrical Equipment")]
    ElectricalEquipment,
    #[serde(rename = "Hardware & Fittings")]
    HardwareAndFittings,
    #[serde(rename = "Conductors & Wires")]
    ConductorsAndWires,
    #[serde(rename = "Cables")]
    Cables,
    #[serde(rename = "Chemicals")]
    Chemicals,
    #[serde(rename = "Mechanical")]
    Mechanical,
    #[serde(rename = "Environment")]
    Environment,
    /// Derived cost-only line items (`*_price`), not physical materials.
    #[serde(rename = "Estimate")]
    Estimate,
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Foundation,
        Category::SteelAndStructure,
        Category::ElectricalEquipment,
        Category::HardwareAndFittings,
        Category::ConductorsAndWires,
        Category::Cables,
        Category::Chemicals,
        Category::Mechanical,
        Category::Environment,
        Category::Estimate,
        Category::Miscellaneous,
    ];

    /// Human-readable label, as printed in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Foundation => "Foundation",
            Category::SteelAndStructure => "Steel & Structure",
            Category::ElectricalEquipment => "Electrical Equipment",
            Category::HardwareAndFittings => "Hardware & Fittings",
            Category::ConductorsAndWires => "Conductors & Wires",
            Category::Cables => "Cables",
            Category::Chemicals => "Chemicals",
            Category::Mechanical => "Mechanical",
            Category::Environment => "Environment",
            Category::Estimate => "Estimate",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    /// Chart bucket this category collapses into.
    pub fn display_bucket(&self) -> DisplayBucket {
        match self {
            Category::Foundation => DisplayBucket::Foundation,
            Category::SteelAndStructure => DisplayBucket::Steel,
            Category::ElectricalEquipment => DisplayBucket::Electrical,
            Category::HardwareAndFittings => DisplayBucket::Hardware,
            Category::ConductorsAndWires | Category::Cables => DisplayBucket::Cables,
            Category::Mechanical => DisplayBucket::Mechanical,
            Category::Environment => DisplayBucket::Environment,
            Category::Estimate => DisplayBucket::Estimate,
            Category::Miscellaneous => DisplayBucket::Miscellaneous,
            // no palette slot of its own
            Category::Chemicals => DisplayBucket::Others,
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed chart palette used to partition a report for visualisation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DisplayBucket {
    Environment,
    Miscellaneous,
    Electrical,
    Hardware,
    Foundation,
    Mechanical,
    Cables,
    Steel,
    Estimate,
    Others,
}

impl DisplayBucket {
    pub const ALL: [DisplayBucket; 10] = [
        DisplayBucket::Environment,
        DisplayBucket::Miscellaneous,
        DisplayBucket::Electrical,
        DisplayBucket::Hardware,
        DisplayBucket::Foundation,
        DisplayBucket::Mechanical,
        DisplayBucket::Cables,
        DisplayBucket::Steel,
        DisplayBucket::Estimate,
        DisplayBucket::Others,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DisplayBucket::Environment => "Environment",
            DisplayBucket::Miscellaneous => "Miscellaneous",
            DisplayBucket::Electrical => "Electrical",
            DisplayBucket::Hardware => "Hardware",
            DisplayBucket::Foundation => "Foundation",
            DisplayBucket::Mechanical => "Mechanical",
            DisplayBucket::Cables => "Cables",
            DisplayBucket::Steel => "Steel",
            DisplayBucket::Estimate => "Estimate",
            DisplayBucket::Others => "Others",
        }
    }

    /// Hex colour of the bucket's chart slice.
    pub fn color(&self) -> &'static str {
        match self {
            DisplayBucket::Environment => "#e63946",
            DisplayBucket::Miscellaneous => "#f4a261",
            DisplayBucket::Electrical => "#f1c40f",
            DisplayBucket::Hardware => "#2a9d8f",
            DisplayBucket::Foundation => "#264653",
            DisplayBucket::Mechanical => "#2ec4b6",
            DisplayBucket::Cables => "#00a6fb",
            DisplayBucket::Steel => "#003049",
            DisplayBucket::Estimate => "#4b32ff",
            DisplayBucket::Others => "#6d6875",
        }
    }
}

impl core::fmt::Display for DisplayBucket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn long_labels_collapse_to_short_buckets() {
        assert_eq!(Category::ElectricalEquipment.display_bucket(), DisplayBucket::Electrical);
        assert_eq!(Category::HardwareAndFittings.display_bucket(), DisplayBucket::Hardware);
        assert_eq!(Category::SteelAndStructure.display_bucket(), DisplayBucket::Steel);
        assert_eq!(Category::ConductorsAndWires.display_bucket(), DisplayBucket::Cables);
        assert_eq!(Category::Cables.display_bucket(), DisplayBucket::Cables);
        assert_eq!(Category::Chemicals.display_bucket(), DisplayBucket::Others);
    }

    #[test]
    fn palette_colours_are_distinct() {
        let mut colours: Vec<_> = DisplayBucket::ALL.iter().map(|b| b.color()).collect();
        colours.sort_unstable();
        colours.dedup();
        assert_eq!(colours.len(), DisplayBucket::ALL.len());
    }
}
