//! Material taxonomy classifier.
//!
//! Classification is total: every string resolves to exactly one [`Category`].
//! Line items come from the prediction service, whose vocabulary changes
//! independently of this table, so unknown names never fail.

use crate::category::Category;

/// Suffix marking derived, cost-only line items.
pub const PRICE_SUFFIX: &str = "_price";

/// Curated name → category table (exact, case-sensitive keys).
pub const MATERIAL_TAXONOMY: &[(&str, Category)] = &[
    // foundation
    ("cement_bags", Category::Foundation),
    ("concrete_mix_cum", Category::Foundation),
    ("sand_tons", Category::Foundation),
    ("aggregate_tons", Category::Foundation),
    ("backfill_soil_cum (m3)", Category::Foundation),
    ("excavated_soil_cum (m3)", Category::Foundation),
    ("gravel_tons", Category::Foundation),
    // steel
    ("tower_steel_kg", Category::SteelAndStructure),
    ("reinforcement_steel_kg", Category::SteelAndStructure),
    ("angle_steel_sections_kg", Category::SteelAndStructure),
    ("tower_legs_kg", Category::SteelAndStructure),
    ("tower_body_members_kg", Category::SteelAndStructure),
    ("extension_pieces_kg", Category::SteelAndStructure),
    ("pack_plates_kg", Category::SteelAndStructure),
    ("tower_parts_units", Category::SteelAndStructure),
    // electrical
    ("CT_units", Category::ElectricalEquipment),
    ("PT_units", Category::ElectricalEquipment),
    ("isolator_units", Category::ElectricalEquipment),
    ("circuit_breaker_units", Category::ElectricalEquipment),
    ("harmonic_filter_units", Category::ElectricalEquipment),
    ("smoothing_reactor_units", Category::ElectricalEquipment),
    ("thyristor_valve_units", Category::ElectricalEquipment),
    ("switchgear_units", Category::ElectricalEquipment),
    ("transformer_oil_liters (liters)", Category::ElectricalEquipment),
    ("converter_transformer_oil_liters", Category::ElectricalEquipment),
    // hardware
    ("bolts_nuts_qty", Category::HardwareAndFittings),
    ("washers_qty", Category::HardwareAndFittings),
    ("hardware_fittings_units", Category::HardwareAndFittings),
    ("clamps_units", Category::HardwareAndFittings),
    ("spare_clamps_units", Category::HardwareAndFittings),
    ("spacers_units", Category::HardwareAndFittings),
    ("insulator_discs_units", Category::HardwareAndFittings),
    ("extra_insulator_units", Category::HardwareAndFittings),
    ("arcing_horn_units", Category::HardwareAndFittings),
    // conductors
    ("conductor_km", Category::ConductorsAndWires),
    ("spare_conductor_m", Category::ConductorsAndWires),
    ("jumpers_m", Category::ConductorsAndWires),
    ("guy_rope_m", Category::ConductorsAndWires),
    ("earth_wire_km", Category::ConductorsAndWires),
    ("OPGW_km", Category::ConductorsAndWires),
    ("DC_cable_km", Category::ConductorsAndWires),
    ("earthing_cable_m", Category::ConductorsAndWires),
    ("stay_wire_kg", Category::ConductorsAndWires),
    // cables
    ("control_cable_m", Category::Cables),
    ("spare_OPGW_m (m)", Category::Cables),
    // chemicals
    ("curing_compound_liters", Category::Chemicals),
    ("formwork_oil_liters", Category::Chemicals),
    ("lubrication_grease_kg", Category::Chemicals),
    ("paint_liters", Category::Chemicals),
    ("water_liters", Category::Chemicals),
    ("binding_wire_kg", Category::Chemicals),
    // mechanical
    ("ladder_units", Category::Mechanical),
    ("packing_material_kg", Category::Mechanical),
    // environment
    ("environment_charges_lakhs", Category::Environment),
    // misc
    ("min_diesel_litre", Category::Miscellaneous),
];

/// Exact lookup in [`MATERIAL_TAXONOMY`].
pub fn lookup(name: &str) -> Option<Category> {
    MATERIAL_TAXONOMY
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, category)| *category)
}

/// Classify a material name.
///
/// First match wins:
/// 1. exact table entry,
/// 2. names ending in [`PRICE_SUFFIX`] are [`Category::Estimate`],
/// 3. everything else is [`Category::Miscellaneous`].
pub fn classify(name: &str) -> Category {
    if let Some(category) = lookup(name) {
        return category;
    }
    if name.ends_with(PRICE_SUFFIX) {
        return Category::Estimate;
    }
    Category::Miscellaneous
}
