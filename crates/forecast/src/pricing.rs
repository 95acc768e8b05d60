//! Estimated unit prices used to cost predicted quantities.
//!
//! Prices are in rupees per the unit encoded in the material name.

use crate::taxonomy::PRICE_SUFFIX;

/// Unit price of a derived `*_price` line item (the quantity is already a cost).
pub const DERIVED_PRICE_UNIT_COST: f64 = 1.0;

/// Catalogue of estimated unit prices.
pub const UNIT_PRICES: &[(&str, f64)] = &[
    ("washers_qty", 5.0),
    ("CT_units", 35_000.0),
    ("PT_units", 30_000.0),
    ("min_diesel_litre", 95.0),
    ("earth_wire_km", 100_000.0),
    ("converter_transformer_oil_liters", 250.0),
    ("curing_compound_liters", 150.0),
    ("formwork_oil_liters", 100.0),
    ("lubrication_grease_kg", 200.0),
    ("binding_wire_kg", 65.0),
    ("arcing_horn_units", 700.0),
    ("guy_rope_m", 75.0),
    ("tower_steel_kg", 68.0),
    ("bolts_nuts_qty", 25.0),
    ("gravel_tons", 1_500.0),
    ("circuit_breaker_units", 50_000.0),
    ("control_cable_m", 150.0),
    ("paint_liters", 350.0),
    ("isolator_units", 25_000.0),
    ("busbar_m", 800.0),
    ("harmonic_filter_units", 45_000.0),
    ("vibration_dampers_units", 1_200.0),
    ("backfill_soil_cum", 300.0),
    ("switchgear_units", 40_000.0),
    ("cement_bags", 360.0),
    ("hardware_fittings_units", 1_500.0),
    ("spacers_units", 500.0),
    ("excavated_soil_cum", 50.0),
    ("shuttering_steel_sqm", 500.0),
    ("clamps_units", 800.0),
    ("jumpers_m", 1_000.0),
    ("conductor_km", 500_000.0),
    ("water_liters", 5.0),
    ("extra_insulator_units", 2_500.0),
    ("OPGW_km", 200_000.0),
    ("galvanized_coating_kg", 30.0),
    ("concrete_mix_cum", 5_000.0),
    ("spare_bolts_kg", 80.0),
    ("spare_clamps_units", 700.0),
    ("spare_conductor_m", 500.0),
    ("reinforcement_steel_kg", 60.0),
    ("packing_material_kg", 100.0),
    ("ladder_units", 4_000.0),
    ("insulator_discs_units", 800.0),
    ("spare_OPGW_m", 300.0),
    ("DC_cable_km", 80_000.0),
    ("earthing_rod_units", 1_500.0),
    ("stay_wire_kg", 70.0),
    ("cross_arm_units", 15_000.0),
    ("thyristor_valve_units", 50_000_000.0),
    ("transformer_oil_liters", 250.0),
    ("tower_parts_units", 1_000.0),
    ("safety_equipment_units", 500.0),
    ("spare_hardware_kg", 80.0),
    ("sand_tons", 1_000.0),
    ("smoothing_reactor_units", 100_000.0),
    ("shuttering_wood_sqm", 400.0),
    ("aggregate_tons", 1_800.0),
    ("earthing_cable_m", 120.0),
    ("voltage_kv", 10_000.0),
    ("duration_months", 10_000.0),
    ("angle_steel_sections_kg", 65.0),
    ("tower_legs_kg", 65.0),
    ("tower_body_members_kg", 65.0),
    ("extension_pieces_kg", 65.0),
    ("pack_plates_kg", 65.0),
    ("environment_charges_lakhs", 100_000.0),
];

fn catalogue_price(name: &str) -> Option<f64> {
    UNIT_PRICES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, price)| *price)
}

/// Strip a trailing parenthesised unit: `"cement_bags (bags)"` → `"cement_bags"`.
fn strip_unit(name: &str) -> Option<&str> {
    let trimmed = name.trim_end();
    if !trimmed.ends_with(')') {
        return None;
    }
    let open = trimmed.rfind(" (")?;
    Some(&trimmed[..open])
}

/// Estimated unit cost of a material.
///
/// `*_price` items cost [`DERIVED_PRICE_UNIT_COST`]; otherwise the catalogue is
/// consulted, first verbatim then without a trailing unit; unknown names cost `0`.
pub fn unit_cost(name: &str) -> f64 {
    if name.ends_with(PRICE_SUFFIX) {
        return DERIVED_PRICE_UNIT_COST;
    }
    catalogue_price(name)
        .or_else(|| strip_unit(name).and_then(catalogue_price))
        .unwrap_or(0.0)
}
