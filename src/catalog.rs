//! Throwable item catalog
//!
//! Static item data plus the pure mapping from item properties to the
//! parameters the simulation uses. Visual data (scale, tint, silhouette)
//! lives on the definition so nothing downstream has to switch on item ids.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Item used whenever an identifier does not resolve
pub const DEFAULT_ITEM: &str = "hammer";

/// One filled primitive of an item silhouette, in texture space (y down)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapePart {
    Rect {
        min: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Convex polygon, drawn as a triangle fan
    Polygon { points: Vec<Vec2>, color: [f32; 4] },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

/// How an item is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemVisual {
    /// Scale applied to the square item texture
    pub scale: f32,
    /// Flat color for placeholder rendering
    pub tint: [f32; 4],
    /// Silhouette parts, back to front
    #[serde(default)]
    pub parts: Vec<ShapePart>,
}

/// Immutable physical description of a throwable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Mass seed (kg)
    pub weight: f32,
    /// Air resistance coefficient
    pub drag: f32,
    /// Normalized center of mass in [0,1] x [0,1]
    pub center_of_mass: Vec2,
    /// Base spin (degrees/s)
    pub rotation_speed: f32,
    /// Restitution in [0,1]
    pub bounciness: f32,
    pub visual: ItemVisual,
}

/// Simulation parameters derived from an item, recomputed every throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub mass: f32,
    pub linear_drag: f32,
    pub angular_drag: f32,
    /// Degrees/s, before launch jitter
    pub angular_velocity: f32,
    /// Body origin shift in pixels
    pub center_of_mass_offset: Vec2,
    /// Displayed edge length of the item in pixels
    pub sprite_extent: f32,
    pub bounciness: f32,
}

/// Derive simulation parameters from an item definition.
///
/// Pure and deterministic: jitter is applied at launch, never here.
pub fn derive_parameters(item: &ItemDefinition, texture_size: f32) -> SimulationParameters {
    let sprite_extent = texture_size * item.visual.scale;
    SimulationParameters {
        mass: item.weight * 0.2,
        linear_drag: item.drag * 0.5,
        angular_drag: 0.1 + item.drag * 0.2,
        angular_velocity: item.rotation_speed,
        center_of_mass_offset: (item.center_of_mass - Vec2::splat(0.5)) * sprite_extent,
        sprite_extent,
        bounciness: item.bounciness,
    }
}

/// Entry for the selection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
}

/// Ordered, validated set of item definitions
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ItemDefinition>,
    default_index: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        let items = builtin_items();
        let default_index = items
            .iter()
            .position(|item| item.id == DEFAULT_ITEM)
            .unwrap_or(0);
        Self {
            items,
            default_index,
        }
    }
}

impl Catalog {
    /// Build a catalog, rejecting data that would break id resolution
    pub fn new(items: Vec<ItemDefinition>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|other| other.id == item.id) {
                return Err(ConfigError::DuplicateItem(item.id.clone()));
            }
            validate_item(item)?;
        }
        let default_index = items
            .iter()
            .position(|item| item.id == DEFAULT_ITEM)
            .ok_or_else(|| ConfigError::MissingDefault(DEFAULT_ITEM.to_string()))?;

        Ok(Self {
            items,
            default_index,
        })
    }

    /// Load a catalog from a JSON array of item definitions
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let items: Vec<ItemDefinition> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Resolve an item id. Unknown ids fall back to the default item.
    pub fn lookup(&self, id: &str) -> &ItemDefinition {
        match self.get(id) {
            Some(item) => item,
            None => {
                log::warn!(
                    "Item \"{}\" not found in catalog, falling back to {}",
                    id,
                    DEFAULT_ITEM
                );
                self.default_item()
            }
        }
    }

    /// Exact lookup without fallback
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn default_item(&self) -> &ItemDefinition {
        &self.items[self.default_index]
    }

    /// Items in declaration order
    pub fn list_available(&self) -> Vec<ItemSummary<'_>> {
        self.items
            .iter()
            .map(|item| ItemSummary {
                id: &item.id,
                name: &item.name,
                description: &item.description,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn validate_item(item: &ItemDefinition) -> Result<(), ConfigError> {
    let invalid = |field, reason: String| Err(ConfigError::Invalid { field, reason });

    if !(item.weight > 0.0) {
        return invalid("weight", format!("{} must be positive ({})", item.id, item.weight));
    }
    if !(item.drag >= 0.0) {
        return invalid("drag", format!("{} must not be negative ({})", item.id, item.drag));
    }
    if !(0.0..=1.0).contains(&item.bounciness) {
        return invalid(
            "bounciness",
            format!("{} must be within [0, 1] ({})", item.id, item.bounciness),
        );
    }
    let com = item.center_of_mass;
    if !(0.0..=1.0).contains(&com.x) || !(0.0..=1.0).contains(&com.y) {
        return invalid(
            "center_of_mass",
            format!("{} must be within [0, 1]^2 ({}, {})", item.id, com.x, com.y),
        );
    }
    if !(item.visual.scale > 0.0) {
        return invalid("visual.scale", format!("{} must be positive", item.id));
    }
    Ok(())
}

/// Convert 0xRRGGBB to an opaque RGBA color
fn hex(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        1.0,
    ]
}

fn rect(x: f32, y: f32, w: f32, h: f32, rgb: u32) -> ShapePart {
    ShapePart::Rect {
        min: Vec2::new(x, y),
        size: Vec2::new(w, h),
        color: hex(rgb),
    }
}

fn polygon(points: &[(f32, f32)], rgb: u32) -> ShapePart {
    ShapePart::Polygon {
        points: points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
        color: hex(rgb),
    }
}

fn circle(x: f32, y: f32, radius: f32, rgb: u32) -> ShapePart {
    ShapePart::Circle {
        center: Vec2::new(x, y),
        radius,
        color: hex(rgb),
    }
}

const WOOD: u32 = 0x8B4513;
const STEEL: u32 = 0x999999;

/// The five stock items, in selection order
pub fn builtin_items() -> Vec<ItemDefinition> {
    let rake_teeth = (0..5).map(|i| rect(25.0 + i as f32 * 12.0, 25.0, 6.0, 20.0, WOOD));

    vec![
        ItemDefinition {
            id: "hammer".into(),
            name: "Hammer".into(),
            description: "Medium weight with good aerodynamics".into(),
            weight: 5.0,
            drag: 0.1,
            center_of_mass: Vec2::new(0.7, 0.5),
            rotation_speed: 300.0,
            bounciness: 0.15,
            visual: ItemVisual {
                scale: 0.35,
                tint: hex(0x888888),
                parts: vec![
                    rect(40.0, 20.0, 50.0, 15.0, WOOD),
                    rect(10.0, 10.0, 40.0, 35.0, 0x888888),
                ],
            },
        },
        ItemDefinition {
            id: "rake".into(),
            name: "Rake".into(),
            description: "Lighter but with high air resistance".into(),
            weight: 3.0,
            drag: 0.25,
            center_of_mass: Vec2::new(0.3, 0.5),
            rotation_speed: 200.0,
            bounciness: 0.25,
            visual: ItemVisual {
                scale: 0.4,
                tint: hex(0xA0522D),
                parts: [
                    rect(45.0, 20.0, 15.0, 70.0, WOOD),
                    rect(20.0, 15.0, 65.0, 10.0, WOOD),
                ]
                .into_iter()
                .chain(rake_teeth)
                .collect(),
            },
        },
        ItemDefinition {
            id: "shovel".into(),
            name: "Shovel".into(),
            description: "Balanced weight and aerodynamics".into(),
            weight: 4.0,
            drag: 0.15,
            center_of_mass: Vec2::new(0.4, 0.5),
            rotation_speed: 250.0,
            bounciness: 0.2,
            visual: ItemVisual {
                scale: 0.4,
                tint: hex(0x708090),
                parts: vec![
                    rect(45.0, 10.0, 10.0, 50.0, WOOD),
                    polygon(&[(30.0, 60.0), (70.0, 60.0), (60.0, 90.0), (40.0, 90.0)], STEEL),
                ],
            },
        },
        ItemDefinition {
            id: "axe".into(),
            name: "Axe".into(),
            description: "Heavy with excellent aerodynamics".into(),
            weight: 6.0,
            drag: 0.05,
            center_of_mass: Vec2::new(0.8, 0.5),
            rotation_speed: 350.0,
            bounciness: 0.1,
            visual: ItemVisual {
                scale: 0.4,
                tint: hex(WOOD),
                parts: vec![
                    rect(45.0, 30.0, 10.0, 60.0, WOOD),
                    polygon(&[(45.0, 30.0), (20.0, 15.0), (15.0, 30.0), (40.0, 45.0)], STEEL),
                ],
            },
        },
        ItemDefinition {
            id: "flowerPot".into(),
            name: "Flower Pot".into(),
            description: "Light but fragile - might break on landing!".into(),
            weight: 2.0,
            drag: 0.3,
            center_of_mass: Vec2::new(0.5, 0.7),
            rotation_speed: 400.0,
            bounciness: 0.4,
            visual: ItemVisual {
                scale: 0.35,
                tint: hex(0xCD5C5C),
                parts: vec![
                    polygon(&[(35.0, 50.0), (65.0, 50.0), (60.0, 90.0), (40.0, 90.0)], 0xCD5C5C),
                    rect(48.0, 45.0, 4.0, 15.0, 0x228B22),
                    circle(40.0, 20.0, 8.0, 0xFF8C00),
                    circle(60.0, 20.0, 8.0, 0xFF8C00),
                    circle(40.0, 40.0, 8.0, 0xFF8C00),
                    circle(60.0, 40.0, 8.0, 0xFF8C00),
                    circle(50.0, 30.0, 10.0, 0xFFD700),
                ],
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ITEM_TEXTURE_SIZE;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::new(builtin_items()).expect("builtin items validate");
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.default_item().id, DEFAULT_ITEM);
    }

    #[test]
    fn test_derive_parameters_formulas() {
        let catalog = Catalog::default();
        for item in catalog.iter() {
            let params = derive_parameters(item, ITEM_TEXTURE_SIZE);
            assert_eq!(params.mass, item.weight * 0.2);
            assert_eq!(params.linear_drag, item.drag * 0.5);
            assert_eq!(params.angular_drag, 0.1 + item.drag * 0.2);
            assert_eq!(params.angular_velocity, item.rotation_speed);
            assert_eq!(params.bounciness, item.bounciness);
        }
    }

    #[test]
    fn test_center_of_mass_offset_in_pixels() {
        let catalog = Catalog::default();
        let hammer = catalog.lookup("hammer");
        let params = derive_parameters(hammer, 100.0);
        // 35px sprite, COM at 0.7 -> 0.2 * 35 = 7px right of center
        assert!((params.sprite_extent - 35.0).abs() < 1e-4);
        assert!((params.center_of_mass_offset.x - 7.0).abs() < 1e-4);
        assert!(params.center_of_mass_offset.y.abs() < 1e-4);

        let pot = catalog.lookup("flowerPot");
        let params = derive_parameters(pot, 100.0);
        assert!((params.center_of_mass_offset.y - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_derive_parameters_is_deterministic() {
        let catalog = Catalog::default();
        let axe = catalog.lookup("axe");
        assert_eq!(
            derive_parameters(axe, ITEM_TEXTURE_SIZE),
            derive_parameters(axe, ITEM_TEXTURE_SIZE)
        );
    }

    #[test]
    fn test_unknown_item_falls_back_to_hammer() {
        let catalog = Catalog::default();
        assert_eq!(catalog.lookup("trampoline").id, "hammer");
        assert_eq!(catalog.lookup("").id, "hammer");
        assert!(catalog.get("trampoline").is_none());
    }

    #[test]
    fn test_list_available_keeps_declaration_order() {
        let catalog = Catalog::default();
        let ids: Vec<_> = catalog.list_available().iter().map(|s| s.id).collect();
        assert_eq!(ids, ["hammer", "rake", "shovel", "axe", "flowerPot"]);
        assert_eq!(catalog.list_available()[4].name, "Flower Pot");
    }

    #[test]
    fn test_catalog_rejects_duplicates_and_missing_default() {
        let mut items = builtin_items();
        items.push(items[1].clone());
        assert!(matches!(
            Catalog::new(items),
            Err(ConfigError::DuplicateItem(id)) if id == "rake"
        ));

        let items: Vec<_> = builtin_items().into_iter().skip(1).collect();
        assert!(matches!(
            Catalog::new(items),
            Err(ConfigError::MissingDefault(_))
        ));

        assert!(matches!(Catalog::new(Vec::new()), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_catalog_rejects_out_of_range_properties() {
        let mut items = builtin_items();
        items[2].bounciness = 1.5;
        assert!(matches!(
            Catalog::new(items),
            Err(ConfigError::Invalid { field: "bounciness", .. })
        ));

        let mut items = builtin_items();
        items[0].center_of_mass = Vec2::new(-0.1, 0.5);
        assert!(matches!(
            Catalog::new(items),
            Err(ConfigError::Invalid { field: "center_of_mass", .. })
        ));
    }

    #[test]
    fn test_catalog_json_roundtrip_preserves_order() {
        let json = serde_json::to_string(&builtin_items()).expect("serialize");
        let catalog = Catalog::from_json(&json).expect("parse");
        assert_eq!(catalog.list_available(), Catalog::default().list_available());
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
