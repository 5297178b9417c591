/// Click resolution against fixed screen regions of the viewer
use crate::projection::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: &'static str,
    pub height: &'static str,
    pub depth: &'static str,
}

/// Property sheet shown for a selected building element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementProperties {
    pub name: &'static str,
    pub kind: &'static str,
    pub material: &'static str,
    pub dimensions: Dimensions,
    pub area: &'static str,
    pub volume: &'static str,
    pub notes: &'static str,
}

pub const MAIN_ENTRANCE_DOOR: ElementProperties = ElementProperties {
    name: "Main Entrance Door",
    kind: "Single Door",
    material: "Solid Wood",
    dimensions: Dimensions {
        width: "900 mm",
        height: "2100 mm",
        depth: "45 mm",
    },
    area: "1.89 m²",
    volume: "0.085 m³",
    notes: "Fire-rated, includes hardware",
};

pub const EXTERIOR_WALL_SOUTH: ElementProperties = ElementProperties {
    name: "Exterior Wall - South",
    kind: "Curtain Wall",
    material: "Concrete with Steel Frame",
    dimensions: Dimensions {
        width: "12000 mm",
        height: "3000 mm",
        depth: "300 mm",
    },
    area: "36.0 m²",
    volume: "10.8 m³",
    notes: "Insulated, weatherproofed",
};

pub const GROUND_FLOOR_SLAB: ElementProperties = ElementProperties {
    name: "Ground Floor Slab",
    kind: "Concrete Slab",
    material: "Reinforced Concrete",
    dimensions: Dimensions {
        width: "12000 mm",
        height: "150 mm",
        depth: "8000 mm",
    },
    area: "96.0 m²",
    volume: "14.4 m³",
    notes: "Grade C30/37, reinforced with steel mesh",
};

/// Clickable screen regions, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickRegion {
    Door,
    Wall,
    Floor,
}

impl ClickRegion {
    pub fn properties(&self) -> &'static ElementProperties {
        match self {
            ClickRegion::Door => &MAIN_ENTRANCE_DOOR,
            ClickRegion::Wall => &EXTERIOR_WALL_SOUTH,
            ClickRegion::Floor => &GROUND_FLOOR_SLAB,
        }
    }
}

/// Map a canvas-space click to a region. Bounds are exclusive and only
/// depend on the canvas center, never on the current rotation.
pub fn hit_region(x: f64, y: f64, viewport: &Viewport) -> Option<ClickRegion> {
    let center = viewport.center();
    let (dx, dy) = (x - center.x, y - center.y);

    if dx > -50.0 && dx < 50.0 && dy > 50.0 && dy < 150.0 {
        Some(ClickRegion::Door)
    } else if dy > -100.0 && dy < 100.0 {
        Some(ClickRegion::Wall)
    } else if dy > 100.0 {
        Some(ClickRegion::Floor)
    } else {
        None
    }
}

pub fn resolve_click(x: f64, y: f64, viewport: &Viewport) -> Option<&'static ElementProperties> {
    hit_region(x, y, viewport).map(|region| region.properties())
}
