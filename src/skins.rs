use macroquad::prelude::*;

const BULKY_BLUE: Color = Color::new(0.0, 0.39, 1.0, 1.0);

/// A purchasable snake variant: cosmetics plus gameplay modifiers.
pub struct SkinDef {
    pub id: usize,
    pub name: &'static str,
    pub color: Color,
    pub start_len: usize,
    pub speed_bonus: i32,
    pub doubloon_mult: u32,
    pub price: u32,
}

// Id 0 is the free default and is always unlocked.
pub const CATALOG: [SkinDef; 4] = [
    SkinDef {
        id: 0,
        name: "Classic Green",
        color: GREEN,
        start_len: 3,
        speed_bonus: 0,
        doubloon_mult: 1,
        price: 0,
    },
    SkinDef {
        id: 1,
        name: "Speedy Red",
        color: RED,
        start_len: 3,
        speed_bonus: 3,
        doubloon_mult: 1,
        price: 100,
    },
    SkinDef {
        id: 2,
        name: "Bulky Blue",
        color: BULKY_BLUE,
        start_len: 5,
        speed_bonus: -1,
        doubloon_mult: 1,
        price: 200,
    },
    SkinDef {
        id: 3,
        name: "Golden",
        color: GOLD,
        start_len: 4,
        speed_bonus: 1,
        doubloon_mult: 2,
        price: 500,
    },
];

pub fn get(id: usize) -> Option<&'static SkinDef> {
    CATALOG.iter().find(|s| s.id == id)
}

/// Catalog in shop display order.
pub fn all() -> &'static [SkinDef] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_skin_is_free() {
        let default = get(0).unwrap();
        assert_eq!(default.price, 0);
    }

    #[test]
    fn ids_match_catalog_positions() {
        for (i, skin) in all().iter().enumerate() {
            assert_eq!(skin.id, i);
            assert!(skin.start_len >= 1);
            assert!(skin.doubloon_mult >= 1);
        }
    }

    #[test]
    fn unknown_id_is_absent() {
        assert!(get(99).is_none());
    }
}
