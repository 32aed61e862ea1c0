use crate::world::PolyFlags;

/// Surface material reported with a collision, used to pick impact sounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    Metal,
    Wood,
    #[default]
    Stone,
    Gravel,
    Water,
    Earth,
}

impl Material {
    /// Classify polygon flags. The first matching flag in the order
    /// metal, wood, stone, gravel, water, earth wins; stone otherwise.
    pub fn from_flags(flags: PolyFlags) -> Self {
        const PRECEDENCE: [(PolyFlags, Material); 6] = [
            (PolyFlags::METAL, Material::Metal),
            (PolyFlags::WOOD, Material::Wood),
            (PolyFlags::STONE, Material::Stone),
            (PolyFlags::GRAVEL, Material::Gravel),
            (PolyFlags::WATER, Material::Water),
            (PolyFlags::EARTH, Material::Earth),
        ];
        PRECEDENCE
            .iter()
            .find(|(flag, _)| flags.contains(*flag))
            .map_or(Material::Stone, |&(_, material)| material)
    }
}
